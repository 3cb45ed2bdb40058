use bevy::math::Vec2;
use bevy::prelude::{Query, Res, Time};

use crate::components::{MoveSpeed, NavAgent, Position, PrevPosition, Velocity};
use crate::resources::MovementSettings;

/// Pure steering calculation that can be tested without an ECS runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCalculation {
    pub displacement: Vec2,
    pub should_move: bool,
    pub distance_to_target: f32,
    pub slowdown_factor: f32,
}

/// Configuration for one steering step
#[derive(Debug, Clone, Copy)]
pub struct StepConfig {
    pub speed: f32,
    pub stopping_distance: f32,
    pub slowdown_distance: f32,
    pub delta_time: f32,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            stopping_distance: 0.1,
            slowdown_distance: 2.0,
            delta_time: 1.0 / 60.0,
        }
    }
}

/// Calculate the displacement toward a target for one tick.
pub fn calculate_step(current: Vec2, target: Option<Vec2>, config: StepConfig) -> StepCalculation {
    let Some(target) = target else {
        return StepCalculation {
            displacement: Vec2::ZERO,
            should_move: false,
            distance_to_target: 0.0,
            slowdown_factor: 0.0,
        };
    };

    let direction = (target - current).normalize_or_zero();
    let distance = current.distance(target);

    if distance <= config.stopping_distance {
        return StepCalculation {
            displacement: Vec2::ZERO,
            should_move: false,
            distance_to_target: distance,
            slowdown_factor: 0.0,
        };
    }

    let max_step = config.speed * config.delta_time;

    // Ease in as the target gets close, and never overshoot it
    let slowdown_factor = (distance / config.slowdown_distance).min(1.0);
    let step = (max_step * slowdown_factor).min(distance);

    StepCalculation {
        displacement: direction * step,
        should_move: true,
        distance_to_target: distance,
        slowdown_factor,
    }
}

/// Write velocities steering each agent toward its current waypoint.
pub fn steer_along_paths(
    time: Res<Time>,
    settings: Res<MovementSettings>,
    mut units: Query<(&Position, &MoveSpeed, &NavAgent, &mut Velocity)>,
) {
    let delta_time = time.delta_secs();
    for (position, speed, agent, mut velocity) in units.iter_mut() {
        let config = StepConfig {
            speed: speed.0,
            stopping_distance: settings.stopping_distance.get(),
            slowdown_distance: settings.slowdown_distance.get(),
            delta_time,
        };
        let step = calculate_step(position.0, agent.path.current_waypoint(), config);
        velocity.0 = if step.should_move && delta_time > 0.0 {
            step.displacement / delta_time
        } else {
            Vec2::ZERO
        };
    }
}

/// Snapshot the previous position, then integrate velocity. The snapshot is
/// what the resolution pass uses to recover tunneled bodies.
pub fn integrate_positions(
    time: Res<Time>,
    mut units: Query<(&mut Position, &mut PrevPosition, &Velocity)>,
) {
    let delta_time = time.delta_secs();
    for (mut position, mut prev_position, velocity) in units.iter_mut() {
        prev_position.0 = position.0;
        position.0 += velocity.0 * delta_time;
    }
}
