use bevy::prelude::*;

use crate::game_logic::movement::{integrate_positions, steer_along_paths};
use crate::game_logic::resolve::resolve_collisions;
use crate::pathfinding::{advance_waypoints, plan_paths};
use crate::resources::{MovementSettings, StaticGeometry};

/// Wires the fixed-tick movement pipeline: plan pending move orders, consume
/// reached waypoints, steer, integrate, then resolve overlaps. The chain is
/// strictly ordered; the resolution pass must see all integrated positions.
pub struct MovementCorePlugin;

impl Plugin for MovementCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementSettings>()
            .init_resource::<StaticGeometry>()
            .add_systems(
                FixedUpdate,
                (
                    plan_paths,
                    advance_waypoints,
                    steer_along_paths,
                    integrate_positions,
                    resolve_collisions,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        CollisionRadius, MobileUnit, MoveSpeed, NavAgent, Position, PrevPosition, Velocity,
    };
    use crate::pathfinding::MeshSet;
    use crate::pathfinding::occupancy::GridSpec;
    use crate::resources::WorldBounds;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, MovementCorePlugin));

        let spec = GridSpec::new(8, 8, 8.0).unwrap();
        let meshes = MeshSet::build(&spec, &[]).unwrap();
        app.insert_resource(WorldBounds::from_world_size(meshes.world_size()));
        app.insert_resource(meshes);
        app
    }

    fn spawn_unit(app: &mut App, position: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                MobileUnit,
                Position(position),
                PrevPosition(position),
                Velocity::default(),
                MoveSpeed::new(5.0),
                CollisionRadius::new(0.5),
                NavAgent::new(),
            ))
            .id()
    }

    #[test]
    fn test_tick_plans_path_for_move_order() {
        let mut app = test_app();
        let unit = spawn_unit(&mut app, Vec2::new(4.0, 4.0));

        app.world_mut()
            .get_mut::<NavAgent>(unit)
            .unwrap()
            .order_move(Vec2::new(60.0, 60.0));

        app.world_mut().run_schedule(FixedUpdate);

        let agent = app.world().get::<NavAgent>(unit).unwrap();
        assert!(agent.has_path());
        assert!(!agent.needs_replan());
    }

    #[test]
    fn test_tick_separates_overlapping_units() {
        let mut app = test_app();
        let left = spawn_unit(&mut app, Vec2::new(10.0, 10.0));
        let right = spawn_unit(&mut app, Vec2::new(10.6, 10.0));

        app.world_mut().run_schedule(FixedUpdate);

        let left_pos = app.world().get::<Position>(left).unwrap().0;
        let right_pos = app.world().get::<Position>(right).unwrap().0;
        // Combined radius is 1.0; the tick must have pushed them apart
        assert!(right_pos.x - left_pos.x > 0.6);
    }
}
