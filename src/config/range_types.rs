use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A base-tile side length constrained to [0.5, 64.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct TileSize(f32);

impl TileSize {
    const MIN: f32 = 0.5;
    const MAX: f32 = 64.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::new(8.0)
    }
}

/// A movement speed value constrained to [0.1, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct MovementSpeed(f32);

impl MovementSpeed {
    const MIN: f32 = 0.1;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self::new(5.0)
    }
}

/// A unit collision radius constrained to [0.05, 16.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct UnitRadius(f32);

impl UnitRadius {
    const MIN: f32 = 0.05;
    const MAX: f32 = 16.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for UnitRadius {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// A stopping distance constrained to [0.01, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct StoppingDistance(f32);

impl StoppingDistance {
    const MIN: f32 = 0.01;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for StoppingDistance {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// A slowdown distance constrained to [0.1, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct SlowdownDistance(f32);

impl SlowdownDistance {
    const MIN: f32 = 0.1;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for SlowdownDistance {
    fn default() -> Self {
        Self::new(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_types_clamp_out_of_range_values() {
        assert_eq!(TileSize::new(0.0).get(), 0.5);
        assert_eq!(TileSize::new(1000.0).get(), 64.0);
        assert_eq!(MovementSpeed::new(-1.0).get(), 0.1);
        assert_eq!(UnitRadius::new(100.0).get(), 16.0);
        assert_eq!(StoppingDistance::new(0.0).get(), 0.01);
        assert_eq!(SlowdownDistance::new(0.0).get(), 0.1);
    }

    #[test]
    fn test_range_types_pass_in_range_values() {
        assert_eq!(TileSize::new(8.0).get(), 8.0);
        assert_eq!(MovementSpeed::new(12.5).get(), 12.5);
        assert_eq!(UnitRadius::new(0.75).get(), 0.75);
    }
}
