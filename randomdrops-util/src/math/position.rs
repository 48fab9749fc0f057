use std::fmt;

use serde::{Deserialize, Serialize};

use super::vector3::Vector3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// Aka Block Position
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn floored(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(
            x.floor() as i32,
            y.floor() as i32,
            z.floor() as i32,
        ))
    }

    /// Bottom centre of the block, where creatures are placed.
    pub fn to_f64(&self) -> Vector3<f64> {
        Vector3::new(
            f64::from(self.0.x) + 0.5,
            f64::from(self.0.y),
            f64::from(self.0.z) + 0.5,
        )
    }

    /// Centre of the block volume, where dropped items are placed.
    pub fn to_centered_f64(&self) -> Vector3<f64> {
        Vector3::new(
            f64::from(self.0.x) + 0.5,
            f64::from(self.0.y) + 0.5,
            f64::from(self.0.z) + 0.5,
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod test {
    use super::BlockPos;

    #[test]
    fn centres() {
        let pos = BlockPos::new(-1, 64, 3);
        let bottom = pos.to_f64();
        assert_eq!((bottom.x, bottom.y, bottom.z), (-0.5, 64.0, 3.5));
        let centre = pos.to_centered_f64();
        assert_eq!((centre.x, centre.y, centre.z), (-0.5, 64.5, 3.5));
    }

    #[test]
    fn floored_handles_negatives() {
        assert_eq!(BlockPos::floored(-0.2, 10.9, 3.0), BlockPos::new(-1, 10, 3));
    }
}
