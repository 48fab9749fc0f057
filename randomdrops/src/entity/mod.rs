use crossbeam::atomic::AtomicCell;
use randomdrops_data::EntityType;
use randomdrops_util::math::vector3::Vector3;

use crate::item::ItemStack;

pub mod player;

/// A creature living in a world.
pub struct Entity {
    pub entity_id: i32,
    pub entity_type: EntityType,
    pub pos: AtomicCell<Vector3<f64>>,
}

impl Entity {
    #[must_use]
    pub fn new(entity_id: i32, entity_type: EntityType, pos: Vector3<f64>) -> Self {
        Self {
            entity_id,
            entity_type,
            pos: AtomicCell::new(pos),
        }
    }
}

/// A stack lying on the ground.
#[derive(Clone, Debug)]
pub struct ItemEntity {
    pub entity_id: i32,
    pub stack: ItemStack,
    pub pos: Vector3<f64>,
}
