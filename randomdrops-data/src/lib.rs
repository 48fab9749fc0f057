pub mod item {
    include!(concat!(env!("OUT_DIR"), "/item.rs"));
}

pub mod block {
    use crate::item::Item;

    include!(concat!(env!("OUT_DIR"), "/block.rs"));
}

pub mod entity;

pub use block::Block;
pub use entity::{EntityType, MobCategory};
pub use item::Item;

#[cfg(test)]
mod test {
    use super::{Block, EntityType, Item, MobCategory};

    #[test]
    fn registries_are_ordered_by_id() {
        assert!(Item::ALL.windows(2).all(|w| w[0].id < w[1].id));
        assert!(EntityType::ALL.windows(2).all(|w| w[0].id < w[1].id));
        assert!(Block::ALL.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn lookups_accept_namespaced_keys() {
        assert_eq!(Item::from_registry_key("minecraft:dirt"), Some(Item::DIRT));
        assert_eq!(Item::from_registry_key("dirt"), Some(Item::DIRT));
        assert_eq!(EntityType::from_name("minecraft:zombie"), Some(EntityType::ZOMBIE));
        assert_eq!(Block::from_registry_key("stone"), Some(Block::STONE));
        assert_eq!(Item::from_registry_key("not_an_item"), None);
    }

    #[test]
    fn player_and_projectiles_are_misc() {
        assert_eq!(EntityType::PLAYER.category, MobCategory::Misc);
        assert_eq!(EntityType::ARROW.category, MobCategory::Misc);
        assert_eq!(EntityType::WITHER.category, MobCategory::Monster);
        assert_eq!(EntityType::ENDER_DRAGON.category, MobCategory::Monster);
    }

    #[test]
    fn air_has_no_drop() {
        assert!(Block::AIR.is_air());
        assert!(Block::AIR.item.is_none());
        assert_eq!(Block::STONE.item, Some(Item::COBBLESTONE));
    }
}
