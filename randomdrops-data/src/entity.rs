/// Spawn group of an entity type, as used by the vanilla spawn caps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MobCategory {
    Monster,
    Creature,
    Ambient,
    Axolotls,
    UndergroundWaterCreature,
    WaterCreature,
    WaterAmbient,
    /// Projectiles, vehicles, effects, players and other non-mob entities.
    Misc,
}

impl MobCategory {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Monster => "monster",
            Self::Creature => "creature",
            Self::Ambient => "ambient",
            Self::Axolotls => "axolotls",
            Self::UndergroundWaterCreature => "underground_water_creature",
            Self::WaterCreature => "water_creature",
            Self::WaterAmbient => "water_ambient",
            Self::Misc => "misc",
        }
    }
}

include!(concat!(env!("OUT_DIR"), "/entity_type.rs"));
