use randomdrops_config::{
    DropsConfig,
    drops::{CHANCE_PERCENT_RANGE, MAX_AMOUNT_RANGE},
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Mob chance must be between 0 and 100 percent, got {0}")]
    ChanceOutOfRange(i32),
    #[error("Max amount must be between 1 and 1000, got {0}")]
    MaxAmountOutOfRange(i32),
}

/// Runtime switches of the drop randomizer. Changes apply to assignments made
/// afterwards; blocks that already have a drop keep it.
#[derive(Clone, Debug, PartialEq)]
pub struct DropSettings {
    enabled: bool,
    mob_chance_percent: u8,
    mob_chance: f64,
    item_chance: f64,
    max_amount: u32,
}

impl Default for DropSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mob_chance_percent: 30,
            mob_chance: 0.30,
            item_chance: 0.70,
            max_amount: 10,
        }
    }
}

impl DropSettings {
    pub fn from_config(config: &DropsConfig) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        settings.set_enabled(config.enabled_on_start);
        settings.set_mob_chance_percent(config.mob_chance_percent)?;
        settings.set_max_amount(config.max_amount)?;
        Ok(settings)
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Probability in `[0, 1]` that a new assignment picks a creature.
    #[must_use]
    pub const fn mob_chance(&self) -> f64 {
        self.mob_chance
    }

    /// Always exactly `1 - mob_chance`.
    #[must_use]
    pub const fn item_chance(&self) -> f64 {
        self.item_chance
    }

    #[must_use]
    pub const fn mob_chance_percent(&self) -> u8 {
        self.mob_chance_percent
    }

    #[must_use]
    pub const fn item_chance_percent(&self) -> u8 {
        100 - self.mob_chance_percent
    }

    pub fn set_mob_chance_percent(&mut self, percent: i32) -> Result<(), SettingsError> {
        if !CHANCE_PERCENT_RANGE.contains(&percent) {
            return Err(SettingsError::ChanceOutOfRange(percent));
        }
        let percent = u8::try_from(percent).map_err(|_| SettingsError::ChanceOutOfRange(percent))?;
        self.mob_chance_percent = percent;
        self.mob_chance = f64::from(percent) / 100.0;
        self.item_chance = 1.0 - self.mob_chance;
        Ok(())
    }

    #[must_use]
    pub const fn max_amount(&self) -> u32 {
        self.max_amount
    }

    pub fn set_max_amount(&mut self, amount: i32) -> Result<(), SettingsError> {
        if !MAX_AMOUNT_RANGE.contains(&amount) {
            return Err(SettingsError::MaxAmountOutOfRange(amount));
        }
        self.max_amount =
            u32::try_from(amount).map_err(|_| SettingsError::MaxAmountOutOfRange(amount))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use randomdrops_config::DropsConfig;

    use super::{DropSettings, SettingsError};

    #[test]
    fn defaults_match_the_mod() {
        let settings = DropSettings::default();
        assert!(!settings.enabled());
        assert_eq!(settings.mob_chance_percent(), 30);
        assert_eq!(settings.max_amount(), 10);
        assert!((settings.mob_chance() - 0.30).abs() < f64::EPSILON);
        assert!((settings.item_chance() - 0.70).abs() < f64::EPSILON);
    }

    #[test]
    fn item_chance_is_complement() {
        let mut settings = DropSettings::default();
        for percent in 0..=100 {
            settings.set_mob_chance_percent(percent).unwrap();
            assert_eq!(settings.item_chance(), 1.0 - settings.mob_chance());
            assert_eq!(
                u32::from(settings.mob_chance_percent()) + u32::from(settings.item_chance_percent()),
                100
            );
        }
    }

    #[test]
    fn out_of_range_values_leave_state_untouched() {
        let mut settings = DropSettings::default();
        assert_eq!(
            settings.set_mob_chance_percent(101),
            Err(SettingsError::ChanceOutOfRange(101))
        );
        assert_eq!(
            settings.set_mob_chance_percent(-1),
            Err(SettingsError::ChanceOutOfRange(-1))
        );
        assert_eq!(
            settings.set_max_amount(0),
            Err(SettingsError::MaxAmountOutOfRange(0))
        );
        assert_eq!(
            settings.set_max_amount(1001),
            Err(SettingsError::MaxAmountOutOfRange(1001))
        );
        assert_eq!(settings, DropSettings::default());
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut settings = DropSettings::default();
        settings.set_max_amount(1).unwrap();
        assert_eq!(settings.max_amount(), 1);
        settings.set_max_amount(1000).unwrap();
        assert_eq!(settings.max_amount(), 1000);
        settings.set_mob_chance_percent(0).unwrap();
        assert_eq!(settings.mob_chance(), 0.0);
        settings.set_mob_chance_percent(100).unwrap();
        assert_eq!(settings.mob_chance(), 1.0);
        assert_eq!(settings.item_chance(), 0.0);
    }

    #[test]
    fn built_from_config() {
        let config = DropsConfig {
            enabled_on_start: true,
            mob_chance_percent: 55,
            max_amount: 3,
            ..Default::default()
        };
        let settings = DropSettings::from_config(&config).unwrap();
        assert!(settings.enabled());
        assert_eq!(settings.mob_chance_percent(), 55);
        assert_eq!(settings.max_amount(), 3);
    }
}
