use super::types::Character;
use crate::constants::*;
use crate::errors::CharacterError;

/// Experience needed to advance from `level` to the next one.
pub fn xp_for_next_level(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

impl Character {
    pub fn xp_to_next_level(&self) -> u32 {
        xp_for_next_level(self.level)
    }

    /// Adds experience and processes any level-ups.
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, xp: u32) -> Result<u32, CharacterError> {
        if self.is_dead() {
            return Err(CharacterError::CharacterDead(self.name.clone()));
        }

        self.experience = self.experience.saturating_add(xp);
        Ok(self.process_level_ups())
    }

    /// Runs the level-up cascade until experience is below the threshold.
    ///
    /// Each level consumes its threshold, raises max health, strength and
    /// magic, and fully restores health.
    pub fn process_level_ups(&mut self) -> u32 {
        let mut levels_gained = 0;

        loop {
            let xp_needed = xp_for_next_level(self.level);
            if xp_needed == 0 || self.experience < xp_needed {
                break;
            }

            self.experience -= xp_needed;
            self.level = self.level.saturating_add(1);
            self.max_health = self.max_health.saturating_add(LEVEL_UP_MAX_HEALTH);
            self.strength = self.strength.saturating_add(LEVEL_UP_STRENGTH);
            self.magic = self.magic.saturating_add(LEVEL_UP_MAGIC);
            self.health = self.max_health;
            levels_gained += 1;
        }

        if levels_gained > 0 {
            log::info!(
                "{} reached level {} (+{} levels)",
                self.name,
                self.level,
                levels_gained
            );
        }

        levels_gained
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u32) -> Result<(), CharacterError> {
        if self.gold < amount {
            return Err(CharacterError::InsufficientGold {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Restores health up to max health. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Brings a dead character back at half health (at least 1).
    /// Returns false when the character is still alive.
    pub fn revive(&mut self) -> bool {
        if self.is_alive() {
            return false;
        }
        self.health = (self.max_health / 2).max(1);
        log::info!("{} revived with {} health", self.name, self.health);
        true
    }
}
