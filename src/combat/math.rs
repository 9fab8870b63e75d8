//! Pure combat formulas.
//!
//! Randomness is passed in so tests can force either branch of a roll.

use crate::character::{Character, CharacterClass};
use crate::constants::*;
use rand::Rng;

/// Outcome of a class special ability before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityEffect {
    /// Damage dealt to the enemy.
    Damage(u32),
    /// Health the caster tries to restore on themselves.
    Heal(u32),
    /// Rogue critical strike that did not land.
    Missed,
}

/// Basic attack damage.
///
/// # Arguments
/// * `attacker_strength` - Strength of the attacking side
/// * `defender_strength` - Strength of the defending side; a quarter of it is absorbed
///
/// # Returns
/// Damage of at least [`MIN_DAMAGE`]
pub fn calculate_damage(attacker_strength: u32, defender_strength: u32) -> u32 {
    attacker_strength
        .saturating_sub(defender_strength / DEFENSE_DIVISOR)
        .max(MIN_DAMAGE)
}

/// Resolves the caster's class ability. Ability damage ignores the target's strength.
pub fn roll_special_ability(character: &Character, rng: &mut impl Rng) -> AbilityEffect {
    match character.class {
        CharacterClass::Warrior => {
            AbilityEffect::Damage(character.strength.saturating_mul(WARRIOR_STRIKE_MULTIPLIER))
        }
        CharacterClass::Mage => {
            AbilityEffect::Damage(character.magic.saturating_mul(MAGE_FIREBALL_MULTIPLIER))
        }
        CharacterClass::Rogue => {
            if rng.gen_bool(ROGUE_CRIT_CHANCE) {
                AbilityEffect::Damage(character.strength.saturating_mul(ROGUE_CRIT_MULTIPLIER))
            } else {
                AbilityEffect::Missed
            }
        }
        CharacterClass::Cleric => AbilityEffect::Heal(CLERIC_HEAL_AMOUNT),
    }
}

pub fn roll_escape(rng: &mut impl Rng) -> bool {
    rng.gen_bool(ESCAPE_CHANCE)
}

/// A character can start a fight only while alive.
pub fn can_character_fight(character: &Character) -> bool {
    character.is_alive()
}
