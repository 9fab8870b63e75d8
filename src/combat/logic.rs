use super::math::{
    calculate_damage, can_character_fight, roll_escape, roll_special_ability, AbilityEffect,
};
use super::types::Enemy;
use crate::character::{Character, Rewards};
use crate::errors::CombatError;
use rand::Rng;

/// What the player chose to do this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    SpecialAbility,
    Flee,
}

/// Things that happened during a turn, in order, for the battle log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerAttack {
        damage: u32,
    },
    AbilityDamage {
        ability: &'static str,
        damage: u32,
    },
    AbilityHeal {
        ability: &'static str,
        healed: u32,
    },
    AbilityMissed {
        ability: &'static str,
    },
    EscapeFailed,
    Escaped,
    EnemyAttack {
        damage: u32,
    },
    EnemyDefeated {
        rewards: Rewards,
    },
    PlayerDied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory(Rewards),
    Defeat,
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    Active,
    Ended(BattleOutcome),
}

/// Non-fatal way a battle can end. Defeat is reported as
/// [`CombatError::CharacterDied`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleResult {
    Victory(Rewards),
    Escaped,
}

/// One encounter between a character and an enemy.
///
/// The battle owns the enemy; the character is borrowed for each turn so the
/// caller keeps ownership of the record between rounds. Rewards are reported,
/// never applied.
#[derive(Debug, Clone)]
pub struct Battle {
    character_name: String,
    enemy: Enemy,
    state: BattleState,
    turn: u32,
}

impl Battle {
    /// Opens a battle. Fails with `CharacterDead` if the character has no health.
    pub fn start(character: &Character, enemy: Enemy) -> Result<Self, CombatError> {
        if !can_character_fight(character) {
            return Err(CombatError::CharacterDead(character.name.clone()));
        }

        log::info!(
            "battle started: {} (level {}) vs {}",
            character.name,
            character.level,
            enemy.name
        );

        Ok(Self {
            character_name: character.name.clone(),
            enemy,
            state: BattleState::Active,
            turn: 0,
        })
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == BattleState::Active
    }

    /// Number of player turns taken so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state {
            BattleState::Active => None,
            BattleState::Ended(outcome) => Some(outcome),
        }
    }

    /// Final result once the battle has ended, `Ok(None)` while it is still running.
    pub fn result(&self) -> Result<Option<BattleResult>, CombatError> {
        match self.state {
            BattleState::Active => Ok(None),
            BattleState::Ended(BattleOutcome::Victory(rewards)) => {
                Ok(Some(BattleResult::Victory(rewards)))
            }
            BattleState::Ended(BattleOutcome::Escaped) => Ok(Some(BattleResult::Escaped)),
            BattleState::Ended(BattleOutcome::Defeat) => {
                Err(CombatError::CharacterDied(self.character_name.clone()))
            }
        }
    }

    fn end(&mut self, outcome: BattleOutcome) {
        log::info!(
            "battle ended after {} turns: {:?} ({} vs {})",
            self.turn,
            outcome,
            self.character_name,
            self.enemy.name
        );
        self.state = BattleState::Ended(outcome);
    }

    pub fn player_turn(
        &mut self,
        character: &mut Character,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        if !self.is_active() {
            return Err(CombatError::CombatNotActive);
        }

        self.turn += 1;
        let mut events = Vec::new();

        match action {
            PlayerAction::Attack => {
                let damage = calculate_damage(character.strength, self.enemy.strength);
                self.enemy.take_damage(damage);
                events.push(CombatEvent::PlayerAttack { damage });
            }
            PlayerAction::SpecialAbility => {
                let ability = character.class.ability_name();
                match roll_special_ability(character, rng) {
                    AbilityEffect::Damage(damage) => {
                        self.enemy.take_damage(damage);
                        events.push(CombatEvent::AbilityDamage { ability, damage });
                    }
                    AbilityEffect::Heal(amount) => {
                        let healed = character.heal(amount);
                        events.push(CombatEvent::AbilityHeal { ability, healed });
                    }
                    AbilityEffect::Missed => {
                        events.push(CombatEvent::AbilityMissed { ability });
                    }
                }
            }
            PlayerAction::Flee => {
                if roll_escape(rng) {
                    events.push(CombatEvent::Escaped);
                    self.end(BattleOutcome::Escaped);
                    return Ok(events);
                }
                events.push(CombatEvent::EscapeFailed);
            }
        }

        log::debug!(
            "turn {}: {:?} -> {} at {}/{}",
            self.turn,
            action,
            self.enemy.name,
            self.enemy.health,
            self.enemy.max_health
        );

        if !self.enemy.is_alive() {
            let rewards = self.enemy.rewards();
            events.push(CombatEvent::EnemyDefeated { rewards });
            self.end(BattleOutcome::Victory(rewards));
        }

        Ok(events)
    }

    /// The enemy always uses a basic attack.
    pub fn enemy_turn(&mut self, character: &mut Character) -> Result<Vec<CombatEvent>, CombatError> {
        if !self.is_active() {
            return Err(CombatError::CombatNotActive);
        }

        let mut events = Vec::new();
        let damage = calculate_damage(self.enemy.strength, character.strength);
        character.health = character.health.saturating_sub(damage);
        events.push(CombatEvent::EnemyAttack { damage });

        log::debug!(
            "turn {}: {} hits for {} -> {} at {}/{}",
            self.turn,
            self.enemy.name,
            damage,
            character.name,
            character.health,
            character.max_health
        );

        if character.is_dead() {
            events.push(CombatEvent::PlayerDied);
            self.end(BattleOutcome::Defeat);
        }

        Ok(events)
    }

    /// Player turn, then the enemy's turn if the battle is still going.
    pub fn play_round(
        &mut self,
        character: &mut Character,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        let mut events = self.player_turn(character, action, rng)?;
        if self.is_active() {
            events.extend(self.enemy_turn(character)?);
        }
        Ok(events)
    }

    /// Plays rounds until the battle ends, asking `choose` for each action.
    ///
    /// Returns the victory rewards or an escape; a defeat is returned as
    /// `Err(CombatError::CharacterDied)`.
    pub fn run_to_completion(
        &mut self,
        character: &mut Character,
        rng: &mut impl Rng,
        mut choose: impl FnMut(&Character, &Enemy) -> PlayerAction,
    ) -> Result<BattleResult, CombatError> {
        loop {
            if let Some(result) = self.result().transpose() {
                return result;
            }
            let action = choose(&*character, &self.enemy);
            self.play_round(character, action, rng)?;
        }
    }
}
