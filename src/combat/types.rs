use crate::character::Rewards;
use crate::constants::{GOBLIN_MAX_LEVEL, ORC_MAX_LEVEL};
use crate::errors::CombatError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

impl EnemyKind {
    pub fn all() -> [EnemyKind; 3] {
        [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Dragon]
    }

    pub fn tag(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "goblin",
            EnemyKind::Orc => "orc",
            EnemyKind::Dragon => "dragon",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Dragon => "Dragon",
        }
    }

    /// Level band each kind is picked for.
    pub fn for_level(level: u32) -> Self {
        if level <= GOBLIN_MAX_LEVEL {
            EnemyKind::Goblin
        } else if level <= ORC_MAX_LEVEL {
            EnemyKind::Orc
        } else {
            EnemyKind::Dragon
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnemyKind {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnemyKind::all()
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| CombatError::InvalidTarget(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub kind: EnemyKind,
    pub health: u32,
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

impl Enemy {
    /// Builds a fresh enemy from the fixed stat table.
    pub fn new(kind: EnemyKind) -> Self {
        // (health, strength, magic, xp_reward, gold_reward)
        let (health, strength, magic, xp_reward, gold_reward) = match kind {
            EnemyKind::Goblin => (50, 8, 2, 25, 10),
            EnemyKind::Orc => (80, 12, 5, 50, 25),
            EnemyKind::Dragon => (200, 25, 15, 200, 100),
        };

        Self {
            name: kind.name().to_string(),
            kind,
            health,
            max_health: health,
            strength,
            magic,
            xp_reward,
            gold_reward,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn rewards(&self) -> Rewards {
        Rewards {
            xp: self.xp_reward,
            gold: self.gold_reward,
        }
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        (self.health as f64 / self.max_health as f64).clamp(0.0, 1.0)
    }
}

/// Creates an enemy from its type tag (`goblin`, `orc` or `dragon`).
pub fn create_enemy(enemy_type: &str) -> Result<Enemy, CombatError> {
    enemy_type.parse::<EnemyKind>().map(Enemy::new)
}

/// Picks the enemy matching a character level. Deterministic.
pub fn enemy_for_level(level: u32) -> Enemy {
    Enemy::new(EnemyKind::for_level(level))
}
