//! Unit archetypes, stats and the leveling rule.

use serde::{Deserialize, Serialize};

/// Hard cap on unit health.
pub const MAX_HEALTH: f64 = 100.0;

/// Health restored by a level-up step or a level transition.
pub const LEVEL_HEAL: f64 = 80.0;

/// Units at or above this level no longer level up between rounds.
pub const VETERAN_LEVEL: u8 = 4;

/// Which side controls a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The human player.
    Player,
    /// The computer opponent.
    Computer,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

/// Fixed level-1 stats of an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    /// Attack at level 1.
    pub attack: u32,
    /// Defence at level 1.
    pub defence: u32,
    /// Cells a unit may travel per move.
    pub move_range: usize,
    /// Cells a unit may reach with an attack.
    pub attack_range: usize,
}

/// The six unit templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Balanced ranged player unit.
    Bowman,
    /// Fast melee player unit.
    Swordsman,
    /// Slow long-range player unit.
    Magician,
    /// Balanced ranged computer unit.
    Vampire,
    /// Fast melee computer unit.
    Undead,
    /// Slow long-range computer unit.
    Daemon,
}

/// Archetypes the player squad is drawn from.
pub const PLAYER_POOL: [Archetype; 3] = [Archetype::Bowman, Archetype::Swordsman, Archetype::Magician];

/// Archetypes the computer squad is drawn from.
pub const COMPUTER_POOL: [Archetype; 3] = [Archetype::Vampire, Archetype::Undead, Archetype::Daemon];

impl Archetype {
    /// Base stats and ranges of this archetype.
    #[must_use]
    pub const fn stats(self) -> BaseStats {
        match self {
            Archetype::Bowman | Archetype::Vampire => BaseStats {
                attack: 25,
                defence: 25,
                move_range: 2,
                attack_range: 2,
            },
            Archetype::Swordsman | Archetype::Undead => BaseStats {
                attack: 40,
                defence: 10,
                move_range: 4,
                attack_range: 1,
            },
            Archetype::Magician => BaseStats {
                attack: 10,
                defence: 40,
                move_range: 1,
                attack_range: 4,
            },
            Archetype::Daemon => BaseStats {
                attack: 10,
                defence: 10,
                move_range: 1,
                attack_range: 4,
            },
        }
    }

    /// Side this archetype fights for.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Archetype::Bowman | Archetype::Swordsman | Archetype::Magician => Side::Player,
            Archetype::Vampire | Archetype::Undead | Archetype::Daemon => Side::Computer,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Archetype::Bowman => "bowman",
            Archetype::Swordsman => "swordsman",
            Archetype::Magician => "magician",
            Archetype::Vampire => "vampire",
            Archetype::Undead => "undead",
            Archetype::Daemon => "daemon",
        }
    }
}

/// Display band for a unit's health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLevel {
    /// Below 15.
    Critical,
    /// Below 50.
    Normal,
    /// 50 and above.
    High,
}

/// A unit instance.
///
/// Side and ranges follow from the archetype; level, attack, defence and
/// health evolve over the game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Template this unit was built from.
    #[serde(rename = "type")]
    pub archetype: Archetype,
    /// Current level, starting at 1.
    pub level: u8,
    /// Attack stat.
    pub attack: u32,
    /// Defence stat.
    pub defence: u32,
    /// Remaining health in `(0, 100]` while on the board.
    pub health: f64,
}

impl Unit {
    /// Create a unit at the given level by applying `level - 1` level-up steps.
    ///
    /// Levels below 1 are treated as 1.
    #[must_use]
    pub fn new(archetype: Archetype, level: u8) -> Self {
        let stats = archetype.stats();
        let mut unit = Self {
            archetype,
            level: 1,
            attack: stats.attack,
            defence: stats.defence,
            health: 50.0,
        };
        for _ in 1..level {
            unit.level_up();
        }
        unit
    }

    /// Side controlling this unit.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.archetype.side()
    }

    /// Cells this unit may travel per move.
    #[must_use]
    pub const fn move_range(&self) -> usize {
        self.archetype.stats().move_range
    }

    /// Cells this unit may reach with an attack.
    #[must_use]
    pub const fn attack_range(&self) -> usize {
        self.archetype.stats().attack_range
    }

    /// Check if the unit still has health left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Apply one level-up step.
    ///
    /// Health is restored first; attack and defence then scale by
    /// `1.8 - health / 100` using the restored health, and never decrease.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.heal(LEVEL_HEAL);

        let factor = 1.8 - self.health / 100.0;
        let scaled = |stat: u32| (f64::from(stat) * factor).round().max(0.0) as u32;
        self.attack = self.attack.max(scaled(self.attack));
        self.defence = self.defence.max(scaled(self.defence));
    }

    /// Restore health, capped at [`MAX_HEALTH`].
    pub fn heal(&mut self, amount: f64) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    /// Subtract damage from health. Returns `true` if the unit died.
    pub fn take_damage(&mut self, damage: f64) -> bool {
        self.health -= damage;
        !self.is_alive()
    }

    /// Health band for the health bar.
    #[must_use]
    pub fn health_level(&self) -> HealthLevel {
        if self.health < 15.0 {
            HealthLevel::Critical
        } else if self.health < 50.0 {
            HealthLevel::Normal
        } else {
            HealthLevel::High
        }
    }

    /// One-line tooltip: level, attack, defence, health.
    #[must_use]
    pub fn info(&self) -> String {
        format!(
            "\u{1F396}{} \u{2694}{} \u{1F6E1}{} \u{2764}{}",
            self.level,
            self.attack,
            self.defence,
            self.health.round()
        )
    }
}
