// Normalized player record shared by every analysis module.
//
// Ingestion builds one `Player` per CSV row; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Field bounds
// ---------------------------------------------------------------------------

pub const AGE_RANGE: RangeInclusive<i64> = 15..=50;
pub const FORM_RANGE: RangeInclusive<i64> = 1..=8;
pub const STAMINA_RANGE: RangeInclusive<i64> = 0..=100;
pub const EXPERIENCE_RANGE: RangeInclusive<i64> = 0..=20;
pub const LEADERSHIP_RANGE: RangeInclusive<i64> = 0..=20;
pub const SKILL_RANGE: RangeInclusive<i64> = 0..=20;
pub const TSI_RANGE: RangeInclusive<i64> = 0..=(u32::MAX as i64);

/// Highest value any single skill can hold.
pub const MAX_SKILL: u8 = 20;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("salary must be a non-negative finite number, got {0}")]
    InvalidSalary(f64),
}

/// Check `value` against `range` and narrow it to the target integer type.
pub fn bounded<T: TryFrom<i64>>(
    field: &'static str,
    value: i64,
    range: &RangeInclusive<i64>,
) -> Result<T, PlayerError> {
    let err = || PlayerError::OutOfRange {
        field,
        value,
        min: *range.start(),
        max: *range.end(),
    };
    if !range.contains(&value) {
        return Err(err());
    }
    T::try_from(value).map_err(|_| err())
}

/// Salaries are any finite, non-negative amount.
pub fn checked_salary(salary: f64) -> Result<f64, PlayerError> {
    if salary.is_finite() && salary >= 0.0 {
        Ok(salary)
    } else {
        Err(PlayerError::InvalidSalary(salary))
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Field positions. Serialized by display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Goalkeeper")]
    GoalKeeper,
    #[serde(rename = "Central Defender")]
    CentralDefender,
    #[serde(rename = "Wing Back")]
    WingBack,
    #[serde(rename = "Inner Midfielder")]
    InnerMidfielder,
    #[serde(rename = "Winger")]
    Winger,
    #[serde(rename = "Forward")]
    Forward,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::GoalKeeper,
        Position::CentralDefender,
        Position::WingBack,
        Position::InnerMidfielder,
        Position::Winger,
        Position::Forward,
    ];

    /// Human-readable label, also used as the JSON representation.
    pub fn label(&self) -> &'static str {
        match self {
            Position::GoalKeeper => "Goalkeeper",
            Position::CentralDefender => "Central Defender",
            Position::WingBack => "Wing Back",
            Position::InnerMidfielder => "Inner Midfielder",
            Position::Winger => "Winger",
            Position::Forward => "Forward",
        }
    }

    /// Two-letter code used by the English CSV schema.
    pub fn code(&self) -> &'static str {
        match self {
            Position::GoalKeeper => "GK",
            Position::CentralDefender => "CD",
            Position::WingBack => "WB",
            Position::InnerMidfielder => "IM",
            Position::Winger => "WI",
            Position::Forward => "FW",
        }
    }

    /// Parse an English-schema code ("GK", "cd", ...).
    pub fn from_code(s: &str) -> Option<Self> {
        let s = s.trim();
        Position::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(s))
    }

    /// Lineup grouping: any label containing "Defender".
    ///
    /// Wing backs are deliberately not matched; the grouping is label-based.
    pub fn is_defender(&self) -> bool {
        self.label().contains("Defender")
    }

    /// Lineup grouping: any label containing "Midfielder".
    pub fn is_midfielder(&self) -> bool {
        self.label().contains("Midfielder")
    }

    pub fn is_forward(&self) -> bool {
        *self == Position::Forward
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// The six tracked skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Goalkeeping,
    Defending,
    Playmaking,
    Winger,
    Scoring,
    SetPieces,
}

impl Skill {
    pub const ALL: [Skill; 6] = [
        Skill::Goalkeeping,
        Skill::Defending,
        Skill::Playmaking,
        Skill::Winger,
        Skill::Scoring,
        Skill::SetPieces,
    ];

    /// Skills a weekly training session can target, in comparison order.
    pub const TRAINABLE: [Skill; 5] = [
        Skill::Playmaking,
        Skill::Defending,
        Skill::Scoring,
        Skill::Winger,
        Skill::Goalkeeping,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Goalkeeping => "goalkeeping",
            Skill::Defending => "defending",
            Skill::Playmaking => "playmaking",
            Skill::Winger => "winger",
            Skill::Scoring => "scoring",
            Skill::SetPieces => "set_pieces",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Skill::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
    }

    pub fn is_trainable(&self) -> bool {
        Skill::TRAINABLE.contains(self)
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per known skill; a skill absent from the source reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub goalkeeping: u8,
    pub defending: u8,
    pub playmaking: u8,
    pub winger: u8,
    pub scoring: u8,
    pub set_pieces: u8,
}

impl Skills {
    pub fn get(&self, skill: Skill) -> u8 {
        match skill {
            Skill::Goalkeeping => self.goalkeeping,
            Skill::Defending => self.defending,
            Skill::Playmaking => self.playmaking,
            Skill::Winger => self.winger,
            Skill::Scoring => self.scoring,
            Skill::SetPieces => self.set_pieces,
        }
    }

    pub fn set(&mut self, skill: Skill, value: u8) {
        let slot = match skill {
            Skill::Goalkeeping => &mut self.goalkeeping,
            Skill::Defending => &mut self.defending,
            Skill::Playmaking => &mut self.playmaking,
            Skill::Winger => &mut self.winger,
            Skill::Scoring => &mut self.scoring,
            Skill::SetPieces => &mut self.set_pieces,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, u8)> + '_ {
        Skill::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Largest single skill value.
    pub fn max_value(&self) -> u8 {
        self.iter().map(|(_, v)| v).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub position: Position,
    pub skills: Skills,
    pub salary: f64,
    /// Total Skill Index.
    pub tsi: u32,
    pub form: u8,
    pub stamina: u8,
    pub experience: u8,
    pub leadership: u8,
}

impl Player {
    /// Verify every numeric field sits inside its documented range.
    pub fn validate(&self) -> Result<(), PlayerError> {
        bounded::<u8>("age", i64::from(self.age), &AGE_RANGE)?;
        bounded::<u8>("form", i64::from(self.form), &FORM_RANGE)?;
        bounded::<u8>("stamina", i64::from(self.stamina), &STAMINA_RANGE)?;
        bounded::<u8>("experience", i64::from(self.experience), &EXPERIENCE_RANGE)?;
        bounded::<u8>("leadership", i64::from(self.leadership), &LEADERSHIP_RANGE)?;
        for (skill, value) in self.skills.iter() {
            bounded::<u8>(skill.name(), i64::from(value), &SKILL_RANGE)?;
        }
        checked_salary(self.salary)?;
        Ok(())
    }

    /// Best-fit position from skill magnitudes.
    ///
    /// Goalkeeping above 10 wins outright. Otherwise scoring, defending and
    /// winger must each strictly dominate the remaining candidates, in that
    /// order; inner midfield is the fallback.
    pub fn best_position(&self) -> Position {
        let s = &self.skills;
        if s.goalkeeping > 10 {
            return Position::GoalKeeper;
        }
        if s.scoring > s.defending.max(s.playmaking).max(s.winger) {
            Position::Forward
        } else if s.defending > s.playmaking.max(s.winger) {
            Position::CentralDefender
        } else if s.winger > s.playmaking {
            Position::Winger
        } else {
            Position::InnerMidfielder
        }
    }

    /// TSI per unit of salary; 0 for unpaid players.
    pub fn cost_benefit(&self) -> f64 {
        if self.salary == 0.0 {
            return 0.0;
        }
        f64::from(self.tsi) / self.salary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
