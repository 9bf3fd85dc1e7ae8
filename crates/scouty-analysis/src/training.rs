// Training projection: skill-ups over a horizon, value gained, and which
// training type pays off best for the current squad.

use scouty_core::player::{Player, Skill};
use serde::Serialize;
use tracing::debug;

/// TSI gained per skill point, as a fraction of current TSI.
const TSI_GAIN_PER_SKILL: f64 = 0.15;
/// Conversion from TSI to market value.
const TSI_TO_VALUE: f64 = 0.1;
/// Weeks reported when nobody is affected by a training type.
const NO_SKILLUP: u32 = 999;
/// Players at most this many weeks from a skill-up count as "near".
const NEAR_SKILLUP_WEEKS: u32 = 2;

// ---------------------------------------------------------------------------
// Age-band heuristics
// ---------------------------------------------------------------------------

/// Weeks of training needed per skill point at a given age.
pub fn weeks_per_skill_point(age: u8) -> f64 {
    if age < 20 {
        0.5
    } else if age < 25 {
        1.0
    } else {
        2.0
    }
}

/// Weeks until the next skill-up, from a (possibly averaged) age.
pub fn weeks_to_next_skillup(age: f64) -> u32 {
    if age < 20.0 {
        1
    } else if age < 25.0 {
        2
    } else {
        4
    }
}

/// current + floor(weeks / rate)
pub fn projected_skill(current: u8, weeks: u32, weeks_per_point: f64) -> u32 {
    u32::from(current) + (f64::from(weeks) / weeks_per_point).floor() as u32
}

/// Market value gained from `skill_delta` extra skill points.
pub fn value_increase(tsi: u32, skill_delta: i64) -> f64 {
    f64::from(tsi) * TSI_GAIN_PER_SKILL * skill_delta as f64 * TSI_TO_VALUE
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillProjection {
    pub player_id: String,
    pub name: String,
    pub current_skill: u8,
    pub projected_skill: u32,
    /// Weeks per skill point for this player's age.
    pub weeks_to_improve: f64,
    pub estimated_value_increase: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingTypeSummary {
    pub training: Skill,
    pub affected_players: usize,
    pub estimated_roi: f64,
    pub weeks_to_first_skillup: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRecommendation {
    pub best_training: Skill,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingComparison {
    pub weeks: u32,
    pub types: Vec<TrainingTypeSummary>,
    pub recommendation: TrainingRecommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearSkillup {
    pub player_id: String,
    pub name: String,
    pub current_skill: u8,
    pub weeks_to_skillup: u32,
    pub estimated_value_increase: f64,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

pub struct TrainingProjection<'a> {
    players: &'a [Player],
    training: Skill,
}

impl<'a> TrainingProjection<'a> {
    pub fn new(players: &'a [Player], training: Skill) -> Self {
        TrainingProjection { players, training }
    }

    /// Project the trained skill of every player `weeks` ahead.
    pub fn project_skill_ups(&self, weeks: u32) -> Vec<SkillProjection> {
        self.players
            .iter()
            .map(|p| {
                let current = p.skills.get(self.training);
                let rate = weeks_per_skill_point(p.age);
                let projected = projected_skill(current, weeks, rate);
                SkillProjection {
                    player_id: p.id.clone(),
                    name: p.name.clone(),
                    current_skill: current,
                    projected_skill: projected,
                    weeks_to_improve: rate,
                    estimated_value_increase: value_increase(
                        p.tsi,
                        i64::from(projected) - i64::from(current),
                    ),
                }
            })
            .collect()
    }

    /// Mean projected value gain per player for each trainable skill over
    /// `weeks`. Every player in the squad takes part in every training type,
    /// whatever their position. Ties go to the earliest type in
    /// `Skill::TRAINABLE`.
    pub fn compare_training_types(&self, weeks: u32) -> TrainingComparison {
        let types: Vec<TrainingTypeSummary> = Skill::TRAINABLE
            .into_iter()
            .map(|training| TrainingTypeSummary {
                training,
                affected_players: self.players.len(),
                estimated_roi: training_roi(self.players, training, weeks),
                weeks_to_first_skillup: mean_age_skillup(self.players),
            })
            .collect();

        let mut best = &types[0];
        for summary in &types[1..] {
            if summary.estimated_roi > best.estimated_roi {
                best = summary;
            }
        }
        debug!(
            "best training over {} weeks: {} (roi {:.2})",
            weeks, best.training, best.estimated_roi
        );
        let recommendation = TrainingRecommendation {
            best_training: best.training,
            reason: format!("Highest ROI: {:.2}", best.estimated_roi),
        };

        TrainingComparison {
            weeks,
            types,
            recommendation,
        }
    }

    /// Players at most two weeks from their next skill-up, soonest first.
    pub fn find_players_near_skillup(&self) -> Vec<NearSkillup> {
        let mut near: Vec<NearSkillup> = self
            .players
            .iter()
            .filter_map(|p| {
                let weeks = weeks_to_next_skillup(f64::from(p.age));
                (weeks <= NEAR_SKILLUP_WEEKS).then(|| NearSkillup {
                    player_id: p.id.clone(),
                    name: p.name.clone(),
                    current_skill: p.skills.get(self.training),
                    weeks_to_skillup: weeks,
                    estimated_value_increase: value_increase(p.tsi, 1),
                })
            })
            .collect();
        near.sort_by_key(|n| n.weeks_to_skillup);
        near
    }
}

fn training_roi(players: &[Player], training: Skill, weeks: u32) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    let total: f64 = players
        .iter()
        .map(|p| {
            let current = p.skills.get(training);
            let projected = projected_skill(current, weeks, weeks_per_skill_point(p.age));
            value_increase(p.tsi, i64::from(projected) - i64::from(current))
        })
        .sum();
    total / players.len() as f64
}

fn mean_age_skillup(players: &[Player]) -> u32 {
    if players.is_empty() {
        return NO_SKILLUP;
    }
    let total: f64 = players.iter().map(|p| f64::from(p.age)).sum();
    weeks_to_next_skillup(total / players.len() as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
