// Per-player insight extraction.
//
// Combines best-fit position, cost-benefit and an age-based potential tier
// into a single keep/train/sell recommendation for each player.

use scouty_core::player::{Player, Position};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Tiers and decisions
// ---------------------------------------------------------------------------

/// Coarse three-level rating used for both potential and training impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    /// Potential depends on age alone: under 20 high, under 25 medium.
    pub fn potential_from_age(age: u8) -> Self {
        if age < 20 {
            Tier::High
        } else if age < 25 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    Keep,
    Train,
    Sell,
}

/// First matching rule wins:
///
/// 1. over 30 and cost-benefit below 100 -> Sell
/// 2. high potential and under 22 -> Train
/// 3. cost-benefit above 200 -> Keep
/// 4. low potential and cost-benefit below 150 -> Sell
/// 5. otherwise Keep
pub fn recommend_decision(age: u8, cost_benefit: f64, potential: Tier) -> Decision {
    if age > 30 && cost_benefit < 100.0 {
        Decision::Sell
    } else if potential == Tier::High && age < 22 {
        Decision::Train
    } else if cost_benefit > 200.0 {
        Decision::Keep
    } else if potential == Tier::Low && cost_benefit < 150.0 {
        Decision::Sell
    } else {
        Decision::Keep
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingImpact {
    pub time_to_improve: &'static str,
    pub impact: Tier,
}

impl TrainingImpact {
    pub fn for_age(age: u8) -> Self {
        let (time_to_improve, impact) = if age < 20 {
            ("1-2 weeks", Tier::High)
        } else if age < 25 {
            ("2-4 weeks", Tier::Medium)
        } else {
            ("4+ weeks", Tier::Low)
        };
        TrainingImpact {
            time_to_improve,
            impact,
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerInsight {
    pub player_id: String,
    pub name: String,
    pub age: u8,
    pub best_position: Position,
    pub current_position: Position,
    /// Rounded to two decimals for display.
    pub cost_benefit: f64,
    pub potential: Tier,
    pub training_impact: TrainingImpact,
    pub recommendation: Decision,
    pub tsi: u32,
    pub salary: f64,
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

pub struct PlayerInsights<'a> {
    players: &'a [Player],
}

impl<'a> PlayerInsights<'a> {
    pub fn new(players: &'a [Player]) -> Self {
        PlayerInsights { players }
    }

    pub fn analyze_player(&self, player: &Player) -> PlayerInsight {
        let cost_benefit = player.cost_benefit();
        let potential = Tier::potential_from_age(player.age);

        PlayerInsight {
            player_id: player.id.clone(),
            name: player.name.clone(),
            age: player.age,
            best_position: player.best_position(),
            current_position: player.position,
            cost_benefit: round2(cost_benefit),
            potential,
            training_impact: TrainingImpact::for_age(player.age),
            recommendation: recommend_decision(player.age, cost_benefit, potential),
            tsi: player.tsi,
            salary: player.salary,
        }
    }

    /// One insight per player, in input order.
    pub fn analyze_all(&self) -> Vec<PlayerInsight> {
        self.players.iter().map(|p| self.analyze_player(p)).collect()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
