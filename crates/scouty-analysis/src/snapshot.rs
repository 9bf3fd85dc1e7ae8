// Squad-level overview: aggregates, strengths/weaknesses, lineup suggestion.

use scouty_core::player::{Player, Position, Skill};
use serde::Serialize;
use std::collections::BTreeMap;

/// Average skill above which the squad is considered strong in that area.
const STRENGTH_THRESHOLD: f64 = 12.0;
/// Average skill below which the squad is considered weak in that area.
const WEAKNESS_THRESHOLD: f64 = 10.0;
/// Mean age under which the squad counts as young.
const YOUNG_SQUAD_AGE: f64 = 24.0;

const LINEUP_DEFENDERS: usize = 4;
const LINEUP_MIDFIELDERS: usize = 4;
const LINEUP_FORWARDS: usize = 2;

/// (skill, strength label, weakness label, advice when weak)
const AREAS: [(Skill, &str, &str, &str); 3] = [
    (
        Skill::Defending,
        "Strong defense",
        "Weak defense",
        "Consider training defending or buying defenders",
    ),
    (
        Skill::Playmaking,
        "Good midfield control",
        "Weak midfield",
        "Focus on playmaking training",
    ),
    (
        Skill::Scoring,
        "Strong attack",
        "Weak attack",
        "Train scoring or invest in forwards",
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    /// Best goalkeeper's name, or "None" when the squad has none.
    pub goalkeeper: String,
    pub defenders: Vec<String>,
    pub midfielders: Vec<String>,
    pub forwards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotReport {
    pub total_players: usize,
    pub average_age: f64,
    pub total_salary: f64,
    pub total_tsi: u64,
    /// Player count keyed by position label.
    pub position_distribution: BTreeMap<String, usize>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub tactical_recommendations: Vec<String>,
    pub best_lineup: Lineup,
}

pub struct TeamSnapshot<'a> {
    players: &'a [Player],
}

impl<'a> TeamSnapshot<'a> {
    pub fn new(players: &'a [Player]) -> Self {
        TeamSnapshot { players }
    }

    pub fn generate_snapshot(&self) -> SnapshotReport {
        let weaknesses = self.weaknesses();
        SnapshotReport {
            total_players: self.players.len(),
            average_age: self.average_age(),
            total_salary: self.players.iter().map(|p| p.salary).sum(),
            total_tsi: self.players.iter().map(|p| u64::from(p.tsi)).sum(),
            position_distribution: self.position_distribution(),
            strengths: self.strengths(),
            tactical_recommendations: tactical_recommendations(&weaknesses),
            weaknesses,
            best_lineup: self.best_lineup(),
        }
    }

    pub fn average_age(&self) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        let total: f64 = self.players.iter().map(|p| f64::from(p.age)).sum();
        total / self.players.len() as f64
    }

    /// Mean value of one skill across the squad; 0 for an empty squad.
    pub fn average_skill(&self, skill: Skill) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .players
            .iter()
            .map(|p| f64::from(p.skills.get(skill)))
            .sum();
        total / self.players.len() as f64
    }

    pub fn position_distribution(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for p in self.players {
            *counts.entry(p.position.label().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn strengths(&self) -> Vec<String> {
        let mut strengths: Vec<String> = AREAS
            .iter()
            .filter(|(skill, ..)| self.average_skill(*skill) > STRENGTH_THRESHOLD)
            .map(|(_, strong, ..)| strong.to_string())
            .collect();

        if self.average_age() < YOUNG_SQUAD_AGE {
            strengths.push("Young squad with potential".into());
        }

        if strengths.is_empty() {
            strengths.push("Balanced team".into());
        }
        strengths
    }

    pub fn weaknesses(&self) -> Vec<String> {
        let mut weaknesses: Vec<String> = AREAS
            .iter()
            .filter(|(skill, ..)| self.average_skill(*skill) < WEAKNESS_THRESHOLD)
            .map(|(_, _, weak, _)| weak.to_string())
            .collect();

        if !self
            .players
            .iter()
            .any(|p| p.position == Position::GoalKeeper)
        {
            weaknesses.push("Missing goalkeeper".into());
        }
        weaknesses
    }

    /// Top players by TSI per line: 1 goalkeeper, 4 defenders, 4 midfielders,
    /// 2 forwards. Short lines are returned short.
    pub fn best_lineup(&self) -> Lineup {
        let goalkeeper = top_by_tsi(self.players, |p| *p == Position::GoalKeeper, 1)
            .into_iter()
            .next()
            .unwrap_or_else(|| "None".to_string());

        Lineup {
            goalkeeper,
            defenders: top_by_tsi(self.players, Position::is_defender, LINEUP_DEFENDERS),
            midfielders: top_by_tsi(self.players, Position::is_midfielder, LINEUP_MIDFIELDERS),
            forwards: top_by_tsi(self.players, Position::is_forward, LINEUP_FORWARDS),
        }
    }
}

/// Names of the `count` highest-TSI players whose position passes `filter`.
fn top_by_tsi(players: &[Player], filter: impl Fn(&Position) -> bool, count: usize) -> Vec<String> {
    let mut group: Vec<&Player> = players.iter().filter(|p| filter(&p.position)).collect();
    // Stable sort keeps input order among equal TSI.
    group.sort_by(|a, b| b.tsi.cmp(&a.tsi));
    group.into_iter().take(count).map(|p| p.name.clone()).collect()
}

fn tactical_recommendations(weaknesses: &[String]) -> Vec<String> {
    let mut recommendations: Vec<String> = AREAS
        .iter()
        .filter(|(_, _, weak, _)| weaknesses.iter().any(|w| w == weak))
        .map(|(.., advice)| advice.to_string())
        .collect();

    if weaknesses.is_empty() {
        recommendations.push("Team is well balanced - focus on maintaining form".into());
    }
    recommendations
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scouty_core::player::Skills;

    fn player(name: &str, position: Position, age: u8, tsi: u32, skills: Skills) -> Player {
        Player {
            id: name.to_lowercase(),
            name: name.into(),
            age,
            position,
            skills,
            salary: 1000.0,
            tsi,
            form: 5,
            stamina: 50,
            experience: 5,
            leadership: 5,
        }
    }

    fn strong() -> Skills {
        Skills {
            defending: 14,
            playmaking: 14,
            scoring: 14,
            ..Skills::default()
        }
    }

    #[test]
    fn empty_squad_snapshot() {
        let report = TeamSnapshot::new(&[]).generate_snapshot();
        assert_eq!(report.total_players, 0);
        assert_eq!(report.average_age, 0.0);
        assert_eq!(report.total_tsi, 0);
        assert!(report.position_distribution.is_empty());
        assert_eq!(
            report.weaknesses,
            vec!["Weak defense", "Weak midfield", "Weak attack", "Missing goalkeeper"]
        );
        assert_eq!(report.best_lineup.goalkeeper, "None");
        assert!(report.best_lineup.defenders.is_empty());
    }

    #[test]
    fn aggregates_and_histogram() {
        let players = vec![
            player("Keeper", Position::GoalKeeper, 30, 3000, strong()),
            player("Def", Position::CentralDefender, 26, 2000, strong()),
            player("Def2", Position::CentralDefender, 28, 2500, strong()),
        ];
        let report = TeamSnapshot::new(&players).generate_snapshot();
        assert_eq!(report.total_players, 3);
        assert_eq!(report.average_age, 28.0);
        assert_eq!(report.total_salary, 3000.0);
        assert_eq!(report.total_tsi, 7500);
        assert_eq!(report.position_distribution.get("Central Defender"), Some(&2));
        assert_eq!(report.position_distribution.get("Goalkeeper"), Some(&1));
        assert_eq!(
            report.strengths,
            vec!["Strong defense", "Good midfield control", "Strong attack"]
        );
        assert!(report.weaknesses.is_empty());
        assert_eq!(
            report.tactical_recommendations,
            vec!["Team is well balanced - focus on maintaining form"]
        );
    }

    #[test]
    fn missing_goalkeeper_always_flagged() {
        let players = vec![player("Def", Position::CentralDefender, 26, 2000, strong())];
        let report = TeamSnapshot::new(&players).generate_snapshot();
        assert_eq!(report.weaknesses, vec!["Missing goalkeeper"]);
        // A weakness exists, but none with training advice attached.
        assert!(report.tactical_recommendations.is_empty());
    }

    #[test]
    fn young_weak_squad() {
        let players = vec![player("Kid", Position::Forward, 18, 100, Skills::default())];
        let snap = TeamSnapshot::new(&players);
        assert_eq!(snap.strengths(), vec!["Young squad with potential"]);
        let report = snap.generate_snapshot();
        assert_eq!(
            report.tactical_recommendations,
            vec![
                "Consider training defending or buying defenders",
                "Focus on playmaking training",
                "Train scoring or invest in forwards",
            ]
        );
    }

    #[test]
    fn balanced_fallback_when_no_strength() {
        let mid = Skills {
            defending: 11,
            playmaking: 11,
            scoring: 11,
            ..Skills::default()
        };
        let players = vec![player("Vet", Position::InnerMidfielder, 29, 100, mid)];
        assert_eq!(TeamSnapshot::new(&players).strengths(), vec!["Balanced team"]);
    }

    #[test]
    fn lineup_sorted_by_tsi_and_capped() {
        let mut players = Vec::new();
        for i in 0..6u32 {
            players.push(player(
                &format!("CD{i}"),
                Position::CentralDefender,
                25,
                1000 + i * 10,
                Skills::default(),
            ));
        }
        players.push(player("WB", Position::WingBack, 25, 9999, Skills::default()));
        players.push(player("FW1", Position::Forward, 25, 500, Skills::default()));
        players.push(player("GK1", Position::GoalKeeper, 25, 100, Skills::default()));
        players.push(player("GK2", Position::GoalKeeper, 25, 200, Skills::default()));

        let lineup = TeamSnapshot::new(&players).best_lineup();
        assert_eq!(lineup.goalkeeper, "GK2");
        assert_eq!(lineup.defenders, vec!["CD5", "CD4", "CD3", "CD2"]);
        assert!(lineup.midfielders.is_empty());
        assert_eq!(lineup.forwards, vec!["FW1"]);
    }
}
