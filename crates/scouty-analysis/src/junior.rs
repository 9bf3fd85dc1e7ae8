// Youth academy analysis: potential scoring, promotion candidates, training
// simulation and formation fit.

use scouty_core::player::{Player, Position, Skill, Skills};
use serde::Serialize;
use tracing::debug;

/// Juniors gain a skill point every half week of focused training.
const JUNIOR_WEEKS_PER_POINT: f64 = 0.5;
/// TSI to transfer-value conversion used for promotion estimates.
const PROMOTION_VALUE_PER_TSI: f64 = 10.0;
/// Points awarded for each line whose headcount fits a formation.
const LINE_FIT_POINTS: f64 = 30.0;
/// Cap on the defending-quality bonus in formation scoring.
const DEFENSE_BONUS_CAP: f64 = 10.0;

// ---------------------------------------------------------------------------
// Potential scoring
// ---------------------------------------------------------------------------

/// What to do with a junior, by potential score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JuniorAction {
    #[serde(rename = "Promote and Train")]
    PromoteAndTrain,
    Promote,
    Train,
    Release,
}

impl JuniorAction {
    /// Bands are checked high to low: >=70, >=50, >=30, otherwise release.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            JuniorAction::PromoteAndTrain
        } else if score >= 50.0 {
            JuniorAction::Promote
        } else if score >= 30.0 {
            JuniorAction::Train
        } else {
            JuniorAction::Release
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JuniorAction::PromoteAndTrain => "Promote and Train",
            JuniorAction::Promote => "Promote",
            JuniorAction::Train => "Train",
            JuniorAction::Release => "Release",
        }
    }

    pub fn is_promotion(&self) -> bool {
        matches!(self, JuniorAction::PromoteAndTrain | JuniorAction::Promote)
    }
}

/// Additive 0-100 score from age, best skill, TSI and form.
pub fn potential_score(junior: &Player) -> f64 {
    let age_points = match junior.age {
        0..=16 => 30.0,
        17 => 20.0,
        18 => 10.0,
        _ => 0.0,
    };
    let skill_points = (f64::from(junior.skills.max_value()) * 5.0).min(40.0);
    let tsi_points = if junior.tsi > 1000 {
        20.0
    } else if junior.tsi > 500 {
        10.0
    } else {
        0.0
    };
    let form_points = f64::from(junior.form) * 2.0;

    (age_points + skill_points + tsi_points + form_points).clamp(0.0, 100.0)
}

/// Rough main-squad value: TSI x 10, scaled by potential.
pub fn promotion_value(junior: &Player, score: f64) -> f64 {
    let multiplier = if score > 70.0 {
        2.0
    } else if score > 50.0 {
        1.5
    } else {
        1.0
    };
    f64::from(junior.tsi) * PROMOTION_VALUE_PER_TSI * multiplier
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JuniorAssessment {
    pub player_id: String,
    pub name: String,
    pub age: u8,
    pub potential_score: f64,
    pub best_position: Position,
    pub current_skills: Skills,
    pub recommendation: JuniorAction,
    pub estimated_promotion_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JuniorProjection {
    pub player_id: String,
    pub name: String,
    pub current_skill: u8,
    pub projected_skill: u32,
    pub improvement: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSimulation {
    pub training_type: Skill,
    pub weeks: u32,
    pub projections: Vec<JuniorProjection>,
}

/// Required headcount per line for a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formation {
    pub name: &'static str,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

pub const FORMATIONS: [Formation; 4] = [
    Formation {
        name: "4-4-2",
        defenders: 4,
        midfielders: 4,
        forwards: 2,
    },
    Formation {
        name: "3-5-2",
        defenders: 3,
        midfielders: 5,
        forwards: 2,
    },
    Formation {
        name: "4-3-3",
        defenders: 4,
        midfielders: 3,
        forwards: 3,
    },
    Formation {
        name: "5-3-2",
        defenders: 5,
        midfielders: 3,
        forwards: 2,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationFit {
    pub formation: &'static str,
    pub suitability_score: f64,
    pub can_field: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationComparison {
    pub formations: Vec<FormationFit>,
    pub recommendation: &'static str,
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

pub struct JuniorSquadAnalyzer<'a> {
    juniors: &'a [Player],
}

impl<'a> JuniorSquadAnalyzer<'a> {
    pub fn new(juniors: &'a [Player]) -> Self {
        JuniorSquadAnalyzer { juniors }
    }

    /// Assess every junior, highest potential first.
    pub fn analyze_potential(&self) -> Vec<JuniorAssessment> {
        let mut assessments: Vec<JuniorAssessment> = self
            .juniors
            .iter()
            .map(|j| {
                let score = potential_score(j);
                JuniorAssessment {
                    player_id: j.id.clone(),
                    name: j.name.clone(),
                    age: j.age,
                    potential_score: score,
                    best_position: j.best_position(),
                    current_skills: j.skills,
                    recommendation: JuniorAction::from_score(score),
                    estimated_promotion_value: promotion_value(j, score),
                }
            })
            .collect();
        assessments.sort_by(|a, b| b.potential_score.total_cmp(&a.potential_score));
        assessments
    }

    /// Up to `max` juniors whose band calls for promotion.
    pub fn recommend_promotions(&self, max: usize) -> Vec<JuniorAssessment> {
        let candidates: Vec<JuniorAssessment> = self
            .analyze_potential()
            .into_iter()
            .filter(|a| a.recommendation.is_promotion())
            .collect();
        debug!(
            "{} of {} juniors qualify for promotion, keeping {}",
            candidates.len(),
            self.juniors.len(),
            max.min(candidates.len())
        );
        candidates.into_iter().take(max).collect()
    }

    pub fn simulate_training_impact(&self, training: Skill, weeks: u32) -> TrainingSimulation {
        let gain = (f64::from(weeks) / JUNIOR_WEEKS_PER_POINT).floor() as u32;
        let projections = self
            .juniors
            .iter()
            .map(|j| {
                let current = j.skills.get(training);
                JuniorProjection {
                    player_id: j.id.clone(),
                    name: j.name.clone(),
                    current_skill: current,
                    projected_skill: u32::from(current) + gain,
                    improvement: gain,
                }
            })
            .collect();

        TrainingSimulation {
            training_type: training,
            weeks,
            projections,
        }
    }

    /// Score each fixed formation; the highest score wins, earliest on ties.
    pub fn compare_formations(&self) -> FormationComparison {
        let formations: Vec<FormationFit> = FORMATIONS
            .iter()
            .map(|f| FormationFit {
                formation: f.name,
                suitability_score: self.formation_suitability(f),
                can_field: self.can_field(f),
            })
            .collect();

        let mut best = &formations[0];
        for fit in &formations[1..] {
            if fit.suitability_score > best.suitability_score {
                best = fit;
            }
        }
        let recommendation = best.formation;

        FormationComparison {
            formations,
            recommendation,
        }
    }

    fn line_counts(&self) -> (usize, usize, usize) {
        (
            self.count_where(Position::is_defender),
            self.count_where(Position::is_midfielder),
            self.count_where(Position::is_forward),
        )
    }

    fn count_where(&self, f: impl Fn(&Position) -> bool) -> usize {
        self.juniors.iter().filter(|j| f(&j.position)).count()
    }

    fn formation_suitability(&self, formation: &Formation) -> f64 {
        let (defenders, midfielders, forwards) = self.line_counts();
        let mut score = 0.0;
        for (have, need) in [
            (defenders, formation.defenders),
            (midfielders, formation.midfielders),
            (forwards, formation.forwards),
        ] {
            if have >= need {
                score += LINE_FIT_POINTS;
            }
        }

        if defenders > 0 {
            let total: f64 = self
                .juniors
                .iter()
                .filter(|j| j.position.is_defender())
                .map(|j| f64::from(j.skills.defending))
                .sum();
            score += (total / defenders as f64 * 2.0).min(DEFENSE_BONUS_CAP);
        }
        score
    }

    fn can_field(&self, formation: &Formation) -> bool {
        let (defenders, midfielders, forwards) = self.line_counts();
        defenders >= formation.defenders
            && midfielders >= formation.midfielders
            && forwards >= formation.forwards
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn junior(id: &str, age: u8, position: Position, skills: Skills, tsi: u32, form: u8) -> Player {
        Player {
            id: id.into(),
            name: id.to_uppercase(),
            age,
            position,
            skills,
            salary: 0.0,
            tsi,
            form,
            stamina: 0,
            experience: 0,
            leadership: 0,
        }
    }

    fn skilled(value: u8) -> Skills {
        Skills {
            defending: value,
            ..Skills::default()
        }
    }

    #[test]
    fn potential_score_components() {
        // 30 (age 16) + 40 (skill 8 capped) + 20 (tsi) + 10 (form 5) = 100
        let j = junior("a", 16, Position::Forward, skilled(8), 1500, 5);
        assert_eq!(potential_score(&j), 100.0);

        // 20 + 15 + 10 + 2 = 47
        let j = junior("b", 17, Position::Forward, skilled(3), 600, 1);
        assert_eq!(potential_score(&j), 47.0);

        // 0 + 0 + 0 + 16 = 16
        let j = junior("c", 19, Position::Forward, Skills::default(), 0, 8);
        assert_eq!(potential_score(&j), 16.0);
    }

    #[test]
    fn potential_score_capped_at_100() {
        let j = junior("a", 15, Position::Forward, skilled(20), 5000, 8);
        assert_eq!(potential_score(&j), 100.0);
    }

    #[test]
    fn potential_score_monotonic_in_max_skill() {
        let mut last = 0.0;
        for value in 0..=20u8 {
            let score = potential_score(&junior("m", 18, Position::Forward, skilled(value), 0, 1));
            assert!(score >= last, "score dropped at skill {value}");
            assert!((0.0..=100.0).contains(&score));
            last = score;
        }
    }

    #[test]
    fn action_bands_are_total_and_ordered() {
        for score in 0..=100 {
            let action = JuniorAction::from_score(f64::from(score));
            let expected = match score {
                70..=100 => JuniorAction::PromoteAndTrain,
                50..=69 => JuniorAction::Promote,
                30..=49 => JuniorAction::Train,
                _ => JuniorAction::Release,
            };
            assert_eq!(action, expected, "score {score}");
        }
        assert_eq!(JuniorAction::PromoteAndTrain.label(), "Promote and Train");
    }

    #[test]
    fn promotion_value_uses_strict_bands() {
        let j = junior("a", 16, Position::Forward, Skills::default(), 100, 5);
        assert_eq!(promotion_value(&j, 71.0), 2000.0);
        assert_eq!(promotion_value(&j, 70.0), 1500.0);
        assert_eq!(promotion_value(&j, 50.0), 1000.0);
    }

    #[test]
    fn analyze_sorts_and_promotions_filter() {
        let juniors = vec![
            junior("low", 19, Position::Forward, Skills::default(), 0, 1),
            junior("top", 16, Position::Forward, skilled(8), 1500, 5),
            junior("mid", 17, Position::Forward, skilled(4), 600, 3),
        ];
        let analyzer = JuniorSquadAnalyzer::new(&juniors);
        let ids: Vec<String> = analyzer
            .analyze_potential()
            .into_iter()
            .map(|a| a.player_id)
            .collect();
        assert_eq!(ids, vec!["top", "mid", "low"]);

        let promos = analyzer.recommend_promotions(3);
        let ids: Vec<&str> = promos.iter().map(|a| a.player_id.as_str()).collect();
        // mid: 20 + 20 + 10 + 6 = 56 -> Promote
        assert_eq!(ids, vec!["top", "mid"]);
        assert_eq!(analyzer.recommend_promotions(1).len(), 1);
    }

    #[test]
    fn training_simulation_uses_junior_rate() {
        let juniors = vec![junior("a", 16, Position::Forward, skilled(3), 0, 5)];
        let sim = JuniorSquadAnalyzer::new(&juniors).simulate_training_impact(Skill::Defending, 3);
        assert_eq!(sim.weeks, 3);
        assert_eq!(sim.projections[0].current_skill, 3);
        assert_eq!(sim.projections[0].improvement, 6);
        assert_eq!(sim.projections[0].projected_skill, 9);
    }

    #[test]
    fn formation_comparison() {
        let mut juniors = Vec::new();
        for i in 0..4 {
            juniors.push(junior(&format!("d{i}"), 16, Position::CentralDefender, skilled(3), 0, 5));
        }
        for i in 0..4 {
            juniors.push(junior(
                &format!("m{i}"),
                16,
                Position::InnerMidfielder,
                Skills::default(),
                0,
                5,
            ));
        }
        for i in 0..2 {
            juniors.push(junior(&format!("f{i}"), 16, Position::Forward, Skills::default(), 0, 5));
        }

        let cmp = JuniorSquadAnalyzer::new(&juniors).compare_formations();
        let fit = |name: &str| cmp.formations.iter().find(|f| f.formation == name).unwrap().clone();

        // 90 for all lines + min(3 * 2, 10)
        assert_eq!(fit("4-4-2").suitability_score, 96.0);
        assert!(fit("4-4-2").can_field);
        assert_eq!(fit("3-5-2").suitability_score, 66.0);
        assert!(!fit("3-5-2").can_field);
        assert_eq!(fit("5-3-2").suitability_score, 66.0);
        assert_eq!(cmp.recommendation, "4-4-2");
    }

    #[test]
    fn formation_ties_keep_first() {
        let cmp = JuniorSquadAnalyzer::new(&[]).compare_formations();
        assert!(cmp.formations.iter().all(|f| f.suitability_score == 0.0));
        assert_eq!(cmp.recommendation, "4-4-2");
    }
}
