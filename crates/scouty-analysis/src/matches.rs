// Match-history analysis: result parsing, form and possession trends, and
// rule-based tactical advice.

use scouty_core::matches::{MatchRecord, DEFAULT_POSSESSION};
use serde::Serialize;
use tracing::debug;

/// Possession average below which midfield control is flagged.
const LOW_POSSESSION: f64 = 45.0;
/// Chances per match below which chance creation is flagged.
const LOW_CHANCES: f64 = 3.0;
/// Goals conceded per match above which the defense is flagged.
const HIGH_CONCEDED: f64 = 2.0;
/// Band around the older average for possession trend classification.
const POSSESSION_TREND_BAND: f64 = 5.0;
/// Band around the older average for form trend classification.
const FORM_TREND_BAND: f64 = 0.5;
/// Records in the "recent" possession window.
const POSSESSION_WINDOW: usize = 5;
/// Records in each form window.
const FORM_WINDOW: usize = 3;

pub const NO_MATCHES: &str = "No matches to analyze";

// ---------------------------------------------------------------------------
// Result parsing
// ---------------------------------------------------------------------------

/// Parse "H-A" into (scored, conceded). Anything else is `None`.
pub fn parse_score(result: &str) -> Option<(u32, u32)> {
    let (home, away) = result.split_once('-')?;
    let home = home.trim().parse().ok()?;
    let away = away.trim().parse().ok()?;
    Some((home, away))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Every string maps to exactly one outcome; malformed results count as
    /// losses.
    pub fn from_result(result: &str) -> Self {
        match parse_score(result) {
            Some((h, a)) if h > a => Outcome::Win,
            Some((h, a)) if h == a => Outcome::Draw,
            _ => Outcome::Loss,
        }
    }

    /// League points: 3 for a win, 1 for a draw.
    pub fn points(&self) -> f64 {
        match self {
            Outcome::Win => 3.0,
            Outcome::Draw => 1.0,
            Outcome::Loss => 0.0,
        }
    }
}

pub fn is_win(result: &str) -> bool {
    Outcome::from_result(result) == Outcome::Win
}

pub fn is_draw(result: &str) -> bool {
    Outcome::from_result(result) == Outcome::Draw
}

pub fn is_loss(result: &str) -> bool {
    Outcome::from_result(result) == Outcome::Loss
}

fn goals_scored(result: &str) -> u32 {
    parse_score(result).map_or(0, |(h, _)| h)
}

fn goals_conceded(result: &str) -> u32 {
    parse_score(result).map_or(0, |(_, a)| a)
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl Trend {
    fn classify(recent: f64, older: f64, band: f64) -> Self {
        if recent > older + band {
            Trend::Improving
        } else if recent < older - band {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PossessionAnalysis {
    pub average: f64,
    pub trend: Trend,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackPatterns {
    pub average_chances: f64,
    pub average_goals: f64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefensePatterns {
    pub goals_conceded_avg: f64,
    pub clean_sheets: usize,
    pub defensive_strength: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPatterns {
    pub possession_analysis: PossessionAnalysis,
    pub attack_patterns: AttackPatterns,
    pub defense_patterns: DefensePatterns,
    pub tactical_recommendations: Vec<String>,
    pub weak_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentForm {
    pub matches_analyzed: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub average_possession: f64,
    pub average_chances: f64,
    pub form_trend: Trend,
}

/// The three figures every advice rule looks at.
#[derive(Debug, Clone, Copy)]
struct Aggregates {
    possession: f64,
    chances: f64,
    conceded: f64,
}

impl Aggregates {
    fn flags(&self) -> [bool; 3] {
        [
            self.possession < LOW_POSSESSION,
            self.chances < LOW_CHANCES,
            self.conceded > HIGH_CONCEDED,
        ]
    }

    /// Messages for the rules that fire, or `[fallback]` if none do.
    fn advise(&self, messages: [&str; 3], fallback: &str) -> Vec<String> {
        let advice: Vec<String> = self
            .flags()
            .into_iter()
            .zip(messages)
            .filter(|(fired, _)| *fired)
            .map(|(_, msg)| msg.to_string())
            .collect();
        if advice.is_empty() {
            vec![fallback.to_string()]
        } else {
            advice
        }
    }
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Works over a slice of matches ordered most recent first.
pub struct MatchAnalyzer<'a> {
    matches: &'a [MatchRecord],
}

impl<'a> MatchAnalyzer<'a> {
    pub fn new(matches: &'a [MatchRecord]) -> Self {
        MatchAnalyzer { matches }
    }

    /// Full pattern report, or `None` when there is nothing to analyze.
    pub fn extract_patterns(&self) -> Option<MatchPatterns> {
        if self.matches.is_empty() {
            return None;
        }
        let possession_analysis = self.analyze_possession();
        let attack_patterns = self.analyze_attack();
        let defense_patterns = self.analyze_defense();
        let agg = Aggregates {
            possession: possession_analysis.average,
            chances: attack_patterns.average_chances,
            conceded: defense_patterns.goals_conceded_avg,
        };
        debug!(
            "{} matches: possession {:.1}, chances {:.1}, conceded {:.1}",
            self.matches.len(),
            agg.possession,
            agg.chances,
            agg.conceded
        );

        Some(MatchPatterns {
            tactical_recommendations: agg.advise(
                [
                    "Low possession - consider 3-5-2 or 4-5-1 formation",
                    "Low chance creation - try counter-attack or focus on wingers",
                    "Weak defense - consider 5-3-2 or train defending",
                ],
                "Current tactics are working well",
            ),
            weak_points: agg.advise(
                ["Midfield control", "Attack creation", "Defense"],
                "No major weak points identified",
            ),
            possession_analysis,
            attack_patterns,
            defense_patterns,
        })
    }

    /// Training-oriented advice over the whole history.
    pub fn suggest_tactical_changes(&self) -> Vec<String> {
        let Some(patterns) = self.extract_patterns() else {
            return vec![NO_MATCHES.to_string()];
        };
        let agg = Aggregates {
            possession: patterns.possession_analysis.average,
            chances: patterns.attack_patterns.average_chances,
            conceded: patterns.defense_patterns.goals_conceded_avg,
        };
        agg.advise(
            [
                "Low possession - consider training playmaking or changing formation",
                "Low chance creation - focus on attacking training or winger development",
                "High goals conceded - strengthen defense or train defending",
            ],
            "Team performing well - maintain current tactics",
        )
    }

    /// Results summary over the first `last_n` matches.
    pub fn analyze_recent_form(&self, last_n: usize) -> RecentForm {
        let recent = &self.matches[..last_n.min(self.matches.len())];
        let outcomes: Vec<Outcome> = recent
            .iter()
            .map(|m| Outcome::from_result(m.result_str()))
            .collect();
        let count = |o: Outcome| outcomes.iter().filter(|x| **x == o).count();
        let wins = count(Outcome::Win);

        let (win_rate, average_possession, average_chances) = if recent.is_empty() {
            (0.0, DEFAULT_POSSESSION, 0.0)
        } else {
            let n = recent.len() as f64;
            (
                wins as f64 / n * 100.0,
                recent.iter().map(|m| m.possession_or_default()).sum::<f64>() / n,
                recent
                    .iter()
                    .map(|m| f64::from(m.chances_or_default()))
                    .sum::<f64>()
                    / n,
            )
        };

        RecentForm {
            matches_analyzed: recent.len(),
            wins,
            draws: count(Outcome::Draw),
            losses: count(Outcome::Loss),
            win_rate: round1(win_rate),
            average_possession: round1(average_possession),
            average_chances: round1(average_chances),
            form_trend: form_trend(recent),
        }
    }

    /// Possession over matches that report a non-zero value.
    fn analyze_possession(&self) -> PossessionAnalysis {
        let possessions: Vec<f64> = self
            .matches
            .iter()
            .filter_map(|m| m.possession)
            .filter(|p| *p != 0.0)
            .collect();

        if possessions.is_empty() {
            return PossessionAnalysis {
                average: DEFAULT_POSSESSION,
                trend: Trend::Stable,
                recommendation: "Maintain".into(),
            };
        }

        let average = mean(&possessions);
        let split = POSSESSION_WINDOW.min(possessions.len());
        let recent = mean(&possessions[..split]);
        let older = if possessions.len() > POSSESSION_WINDOW {
            mean(&possessions[split..])
        } else {
            average
        };

        PossessionAnalysis {
            average: round1(average),
            trend: Trend::classify(recent, older, POSSESSION_TREND_BAND),
            recommendation: if average < LOW_POSSESSION {
                "Train playmaking".into()
            } else {
                "Maintain".into()
            },
        }
    }

    fn analyze_attack(&self) -> AttackPatterns {
        let chances: Vec<f64> = self
            .matches
            .iter()
            .filter_map(|m| m.chances)
            .filter(|c| *c != 0)
            .map(f64::from)
            .collect();
        let goals: Vec<f64> = self
            .matches
            .iter()
            .map(|m| f64::from(goals_scored(m.result_str())))
            .collect();

        let total_chances: f64 = chances.iter().sum();
        let conversion_rate = if total_chances == 0.0 {
            0.0
        } else {
            round1(goals.iter().sum::<f64>() / total_chances * 100.0)
        };

        AttackPatterns {
            average_chances: if chances.is_empty() { 0.0 } else { round1(mean(&chances)) },
            average_goals: if goals.is_empty() { 0.0 } else { round1(mean(&goals)) },
            conversion_rate,
        }
    }

    fn analyze_defense(&self) -> DefensePatterns {
        let conceded: Vec<u32> = self
            .matches
            .iter()
            .map(|m| goals_conceded(m.result_str()))
            .collect();
        let as_f64: Vec<f64> = conceded.iter().copied().map(f64::from).collect();
        let average = if as_f64.is_empty() { 0.0 } else { mean(&as_f64) };

        DefensePatterns {
            goals_conceded_avg: round1(average),
            clean_sheets: conceded.iter().filter(|c| **c == 0).count(),
            defensive_strength: if average < 1.0 { "Strong" } else { "Weak" }.into(),
        }
    }
}

/// Points per match over the first three versus the next three records.
fn form_trend(matches: &[MatchRecord]) -> Trend {
    if matches.len() < 2 {
        return Trend::InsufficientData;
    }
    let points = |window: &[MatchRecord]| -> Vec<f64> {
        window
            .iter()
            .map(|m| Outcome::from_result(m.result_str()).points())
            .collect()
    };

    let recent = points(&matches[..FORM_WINDOW.min(matches.len())]);
    if matches.len() <= FORM_WINDOW {
        return Trend::Stable;
    }
    let older = points(&matches[FORM_WINDOW..(2 * FORM_WINDOW).min(matches.len())]);

    Trend::classify(mean(&recent), mean(&older), FORM_TREND_BAND)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
