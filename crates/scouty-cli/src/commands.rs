// Command dispatch: load the input, run one analyzer, write the report.

use crate::cli::Commands;
use crate::output::{write_csv, write_json};
use anyhow::Context;
use scouty_analysis::insights::PlayerInsights;
use scouty_analysis::junior::JuniorSquadAnalyzer;
use scouty_analysis::matches::{MatchAnalyzer, NO_MATCHES};
use scouty_analysis::snapshot::TeamSnapshot;
use scouty_analysis::training::TrainingProjection;
use scouty_core::config::Config;
use scouty_core::ingest::{load_players, IngestLimits};
use scouty_core::matches::load_matches;
use scouty_core::player::{Player, Skill};
use serde_json::json;
use std::path::Path;

pub fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    let limits = config.limits.ingest_limits();
    let defaults = &config.defaults;

    match command {
        Commands::Analyze { file, output } => {
            let players = load_roster(&file, &limits)?;
            let report = PlayerInsights::new(&players).analyze_all();
            write_json(&report, output.as_deref())?;
        }

        Commands::Snapshot { file, output } => {
            let players = load_roster(&file, &limits)?;
            let report = TeamSnapshot::new(&players).generate_snapshot();
            write_json(&report, output.as_deref())?;
        }

        Commands::Training {
            file,
            training,
            weeks,
            compare,
            near_skillup,
            output,
        } => {
            let players = load_roster(&file, &limits)?;
            let training = training.map(Skill::from).unwrap_or(defaults.training);
            let weeks = weeks.unwrap_or(defaults.weeks);
            let projection = TrainingProjection::new(&players, training);

            if compare {
                write_json(&projection.compare_training_types(weeks), output.as_deref())?;
            } else if near_skillup {
                write_json(&projection.find_players_near_skillup(), output.as_deref())?;
            } else {
                write_json(&projection.project_skill_ups(weeks), output.as_deref())?;
            }
        }

        Commands::Juniors {
            file,
            promotions,
            simulate,
            formations,
            training,
            weeks,
            max,
            output,
        } => {
            let juniors = load_roster(&file, &limits)?;
            let analyzer = JuniorSquadAnalyzer::new(&juniors);

            if promotions {
                let max = max.map_or(defaults.max_promotions, |m| m as usize);
                write_json(&analyzer.recommend_promotions(max), output.as_deref())?;
            } else if simulate {
                let training = training.map(Skill::from).unwrap_or(defaults.training);
                let weeks = weeks.unwrap_or(defaults.weeks);
                write_json(
                    &analyzer.simulate_training_impact(training, weeks),
                    output.as_deref(),
                )?;
            } else if formations {
                write_json(&analyzer.compare_formations(), output.as_deref())?;
            } else {
                write_json(&analyzer.analyze_potential(), output.as_deref())?;
            }
        }

        Commands::Matches {
            file,
            recent,
            last_n,
            suggestions,
            output,
        } => {
            let matches = load_matches(&file, &limits)
                .with_context(|| format!("failed to load matches from {}", file.display()))?;
            let analyzer = MatchAnalyzer::new(&matches);

            if recent {
                let last_n = last_n.map_or(defaults.last_n, |n| n as usize);
                write_json(&analyzer.analyze_recent_form(last_n), output.as_deref())?;
            } else if suggestions {
                let report = json!({ "suggestions": analyzer.suggest_tactical_changes() });
                write_json(&report, output.as_deref())?;
            } else {
                match analyzer.extract_patterns() {
                    Some(patterns) => write_json(&patterns, output.as_deref())?,
                    None => write_json(&json!({ "error": NO_MATCHES }), output.as_deref())?,
                }
            }
        }

        Commands::Convert { file, output } => {
            let players = load_roster(&file, &limits)?;
            write_csv(&players, output.as_deref())?;
        }
    }

    Ok(())
}

/// Load a roster in any supported layout. Skipped rows are logged by the
/// loader and do not fail the command.
fn load_roster(path: &Path, limits: &IngestLimits) -> anyhow::Result<Vec<Player>> {
    let outcome = load_players(path, limits)
        .with_context(|| format!("failed to load players from {}", path.display()))?;
    Ok(outcome.players)
}
