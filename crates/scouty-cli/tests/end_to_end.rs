// End-to-end tests for the scouty commands.
//
// Each test drives `commands::run` the way the binary does, writes the report
// to a temp directory and inspects the JSON (or CSV) that comes back.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use scouty_cli::cli::{Commands, TrainingArg};
use scouty_cli::{commands, exit_code};
use scouty_core::config::Config;
use scouty_core::ingest::{load_players, IngestLimits, Schema};
use serde_json::Value;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory, relative to the crate root (the cwd for `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture(name: &str) -> PathBuf {
    Path::new(FIXTURES).join(name)
}

/// Run one command with default config and return the parsed JSON report.
fn run_json(make: impl FnOnce(PathBuf) -> Commands) -> Value {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.json");
    commands::run(make(out.clone()), &Config::default()).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ===========================================================================
// Player insights
// ===========================================================================

#[test]
fn analyze_young_and_old_players() {
    let report = run_json(|out| Commands::Analyze {
        file: fixture("squad_english.csv"),
        output: Some(out),
    });

    let players = report.as_array().unwrap();
    assert_eq!(players.len(), 2);

    assert_eq!(players[0]["player_id"], "p1");
    assert_eq!(players[0]["potential"], "High");
    assert_eq!(players[0]["cost_benefit"], 0.0);
    assert_eq!(players[0]["recommendation"], "Train");

    // 1000 / 500 = 2, and past 30 with poor value sells.
    assert_eq!(players[1]["player_id"], "p2");
    assert_eq!(players[1]["cost_benefit"], 2.0);
    assert_eq!(players[1]["potential"], "Low");
    assert_eq!(players[1]["recommendation"], "Sell");
}

#[test]
fn snapshot_of_main_squad_export() {
    let report = run_json(|out| Commands::Snapshot {
        file: fixture("squad_main.csv"),
        output: Some(out),
    });

    assert_eq!(report["total_players"], 4);
    assert_eq!(report["position_distribution"]["Goalkeeper"], 1);
    assert_eq!(report["best_lineup"]["goalkeeper"], "Rui Costa");
    assert_eq!(report["best_lineup"]["forwards"][0], "André Silva");
    // Zé Maria's vitals were reset, so TSI 0 does not count.
    assert_eq!(report["total_tsi"], 6200 + 4310 + 3950);
}

// ===========================================================================
// Training
// ===========================================================================

#[test]
fn training_projection_uses_config_defaults() {
    let report = run_json(|out| Commands::Training {
        file: fixture("squad_english.csv"),
        training: None,
        weeks: None,
        compare: false,
        near_skillup: false,
        output: Some(out),
    });

    let rows = report.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Playmaking over 4 weeks: the 19-year-old gains 8, the 35-year-old 2.
    assert_eq!(rows[0]["current_skill"], 10);
    assert_eq!(rows[0]["projected_skill"], 18);
    assert_eq!(rows[1]["projected_skill"], 12);
}

#[test]
fn training_compare_reports_every_type() {
    let report = run_json(|out| Commands::Training {
        file: fixture("squad_english.csv"),
        training: Some(TrainingArg::Defending),
        weeks: Some(8),
        compare: true,
        near_skillup: false,
        output: Some(out),
    });

    assert_eq!(report["weeks"], 8);
    assert_eq!(report["types"].as_array().unwrap().len(), 5);
    assert_eq!(report["types"][1]["affected_players"], 2);
    // Every type sees the same squad, so the first one wins the tie.
    // (800 * 0.15 * 16 * 0.1 + 1000 * 0.15 * 4 * 0.1) / 2
    assert_eq!(report["recommendation"]["best_training"], "playmaking");
    assert_eq!(report["recommendation"]["reason"], "Highest ROI: 126.00");
}

#[test]
fn near_skillup_keeps_young_players() {
    let report = run_json(|out| Commands::Training {
        file: fixture("squad_english.csv"),
        training: None,
        weeks: None,
        compare: false,
        near_skillup: true,
        output: Some(out),
    });

    let rows = report.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["player_id"], "p1");
    assert_eq!(rows[0]["weeks_to_skillup"], 1);
}

// ===========================================================================
// Juniors
// ===========================================================================

#[test]
fn youth_row_without_name_yields_no_players() {
    let outcome = load_players(&fixture("youth_missing_name.csv"), &IngestLimits::default())
        .expect("a nameless youth row is not an error");
    assert_eq!(outcome.schema, Schema::Youth);
    assert!(outcome.players.is_empty());

    let report = run_json(|out| Commands::Juniors {
        file: fixture("youth_missing_name.csv"),
        promotions: false,
        simulate: false,
        formations: false,
        training: None,
        weeks: None,
        max: None,
        output: Some(out),
    });
    assert_eq!(report, Value::Array(vec![]));
}

#[test]
fn junior_potential_sorted_descending() {
    let report = run_json(|out| Commands::Juniors {
        file: fixture("youth.csv"),
        promotions: false,
        simulate: false,
        formations: false,
        training: None,
        weeks: None,
        max: None,
        output: Some(out),
    });

    let rows = report.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    let scores: Vec<f64> = rows
        .iter()
        .map(|r| r["potential_score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    // First token of "8/9".
    let tiago = rows.iter().find(|r| r["player_id"] == "31").unwrap();
    assert_eq!(tiago["current_skills"]["scoring"], 8);
}

#[test]
fn junior_simulation_and_formations() {
    let sim = run_json(|out| Commands::Juniors {
        file: fixture("youth.csv"),
        promotions: false,
        simulate: true,
        formations: false,
        training: Some(TrainingArg::Scoring),
        weeks: Some(3),
        max: None,
        output: Some(out),
    });
    assert_eq!(sim["training_type"], "scoring");
    assert_eq!(sim["weeks"], 3);
    assert_eq!(sim["projections"][0]["improvement"], 6);

    let formations = run_json(|out| Commands::Juniors {
        file: fixture("youth.csv"),
        promotions: false,
        simulate: false,
        formations: true,
        training: None,
        weeks: None,
        max: None,
        output: Some(out),
    });
    assert_eq!(formations["formations"].as_array().unwrap().len(), 4);
    assert!(formations["recommendation"].is_string());
}

#[test]
fn junior_promotions_respect_cap() {
    let report = run_json(|out| Commands::Juniors {
        file: fixture("youth.csv"),
        promotions: true,
        simulate: false,
        formations: false,
        training: None,
        weeks: None,
        max: Some(1),
        output: Some(out),
    });
    // Scores 80 (Tiago) and 65 (Bruno) both qualify; the cap keeps the best.
    let rows = report.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["player_id"], "31");
    assert_eq!(rows[0]["recommendation"], "Promote and Train");
}

// ===========================================================================
// Matches
// ===========================================================================

#[test]
fn recent_form_over_three_results() {
    let report = run_json(|out| Commands::Matches {
        file: fixture("matches.json"),
        recent: true,
        last_n: None,
        suggestions: false,
        output: Some(out),
    });

    assert_eq!(report["matches_analyzed"], 3);
    assert_eq!(report["wins"], 1);
    assert_eq!(report["draws"], 1);
    assert_eq!(report["losses"], 1);
    assert_eq!(report["win_rate"], 33.3);
    assert_eq!(report["average_possession"], 47.0);
    assert_eq!(report["form_trend"], "stable");
}

#[test]
fn match_patterns_and_suggestions() {
    let patterns = run_json(|out| Commands::Matches {
        file: fixture("matches.json"),
        recent: false,
        last_n: None,
        suggestions: false,
        output: Some(out),
    });
    assert_eq!(patterns["possession_analysis"]["average"], 47.0);
    assert_eq!(patterns["attack_patterns"]["average_chances"], 4.0);
    assert_eq!(patterns["defense_patterns"]["clean_sheets"], 0);
    assert_eq!(patterns["weak_points"][0], "No major weak points identified");

    let suggestions = run_json(|out| Commands::Matches {
        file: fixture("matches.json"),
        recent: false,
        last_n: None,
        suggestions: true,
        output: Some(out),
    });
    assert_eq!(
        suggestions["suggestions"][0],
        "Team performing well - maintain current tactics"
    );
}

#[test]
fn empty_match_list_reports_error_object() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.json");
    std::fs::write(&input, "[]").unwrap();

    let report = run_json(|out| Commands::Matches {
        file: input.clone(),
        recent: false,
        last_n: None,
        suggestions: false,
        output: Some(out),
    });
    assert_eq!(report, serde_json::json!({"error": "No matches to analyze"}));
}

// ===========================================================================
// Convert
// ===========================================================================

#[test]
fn convert_main_squad_to_english_layout() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("squad.csv");
    commands::run(
        Commands::Convert {
            file: fixture("squad_main.csv"),
            output: Some(out.clone()),
        },
        &Config::default(),
    )
    .unwrap();

    let outcome = load_players(&out, &IngestLimits::default()).unwrap();
    assert_eq!(outcome.schema, Schema::English);
    assert_eq!(outcome.players.len(), 4);
    assert!(outcome.diagnostics.is_empty());

    let original = load_players(&fixture("squad_main.csv"), &IngestLimits::default()).unwrap();
    assert_eq!(outcome.players, original.players);
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn missing_input_fails_with_exit_code_one() {
    let err = commands::run(
        Commands::Analyze {
            file: fixture("does_not_exist.csv"),
            output: None,
        },
        &Config::default(),
    )
    .unwrap_err();
    assert_eq!(exit_code(&err), 1);
    assert!(format!("{err:#}").contains("does_not_exist.csv"));
}

#[test]
fn missing_output_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = commands::run(
        Commands::Snapshot {
            file: fixture("squad_english.csv"),
            output: Some(dir.path().join("missing").join("out.json")),
        },
        &Config::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("output directory does not exist"));
    assert_eq!(exit_code(&err), 1);
}

#[test]
fn tightened_limit_rejects_input() {
    let mut config = Config::default();
    config.limits.max_input_bytes = 16;
    let err = commands::run(
        Commands::Analyze {
            file: fixture("squad_english.csv"),
            output: None,
        },
        &config,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("failed to load players"));
}
