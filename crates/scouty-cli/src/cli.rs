use clap::{Parser, Subcommand, ValueEnum};
use scouty_core::player::Skill;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrainingArg {
    Playmaking,
    Defending,
    Scoring,
    Winger,
    Goalkeeping,
}

impl From<TrainingArg> for Skill {
    fn from(arg: TrainingArg) -> Self {
        match arg {
            TrainingArg::Playmaking => Skill::Playmaking,
            TrainingArg::Defending => Skill::Defending,
            TrainingArg::Scoring => Skill::Scoring,
            TrainingArg::Winger => Skill::Winger,
            TrainingArg::Goalkeeping => Skill::Goalkeeping,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "scouty")]
#[command(about = "Squad, youth and match analysis for fantasy football managers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./scouty.toml, then the user config directory)
    #[arg(long, global = true, env = "SCOUTY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-player insights and keep/train/sell recommendations
    Analyze {
        /// CSV file with player data
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Squad overview: aggregates, strengths, weaknesses, best lineup
    Snapshot {
        /// CSV file with player data
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Project training outcomes
    Training {
        /// CSV file with player data
        file: PathBuf,

        /// Training type to project
        #[arg(short, long, value_enum)]
        training: Option<TrainingArg>,

        /// Weeks to project
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=52))]
        weeks: Option<u32>,

        /// Compare every training type instead
        #[arg(short, long)]
        compare: bool,

        /// List players close to their next skill-up instead
        #[arg(short = 'n', long)]
        near_skillup: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Youth academy analysis
    Juniors {
        /// CSV file with junior player data
        file: PathBuf,

        /// Recommend promotions to the main squad
        #[arg(short, long)]
        promotions: bool,

        /// Simulate training impact
        #[arg(short, long)]
        simulate: bool,

        /// Compare formations
        #[arg(short, long)]
        formations: bool,

        /// Training type for simulation
        #[arg(short, long, value_enum)]
        training: Option<TrainingArg>,

        /// Weeks for simulation
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=52))]
        weeks: Option<u32>,

        /// Max promotions to recommend
        #[arg(short, long = "max", value_parser = clap::value_parser!(u32).range(1..=20))]
        max: Option<u32>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze match history
    Matches {
        /// JSON file with match data
        file: PathBuf,

        /// Summarize recent form
        #[arg(short, long)]
        recent: bool,

        /// Number of recent matches to analyze
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        last_n: Option<u32>,

        /// Training-oriented tactical suggestions
        #[arg(short, long)]
        suggestions: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize any supported roster export to the English CSV layout
    Convert {
        /// CSV file with player data
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
