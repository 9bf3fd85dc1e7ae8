// Player CSV ingestion and normalization.
//
// Three vendor layouts are accepted: the English schema (skills as embedded
// JSON), the Portuguese main-squad export, and the Portuguese youth export.
// The layout is detected once from the header line; each row is then parsed
// by the layout's own function. A bad row is logged and skipped, only
// file-level problems fail the whole load.

mod english;
mod export;
mod main_squad;
mod youth;

pub use export::write_players_csv;
pub use youth::parse_skill_cell;

use crate::player::{
    bounded, checked_salary, PlayerError, Player, Position, EXPERIENCE_RANGE, FORM_RANGE,
    LEADERSHIP_RANGE, STAMINA_RANGE, TSI_RANGE,
};
use csv::StringRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Ceiling for any input file (CSV or JSON).
pub const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;
/// Ceiling for embedded skills JSON and standalone match files.
pub const MAX_JSON_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    pub max_input_bytes: u64,
    pub max_json_bytes: u64,
}

impl Default for IngestLimits {
    fn default() -> Self {
        IngestLimits {
            max_input_bytes: MAX_INPUT_BYTES,
            max_json_bytes: MAX_JSON_BYTES,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// File-level failures. Any of these aborts the whole load.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a regular file: {path}")]
    NotAFile { path: PathBuf },

    #[error("file {path} is {size} bytes, exceeding the {limit}-byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Why a single row was rejected.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid number for `{field}`: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("skills JSON is {size} bytes, exceeding the {limit}-byte limit")]
    SkillsTooLarge { size: u64, limit: u64 },

    #[error("invalid skills JSON: {0}")]
    InvalidSkills(#[from] serde_json::Error),

    #[error(transparent)]
    OutOfRange(#[from] PlayerError),

    #[error("malformed CSV record: {0}")]
    Record(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public result types
// ---------------------------------------------------------------------------

/// Which vendor layout a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    English,
    MainSquad,
    Youth,
}

/// Column that marks a youth export; its presence anywhere in the header
/// line selects the youth layout.
pub const YOUTH_MARKER: &str = "Promover";
/// Column that identifies a main-squad export.
pub const MAIN_SQUAD_MARKER: &str = "ID do Jogador";

impl Schema {
    /// Detect the layout from the raw header line.
    pub fn detect(header_line: &str) -> Schema {
        if header_line.contains(YOUTH_MARKER) {
            return Schema::Youth;
        }
        let delimiter = sniff_delimiter(header_line);
        let is_main_squad = header_line
            .split(char::from(delimiter))
            .map(|c| c.trim().trim_matches('"').trim())
            .any(|c| c.eq_ignore_ascii_case(MAIN_SQUAD_MARKER));
        if is_main_squad {
            Schema::MainSquad
        } else {
            Schema::English
        }
    }

    fn id_column(&self) -> &'static str {
        match self {
            Schema::English => english::COL_ID,
            Schema::MainSquad => MAIN_SQUAD_MARKER,
            Schema::Youth => youth::COL_ID,
        }
    }
}

/// A row that was skipped, with enough context to find it in the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDiagnostic {
    /// 1-based line number of the record in the source file.
    pub row: u64,
    /// The row's id cell, or "unknown" when absent.
    pub player_id: String,
    pub reason: String,
}

/// Everything one load produced: parsed players in file order plus the
/// diagnostics for rows that were skipped.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub schema: Schema,
    pub players: Vec<Player>,
    pub diagnostics: Vec<RowDiagnostic>,
}

// ---------------------------------------------------------------------------
// Header indexing
// ---------------------------------------------------------------------------

/// Maps column labels to their index. A label that appears more than once
/// resolves to its first occurrence, which the youth export relies on
/// (current value first, potential value second).
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderIndex {
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    pub(crate) fn new(headers: &StringRecord) -> Self {
        let mut columns = HashMap::new();
        for (i, label) in headers.iter().enumerate() {
            columns.entry(normalize_label(label)).or_insert(i);
        }
        HeaderIndex { columns }
    }

    /// The trimmed cell under `label`. `None` when the column is absent from
    /// the header or the row is too short to reach it.
    pub(crate) fn get<'r>(&self, record: &'r StringRecord, label: &str) -> Option<&'r str> {
        let idx = *self.columns.get(&normalize_label(label))?;
        record.get(idx).map(str::trim)
    }

    /// Like `get`, but empty cells read as absent.
    pub(crate) fn non_empty<'r>(&self, record: &'r StringRecord, label: &str) -> Option<&'r str> {
        self.get(record, label).filter(|s| !s.is_empty())
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().trim_start_matches('\u{feff}').to_lowercase()
}

// ---------------------------------------------------------------------------
// Shared numeric helpers
// ---------------------------------------------------------------------------

/// Salary, TSI and the condition fields. The youth export carries none of
/// them; the main-squad export falls back to this default set wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Vitals {
    pub salary: f64,
    pub tsi: u32,
    pub form: u8,
    pub stamina: u8,
    pub experience: u8,
    pub leadership: u8,
}

impl Default for Vitals {
    fn default() -> Self {
        Vitals {
            salary: 0.0,
            tsi: 0,
            form: 5,
            stamina: 0,
            experience: 0,
            leadership: 0,
        }
    }
}

/// Unvalidated numbers as read from a row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawVitals {
    pub salary: f64,
    pub tsi: i64,
    pub form: i64,
    pub stamina: i64,
    pub experience: i64,
    pub leadership: i64,
}

impl RawVitals {
    pub(crate) fn validate(self) -> Result<Vitals, PlayerError> {
        Ok(Vitals {
            salary: checked_salary(self.salary)?,
            tsi: bounded("tsi", self.tsi, &TSI_RANGE)?,
            form: bounded("form", self.form, &FORM_RANGE)?,
            stamina: bounded("stamina", self.stamina, &STAMINA_RANGE)?,
            experience: bounded("experience", self.experience, &EXPERIENCE_RANGE)?,
            leadership: bounded("leadership", self.leadership, &LEADERSHIP_RANGE)?,
        })
    }
}

pub(crate) fn parse_int(field: &'static str, value: &str) -> Result<i64, RowError> {
    value.trim().parse::<i64>().map_err(|_| RowError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

pub(crate) fn parse_float(field: &'static str, value: &str) -> Result<f64, RowError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RowError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

pub(crate) fn required<'r>(
    index: &HeaderIndex,
    record: &'r StringRecord,
    label: &'static str,
) -> Result<&'r str, RowError> {
    index
        .non_empty(record, label)
        .ok_or(RowError::MissingField(label))
}

/// Portuguese two-letter position codes shared by both Portuguese exports.
pub(crate) fn position_from_pt_code(code: &str) -> Position {
    match code.trim().to_uppercase().as_str() {
        "GR" => Position::GoalKeeper,
        "DC" => Position::CentralDefender,
        "DL" => Position::WingBack,
        "MC" => Position::InnerMidfielder,
        "EX" => Position::Winger,
        "AV" => Position::Forward,
        _ => Position::InnerMidfielder,
    }
}

/// Use `;` when the header has more semicolons than commas.
pub(crate) fn sniff_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

// ---------------------------------------------------------------------------
// File guard
// ---------------------------------------------------------------------------

/// Fail unless `path` is an existing regular file no larger than `limit`.
/// Returns the file size.
pub fn check_input_file(path: &Path, limit: u64) -> Result<u64, IngestError> {
    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let meta = std::fs::metadata(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !meta.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    if meta.len() > limit {
        return Err(IngestError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            limit,
        });
    }
    Ok(meta.len())
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse players from in-memory CSV text. Exposed for testing without
/// temp files.
pub fn parse_players(text: &str, limits: &IngestLimits) -> Result<ParseOutcome, csv::Error> {
    let text = text.trim_start_matches('\u{feff}');
    let header_line = text.lines().next().unwrap_or("");
    let schema = Schema::detect(header_line);
    debug!("detected {:?} schema", schema);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(header_line))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let index = HeaderIndex::new(reader.headers()?);
    let mut players = Vec::new();
    let mut diagnostics = Vec::new();

    for (i, result) in reader.records().enumerate() {
        // Header is line 1; fall back to the ordinal when the reader has no position.
        let fallback_line = i as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                warn!("skipping malformed record at line {}: {}", line, e);
                diagnostics.push(RowDiagnostic {
                    row: line,
                    player_id: "unknown".into(),
                    reason: RowError::from(e).to_string(),
                });
                continue;
            }
        };
        let line = record.position().map_or(fallback_line, |p| p.line());

        let parsed = match schema {
            Schema::English => english::parse_row(&index, &record, limits).map(Some),
            Schema::MainSquad => main_squad::parse_row(&index, &record).map(Some),
            Schema::Youth => youth::parse_row(&index, &record),
        };

        match parsed {
            Ok(Some(player)) => players.push(player),
            Ok(None) => debug!("dropping incomplete row at line {}", line),
            Err(e) => {
                let player_id = index
                    .non_empty(&record, schema.id_column())
                    .unwrap_or("unknown")
                    .to_string();
                warn!("error parsing player {} (line {}): {}", player_id, line, e);
                diagnostics.push(RowDiagnostic {
                    row: line,
                    player_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(ParseOutcome {
        schema,
        players,
        diagnostics,
    })
}

/// Load players from a CSV file in any supported layout.
pub fn load_players(path: &Path, limits: &IngestLimits) -> Result<ParseOutcome, IngestError> {
    check_input_file(path, limits.max_input_bytes)?;
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let outcome = parse_players(&text, limits).map_err(|e| IngestError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(
        "loaded {} players from {} ({:?} schema, {} rows skipped)",
        outcome.players.len(),
        path.display(),
        outcome.schema,
        outcome.diagnostics.len()
    );
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
