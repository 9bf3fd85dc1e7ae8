// Portuguese main-squad export: one column per skill, Portuguese headers.
//
// Lenient policy for the money/condition fields: if any of them fails to
// parse or falls out of range, all six reset to the default set together.
// Identity fields (id, name, age) are still required.

use super::{
    parse_float, parse_int, position_from_pt_code, required, HeaderIndex, RawVitals, RowError,
    Vitals, MAIN_SQUAD_MARKER,
};
use crate::player::{bounded, Player, Skill, Skills, AGE_RANGE, MAX_SKILL};
use csv::StringRecord;
use tracing::debug;

const COL_NAME: &str = "Nome";
const COL_AGE: &str = "Idade";
const COL_POSITION: &str = "Posição";
const COL_SALARY: &str = "Salário";
const COL_TSI: &str = "TSI";
const COL_FORM: &str = "Forma";
const COL_STAMINA: &str = "Resistência";
const COL_EXPERIENCE: &str = "Experiência";
const COL_LEADERSHIP: &str = "Liderança";

/// Skill column code to skill, shared with the youth export.
pub(super) const SKILL_COLUMNS: [(&str, Skill); 6] = [
    ("GR", Skill::Goalkeeping),
    ("DEF", Skill::Defending),
    ("CON", Skill::Playmaking),
    ("EXT", Skill::Winger),
    ("MAR", Skill::Scoring),
    ("BP", Skill::SetPieces),
];

pub(super) fn parse_row(index: &HeaderIndex, record: &StringRecord) -> Result<Player, RowError> {
    let id = required(index, record, MAIN_SQUAD_MARKER)?;
    let name = required(index, record, COL_NAME)?;
    let age = parse_age(required(index, record, COL_AGE)?)?;

    let position = position_from_pt_code(index.get(record, COL_POSITION).unwrap_or(""));

    let mut skills = Skills::default();
    for (code, skill) in SKILL_COLUMNS {
        let value = index
            .non_empty(record, code)
            .and_then(|cell| cell.parse::<i64>().ok())
            .filter(|v| (0..=i64::from(MAX_SKILL)).contains(v))
            .and_then(|v| u8::try_from(v).ok());
        match value {
            Some(v) => skills.set(skill, v),
            None => debug!("player {}: unreadable {} cell, using 0", id, code),
        }
    }

    let vitals = match read_vitals(index, record) {
        Ok(vitals) => vitals,
        Err(e) => {
            debug!("player {}: resetting salary/TSI/condition to defaults: {}", id, e);
            Vitals::default()
        }
    };

    Ok(Player {
        id: id.to_string(),
        name: name.to_string(),
        age: bounded("age", age, &AGE_RANGE)?,
        position,
        skills,
        salary: vitals.salary,
        tsi: vitals.tsi,
        form: vitals.form,
        stamina: vitals.stamina,
        experience: vitals.experience,
        leadership: vitals.leadership,
    })
}

/// All six fields or none: a single failure discards the rest.
fn read_vitals(index: &HeaderIndex, record: &StringRecord) -> Result<Vitals, RowError> {
    let cell = |label: &'static str| index.get(record, label).unwrap_or("");
    let raw = RawVitals {
        salary: parse_float("salary", &normalize_money(cell(COL_SALARY)))?,
        tsi: parse_int("tsi", &strip_thousands(cell(COL_TSI)))?,
        form: parse_int("form", cell(COL_FORM))?,
        stamina: parse_int("stamina", cell(COL_STAMINA))?,
        experience: parse_int("experience", cell(COL_EXPERIENCE))?,
        leadership: parse_int("leadership", cell(COL_LEADERSHIP))?,
    };
    Ok(raw.validate()?)
}

/// Ages come either as whole years or in Hattrick's `years.days` notation.
fn parse_age(cell: &str) -> Result<i64, RowError> {
    let years = cell.split(['.', ' ']).next().unwrap_or(cell);
    parse_int("age", years)
}

/// "12 500,50 €" -> "12500.50"
fn normalize_money(cell: &str) -> String {
    let compact: String = cell
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€')
        .collect();
    if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else {
        compact
    }
}

fn strip_thousands(cell: &str) -> String {
    cell.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
