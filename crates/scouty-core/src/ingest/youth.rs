// Portuguese youth-academy export.
//
// Every skill label appears twice in the header: the first column holds the
// current value, the second the scouted potential. `HeaderIndex` resolves a
// label to its first occurrence, so lookups always read the current value.
// Cells may still carry "current/potential" pairs or "?" for unknown values.

use super::main_squad::SKILL_COLUMNS;
use super::{parse_int, position_from_pt_code, required, HeaderIndex, RowError, Vitals};
use crate::player::{bounded, Player, Skills, AGE_RANGE, MAX_SKILL};
use csv::StringRecord;

pub(super) const COL_ID: &str = "ID";
const COL_NAME: &str = "Nome";
const COL_AGE: &str = "Idade";
const COL_POSITION: &str = "Posição";

/// Parse one youth row. Rows without an id or a name are not players yet
/// (scout placeholders) and yield `Ok(None)` instead of an error.
pub(super) fn parse_row(
    index: &HeaderIndex,
    record: &StringRecord,
) -> Result<Option<Player>, RowError> {
    let (Some(id), Some(name)) = (
        index.non_empty(record, COL_ID),
        index.non_empty(record, COL_NAME),
    ) else {
        return Ok(None);
    };

    let age = parse_int("age", required(index, record, COL_AGE)?)?;
    let position = position_from_pt_code(index.get(record, COL_POSITION).unwrap_or(""));

    let mut skills = Skills::default();
    for (code, skill) in SKILL_COLUMNS {
        skills.set(skill, parse_skill_cell(index.get(record, code).unwrap_or("")));
    }

    let vitals = Vitals::default();
    Ok(Some(Player {
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
    }))
}

/// Read the current value out of a youth skill cell.
///
/// - `""`, `"?"`, `"/?"` -> 0
/// - `"a/b"` -> `a`, or 0 when `a` is empty, `"?"` or not a number
/// - `"7"` -> 7
/// - anything else -> 0
///
/// Values above the skill ceiling are clamped to it.
pub fn parse_skill_cell(cell: &str) -> u8 {
    let cell = cell.trim();
    let current = match cell.split_once('/') {
        Some((current, _potential)) => current.trim(),
        None => cell,
    };
    if current.is_empty() || current == "?" {
        return 0;
    }
    current
        .parse::<u8>()
        .map(|v| v.min(MAX_SKILL))
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
