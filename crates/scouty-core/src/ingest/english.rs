// English-schema rows: one column per field, skills as an embedded JSON object.
//
// Strict policy: a value that is present but not numeric, or numeric but out
// of range, rejects the row. Absent optional columns take their defaults.

use super::{parse_float, parse_int, required, HeaderIndex, IngestLimits, RawVitals, RowError};
use crate::player::{bounded, Player, Position, Skill, Skills, AGE_RANGE, SKILL_RANGE};
use csv::StringRecord;
use std::collections::BTreeMap;
use tracing::debug;

pub(super) const COL_ID: &str = "id";
pub(super) const COL_NAME: &str = "name";
pub(super) const COL_AGE: &str = "age";
pub(super) const COL_POSITION: &str = "position";
pub(super) const COL_SKILLS: &str = "skills";
pub(super) const COL_SALARY: &str = "salary";
pub(super) const COL_TSI: &str = "tsi";
pub(super) const COL_FORM: &str = "form";
pub(super) const COL_STAMINA: &str = "stamina";
pub(super) const COL_EXPERIENCE: &str = "experience";
pub(super) const COL_LEADERSHIP: &str = "leadership";

/// Column order written by the exporter.
pub(super) const COLUMNS: [&str; 11] = [
    COL_ID,
    COL_NAME,
    COL_AGE,
    COL_POSITION,
    COL_SKILLS,
    COL_SALARY,
    COL_TSI,
    COL_FORM,
    COL_STAMINA,
    COL_EXPERIENCE,
    COL_LEADERSHIP,
];

pub(super) fn parse_row(
    index: &HeaderIndex,
    record: &StringRecord,
    limits: &IngestLimits,
) -> Result<Player, RowError> {
    let id = required(index, record, COL_ID)?;
    let name = required(index, record, COL_NAME)?;
    let age = parse_int(COL_AGE, required(index, record, COL_AGE)?)?;

    // Unknown codes land in midfield rather than failing the row.
    let position = index
        .non_empty(record, COL_POSITION)
        .map(|code| Position::from_code(code).unwrap_or(Position::InnerMidfielder))
        .unwrap_or(Position::InnerMidfielder);

    let skills = match index.get(record, COL_SKILLS) {
        Some(raw) => parse_skills_json(raw, limits)?,
        None => Skills::default(),
    };

    let int_or = |field: &'static str, default: i64| -> Result<i64, RowError> {
        match index.get(record, field) {
            Some(raw) => parse_int(field, raw),
            None => Ok(default),
        }
    };

    let raw = RawVitals {
        salary: match index.get(record, COL_SALARY) {
            Some(raw) => parse_float(COL_SALARY, raw)?,
            None => 0.0,
        },
        tsi: int_or(COL_TSI, 0)?,
        form: int_or(COL_FORM, 5)?,
        stamina: int_or(COL_STAMINA, 0)?,
        experience: int_or(COL_EXPERIENCE, 0)?,
        leadership: int_or(COL_LEADERSHIP, 0)?,
    };
    let vitals = raw.validate()?;

    Ok(Player {
        id: id.to_string(),
        name: name.to_string(),
        age: bounded(COL_AGE, age, &AGE_RANGE)?,
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

/// Decode the embedded skills object. Unknown keys are ignored; values
/// outside 0..=20 reject the row.
fn parse_skills_json(raw: &str, limits: &IngestLimits) -> Result<Skills, RowError> {
    let size = raw.len() as u64;
    if size > limits.max_json_bytes {
        return Err(RowError::SkillsTooLarge {
            size,
            limit: limits.max_json_bytes,
        });
    }

    let map: BTreeMap<String, i64> = serde_json::from_str(raw)?;
    let mut skills = Skills::default();
    for (key, value) in map {
        match Skill::from_name(&key) {
            Some(skill) => skills.set(skill, bounded(skill.name(), value, &SKILL_RANGE)?),
            None => debug!("ignoring unknown skill key {:?}", key),
        }
    }
    Ok(skills)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
