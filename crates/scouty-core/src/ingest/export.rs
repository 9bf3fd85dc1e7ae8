// English-schema CSV export of normalized players.

use super::english::COLUMNS;
use crate::player::Player;
use std::io::Write;

/// Write `players` as English-schema CSV with a header row. Reading the
/// output back yields the same players.
pub fn write_players_csv<W: Write>(players: &[Player], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for p in players {
        let skills = serde_json::to_string(&p.skills)
            .map_err(|e| csv::Error::from(std::io::Error::other(e)))?;
        wtr.write_record([
            p.id.clone(),
            p.name.clone(),
            p.age.to_string(),
            p.position.code().to_string(),
            skills,
            p.salary.to_string(),
            p.tsi.to_string(),
            p.form.to_string(),
            p.stamina.to_string(),
            p.experience.to_string(),
            p.leadership.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
