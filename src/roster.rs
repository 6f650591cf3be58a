//! Roster import from CSV: `name,federation_id,association_id,club_id` with a header row.

use crate::models::{Affiliation, Fighter};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    federation_id: Option<u32>,
    #[serde(default)]
    association_id: Option<u32>,
    #[serde(default)]
    club_id: Option<u32>,
}

/// Read fighters in file order. Empty affiliation cells mean "unknown"; blank names are skipped.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Fighter>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut fighters = Vec::new();
    for row in rdr.deserialize::<RosterRow>() {
        let row = row?;
        if row.name.is_empty() {
            continue;
        }
        fighters.push(Fighter::new(row.name).with_affiliation(Affiliation {
            federation_id: row.federation_id,
            association_id: row.association_id,
            club_id: row.club_id,
        }));
    }
    Ok(fighters)
}
