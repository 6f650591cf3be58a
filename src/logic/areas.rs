//! Fighting areas: minimum roster check and split of the distributed sequence.

use crate::models::{ChampionshipSettings, Slot, TreeGenerationError};

/// Fail unless every area gets at least `min_competitors_per_area` real fighters on average.
pub fn check_min_competitors(
    fighter_count: usize,
    settings: &ChampionshipSettings,
) -> Result<(), TreeGenerationError> {
    let areas = settings.fighting_areas;
    let min = settings.min_competitors_per_area;
    // fighters / areas < min, without the float
    if (fighter_count as u64) < u64::from(min) * u64::from(areas) {
        return Err(TreeGenerationError::InsufficientFighters {
            fighters: fighter_count,
            areas,
            min_per_area: min,
        });
    }
    Ok(())
}

/// Split `slots` into `areas` contiguous chunks.
///
/// The sequence is cut in units of `unit` slots so that no first-round group straddles two
/// areas. Whole units are shared out by largest remainder: every area gets `units / areas`
/// units and the first `units % areas` areas one more. A trailing partial unit stays with the
/// last area that got anything. Areas may come back empty when there are more areas than units.
pub fn split_by_area(slots: Vec<Slot>, areas: u32, unit: usize) -> Vec<Vec<Slot>> {
    let areas = areas.max(1) as usize;
    let unit = unit.max(1);
    let full_units = slots.len() / unit;
    let base = full_units / areas;
    let extra = full_units % areas;

    let mut out: Vec<Vec<Slot>> = Vec::with_capacity(areas);
    let mut rest = slots.into_iter();
    for area in 0..areas {
        let units = base + usize::from(area < extra);
        out.push(rest.by_ref().take(units * unit).collect());
    }

    let tail: Vec<Slot> = rest.collect();
    if !tail.is_empty() {
        let last = out.iter().rposition(|a| !a.is_empty()).unwrap_or(0);
        out[last].extend(tail);
    }
    out
}
