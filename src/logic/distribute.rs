//! Spread fighters of the same entity apart, then spread byes evenly between them.

use crate::logic::entity::max_entity_size;
use crate::models::{Fighter, Slot};

/// Interleave entity groups: first fighter of every group, then the second of every group, etc.
///
/// Two fighters of the same entity only end up next to each other once the other entities
/// have run out of fighters.
pub fn repart(groups: &[Vec<Fighter>]) -> Vec<Slot> {
    let max = max_entity_size(groups);
    let mut slots = Vec::with_capacity(groups.iter().map(Vec::len).sum());
    for i in 0..max {
        for group in groups {
            if let Some(fighter) = group.get(i) {
                slots.push(fighter.slot());
            }
        }
    }
    slots
}

/// Insert `bye_count` byes in a homogeneous way.
///
/// With `frequency = len / bye_count`, a bye goes in front of every fighter whose index is a
/// multiple of `frequency` until the byes run out. When there are more byes than fighters
/// (`frequency == 0`) one bye goes in front of each fighter and the rest trail the sequence.
pub fn insert_byes(slots: Vec<Slot>, bye_count: usize) -> Vec<Slot> {
    if bye_count == 0 {
        return slots;
    }
    let frequency = slots.len() / bye_count;

    let mut out = Vec::with_capacity(slots.len() + bye_count);
    let mut inserted = 0;
    for (i, slot) in slots.into_iter().enumerate() {
        if inserted < bye_count && (frequency == 0 || i % frequency == 0) {
            out.push(Slot::Bye);
            inserted += 1;
        }
        out.push(slot);
    }
    out.extend(std::iter::repeat(Slot::Bye).take(bye_count - inserted));
    out
}

/// `repart` then `insert_byes`. Output length is always fighters + byes.
pub fn distribute(groups: &[Vec<Fighter>], bye_count: usize) -> Vec<Slot> {
    insert_byes(repart(groups), bye_count)
}
