//! Position Sequencer
//!
//! Pure functions over an in-memory group of siblings (the columns of a
//! board, or the cards of a column). Every sibling carries an integer
//! `position`; after any successful operation the positions of the group
//! form a dense permutation of `0..N-1`.
//!
//! Nothing here touches storage. Each mutating function applies the new
//! positions in place and returns the list of [`PositionChange`]s so the
//! caller can persist exactly the records that moved.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::shared::board::Column;
use crate::shared::card::Card;

/// Anything that occupies a slot in an ordered sibling group
pub trait Sequenced {
    fn sequence_id(&self) -> Uuid;
    fn position(&self) -> i64;
    fn set_position(&mut self, position: i64);
}

impl Sequenced for Column {
    fn sequence_id(&self) -> Uuid {
        self.id
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

impl Sequenced for Card {
    fn sequence_id(&self) -> Uuid {
        self.id
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

/// One sibling's position before and after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChange {
    pub id: Uuid,
    pub from: i64,
    pub to: i64,
}

/// Errors raised by sequencing operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The supplied id list is not a permutation of the current siblings
    #[error("ordered ids are not a permutation of the {expected} current siblings: {reason}")]
    InvalidReorder { expected: usize, reason: String },

    /// Target index outside the range allowed by the operation
    #[error("index {index} is out of range for a group of {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// The entity to move is not part of the group
    #[error("{id} is not part of this group")]
    UnknownEntity { id: Uuid },
}

impl SequenceError {
    fn invalid_reorder(expected: usize, reason: impl Into<String>) -> Self {
        Self::InvalidReorder {
            expected,
            reason: reason.into(),
        }
    }
}

fn shift<T: Sequenced>(sibling: &mut T, delta: i64, changes: &mut Vec<PositionChange>) {
    let from = sibling.position();
    let to = from + delta;
    sibling.set_position(to);
    changes.push(PositionChange {
        id: sibling.sequence_id(),
        from,
        to,
    });
}

/// Position for a new sibling appended after all existing ones
pub fn append_at<T: Sequenced>(siblings: &[T]) -> i64 {
    siblings
        .iter()
        .map(Sequenced::position)
        .max()
        .map_or(0, |max| max + 1)
}

/// Assign `position = index in ordered_ids` to every sibling.
///
/// `ordered_ids` must hold every current sibling id exactly once. The
/// group is left untouched when validation fails. Re-applying the same
/// list yields no changes.
pub fn reorder<T: Sequenced>(
    siblings: &mut [T],
    ordered_ids: &[Uuid],
) -> Result<Vec<PositionChange>, SequenceError> {
    let expected = siblings.len();
    if ordered_ids.len() != expected {
        return Err(SequenceError::invalid_reorder(
            expected,
            format!("expected {} ids, got {}", expected, ordered_ids.len()),
        ));
    }

    let mut targets: HashMap<Uuid, i64> = HashMap::with_capacity(expected);
    for (index, id) in ordered_ids.iter().enumerate() {
        if targets.insert(*id, index as i64).is_some() {
            return Err(SequenceError::invalid_reorder(
                expected,
                format!("duplicate id {}", id),
            ));
        }
    }

    if let Some(missing) = siblings
        .iter()
        .map(Sequenced::sequence_id)
        .find(|id| !targets.contains_key(id))
    {
        return Err(SequenceError::invalid_reorder(
            expected,
            format!("missing id {}", missing),
        ));
    }

    let mut changes = Vec::new();
    for sibling in siblings.iter_mut() {
        let to = targets[&sibling.sequence_id()];
        let from = sibling.position();
        if from != to {
            sibling.set_position(to);
            changes.push(PositionChange {
                id: sibling.sequence_id(),
                from,
                to,
            });
        }
    }
    Ok(changes)
}

/// Close the gap left by a removed sibling.
///
/// `siblings` are the remaining members of the group; every one positioned
/// after `removed_position` moves up by one.
pub fn remove_and_compact<T: Sequenced>(
    siblings: &mut [T],
    removed_position: i64,
) -> Vec<PositionChange> {
    let mut changes = Vec::new();
    for sibling in siblings.iter_mut() {
        if sibling.position() > removed_position {
            shift(sibling, -1, &mut changes);
        }
    }
    changes
}

/// Open a slot at `at_index` for an incoming sibling.
///
/// `siblings` are the current members, not including the incoming one.
/// Requires `0 <= at_index <= N`.
pub fn insert_and_shift<T: Sequenced>(
    siblings: &mut [T],
    at_index: i64,
) -> Result<Vec<PositionChange>, SequenceError> {
    let len = siblings.len();
    if at_index < 0 || at_index > len as i64 {
        return Err(SequenceError::IndexOutOfRange {
            index: at_index,
            len,
        });
    }

    let mut changes = Vec::new();
    for sibling in siblings.iter_mut() {
        if sibling.position() >= at_index {
            shift(sibling, 1, &mut changes);
        }
    }
    Ok(changes)
}

/// Move sibling `id` to `target_index` inside its own group.
///
/// Siblings between the old and new slot shift by one toward the vacated
/// slot. Requires `0 <= target_index < N`; moving to the current position
/// is a no-op.
pub fn move_within_group<T: Sequenced>(
    siblings: &mut [T],
    id: Uuid,
    target_index: i64,
) -> Result<Vec<PositionChange>, SequenceError> {
    let len = siblings.len();
    if target_index < 0 || target_index >= len as i64 {
        return Err(SequenceError::IndexOutOfRange {
            index: target_index,
            len,
        });
    }

    let current = siblings
        .iter()
        .find(|s| s.sequence_id() == id)
        .map(Sequenced::position)
        .ok_or(SequenceError::UnknownEntity { id })?;

    let mut changes = Vec::new();
    if target_index == current {
        return Ok(changes);
    }

    for sibling in siblings.iter_mut() {
        if sibling.sequence_id() == id {
            continue;
        }
        let position = sibling.position();
        if target_index > current && position > current && position <= target_index {
            shift(sibling, -1, &mut changes);
        } else if target_index < current && position >= target_index && position < current {
            shift(sibling, 1, &mut changes);
        }
    }

    if let Some(moved) = siblings.iter_mut().find(|s| s.sequence_id() == id) {
        moved.set_position(target_index);
        changes.push(PositionChange {
            id,
            from: current,
            to: target_index,
        });
    }
    Ok(changes)
}

/// Stable sort by position
pub fn sort_by_position<T: Sequenced>(siblings: &mut [T]) {
    siblings.sort_by_key(Sequenced::position);
}

/// Whether positions are exactly `{0, ..., N-1}`
pub fn is_dense<T: Sequenced>(siblings: &[T]) -> bool {
    let mut positions: Vec<i64> = siblings.iter().map(Sequenced::position).collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(index, position)| *position == index as i64)
}
