//! Drag-and-drop reordering of lists and cards.
//!
//! Everything here is pure: inputs are borrowed, results are rebuilt values,
//! and `order` fields are renumbered from zero by position after every move.

use thiserror::Error;
use uuid::Uuid;

use crate::card::Card;
use crate::drag::{DragEvent, DragLocation, DragMove};
use crate::list::{List, ListId, ListWithCards};
use crate::order::{CardOrder, ListOrder, OrderUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("No list matches droppable id '{droppable_id}'")]
    ContainerNotFound { droppable_id: String },

    #[error("No card at index {index} in list {list_id}")]
    IndexOutOfRange { list_id: ListId, index: usize },

    #[error("No list at index {index}, board has {len}")]
    ListIndexOutOfRange { index: usize, len: usize },
}

/// Outcome of a drag that changed the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reordered {
    /// The full arrangement to show locally.
    pub lists: Vec<ListWithCards>,
    /// The order fields that changed and must be persisted.
    pub update: OrderUpdate,
}

/// Moves the element at `from` to `to` in a copy of `items`.
///
/// The result always has the same length as the input:
/// - `from` past the end moves nothing and returns an unchanged copy;
/// - `to` past the end (after removal) appends the element.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut result = items.to_vec();
    if from >= result.len() {
        return result;
    }
    let moved = result.remove(from);
    let to = to.min(result.len());
    result.insert(to, moved);
    result
}

/// Computes the board arrangement after a drag.
///
/// Returns `Ok(None)` when the drag changes nothing: no destination, or
/// dropped back where it started.
pub fn apply_drag(
    lists: &[ListWithCards],
    event: &DragEvent,
) -> Result<Option<Reordered>, ReorderError> {
    let reordered = match event {
        DragEvent::List(drag) => match drag.target() {
            Some(target) => Some(reorder_lists(lists, drag.source.index, target.index)?),
            None => None,
        },
        DragEvent::Card(drag) => match drag.target() {
            Some(target) => Some(reorder_cards(lists, drag, target)?),
            None => None,
        },
    };

    match &reordered {
        Some(r) => tracing::debug!("Drag reordered {} item(s)", r.update.len()),
        None => tracing::debug!("Drag ended without a change"),
    }
    Ok(reordered)
}

fn reorder_lists(
    lists: &[ListWithCards],
    from: usize,
    to: usize,
) -> Result<Reordered, ReorderError> {
    if from >= lists.len() {
        return Err(ReorderError::ListIndexOutOfRange {
            index: from,
            len: lists.len(),
        });
    }
    let lists: Vec<ListWithCards> = reorder(lists, from, to)
        .into_iter()
        .enumerate()
        .map(|(index, entry)| ListWithCards {
            list: List {
                order: index as i32,
                ..entry.list
            },
            cards: entry.cards,
        })
        .collect();

    let items = lists.iter().map(|entry| ListOrder::from(&entry.list)).collect();
    Ok(Reordered {
        lists,
        update: OrderUpdate::Lists(items),
    })
}

fn reorder_cards(
    lists: &[ListWithCards],
    drag: &DragMove,
    target: &DragLocation,
) -> Result<Reordered, ReorderError> {
    let source_idx = find_container(lists, &drag.source.droppable_id)?;
    let dest_idx = find_container(lists, &target.droppable_id)?;
    let source_id = lists[source_idx].id();
    if drag.source.index >= lists[source_idx].cards.len() {
        return Err(ReorderError::IndexOutOfRange {
            list_id: source_id,
            index: drag.source.index,
        });
    }
    let mut next = lists.to_vec();

    if source_idx == dest_idx {
        let list_id = source_id;
        let cards = renumber(
            reorder(&lists[source_idx].cards, drag.source.index, target.index),
            list_id,
        );
        let items = cards.iter().map(CardOrder::from).collect();
        next[source_idx].cards = cards;
        return Ok(Reordered {
            lists: next,
            update: OrderUpdate::Cards(items),
        });
    }

    let dest_id = lists[dest_idx].id();

    let mut source_cards = lists[source_idx].cards.clone();
    let moved = source_cards.remove(drag.source.index);

    let mut dest_cards = lists[dest_idx].cards.clone();
    let at = target.index.min(dest_cards.len());
    dest_cards.insert(at, moved);

    let source_cards = renumber(source_cards, source_id);
    let dest_cards = renumber(dest_cards, dest_id);

    let items = dest_cards
        .iter()
        .chain(source_cards.iter())
        .map(CardOrder::from)
        .collect();

    next[source_idx].cards = source_cards;
    next[dest_idx].cards = dest_cards;
    Ok(Reordered {
        lists: next,
        update: OrderUpdate::Cards(items),
    })
}

fn find_container(lists: &[ListWithCards], droppable_id: &str) -> Result<usize, ReorderError> {
    Uuid::parse_str(droppable_id)
        .ok()
        .and_then(|id| lists.iter().position(|entry| entry.id() == id))
        .ok_or_else(|| ReorderError::ContainerNotFound {
            droppable_id: droppable_id.to_string(),
        })
}

fn renumber(cards: Vec<Card>, list_id: ListId) -> Vec<Card> {
    cards
        .into_iter()
        .enumerate()
        .map(|(index, card)| Card {
            list_id,
            order: index as i32,
            ..card
        })
        .collect()
}
