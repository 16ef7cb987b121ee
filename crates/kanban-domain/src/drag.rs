use serde::{Deserialize, Serialize};

/// Droppable id the board uses for its horizontal strip of lists.
pub const LISTS_DROPPABLE_ID: &str = "lists";

/// Where a dragged item was picked up or dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub droppable_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// Source and optional destination of a finished drag.
///
/// `destination` is `None` when the item was dropped outside any container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragMove {
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

impl DragMove {
    pub fn new(source: DragLocation, destination: Option<DragLocation>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// The drop target, or `None` when the drag changes nothing.
    pub fn target(&self) -> Option<&DragLocation> {
        self.destination
            .as_ref()
            .filter(|destination| **destination != self.source)
    }
}

/// A drag-end event, discriminated by what was dragged.
///
/// Serialized as `{ "type": "list" | "card", "source": .., "destination": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DragEvent {
    List(DragMove),
    Card(DragMove),
}

impl DragEvent {
    pub fn list(from: usize, to: usize) -> Self {
        DragEvent::List(DragMove::new(
            DragLocation::new(LISTS_DROPPABLE_ID, from),
            Some(DragLocation::new(LISTS_DROPPABLE_ID, to)),
        ))
    }

    pub fn card(source: DragLocation, destination: DragLocation) -> Self {
        DragEvent::Card(DragMove::new(source, Some(destination)))
    }

    pub fn drag_move(&self) -> &DragMove {
        match self {
            DragEvent::List(m) | DragEvent::Card(m) => m,
        }
    }
}
