//! Custom validators shared by action inputs.

use kanban_domain::{CardOrder, ListOrder};
use std::collections::HashSet;
use validator::ValidationError;

fn check_items<I>(items: impl Iterator<Item = (I, i32)>) -> Result<(), ValidationError>
where
    I: std::hash::Hash + Eq,
{
    let mut seen = HashSet::new();
    for (id, order) in items {
        if order < 0 {
            return Err(ValidationError::new("negative_order")
                .with_message("Order must not be negative.".into()));
        }
        if !seen.insert(id) {
            return Err(ValidationError::new("duplicate_id")
                .with_message("Each item may appear only once.".into()));
        }
    }
    Ok(())
}

pub fn validate_list_items(items: &[ListOrder]) -> Result<(), ValidationError> {
    check_items(items.iter().map(|item| (item.id, item.order)))
}

pub fn validate_card_items(items: &[CardOrder]) -> Result<(), ValidationError> {
    check_items(items.iter().map(|item| (item.id, item.order)))
}

/// Rejects text that is only whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Must not be blank.".into()));
    }
    Ok(())
}
