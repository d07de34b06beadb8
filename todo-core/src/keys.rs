//! Item key generation.

use crate::model::TodoItem;

/// Produces `item{n}` keys that never repeat within a list.
///
/// The counter is seeded from the list length, so the first key for a list of
/// one item is `item2`. It never moves backwards and skips keys that are
/// already taken, which keeps keys unique when items were removed elsewhere or
/// when several adds are in flight at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySequence {
    next: usize,
}

impl KeySequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the next key for `items`.
    pub fn next_key(&mut self, items: &[TodoItem]) -> String {
        self.next = self.next.max(items.len() + 1);
        loop {
            let key = format!("item{}", self.next);
            self.next += 1;
            if !items.iter().any(|item| item.item_key == key) {
                return key;
            }
        }
    }
}
