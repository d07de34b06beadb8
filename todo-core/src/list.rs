//! List state and its transition function.
//!
//! Every mutation goes through [`TodoList::update`]. User intents (`Add`,
//! `Toggle`) never touch the stored items; they produce a [`Command`] that the
//! executor turns into a remote write. Only the resulting `Acknowledged`
//! action changes the list.

use crate::keys::KeySequence;
use crate::model::{TodoItem, placeholder_items};

/// Ordered todo items plus the key sequence used for new items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
    keys: KeySequence,
}

/// Inputs to the transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the raw contents of the input field.
    Add(String),
    /// Flip the `done` flag of the item with this key.
    Toggle(String),
    /// The remote store accepted the write.
    Acknowledged(PendingWrite),
    /// The remote store rejected the write or could not be reached.
    Rejected(PendingWrite, String),
}

/// A write waiting for the remote store, carrying the full item to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    Add(TodoItem),
    Toggle(TodoItem),
}

impl PendingWrite {
    pub fn item(&self) -> &TodoItem {
        match self {
            PendingWrite::Add(item) | PendingWrite::Toggle(item) => item,
        }
    }
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Write(PendingWrite),
    Alert(String),
}

impl TodoList {
    /// Build a list from caller-supplied items (the hydration case).
    ///
    /// Items with a key that already appeared earlier in `items` are dropped.
    pub fn new(items: Vec<TodoItem>) -> Self {
        let mut unique: Vec<TodoItem> = Vec::with_capacity(items.len());
        for item in items {
            if unique.iter().any(|i| i.item_key == item.item_key) {
                tracing::warn!(key = %item.item_key, "dropping item with duplicate key");
                continue;
            }
            unique.push(item);
        }
        Self {
            items: unique,
            keys: KeySequence::new(),
        }
    }

    /// Rebase onto freshly loaded `items`, keeping the key sequence.
    ///
    /// Keys already handed to in-flight adds are not in `items` yet, so the
    /// sequence must not restart.
    pub fn replace_items(&mut self, items: Vec<TodoItem>) {
        let keys = std::mem::take(&mut self.keys);
        *self = Self { keys, ..Self::new(items) };
    }

    /// The hard-coded demo list.
    pub fn placeholder() -> Self {
        Self::new(placeholder_items())
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.item_key == key)
    }

    /// Apply `action`, returning the next state and an optional command.
    pub fn update(mut self, action: Action) -> (Self, Option<Command>) {
        match action {
            Action::Add(raw) => {
                let name = raw.trim();
                if name.is_empty() {
                    return (self, None);
                }
                let key = self.keys.next_key(&self.items);
                let item = TodoItem::new(name, key);
                (self, Some(Command::Write(PendingWrite::Add(item))))
            }
            Action::Toggle(key) => {
                let Some(current) = self.get(&key) else {
                    tracing::debug!(%key, "toggle for unknown item ignored");
                    return (self, None);
                };
                let mut updated = current.clone();
                updated.done = !updated.done;
                (self, Some(Command::Write(PendingWrite::Toggle(updated))))
            }
            Action::Acknowledged(PendingWrite::Add(item)) => {
                if self.get(&item.item_key).is_some() {
                    tracing::warn!(key = %item.item_key, "acknowledged add for existing key ignored");
                } else {
                    self.items.push(item);
                }
                (self, None)
            }
            Action::Acknowledged(PendingWrite::Toggle(item)) => {
                match self.items.iter_mut().find(|i| i.item_key == item.item_key) {
                    Some(stored) => stored.done = item.done,
                    None => {
                        tracing::warn!(key = %item.item_key, "acknowledged toggle for missing item")
                    }
                }
                (self, None)
            }
            Action::Rejected(write, reason) => {
                let message = match &write {
                    PendingWrite::Add(item) => {
                        format!("Could not add \"{}\": {reason}", item.name)
                    }
                    PendingWrite::Toggle(item) => {
                        format!("Could not update \"{}\": {reason}", item.name)
                    }
                };
                (self, Some(Command::Alert(message)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn one_item() -> TodoList {
        TodoList::new(vec![TodoItem::new("Item 1", "1")])
    }

    fn expect_write(command: Option<Command>) -> PendingWrite {
        match command {
            Some(Command::Write(write)) => write,
            other => panic!("expected a write, got {other:?}"),
        }
    }

    #[test]
    fn add_issues_write_without_changing_items() {
        let (list, command) = one_item().update(Action::Add("  Buy milk ".into()));
        assert_eq!(list.items(), one_item().items());

        let write = expect_write(command);
        assert_eq!(write, PendingWrite::Add(TodoItem::new("Buy milk", "item2")));
    }

    #[test]
    fn acknowledged_add_appends() {
        let (list, command) = one_item().update(Action::Add("Buy milk".into()));
        let write = expect_write(command);
        let (list, command) = list.update(Action::Acknowledged(write));

        assert!(command.is_none());
        assert_eq!(
            list.items(),
            &[TodoItem::new("Item 1", "1"), TodoItem::new("Buy milk", "item2")]
        );
    }

    #[test]
    fn whitespace_add_is_ignored() {
        let (list, command) = one_item().update(Action::Add(" \t\n".into()));
        assert!(command.is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn toggle_copies_before_commit() {
        let (list, command) = one_item().update(Action::Toggle("1".into()));
        assert!(!list.get("1").unwrap().done);

        let write = expect_write(command);
        assert!(write.item().done);

        let (list, _) = list.update(Action::Acknowledged(write));
        assert!(list.get("1").unwrap().done);
    }

    #[test]
    fn rejected_toggle_leaves_state_and_alerts() {
        let before = one_item();
        let (list, command) = before.clone().update(Action::Toggle("1".into()));
        let write = expect_write(command);
        let (list, command) = list.update(Action::Rejected(write, "HTTP 500".into()));

        assert_eq!(list, before);
        match command {
            Some(Command::Alert(message)) => assert!(message.contains("Item 1")),
            other => panic!("expected an alert, got {other:?}"),
        }
    }

    #[test]
    fn toggle_unknown_key_is_ignored() {
        let (list, command) = one_item().update(Action::Toggle("nope".into()));
        assert!(command.is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn concurrent_adds_get_distinct_keys() {
        let (list, first) = one_item().update(Action::Add("a".into()));
        let (list, second) = list.update(Action::Add("b".into()));
        let first = expect_write(first);
        let second = expect_write(second);
        assert_ne!(first.item().item_key, second.item().item_key);

        // Completion order may differ from submission order.
        let (list, _) = list.update(Action::Acknowledged(second));
        let (list, _) = list.update(Action::Acknowledged(first));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn replaced_items_keep_key_sequence() {
        let (mut list, pending) = TodoList::placeholder().update(Action::Add("a".into()));
        let pending = expect_write(pending);
        assert_eq!(pending.item().item_key, "item4");

        list.replace_items(placeholder_items());
        let (list, next) = list.update(Action::Add("b".into()));
        assert_eq!(expect_write(next).item().item_key, "item5");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn duplicate_keys_dropped_on_construction() {
        let list = TodoList::new(vec![TodoItem::new("a", "1"), TodoItem::new("b", "1")]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].name, "a");
    }

    fn arb_list() -> impl Strategy<Value = TodoList> {
        prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 0..8).prop_map(|entries| {
            TodoList::new(
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, (name, done))| {
                        TodoItem::new(name, (i + 1).to_string()).with_done(done)
                    })
                    .collect(),
            )
        })
    }

    fn keys_unique(list: &TodoList) -> bool {
        let keys: std::collections::HashSet<_> =
            list.items().iter().map(|i| i.item_key.as_str()).collect();
        keys.len() == list.len()
    }

    proptest! {
        #[test]
        fn add_appends_iff_acknowledged(list in arb_list(), name in "[ \t]{0,3}[a-zA-Z0-9][a-zA-Z0-9 ]{0,12}[ \t]{0,3}", ok in any::<bool>()) {
            let before = list.clone();
            let (list, command) = list.update(Action::Add(name.clone()));
            let write = expect_write(command);
            let action = if ok {
                Action::Acknowledged(write)
            } else {
                Action::Rejected(write, "offline".into())
            };
            let (list, _) = list.update(action);

            if ok {
                prop_assert_eq!(list.len(), before.len() + 1);
                let last = list.items().last().unwrap();
                prop_assert_eq!(last.name.as_str(), name.trim());
                prop_assert!(!last.done);
            } else {
                prop_assert_eq!(list.items(), before.items());
            }
            prop_assert!(keys_unique(&list));
        }

        #[test]
        fn blank_add_never_writes(list in arb_list(), blank in "[ \t\n]{0,6}") {
            let before = list.len();
            let (list, command) = list.update(Action::Add(blank));
            prop_assert!(command.is_none());
            prop_assert_eq!(list.len(), before);
        }

        #[test]
        fn toggle_flips_only_target(list in arb_list(), pick in any::<prop::sample::Index>(), ok in any::<bool>()) {
            prop_assume!(!list.is_empty());
            let before = list.clone();
            let target = before.items()[pick.index(before.len())].item_key.clone();

            let (list, command) = list.update(Action::Toggle(target.clone()));
            let write = expect_write(command);
            let action = if ok {
                Action::Acknowledged(write)
            } else {
                Action::Rejected(write, "offline".into())
            };
            let (list, _) = list.update(action);

            for (old, new) in before.items().iter().zip(list.items()) {
                prop_assert_eq!(&old.item_key, &new.item_key);
                if ok && old.item_key == target {
                    prop_assert_eq!(new.done, !old.done);
                } else {
                    prop_assert_eq!(new.done, old.done);
                }
            }
        }
    }
}
