//! Render-ready view of a list.

use serde::Serialize;

use crate::list::TodoList;

/// One rendered item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub item_key: String,
    pub name: String,
    pub done: bool,
    /// Label of the toggle affordance.
    pub toggle_label: &'static str,
    /// Anchor target of the toggle affordance.
    pub href: String,
}

/// The trailing input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub submit_label: &'static str,
}

impl Default for InputView {
    fn default() -> Self {
        Self { submit_label: "Add" }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub input: InputView,
}

impl RowView {
    /// Rows marked done are shown struck through.
    pub fn struck_through(&self) -> bool {
        self.done
    }
}

/// Produce one row per item, in list order, plus the input row.
pub fn render(list: &TodoList) -> ListView {
    let rows = list
        .items()
        .iter()
        .map(|item| RowView {
            item_key: item.item_key.clone(),
            name: item.name.clone(),
            done: item.done,
            toggle_label: if item.done { "Done" } else { "Not Done" },
            href: format!("#_{}", item.item_key),
        })
        .collect();
    ListView {
        rows,
        input: InputView::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TodoItem;

    #[test]
    fn rows_follow_list_order() {
        let view = render(&TodoList::placeholder());
        let keys: Vec<_> = view.rows.iter().map(|r| r.item_key.as_str()).collect();
        assert_eq!(keys, ["1", "2", "3"]);
        assert_eq!(view.input.submit_label, "Add");
    }

    #[test]
    fn toggle_label_reflects_done() {
        let list = TodoList::new(vec![
            TodoItem::new("a", "1"),
            TodoItem::new("b", "2").with_done(true),
        ]);
        let view = render(&list);
        assert_eq!(view.rows[0].toggle_label, "Not Done");
        assert_eq!(view.rows[1].toggle_label, "Done");
        assert!(view.rows[1].struck_through());
        assert_eq!(view.rows[1].href, "#_2");
    }

    #[test]
    fn empty_list_renders_only_input() {
        let view = render(&TodoList::new(Vec::new()));
        assert!(view.rows.is_empty());
        assert_eq!(view.input, InputView::default());
    }
}
