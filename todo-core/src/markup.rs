//! HTML markup for server-side rendering.
//!
//! The browser bundle hydrates the element with id [`ROOT_ID`], reading the
//! resource path from its `data-resource-path` attribute, the title from the
//! first [`TITLE_CLASS`] element and the items from the [`STATE_SCRIPT_ID`]
//! script.

use crate::model::TodoListModel;
use crate::view::{ListView, RowView};

pub const ROOT_ID: &str = "TodoAppRoot";
pub const TITLE_CLASS: &str = "App-title";
pub const STATE_SCRIPT_ID: &str = "todo-state";
pub const INTRO_TEXT: &str = "To get started, type in item name and click Add.";

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Serialize `value` for embedding inside a `<script>` element.
pub fn script_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn row_html(row: &RowView) -> String {
    let decoration = if row.struck_through() { "line-through" } else { "none" };
    format!(
        r#"<li style="text-decoration:{decoration}">{name} <a href="{href}">{label}</a></li>"#,
        name = escape(&row.name),
        href = escape(&row.href),
        label = row.toggle_label,
    )
}

impl ListView {
    /// The item list followed by the add form.
    pub fn to_html(&self) -> String {
        let rows: String = self.rows.iter().map(row_html).collect();
        format!(
            r#"<div><ul>{rows}</ul><div><form><input type="text" name="name"/><button>{label}</button></form></div></div>"#,
            label = self.input.submit_label,
        )
    }
}

/// Markup of the whole application inside the hydration root.
pub fn app_html(resource_path: &str, title: &str, list: &ListView) -> String {
    format!(
        concat!(
            r#"<div id="{root}" data-resource-path="{path}">"#,
            r#"<div><header class="App-header"><h1 class="{title_class}">{title}</h1></header>"#,
            r#"<p class="App-intro">{intro}</p>{list}</div>"#,
            "</div>"
        ),
        root = ROOT_ID,
        path = escape(resource_path),
        title_class = TITLE_CLASS,
        title = escape(title),
        intro = INTRO_TEXT,
        list = list.to_html(),
    )
}

/// The `<script>` element carrying the initial model.
pub fn state_script(model: &TodoListModel) -> serde_json::Result<String> {
    Ok(format!(
        r#"<script id="{STATE_SCRIPT_ID}" type="application/json">{}</script>"#,
        script_json(model)?
    ))
}
