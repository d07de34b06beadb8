//! In-memory content repository.
//!
//! Nodes are addressed by absolute path and hold typed properties plus an
//! ordered list of child names. Writes follow the form-post conventions of
//! the content repository the page talks to: every field becomes a property,
//! `{field}@TypeHint` selects its type, and missing ancestors are created.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use todo_core::{DEFAULT_TITLE, TodoItem, TodoListModel};

pub const PRIMARY_TYPE: &str = "jcr:primaryType";
pub const TITLE: &str = "jcr:title";
pub const UNSTRUCTURED: &str = "nt:unstructured";
const TYPE_HINT_SUFFIX: &str = "@TypeHint";

/// A stored property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            Value::Bool(_) => None,
        }
    }

    /// Booleans, and strings spelling a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::String(s) => parse_bool(s),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        s if s.eq_ignore_ascii_case("true") => Some(true),
        s if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub properties: BTreeMap<String, Value>,
    /// Child names in creation order.
    pub children: Vec<String>,
}

impl Node {
    fn unstructured() -> Self {
        let mut node = Node::default();
        node.properties
            .insert(PRIMARY_TYPE.to_owned(), Value::String(UNSTRUCTURED.to_owned()));
        node
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.properties.get(name).and_then(Value::as_bool)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("No resource at {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid {hint} value for {property}: {value}")]
    InvalidValue {
        property: String,
        hint: String,
        value: String,
    },
}

/// Whether a write created the node or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

#[derive(Debug, Clone)]
pub struct Repository {
    nodes: HashMap<String, Node>,
}

impl Default for Repository {
    fn default() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert("/".to_owned(), Node::default());
        Self { nodes }
    }
}

/// Validate `path` and return it without a trailing slash.
pub fn normalize(path: &str) -> Result<String, RepositoryError> {
    if !path.starts_with('/') {
        return Err(RepositoryError::InvalidPath(path.to_owned()));
    }
    if path == "/" {
        return Ok("/".to_owned());
    }
    let trimmed = path.trim_end_matches('/');
    let valid = trimmed
        .split('/')
        .skip(1)
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
    if !valid {
        return Err(RepositoryError::InvalidPath(path.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("/", path),
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Node> {
        let path = normalize(path).ok()?;
        self.nodes.get(&path)
    }

    /// Children of `path` as `(path, node)` in creation order.
    pub fn children(&self, path: &str) -> Vec<(String, &Node)> {
        let Some(parent) = self.get(path) else {
            return Vec::new();
        };
        let base = normalize(path).unwrap_or_default();
        parent
            .children
            .iter()
            .filter_map(|name| {
                let p = child_path(&base, name);
                self.nodes.get(&p).map(|node| (p, node))
            })
            .collect()
    }

    /// Create `path` (and missing ancestors) if needed.
    fn ensure(&mut self, path: &str) -> Upsert {
        if self.nodes.contains_key(path) {
            return Upsert::Updated;
        }
        let (parent, name) = split_parent(path);
        let parent = parent.to_owned();
        let name = name.to_owned();
        self.ensure(&parent);
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(name);
        }
        self.nodes.insert(path.to_owned(), Node::unstructured());
        Upsert::Created
    }

    /// Apply posted form `fields` to the node at `path`.
    pub fn upsert(
        &mut self,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<Upsert, RepositoryError> {
        let path = normalize(path)?;

        let hints: HashMap<&str, &str> = fields
            .iter()
            .filter_map(|(key, value)| {
                key.strip_suffix(TYPE_HINT_SUFFIX)
                    .map(|property| (property, value.as_str()))
            })
            .collect();

        // Convert everything before touching the tree so a bad value leaves it unchanged.
        let mut values = Vec::with_capacity(fields.len());
        for (key, raw) in fields {
            if key.ends_with(TYPE_HINT_SUFFIX) {
                continue;
            }
            let value = match hints.get(key.as_str()) {
                Some(hint) if hint.eq_ignore_ascii_case("boolean") => match parse_bool(raw) {
                    Some(b) => Value::Bool(b),
                    None => {
                        return Err(RepositoryError::InvalidValue {
                            property: key.clone(),
                            hint: (*hint).to_owned(),
                            value: raw.clone(),
                        });
                    }
                },
                _ => Value::String(raw.clone()),
            };
            values.push((key.clone(), value));
        }

        let outcome = self.ensure(&path);
        if let Some(node) = self.nodes.get_mut(&path) {
            node.properties.extend(values);
        }
        tracing::debug!(%path, ?outcome, "node written");
        Ok(outcome)
    }

    /// Export the todo list rooted at `path`.
    pub fn todo_model(&self, path: &str) -> Result<TodoListModel, RepositoryError> {
        let node = self
            .get(path)
            .ok_or_else(|| RepositoryError::NotFound(path.to_owned()))?;
        let title = node.string(TITLE).unwrap_or(DEFAULT_TITLE).to_owned();

        let items_path = child_path(&normalize(path)?, "items");
        let items = self
            .children(&items_path)
            .into_iter()
            .map(|(item_path, item)| {
                let (_, key) = split_parent(&item_path);
                TodoItem {
                    name: item.string("name").unwrap_or_default().to_owned(),
                    done: item.bool("done").unwrap_or(false),
                    item_key: key.to_owned(),
                    path: Some(item_path.clone()),
                }
            })
            .collect();

        Ok(TodoListModel { title, items })
    }

    /// Create a list node at `path` titled `title`, optionally with demo items.
    pub fn seed_list(
        &mut self,
        path: &str,
        title: &str,
        items: &[TodoItem],
    ) -> Result<(), RepositoryError> {
        self.upsert(path, &[(TITLE.to_owned(), title.to_owned())])?;
        let base = normalize(path)?;
        for item in items {
            let fields = [
                ("name".to_owned(), item.name.clone()),
                ("done".to_owned(), item.done.to_string()),
                ("done@TypeHint".to_owned(), "boolean".to_owned()),
            ];
            self.upsert(&todo_core::item_path(&base, &item.item_key), &fields)?;
        }
        Ok(())
    }
}
