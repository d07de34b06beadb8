//! todo-view: server-rendered todo pages and their browser transport.
//!
//! This crate provides the glue between an axum backend and the browser
//! bundle that hydrates a rendered todo page.
//!
//! # Features
//!
//! - `server`: [`Page`] response wrapper rendering the list into an embedded
//!   HTML template, and [`static_handler`] for the embedded browser bundle
//! - `client`: [`client::HttpItemStore`] speaking the repository protocol
//!   from WASM, and [`client::AlertNotifier`]
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use rust_embed::RustEmbed;
//! use todo_core::TodoListModel;
//!
//! #[derive(RustEmbed)]
//! #[folder = "assets/"]
//! struct Assets;
//!
//! async fn page() -> todo_view::Page<Assets> {
//!     todo_view::Page::new("/content/todo", TodoListModel::default())
//! }
//!
//! let app = Router::new()
//!     .route("/content/todo", get(page))
//!     .fallback(todo_view::static_handler::<Assets>);
//! ```

#[cfg(feature = "client")]
pub mod client;

/// Path of the browser bundle for the page bound to `resource_path`.
pub fn clientlib_path(resource_path: &str) -> String {
    format!("/clientlib{}/jsbundle.js", resource_path.trim_end_matches('/'))
}

// ============================================================================
// Server-only: Page wrapper and static file serving
// ============================================================================

#[cfg(feature = "server")]
mod server {
    use axum::{
        http::{StatusCode, Uri, header},
        response::{Html, IntoResponse, Response},
    };
    use rust_embed::RustEmbed;
    use std::marker::PhantomData;
    use todo_core::markup::{app_html, escape, state_script};
    use todo_core::{TodoList, TodoListModel, render};

    /// Placeholders replaced in the embedded `index.html`.
    pub const TITLE_PLACEHOLDER: &str = "<!--TODO_TITLE-->";
    pub const APP_PLACEHOLDER: &str = "<!--TODO_APP-->";
    pub const STATE_PLACEHOLDER: &str = "<!--TODO_STATE-->";
    pub const BUNDLE_PLACEHOLDER: &str = "<!--TODO_BUNDLE-->";

    /// Axum response wrapper for a server-rendered todo page.
    ///
    /// Renders the list into the `index.html` template of `A` and embeds the
    /// model as JSON so the browser bundle can hydrate without a fetch.
    pub struct Page<A: RustEmbed> {
        resource_path: String,
        model: TodoListModel,
        _assets: PhantomData<A>,
    }

    impl<A: RustEmbed> Page<A> {
        /// Create a page for the list resource at `resource_path`.
        pub fn new(resource_path: impl Into<String>, model: TodoListModel) -> Self {
            Self {
                resource_path: resource_path.into(),
                model,
                _assets: PhantomData,
            }
        }

        /// Render the full document.
        pub fn render_html(&self) -> Result<String, PageError> {
            let content = A::get("index.html").ok_or(PageError::MissingTemplate)?;
            let template = String::from_utf8_lossy(&content.data);

            let list = render(&TodoList::new(self.model.items.clone()));
            let app = app_html(&self.resource_path, &self.model.title, &list);
            let state = state_script(&self.model)?;
            let bundle = format!(
                r#"<script type="module" src="{}"></script>"#,
                escape(&super::clientlib_path(&self.resource_path))
            );

            Ok(template
                .replace(TITLE_PLACEHOLDER, &escape(&self.model.title))
                .replace(APP_PLACEHOLDER, &app)
                .replace(STATE_PLACEHOLDER, &state)
                .replace(BUNDLE_PLACEHOLDER, &bundle))
        }
    }

    /// Reasons a page cannot be rendered.
    #[derive(Debug, thiserror::Error)]
    pub enum PageError {
        #[error("Failed to serialize page state: {0}")]
        Serialization(#[from] serde_json::Error),

        #[error("Page template not found. Did you build the frontend?")]
        MissingTemplate,
    }

    impl<A: RustEmbed> IntoResponse for Page<A> {
        fn into_response(self) -> Response {
            match self.render_html() {
                Ok(html) => Html(html).into_response(),
                Err(e) => {
                    tracing::error!(path = %self.resource_path, error = %e, "page rendering failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
                }
            }
        }
    }

    /// Serve a single embedded asset by name.
    pub fn asset_response<A: RustEmbed>(path: &str) -> Response {
        match A::get(path) {
            Some(content) => {
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                (
                    [(header::CONTENT_TYPE, mime.as_ref().to_owned())],
                    content.data.into_owned(),
                )
                    .into_response()
            }
            None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
        }
    }

    /// Handler for serving static assets from an embedded `RustEmbed` type.
    ///
    /// Clientlib URLs carry the resource path before the file name
    /// (`/clientlib/content/todo/jsbundle.js`); only the file name selects the
    /// asset.
    pub async fn static_handler<A: RustEmbed>(uri: Uri) -> impl IntoResponse {
        let path = uri.path().trim_start_matches('/');
        if A::get(path).is_some() {
            return asset_response::<A>(path);
        }
        let file_name = path.rsplit('/').next().unwrap_or_default();
        asset_response::<A>(file_name)
    }
}

#[cfg(feature = "server")]
pub use server::{
    APP_PLACEHOLDER, BUNDLE_PLACEHOLDER, Page, PageError, STATE_PLACEHOLDER, TITLE_PLACEHOLDER,
    asset_response, static_handler,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::clientlib_path;

    #[cfg(feature = "server")]
    pub use crate::{Page, static_handler};

    #[cfg(feature = "client")]
    pub use crate::client::{AlertNotifier, HttpItemStore};
}
