//! Browser todo application.
//!
//! This crate compiles to WASM and hydrates the server-rendered todo page.
//! State comes from the embedded `todo-state` script when present, otherwise
//! from a single `.model.json` fetch for the root's `data-resource-path`.

pub mod state;

#[cfg(feature = "hydrate")]
mod app;
#[cfg(feature = "hydrate")]
mod components;

#[cfg(feature = "hydrate")]
pub use app::TodoApp;
pub use state::{Response, TodoAppState};

// ============================================================================
// WASM Entry Point
// ============================================================================

#[cfg(feature = "hydrate")]
mod entry {
    use todo_core::hydrate::read_embedded_state;
    use todo_core::markup::{ROOT_ID, STATE_SCRIPT_ID, TITLE_CLASS};
    use wasm_bindgen::prelude::*;

    use crate::app::TodoApp;
    use crate::state::TodoAppState;

    const CANVAS_ID: &str = "todo_canvas";

    #[wasm_bindgen(start)]
    pub fn main() {
        eframe::WebLogger::init(log::LevelFilter::Debug).ok();

        wasm_bindgen_futures::spawn_local(async {
            if let Err(e) = start().await {
                log::error!("Failed to hydrate todo app: {e:?}");
            }
        });
    }

    async fn start() -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let root = document
            .get_element_by_id(ROOT_ID)
            .ok_or_else(|| JsValue::from_str("Hydration root not found"))?;
        let resource_path = root.get_attribute("data-resource-path").unwrap_or_default();

        let state = match read_state(&document, &resource_path) {
            Some(state) => state,
            None => {
                let title = document
                    .query_selector(&format!(".{TITLE_CLASS}"))?
                    .and_then(|el| el.text_content())
                    .unwrap_or_else(|| todo_core::DEFAULT_TITLE.to_owned());
                TodoAppState::new(title, resource_path)
            }
        };

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        canvas.set_id(CANVAS_ID);
        root.append_child(&canvas)?;

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |cc| {
                    let mut app = TodoApp::new(state, cc.egui_ctx.clone());
                    app.start_fetch();
                    Ok(Box::new(app))
                }),
            )
            .await;

        // The server-rendered markup stays visible unless the canvas is running.
        if start_result.is_ok() {
            root.set_class_name("hydrated");
        }
        start_result
    }

    /// Read the state script the server embedded, if any.
    fn read_state(document: &web_sys::Document, resource_path: &str) -> Option<TodoAppState> {
        let json = document.get_element_by_id(STATE_SCRIPT_ID)?.text_content()?;
        match read_embedded_state(&json) {
            Ok(model) => Some(TodoAppState::from_embedded(resource_path, model)),
            Err(e) => {
                log::warn!("Ignoring embedded state: {e}");
                None
            }
        }
    }
}
