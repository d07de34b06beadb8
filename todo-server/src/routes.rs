//! HTTP surface of the content repository.
//!
//! - `GET  {path}`             server-rendered todo page
//! - `GET  {path}.model.json`  todo list export
//! - `GET  {path}.json`        raw node properties
//! - `POST {path}`             form write (create or update)
//! - `GET  /clientlib/...`     embedded browser bundle

use axum::{
    Form, Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tokio::sync::RwLock;
use todo_core::hydrate::MODEL_JSON_SUFFIX;
use todo_view::Page;
use tower_http::trace::TraceLayer;

use crate::repository::{Repository, RepositoryError, Upsert};

/// Page template and browser bundle.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

pub type SharedRepository = Arc<RwLock<Repository>>;

const JSON_SUFFIX: &str = ".json";

impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            RepositoryError::InvalidPath(_) | RepositoryError::InvalidValue { .. } => {
                StatusCode::BAD_REQUEST
            }
        };
        (status, self.to_string()).into_response()
    }
}

pub fn router(repo: SharedRepository) -> Router {
    // Every path outside the clientlib is a resource path.
    let resources: MethodRouter = get(read).post(write).with_state(repo);
    Router::new()
        .route("/clientlib/{*asset}", get(clientlib))
        .fallback_service(resources)
        .layer(TraceLayer::new_for_http())
}

async fn clientlib(uri: Uri) -> impl IntoResponse {
    todo_view::static_handler::<Assets>(uri).await
}

async fn read(State(repo): State<SharedRepository>, uri: Uri) -> Result<Response, RepositoryError> {
    let path = uri.path().to_owned();
    let repo = repo.read().await;

    if let Some(resource) = path.strip_suffix(MODEL_JSON_SUFFIX) {
        let model = repo.todo_model(resource)?;
        return Ok(Json(model).into_response());
    }

    if let Some(resource) = path.strip_suffix(JSON_SUFFIX) {
        let node = repo
            .get(resource)
            .ok_or_else(|| RepositoryError::NotFound(resource.to_owned()))?;
        return Ok(Json(&node.properties).into_response());
    }

    let model = repo.todo_model(&path)?;
    tracing::debug!(%path, items = model.items.len(), "rendering page");
    Ok(Page::<Assets>::new(path, model).into_response())
}

async fn write(
    State(repo): State<SharedRepository>,
    uri: Uri,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<StatusCode, RepositoryError> {
    let path = uri.path();
    let outcome = repo.write().await.upsert(path, &fields)?;
    tracing::info!(%path, ?outcome, "resource written");
    Ok(match outcome {
        Upsert::Created => StatusCode::CREATED,
        Upsert::Updated => StatusCode::OK,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use todo_core::{TodoItem, TodoListModel, encode_item_form, item_path, model::placeholder_items};
    use tower::ServiceExt;

    fn seeded() -> (Router, SharedRepository) {
        let mut repo = Repository::new();
        repo.seed_list("/content/todo", "My List", &placeholder_items())
            .unwrap();
        let repo = Arc::new(RwLock::new(repo));
        (router(repo.clone()), repo)
    }

    async fn body_to_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(path: &str, body: String) -> Request<Body> {
        Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn model_json_exports_list() {
        let (app, _) = seeded();
        let response = app
            .oneshot(Request::get("/content/todo.model.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let model: TodoListModel = serde_json::from_str(&body_to_string(response).await).unwrap();
        assert_eq!(model.title, "My List");
        assert_eq!(model.items.len(), 3);
        assert_eq!(model.items[2].path.as_deref(), Some("/content/todo/items/3"));
    }

    #[tokio::test]
    async fn model_json_for_missing_resource_is_404() {
        let (app, _) = seeded();
        let response = app
            .oneshot(Request::get("/content/other.model.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn page_is_server_rendered() {
        let (app, _) = seeded();
        let response = app
            .oneshot(Request::get("/content/todo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response).await;
        assert!(body.contains("<title>My List</title>"));
        assert!(body.contains(r#"data-resource-path="/content/todo""#));
        assert_eq!(body.matches("<li").count(), 3);
        assert!(body.contains("/clientlib/content/todo/jsbundle.js"));
    }

    #[tokio::test]
    async fn posted_item_appears_in_export() {
        let (app, repo) = seeded();
        let item = TodoItem::new("Buy milk", "item4");
        let body = encode_item_form(&item).unwrap();
        let response = app
            .oneshot(post_form(&item_path("/content/todo", "item4"), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let model = repo.read().await.todo_model("/content/todo").unwrap();
        let last = model.items.last().unwrap();
        assert_eq!(last.name, "Buy milk");
        assert_eq!(last.item_key, "item4");
        assert!(!last.done);
    }

    #[tokio::test]
    async fn posted_toggle_updates_item() {
        let (app, repo) = seeded();
        let item = TodoItem::new("Item 1", "1").with_done(true);
        let body = encode_item_form(&item).unwrap();
        let response = app
            .oneshot(post_form("/content/todo/items/1", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let model = repo.read().await.todo_model("/content/todo").unwrap();
        assert!(model.items[0].done);
        assert_eq!(model.items.len(), 3);
    }

    #[tokio::test]
    async fn invalid_boolean_is_bad_request() {
        let (app, _) = seeded();
        let response = app
            .oneshot(post_form(
                "/content/todo/items/1",
                "done=perhaps&done%40TypeHint=boolean".into(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn node_json_lists_properties() {
        let (app, _) = seeded();
        let response = app
            .oneshot(Request::get("/content/todo/items/2.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let props: serde_json::Value = serde_json::from_str(&body_to_string(response).await).unwrap();
        assert_eq!(props["done"], serde_json::Value::Bool(true));
        assert_eq!(props["name"], "Item 2");
        assert_eq!(props["jcr:primaryType"], "nt:unstructured");
    }

    #[tokio::test]
    async fn clientlib_serves_bundle() {
        let (app, _) = seeded();
        let response = app
            .oneshot(
                Request::get("/clientlib/content/todo/jsbundle.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/javascript"
        );
    }
}
