use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::Form;
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use tracing::info;

use crate::{
    db,
    error::{AppError, AppResult},
    models::AddItemForm,
    views, AppState,
};

// ── GET / ─────────────────────────────────────────────────────────────────────

/// Inventory page. Degrades to an empty listing with a warning banner (503)
/// when the store is unreachable rather than failing the request.
pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let Some(database) = db::acquire(&state.client, &state.config).await else {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Html(views::render_index(&[], false)),
        )
            .into_response());
    };

    let items = db::fetch_all_items(&database).await?;
    info!(count = items.len(), "Rendered inventory page");

    Ok(Html(views::render_index(&items, true)).into_response())
}

// ── POST /add ─────────────────────────────────────────────────────────────────

pub async fn add_item(
    State(state): State<AppState>,
    Form(form): Form<AddItemForm>,
) -> AppResult<Redirect> {
    let database = db::acquire(&state.client, &state.config)
        .await
        .ok_or(AppError::DatabaseUnavailable)?;

    let item = form.into_item()?;
    db::insert_item(&database, &item).await?;

    info!(
        name = %item.name,
        price = item.price,
        dynamic_fields = item.extra.len(),
        "Inserted item"
    );

    Ok(Redirect::to("/"))
}

// ── POST /delete/:id ──────────────────────────────────────────────────────────

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    // Connectivity is checked before the identifier is parsed, so a malformed
    // id against a down store still reports 503.
    let database = db::acquire(&state.client, &state.config)
        .await
        .ok_or(AppError::DatabaseUnavailable)?;

    let oid = ObjectId::parse_str(&id)
        .map_err(|_| AppError::BadRequest(format!("malformed item id {:?}", id)))?;

    let deleted = db::delete_item(&database, oid).await?;
    if deleted == 0 {
        info!(%id, "Delete matched no item");
    } else {
        info!(%id, "Deleted item");
    }

    Ok(Redirect::to("/"))
}

// ── GET /api/items ────────────────────────────────────────────────────────────

pub async fn list_items(State(state): State<AppState>) -> AppResult<Response> {
    let Some(database) = db::acquire(&state.client, &state.config).await else {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Database connection failed" })),
        )
            .into_response());
    };

    let items = db::fetch_all_items_public(&database).await?;
    info!(count = items.len(), "Listed items");

    Ok(Json(json!({ "items": items, "count": items.len() })).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    use crate::{config::Config, db, AppState};

    /// State pointing at a port nothing listens on, with a short ping timeout
    /// so the degraded paths resolve quickly.
    fn unreachable_state() -> AppState {
        let config = Config {
            mongo_host: "127.0.0.1".to_string(),
            mongo_port: 9,
            mongo_db: "ecs_demo_test".to_string(),
            mongo_timeout_ms: 200,
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let client = db::build_client(&config).unwrap();
        AppState { client, config }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_disconnected_with_status_200() {
        let app = crate::build_router(unreachable_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "healthy", "mongodb": "disconnected" }));
    }

    #[tokio::test]
    async fn index_degrades_to_empty_page_with_503() {
        let app = crate::build_router(unreachable_state());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_string(response).await;
        assert!(body.contains("Database disconnected"));
        // No item rows, just the header row.
        assert_eq!(body.matches("<tr>").count(), 1);
    }

    #[tokio::test]
    async fn api_items_returns_json_error_with_503() {
        let app = crate::build_router(unreachable_state());
        let response = app
            .oneshot(Request::get("/api/items").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Database connection failed" }));
    }

    #[tokio::test]
    async fn add_returns_plain_text_503_without_a_connection() {
        let app = crate::build_router(unreachable_state());
        let response = app
            .oneshot(
                Request::post("/add")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("name=Widget&price=10"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_string(response).await, "Database connection failed");
    }

    #[tokio::test]
    async fn delete_checks_connectivity_before_parsing_the_id() {
        let app = crate::build_router(unreachable_state());
        let response = app
            .oneshot(
                Request::post("/delete/not-an-object-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_string(response).await, "Database connection failed");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = crate::build_router(unreachable_state());
        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
