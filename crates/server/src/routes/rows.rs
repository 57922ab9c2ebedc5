//! Table row handlers: list, fetch, insert, delete.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use shopwise_store::{EntityKind, NewRow, Row};

use crate::{error::AppError, state::AppState};

/// Build the table router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/{kind}", get(list).post(create))
        .route("/api/{kind}/{id}", get(show).delete(remove))
}

/// Response for a successful insert.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i32,
}

fn parse_kind(kind: &str) -> Result<EntityKind, AppError> {
    kind.parse().map_err(AppError::BadRequest)
}

/// Decode a JSON body into the candidate row for `kind`.
fn candidate(kind: EntityKind, body: Value) -> Result<NewRow, AppError> {
    let invalid = |e: serde_json::Error| AppError::BadRequest(format!("invalid {kind} row: {e}"));

    Ok(match kind {
        EntityKind::Users => NewRow::User(serde_json::from_value(body).map_err(invalid)?),
        EntityKind::Products => NewRow::Product(serde_json::from_value(body).map_err(invalid)?),
        EntityKind::Orders => NewRow::Order(serde_json::from_value(body).map_err(invalid)?),
        EntityKind::OrderDetails => {
            NewRow::OrderDetail(serde_json::from_value(body).map_err(invalid)?)
        }
    })
}

/// List every row of a table in id order.
///
/// # Errors
///
/// Returns 400 for an unknown table.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<Row>>, AppError> {
    let kind = parse_kind(&kind)?;
    let shop = state.read().await;
    Ok(Json(shop.store().get_all(kind)))
}

/// Fetch one row by id.
///
/// # Errors
///
/// Returns 400 for an unknown table, 404 if the row does not exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<Json<Row>, AppError> {
    let kind = parse_kind(&kind)?;
    let shop = state.read().await;
    Ok(Json(shop.store().get_by_id(kind, id)?))
}

/// Insert a candidate row.
///
/// # Errors
///
/// Returns 400 for a malformed body, 409 or 422 when a rule rejects the row.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Created>), AppError> {
    let row = candidate(parse_kind(&kind)?, body)?;
    let id = state.write().await.insert(&row)?;
    tracing::info!(table = %row.kind(), id, "Row created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// Delete a row, refusing while other rows reference it.
///
/// # Errors
///
/// Returns 404 if the row does not exist, 409 if it is still referenced.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, i32)>,
) -> Result<StatusCode, AppError> {
    let kind = parse_kind(&kind)?;
    state.write().await.delete(kind, id)?;
    tracing::info!(table = %kind, id, "Row deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::tests::sample_state;

    fn path(kind: &str) -> Path<String> {
        Path(kind.to_string())
    }

    #[tokio::test]
    async fn test_list_users() {
        let state = sample_state().await;
        let Json(rows) = list(State(state), path("users")).await.unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[tokio::test]
    async fn test_list_accepts_dashed_kind() {
        let state = sample_state().await;
        let Json(rows) = list(State(state), path("order-details")).await.unwrap();
        assert_eq!(rows.len(), 10);
    }

    #[tokio::test]
    async fn test_unknown_kind_is_bad_request() {
        let state = sample_state().await;
        let err = list(State(state), path("carts")).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_show_missing_row() {
        let state = sample_state().await;
        let err = show(State(state), Path(("products".to_string(), 99)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_product() {
        let state = sample_state().await;
        let (status, Json(created)) = create(
            State(state.clone()),
            path("products"),
            Json(json!({"name": "Monitor", "price": "300.00"})),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.id, 7);

        let Json(row) = show(State(state), Path(("products".to_string(), 7)))
            .await
            .unwrap();
        let value = serde_json::to_value(row).unwrap();
        assert_eq!(value["name"], "Monitor");
        assert_eq!(value["product_id"], 7);
    }

    #[tokio::test]
    async fn test_create_rejected_by_rules() {
        let state = sample_state().await;

        let err = create(
            State(state.clone()),
            path("products"),
            Json(json!({"name": "Refund", "price": "-5.00"})),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = create(
            State(state.clone()),
            path("products"),
            Json(json!({"name": "Yacht", "price": "10000000000000000000000000000"})),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = create(
            State(state.clone()),
            path("users"),
            Json(json!({"name": "Alice Again", "email": "alice@example.com"})),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        assert_eq!(state.read().await.store().len(EntityKind::Products), 6);
        assert_eq!(state.read().await.store().len(EntityKind::Users), 5);
    }

    #[tokio::test]
    async fn test_create_malformed_body() {
        let state = sample_state().await;
        let err = create(State(state), path("users"), Json(json!({"name": "No Email"})))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_restricted_then_allowed() {
        let state = sample_state().await;

        let err = remove(State(state.clone()), Path(("users".to_string(), 1)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        // Eve has no orders
        let status = remove(State(state.clone()), Path(("users".to_string(), 5)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.read().await.store().len(EntityKind::Users), 4);
    }
}
