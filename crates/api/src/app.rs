use axum::{extract::Path, http::StatusCode, Json};
use routemeter::RouteTable;
use routemeter_core::RouteError;
use serde::Serialize;

use routemeter::routes::health::health;

#[derive(Serialize)]
struct ItemResponse {
    id: u64,
}

#[derive(Serialize)]
struct OrdersResponse {
    user_id: String,
    orders: Vec<u64>,
}

pub fn route_table() -> Result<RouteTable, RouteError> {
    RouteTable::new()
        .get("/health", health)?
        .get("/items/:id", get_item)?
        .post("/items", create_item)?
        .get("/users/:user_id/orders", list_orders)?
        .get("/static/*path", static_file)
}

async fn get_item(Path(id): Path<String>) -> Result<Json<ItemResponse>, StatusCode> {
    let id = id.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(Json(ItemResponse { id }))
}

async fn create_item() -> StatusCode {
    StatusCode::CREATED
}

async fn list_orders(Path(user_id): Path<String>) -> Json<OrdersResponse> {
    Json(OrdersResponse {
        user_id,
        orders: Vec::new(),
    })
}

async fn static_file(Path(path): Path<String>) -> String {
    format!("static: {path}")
}
