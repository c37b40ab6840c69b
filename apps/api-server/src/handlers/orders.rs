//! Order handlers. Every route acts on the caller's own orders.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use bookshop_shared::ApiResponse;
use bookshop_shared::dto::PlaceOrderRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::observability::CallContext;
use crate::state::AppState;

/// POST /api/orders
pub async fn place(
    state: web::Data<AppState>,
    ctx: CallContext,
    identity: Identity,
    body: web::Json<PlaceOrderRequest>,
) -> AppResult<HttpResponse> {
    let order = state
        .orders
        .place_order(&ctx, identity.claim.id, body.book_id)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(order)))
}

/// GET /api/orders
pub async fn mine(
    state: web::Data<AppState>,
    ctx: CallContext,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let orders = state.orders.get_user_orders(&ctx, identity.claim.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(orders)))
}

/// POST /api/orders/{id}/cancel
pub async fn cancel(
    state: web::Data<AppState>,
    ctx: CallContext,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let order = state
        .orders
        .cancel_order(&ctx, identity.claim.id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(order)))
}
