//! Account lookup handlers. Require an authenticated caller.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use bookshop_core::domain::Page;
use bookshop_shared::ApiResponse;
use bookshop_shared::dto::PageQuery;

use super::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::observability::CallContext;
use crate::state::AppState;

/// GET /api/users
pub async fn list(
    state: web::Data<AppState>,
    ctx: CallContext,
    _identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = Page::new(query.limit, query.offset);
    let accounts = state.users.list(&ctx, page).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(accounts.map(user_response))))
}

/// GET /api/users/{id}
pub async fn get(
    state: web::Data<AppState>,
    ctx: CallContext,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let account = state.users.get(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_response(account))))
}
