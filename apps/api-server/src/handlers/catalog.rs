//! Catalog handlers. Browsing needs no authentication.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use bookshop_core::domain::Page;
use bookshop_shared::ApiResponse;
use bookshop_shared::dto::{PageQuery, SearchQuery};

use crate::middleware::error::AppResult;
use crate::observability::CallContext;
use crate::state::AppState;

/// GET /api/catalog/books?q=
pub async fn search(
    state: web::Data<AppState>,
    ctx: CallContext,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let books = state.catalog.search(&ctx, &query.q).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(books)))
}

/// GET /api/catalog/books/list
pub async fn list(
    state: web::Data<AppState>,
    ctx: CallContext,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = Page::new(query.limit, query.offset);
    let books = state.catalog.list(&ctx, page).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(books)))
}

/// GET /api/catalog/books/{id}
pub async fn get(
    state: web::Data<AppState>,
    ctx: CallContext,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let book = state.catalog.get(&ctx, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(book)))
}
