//! Authentication handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use bookshop_core::domain::NewAccount;
use bookshop_shared::ApiResponse;
use bookshop_shared::dto::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, ResetRequest,
};

use super::{auth_response, user_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::observability::CallContext;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    ctx: CallContext,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let account = state
        .auth
        .register(
            &ctx,
            NewAccount {
                email: req.email,
                password: req.password,
                confirm_password: req.confirm_password,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(user_response(account))))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    ctx: CallContext,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let bundle = state.auth.login(&ctx, &body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(auth_response(bundle)))
}

/// POST /api/auth/logout
pub async fn logout(
    state: web::Data<AppState>,
    ctx: CallContext,
    identity: Identity,
) -> AppResult<HttpResponse> {
    state.auth.logout(&ctx, &identity.token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Logged out")))
}

/// GET /api/auth/me
pub async fn me(
    state: web::Data<AppState>,
    ctx: CallContext,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let account = state.users.get(&ctx, identity.claim.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_response(account))))
}

/// POST /api/auth/password/change
pub async fn change_password(
    state: web::Data<AppState>,
    ctx: CallContext,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    state
        .auth
        .change_password(&ctx, identity.claim.id, &body.old_password, &body.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Password changed")))
}

/// POST /api/auth/password/reset-request
///
/// Answers the same way whether or not the email is registered.
pub async fn request_password_reset(
    state: web::Data<AppState>,
    ctx: CallContext,
    body: web::Json<ResetRequest>,
) -> AppResult<HttpResponse> {
    state.auth.request_password_reset(&ctx, &body.email).await?;
    Ok(HttpResponse::Accepted().json(ApiResponse::message(
        "If the account exists, a reset key has been sent",
    )))
}

/// POST /api/auth/password/reset
pub async fn reset_password(
    state: web::Data<AppState>,
    ctx: CallContext,
    body: web::Json<ResetPasswordRequest>,
) -> AppResult<HttpResponse> {
    state
        .auth
        .reset_password(&ctx, &body.reset_key, &body.new_password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Password reset")))
}

/// POST /api/auth/impersonate/{id}
pub async fn impersonate(
    state: web::Data<AppState>,
    ctx: CallContext,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let bundle = state
        .auth
        .impersonate(&ctx, &identity.claim, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(auth_response(bundle)))
}
