//! Handlers for the user profile endpoints: update, delete, sign-out,
//! admin listing, and single lookup.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header::{self, HeaderName},
    response::AppendHeaders,
};
use chrono::{Months, Utc};
use quill_common::{
    params::{UpdateUserParams, UserListParams},
    views::{DeleteUserResponse, User, UserList},
};
use quill_db::{
    models::DbUlid,
    password,
    storage::{SortOrder, UserPage, UserPatch, UserStore},
};
use tracing::info;

use crate::{
    auth::{Auth, signing::clear_session_cookie},
    context::ApiContext,
    error::ApiError,
};


const MIN_PASSWORD_LEN: usize = 6;
const MIN_USERNAME_LEN: usize = 6;
const MAX_USERNAME_LEN: usize = 20;

/// Check an updated username against the account rules.
///
/// The checks run in a fixed order so the caller always sees the first
/// violated rule: length, then whitespace, then case, then character
/// set.
fn validate_username(username: &str) -> Result<(), ApiError> {
    let length = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&length) {
        return Err(ApiError::invalid_input(
            "Username must be between 6 and 20 characters long",
        ));
    }
    if username.contains(char::is_whitespace) {
        return Err(ApiError::invalid_input("Username cannot contain spaces"));
    }
    if username != username.to_lowercase() {
        return Err(ApiError::invalid_input("Username must be lowercase"));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ApiError::invalid_input(
            "Username can only contain letters and numbers",
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::invalid_input(
            "Password must be at least 6 characters long",
        ));
    }
    Ok(())
}

/// PUT /api/v1/users/{id}
///
/// Update the caller's own profile. Fields absent from the body are left
/// unchanged.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tags = ["users"],
    params(("id" = String, Path, description = "Id of the user to update")),
    request_body = UpdateUserParams,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid username or password"),
        (status = 403, description = "Caller is not the target user"),
        (status = 404, description = "No such user"),
    ),
    security(("session" = []))
)]
pub async fn update_user(
    State(ctx): State<ApiContext>,
    Auth(caller): Auth,
    Path(id): Path<String>,
    Json(params): Json<UpdateUserParams>,
) -> Result<Json<User>, ApiError> {
    if !caller.owns(&id) {
        return Err(ApiError::forbidden(
            "You are not authorized to update this user",
        ));
    }

    let password_hash = match params.password.as_deref() {
        Some(plain) => {
            validate_password(plain)?;
            Some(password::hash(plain)?)
        }
        None => None,
    };

    if let Some(username) = params.username.as_deref() {
        validate_username(username)?;
    }

    let target = DbUlid::from_string(&id).ok_or_else(ApiError::not_found)?;
    let patch = UserPatch {
        username: params.username,
        email: params.email,
        profile_picture: params.profile_picture,
        password_hash,
    };

    // A vanished record shows up as a null update result; surface it as
    // not-found rather than an ambiguous success.
    let updated = UserStore::update(&*ctx.db, &target, patch)
        .await?
        .ok_or_else(ApiError::not_found)?;

    info!(user_id = %updated.id, "User profile updated");

    Ok(Json(updated.into()))
}

/// DELETE /api/v1/users/{id}
///
/// Delete a user account. Admins may delete anyone; everyone else only
/// themselves. Idempotent: deleting an id with no record still succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tags = ["users"],
    params(("id" = String, Path, description = "Id of the user to delete")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 403, description = "Caller may not delete this user"),
    ),
    security(("session" = []))
)]
pub async fn delete_user(
    State(ctx): State<ApiContext>,
    Auth(caller): Auth,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    if !caller.can_manage(&id) {
        return Err(ApiError::forbidden(
            "You are not authorized to delete this user",
        ));
    }

    // A malformed id cannot match any record; deletion is idempotent
    // either way.
    if let Some(target) = DbUlid::from_string(&id) {
        UserStore::delete(&*ctx.db, &target).await?;
        info!(user_id = %target, "User deleted");
    }

    Ok(Json(DeleteUserResponse {
        message: "User has been deleted".into(),
    }))
}

/// POST /api/v1/users/signout
///
/// Clear the caller's session cookie. Always succeeds; the cookie is
/// cleared whether or not it was present.
#[utoipa::path(
    post,
    path = "/api/v1/users/signout",
    tags = ["users"],
    responses((status = 200, description = "Session cookie cleared"))
)]
pub async fn signout(
    State(ctx): State<ApiContext>,
) -> (AppendHeaders<[(HeaderName, String); 1]>, Json<&'static str>) {
    let cookie = clear_session_cookie(ctx.config.cookies_secure());
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json("User has been signed out"),
    )
}

/// GET /api/v1/users
///
/// Admin-only listing of user accounts, with offset pagination and
/// signup counts.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tags = ["users"],
    params(UserListParams),
    responses(
        (status = 200, description = "Page of users plus signup counts", body = UserList),
        (status = 403, description = "Caller is not an admin"),
    ),
    security(("session" = []))
)]
pub async fn list_users(
    State(ctx): State<ApiContext>,
    Auth(caller): Auth,
    Query(query): Query<UserListParams>,
) -> Result<Json<UserList>, ApiError> {
    if !caller.is_admin {
        return Err(ApiError::forbidden("You are not allowed to see all users"));
    }

    let page = UserPage {
        skip: query.start_index(),
        limit: query.limit(),
        sort: if query.newest_first() {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        },
    };

    // Three separate store calls; the counts are not transactional with
    // the page and may drift under concurrent writes.
    let users = UserStore::list(&*ctx.db, page).await?;
    let total_users = UserStore::count(&*ctx.db).await?;

    // Same day-of-month one month back, clamped at month ends.
    let one_month_ago = Utc::now()
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| anyhow::anyhow!("system clock out of range"))?;
    let last_month_users = UserStore::count_created_since(&*ctx.db, one_month_ago).await?;

    Ok(Json(UserList {
        users: users.into_iter().map(Into::into).collect(),
        total_users,
        last_month_users,
    }))
}

/// GET /api/v1/users/{id}
///
/// Public profile lookup; no authentication required.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tags = ["users"],
    params(("id" = String, Path, description = "Id of the user to fetch")),
    responses(
        (status = 200, description = "The requested user", body = User),
        (status = 404, description = "No such user"),
    )
)]
pub async fn get_user(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let target = DbUlid::from_string(&id).ok_or_else(ApiError::not_found)?;

    let user = UserStore::get(&*ctx.db, &target)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(user.into()))
}
