use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use quill_common::caller::{Caller, CallerError};
use quill_db::{
    models::DbUlid,
    storage::{Storage, UserStore},
};
use tracing::instrument;

use crate::{
    auth::{COOKIE_NAME, error::AuthError, signing::SessionSigner},
    context::ApiContext,
    error::ApiError,
};

/// Extractor that REQUIRES authentication.
///
/// Returns 401 Unauthorized if the session cookie is missing, does not
/// verify, or references a user that no longer exists. Use this in
/// handlers that need a valid acting user.
///
/// # Examples
///
/// ```rust,ignore
/// use quill_api::auth::Auth;
///
/// pub async fn delete_user(
///     Auth(caller): Auth,  // ← extracts the acting user
///     Path(id): Path<String>,
/// ) -> Result<Json<DeleteUserResponse>, ApiError> {
///     if !caller.can_manage(&id) {
///         return Err(ApiError::forbidden("You are not authorized to delete this user"));
///     }
///     // ... delete user
/// }
/// ```
pub struct Auth(pub Caller);

impl FromRequestParts<ApiContext> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiContext,
    ) -> Result<Self, Self::Rejection> {
        let caller = authenticate(parts, &state.signer, &*state.db)
            .await
            .map_err(|e| ApiError::CallerError(CallerError::unauthorized(Some(e.to_string()))))?;
        Ok(Auth(caller))
    }
}

#[instrument(skip_all, fields(scheme = "session"))]
async fn authenticate(
    parts: &Parts,
    signer: &SessionSigner,
    db: &dyn Storage,
) -> Result<Caller, AuthError> {
    // 1. Extract session cookie
    let signed_cookie =
        extract_cookie(&parts.headers, COOKIE_NAME).ok_or(AuthError::MissingCredentials)?;

    // 2. Verify signature, recovering the user id
    let user_id = signer
        .verify(&signed_cookie)
        .ok_or(AuthError::InvalidCredentials)?;

    let id = DbUlid::from_string(&user_id).ok_or(AuthError::InvalidCredentials)?;

    // 3. Fetch the user the session belongs to
    let user = UserStore::get(db, &id)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    Ok(user.to_caller())
}

/// Extract cookie value from Cookie header
fn extract_cookie(headers: &header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with(&format!("{}=", name)))?
        .strip_prefix(&format!("{}=", name))
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cookie_basic() {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "foo=bar; quill_session=abc123; other=value"
                .parse()
                .unwrap(),
        );

        let result = extract_cookie(&headers, "quill_session");
        assert_eq!(result, Some("abc123".to_string()));

        let result = extract_cookie(&headers, "foo");
        assert_eq!(result, Some("bar".to_string()));
    }

    #[test]
    fn test_extract_cookie_not_found() {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::COOKIE, "foo=bar".parse().unwrap());

        let result = extract_cookie(&headers, "quill_session");
        assert_eq!(result, None);
    }

    #[test]
    fn test_extract_cookie_no_cookie_header() {
        let headers = header::HeaderMap::new();
        let result = extract_cookie(&headers, "anything");
        assert_eq!(result, None);
    }

    #[test]
    fn test_extract_cookie_with_spaces() {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "cookie1=value1;  quill_session=value2  ;cookie3=value3"
                .parse()
                .unwrap(),
        );

        let result = extract_cookie(&headers, "quill_session");
        assert_eq!(result, Some("value2".to_string()));
    }

    #[test]
    fn test_extract_cookie_similar_names() {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "session=old; quill_session=new".parse().unwrap(),
        );

        let result = extract_cookie(&headers, "session");
        assert_eq!(result, Some("old".to_string()));

        let result = extract_cookie(&headers, "quill_session");
        assert_eq!(result, Some("new".to_string()));
    }
}
