use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Default page size for the user listing endpoint.
pub const DEFAULT_PAGE_LIMIT: i64 = 9;

/// Body of the profile update endpoint. Every field is optional; only the
/// fields present in the request are written to the stored record.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserParams {
    /// New handle: 6-20 characters, lowercase ASCII alphanumeric.
    pub username: Option<String>,

    /// New email address.
    pub email: Option<String>,

    /// New avatar URL.
    pub profile_picture: Option<String>,

    /// New password, at least 6 characters. Hashed before it is stored,
    /// never echoed back.
    pub password: Option<String>,
}

/// Query parameters accepted by the user listing endpoint.
///
/// All fields arrive as optional strings; anything absent or unparseable
/// falls back to the documented default so that sloppy clients still get
/// a sensible page.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    /// Offset of the first record in the page. Defaults to 0.
    pub start_index: Option<String>,

    /// Maximum number of records to return. Defaults to 9.
    pub limit: Option<String>,

    /// "asc" sorts oldest-first; anything else sorts newest-first.
    pub sort: Option<String>,
}

impl UserListParams {
    pub fn start_index(&self) -> u64 {
        self.start_index
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|s| s.parse().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    pub fn newest_first(&self) -> bool {
        self.sort.as_deref() != Some("asc")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params(start_index: Option<&str>, limit: Option<&str>, sort: Option<&str>) -> UserListParams {
        UserListParams {
            start_index: start_index.map(String::from),
            limit: limit.map(String::from),
            sort: sort.map(String::from),
        }
    }

    #[test]
    fn start_index_defaults_to_zero() {
        assert_eq!(params(None, None, None).start_index(), 0);
        assert_eq!(params(Some("not-a-number"), None, None).start_index(), 0);
        assert_eq!(params(Some("-3"), None, None).start_index(), 0);
    }

    #[test]
    fn start_index_parses_valid_offsets() {
        assert_eq!(params(Some("0"), None, None).start_index(), 0);
        assert_eq!(params(Some("27"), None, None).start_index(), 27);
    }

    #[test]
    fn limit_defaults_to_nine() {
        assert_eq!(params(None, None, None).limit(), 9);
        assert_eq!(params(None, Some("garbage"), None).limit(), 9);
    }

    #[test]
    fn limit_rejects_non_positive_values() {
        assert_eq!(params(None, Some("0"), None).limit(), 9);
        assert_eq!(params(None, Some("-5"), None).limit(), 9);
    }

    #[test]
    fn limit_parses_valid_values() {
        assert_eq!(params(None, Some("25"), None).limit(), 25);
    }

    #[test]
    fn sort_is_descending_unless_asc() {
        assert!(params(None, None, None).newest_first());
        assert!(params(None, None, Some("desc")).newest_first());
        assert!(params(None, None, Some("ASC")).newest_first());
        assert!(!params(None, None, Some("asc")).newest_first());
    }

    #[test]
    fn update_params_use_camel_case_on_the_wire() {
        let parsed: UpdateUserParams =
            serde_json::from_str(r#"{"profilePicture": "https://example.com/a.png"}"#).unwrap();
        assert_eq!(
            parsed.profile_picture.as_deref(),
            Some("https://example.com/a.png")
        );
        assert!(parsed.username.is_none());
        assert!(parsed.password.is_none());
    }
}
