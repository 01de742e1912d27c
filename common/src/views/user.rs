use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outward representation of a user account.
///
/// The stored password hash is deliberately not a field on this type, so
/// no response path can leak it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The unique identifier for this user.
    pub id: String,

    /// The user's handle, lowercase alphanumeric.
    pub username: String,

    /// The user's email address.
    pub email: String,

    /// URL of the user's avatar image.
    pub profile_picture: String,

    /// Whether the user holds the admin flag.
    pub is_admin: bool,

    pub created_at: DateTime<Utc>,
}

/// Response of the admin user listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserList {
    /// One offset-based page of users, ordered by creation time.
    pub users: Vec<User>,

    /// Total number of user records in the store.
    pub total_users: u64,

    /// Number of users created within the past calendar month.
    pub last_month_users: u64,
}

/// Confirmation returned by the delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub message: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn user_view_serializes_without_any_password_key() {
        let user = User {
            id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".into(),
            username: "someuser".into(),
            email: "someuser@example.com".into(),
            profile_picture: "https://example.com/avatar.png".into(),
            is_admin: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert!(!keys.iter().any(|k| k.to_lowercase().contains("password")));
    }

    #[test]
    fn user_view_uses_camel_case_on_the_wire() {
        let user = User {
            id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".into(),
            username: "someuser".into(),
            email: "someuser@example.com".into(),
            profile_picture: "https://example.com/avatar.png".into(),
            is_admin: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("profilePicture"));
        assert!(obj.contains_key("isAdmin"));
        assert!(obj.contains_key("createdAt"));
    }

    #[test]
    fn user_list_uses_camel_case_on_the_wire() {
        let list = UserList {
            users: vec![],
            total_users: 12,
            last_month_users: 3,
        };

        let json = serde_json::to_value(&list).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["totalUsers"], 12);
        assert_eq!(obj["lastMonthUsers"], 3);
    }
}
