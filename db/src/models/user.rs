use std::fmt::Display;

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use quill_common::{caller::Caller, views::User};
use serde::{Deserialize, Serialize};

use crate::models::DbUlid;

/// A user record as stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbUser {
    #[serde(rename = "_id")]
    pub id: DbUlid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: String,
    pub is_admin: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

// Display never includes the password hash; it ends up in log lines.
impl Display for DbUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DbUser {{ id: {}, username: {}, email: {} }}",
            self.id, self.username, self.email
        )
    }
}

impl DbUser {
    /// Convert this record into the acting identity used for
    /// authorization checks.
    pub fn to_caller(&self) -> Caller {
        Caller {
            id: self.id.to_string(),
            username: self.username.clone(),
            is_admin: self.is_admin,
        }
    }
}

impl From<DbUser> for User {
    fn from(value: DbUser) -> Self {
        Self {
            id: value.id.to_string(),
            username: value.username,
            email: value.email,
            profile_picture: value.profile_picture,
            is_admin: value.is_admin,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record() -> DbUser {
        DbUser {
            id: DbUlid::new(),
            username: "someuser".into(),
            email: "someuser@example.com".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            profile_picture: "https://example.com/avatar.png".into(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn view_conversion_drops_the_password_hash() {
        let db_user = record();
        let view: User = db_user.clone().into();

        assert_eq!(view.id, db_user.id.to_string());
        assert_eq!(view.username, db_user.username);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains(&db_user.password_hash));
    }

    #[test]
    fn display_omits_the_password_hash() {
        let db_user = record();
        let rendered = db_user.to_string();
        assert!(!rendered.contains(&db_user.password_hash));
    }

    #[test]
    fn to_caller_carries_the_admin_flag() {
        let mut db_user = record();
        assert!(!db_user.to_caller().is_admin);

        db_user.is_admin = true;
        let caller = db_user.to_caller();
        assert!(caller.is_admin);
        assert_eq!(caller.id, db_user.id.to_string());
    }
}
