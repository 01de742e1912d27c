use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallerError {
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },
}

impl CallerError {
    pub fn unauthorized(reason: Option<String>) -> Self {
        Self::Unauthorized {
            reason: reason.unwrap_or_else(|| "No reason provided".to_string()),
        }
    }

    pub fn forbidden(reason: &str) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}

/// The identity attached to the current request by the session extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// The acting user's record id, as a string.
    pub id: String,

    /// The acting user's handle.
    pub username: String,

    /// Whether the acting user holds the admin flag.
    pub is_admin: bool,
}

impl Caller {
    /// True when the caller is the user identified by `user_id`.
    pub fn owns(&self, user_id: &str) -> bool {
        self.id == user_id
    }

    /// True when the caller may manage the account identified by `user_id`:
    /// admins may manage anyone, everyone else only themselves.
    pub fn can_manage(&self, user_id: &str) -> bool {
        self.is_admin || self.owns(user_id)
    }
}
