//! Data models for identities

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// An authenticated principal as persisted by the store
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Identity {
    pub id: Uuid,
    /// Login key; unique and case-sensitive as stored
    pub email: String,
    /// PHC-formatted Argon2id hash
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Insert payload; the store assigns id and timestamps
pub struct NewIdentity {
    pub email: String,
    pub password_hash: String,
}

impl NewIdentity {
    pub(crate) fn into_identity(self, now: DateTime<Utc>) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: self.email,
            password_hash: self.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Public projection of an [`Identity`], safe to return to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    #[schema(example = "a@x.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Identity> for UserView {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Identity {
        NewIdentity {
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        }
        .into_identity(Utc::now())
    }

    #[test]
    fn test_user_view_has_no_password_field() {
        let json = serde_json::to_value(UserView::from(sample())).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert_eq!(obj["email"], "a@x.com");
        assert!(!obj.keys().any(|k| k.contains("password")));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("argon2id"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_new_identity_timestamps_match() {
        let identity = sample();
        assert_eq!(identity.created_at, identity.updated_at);
    }
}
