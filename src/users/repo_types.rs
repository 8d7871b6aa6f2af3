use time::OffsetDateTime;
use uuid::Uuid;

use crate::{error::Resource, store::Entity};

/// User record held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,                   // unique user ID
    pub email: String,              // unique, compared as stored
    pub name: String,               // display name
    pub password_hash: String,      // Argon2 PHC string, never serialized
    pub created_at: OffsetDateTime, // creation timestamp
    pub updated_at: OffsetDateTime, // last modification
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

impl Entity for User {
    type Draft = NewUser;
    type Patch = UserPatch;

    const RESOURCE: Resource = Resource::User;

    fn build(id: Uuid, draft: NewUser, now: OffsetDateTime) -> Self {
        Self {
            id,
            email: draft.email,
            name: draft.name,
            password_hash: draft.password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: UserPatch, now: OffsetDateTime) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(hash) = patch.password_hash {
            self.password_hash = hash;
        }
        self.updated_at = now;
    }

    fn unique_fields(&self) -> Vec<(&'static str, String)> {
        vec![("email", self.email.clone())]
    }
}
