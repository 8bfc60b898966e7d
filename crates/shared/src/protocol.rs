use serde::{Deserialize, Serialize};

use crate::domain::UserDraft;

pub const USERS_COLLECTION: &str = "users";

/// Body of `POST /users` and `PATCH /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: bool,
}

impl From<&UserDraft> for UserPayload {
    fn from(draft: &UserDraft) -> Self {
        Self {
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            status: draft.status,
        }
    }
}
