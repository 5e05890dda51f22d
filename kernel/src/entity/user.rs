mod email;
mod id;
mod name;
mod profile;
mod role;
mod stats;

pub use self::{email::*, id::*, name::*, profile::*, role::*, stats::*};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, Mutation, References)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    role: Role,
    is_active: IsActive,
    #[serde(default)]
    profile: UserProfile,
    #[serde(default)]
    preferences: UserPreferences,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: Email,
        role: Role,
        is_active: IsActive,
        profile: UserProfile,
        preferences: UserPreferences,
    ) -> Self {
        Self {
            id,
            name,
            email,
            role,
            is_active,
            profile,
            preferences,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
