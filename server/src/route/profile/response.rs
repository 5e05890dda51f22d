use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use application::transfer::{ProfileDto, UserDto};
use kernel::prelude::entity::{Role, UserPreferences, UserProfile, UserStats};

use crate::controller::Exhaust;

/// Account view shared by the profile, admin and sign-in pages.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: i64,
    name: String,
    email: String,
    role: Role,
    is_active: bool,
    #[serde(flatten)]
    profile: UserProfile,
    preferences: UserPreferences,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            is_active: value.is_active,
            profile: value.profile,
            preferences: value.preferences,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    user: UserResponse,
    stats: UserStats,
}

pub struct Presenter;

impl Exhaust<ProfileDto> for Presenter {
    type To = Json<ProfileResponse>;
    fn emit(&self, output: ProfileDto) -> Self::To {
        Json(ProfileResponse {
            user: UserResponse::from(output.user),
            stats: output.stats,
        })
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
