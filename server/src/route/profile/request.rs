use serde::Deserialize;

use application::transfer::{ChangePasswordDto, UpdateProfileDto};
use kernel::prelude::entity::UserPreferences;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    name: Option<String>,
    phone: Option<String>,
    department: Option<String>,
    bio: Option<String>,
    preferences: Option<UserPreferences>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
    password_confirmation: String,
}

pub struct Transformer;

impl Intake<UpdateProfileRequest> for Transformer {
    type To = UpdateProfileDto;
    fn emit(&self, input: UpdateProfileRequest) -> Self::To {
        UpdateProfileDto {
            name: input.name,
            phone: input.phone,
            department: input.department,
            bio: input.bio,
            preferences: input.preferences,
        }
    }
}

impl Intake<ChangePasswordRequest> for Transformer {
    type To = ChangePasswordDto;
    fn emit(&self, input: ChangePasswordRequest) -> Self::To {
        ChangePasswordDto {
            current_password: input.current_password,
            new_password: input.new_password,
            password_confirmation: input.password_confirmation,
        }
    }
}
