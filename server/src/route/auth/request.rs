use serde::Deserialize;

use application::transfer::{LoginDto, RegisterDto};
use kernel::prelude::entity::Role;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    password_confirmation: String,
    role: Option<Role>,
    student_number: Option<String>,
}

pub struct Transformer;

impl Intake<LoginRequest> for Transformer {
    type To = LoginDto;
    fn emit(&self, input: LoginRequest) -> Self::To {
        LoginDto {
            email: input.email,
            password: input.password,
        }
    }
}

impl Intake<RegisterRequest> for Transformer {
    type To = RegisterDto;
    fn emit(&self, input: RegisterRequest) -> Self::To {
        RegisterDto {
            name: input.name,
            email: input.email,
            password: input.password,
            password_confirmation: input.password_confirmation,
            role: input.role,
            student_number: input.student_number,
        }
    }
}
