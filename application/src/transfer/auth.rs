use kernel::prelude::entity::Role;

pub struct LoginDto {
    pub email: String,
    pub password: String,
}

pub struct RegisterDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: Option<Role>,
    pub student_number: Option<String>,
}
