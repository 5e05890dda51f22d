use kernel::prelude::entity::{
    DestructUser, Role, User, UserPreferences, UserProfile, UserStats,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub profile: UserProfile,
    pub preferences: UserPreferences,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            email,
            role,
            is_active,
            profile,
            preferences,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            is_active: is_active.into(),
            profile,
            preferences,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileDto {
    pub user: UserDto,
    pub stats: UserStats,
}

pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub preferences: Option<UserPreferences>,
}

pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
    pub password_confirmation: String,
}

pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub student_number: Option<String>,
}

pub struct UpdateUserDto {
    pub id: i64,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
}

pub struct DeleteUserDto {
    pub id: i64,
}
