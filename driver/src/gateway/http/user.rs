use reqwest::Method;
use serde::{Deserialize, Serialize};

use kernel::interface::command::{PasswordChange, UserDraft, UserPatch};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{
    Email, IsActive, Role, Session, User, UserId, UserName, UserPreferences, UserProfile,
    UserStats,
};
use kernel::KernelError;

use crate::gateway::HttpGateway;

#[async_trait::async_trait]
impl UserQuery for HttpGateway {
    async fn find_all(&self, session: &Session) -> error_stack::Result<Vec<User>, KernelError> {
        session.token()?;
        let rows: Vec<UserRow> = self.get_list(session, "/users").await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        session.token()?;
        let row: Option<UserRow> = self
            .get_optional(session, &format!("/users/{}", id.as_ref()))
            .await?;
        Ok(row.map(User::from))
    }

    async fn stats(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<UserStats, KernelError> {
        session.token()?;
        self.get(session, &format!("/users/{}/stats", id.as_ref()))
            .await
    }
}

#[async_trait::async_trait]
impl UserModifier for HttpGateway {
    async fn create(
        &self,
        session: &Session,
        user: &UserDraft,
    ) -> error_stack::Result<User, KernelError> {
        let body = CreateBody {
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            password: user.password.expose(),
            role: user.role,
            student_number: user.student_number.as_deref(),
        };
        let row: UserRow = self.send(Method::POST, session, "/users", &body).await?;
        Ok(User::from(row))
    }

    async fn update(
        &self,
        session: &Session,
        id: &UserId,
        patch: &UserPatch,
    ) -> error_stack::Result<User, KernelError> {
        let body = PatchBody::from(patch);
        let row: UserRow = self
            .send(Method::PUT, session, &format!("/users/{}", id.as_ref()), &body)
            .await?;
        Ok(User::from(row))
    }

    async fn delete(&self, session: &Session, id: &UserId) -> error_stack::Result<(), KernelError> {
        self.remove(session, &format!("/users/{}", id.as_ref()))
            .await
    }

    async fn change_password(
        &self,
        session: &Session,
        id: &UserId,
        change: &PasswordChange,
    ) -> error_stack::Result<(), KernelError> {
        let body = PasswordBody {
            current_password: change.current.expose(),
            new_password: change.new.expose(),
        };
        let _: serde_json::Value = self
            .send(Method::PUT, session, &format!("/users/{}", id.as_ref()), &body)
            .await?;
        Ok(())
    }
}

impl DependOnUserQuery for HttpGateway {
    type UserQuery = Self;
    fn user_query(&self) -> &Self::UserQuery {
        self
    }
}

impl DependOnUserModifier for HttpGateway {
    type UserModifier = Self;
    fn user_modifier(&self) -> &Self::UserModifier {
        self
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserRow {
    id: i64,
    name: String,
    email: String,
    #[serde(default)]
    role: String,
    #[serde(default = "active")]
    is_active: bool,
    phone: Option<String>,
    student_number: Option<String>,
    department: Option<String>,
    bio: Option<String>,
    #[serde(default)]
    preferences: UserPreferences,
}

fn active() -> bool {
    true
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        let role = if value.role.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Student
        };
        User::new(
            UserId::new(value.id),
            UserName::new(value.name),
            Email::new(value.email),
            role,
            IsActive::new(value.is_active),
            UserProfile {
                phone: value.phone,
                student_number: value.student_number,
                department: value.department,
                bio: value.bio,
            },
            value.preferences,
        )
    }
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: Role,
    student_number: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferences: Option<&'a UserPreferences>,
}

impl<'a> From<&'a UserPatch> for PatchBody<'a> {
    fn from(value: &'a UserPatch) -> Self {
        Self {
            name: value.name.as_ref().map(|name| name.as_ref().as_str()),
            phone: value.phone.as_deref(),
            department: value.department.as_deref(),
            bio: value.bio.as_deref(),
            role: value.role,
            is_active: value.is_active.map(|active| *active.as_ref()),
            preferences: value.preferences.as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PasswordBody<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_roles_are_students() {
        let row: UserRow = serde_json::from_str(
            r#"{"id":1,"name":"Amina","email":"Amina@Univ.Example","role":"librarian"}"#,
        )
        .unwrap();
        let user = User::from(row);
        assert_eq!(user.role(), &Role::Student);
        assert_eq!(user.email().as_ref(), "amina@univ.example");
        assert!(*user.is_active().as_ref());
        assert_eq!(user.preferences(), &UserPreferences::default());
    }

    #[test]
    fn patch_only_sends_what_changed() {
        let patch = UserPatch {
            bio: Some(String::from("Physics, 2nd year")),
            ..UserPatch::default()
        };
        let json = serde_json::to_value(PatchBody::from(&patch)).unwrap();
        assert_eq!(json, serde_json::json!({ "bio": "Physics, 2nd year" }));
    }
}
