use serde::Deserialize;

use application::transfer::{
    BookFormDto, CreateUserDto, DeleteBookDto, DeleteUserDto, UpdateBookDto, UpdateUserDto,
};
use kernel::prelude::entity::Role;

use crate::controller::Intake;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookFormRequest {
    title: String,
    author: String,
    isbn: Option<String>,
    genre: Option<String>,
    description: Option<String>,
    total_quantity: i32,
    available_quantity: Option<i32>,
    publication_year: Option<i32>,
    cover_image: Option<String>,
}

impl From<BookFormRequest> for BookFormDto {
    fn from(value: BookFormRequest) -> Self {
        Self {
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            genre: value.genre,
            description: value.description,
            total_quantity: value.total_quantity,
            available_quantity: value.available_quantity,
            publication_year: value.publication_year,
            cover_image: value.cover_image,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    name: String,
    email: String,
    password: String,
    #[serde(default)]
    role: Role,
    student_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    name: Option<String>,
    role: Option<Role>,
    is_active: Option<bool>,
    phone: Option<String>,
    department: Option<String>,
    bio: Option<String>,
}

pub struct DeleteBookRequest(pub i64);

pub struct DeleteUserRequest(pub i64);

pub struct Transformer;

impl Intake<BookFormRequest> for Transformer {
    type To = BookFormDto;
    fn emit(&self, input: BookFormRequest) -> Self::To {
        BookFormDto::from(input)
    }
}

impl Intake<(i64, BookFormRequest)> for Transformer {
    type To = UpdateBookDto;
    fn emit(&self, (id, input): (i64, BookFormRequest)) -> Self::To {
        UpdateBookDto {
            id,
            form: BookFormDto::from(input),
        }
    }
}

impl Intake<DeleteBookRequest> for Transformer {
    type To = DeleteBookDto;
    fn emit(&self, DeleteBookRequest(id): DeleteBookRequest) -> Self::To {
        DeleteBookDto { id }
    }
}

impl Intake<CreateUserRequest> for Transformer {
    type To = CreateUserDto;
    fn emit(&self, input: CreateUserRequest) -> Self::To {
        CreateUserDto {
            name: input.name,
            email: input.email,
            password: input.password,
            role: input.role,
            student_number: input.student_number,
        }
    }
}

impl Intake<(i64, UpdateUserRequest)> for Transformer {
    type To = UpdateUserDto;
    fn emit(&self, (id, input): (i64, UpdateUserRequest)) -> Self::To {
        UpdateUserDto {
            id,
            name: input.name,
            role: input.role,
            is_active: input.is_active,
            phone: input.phone,
            department: input.department,
            bio: input.bio,
        }
    }
}

impl Intake<DeleteUserRequest> for Transformer {
    type To = DeleteUserDto;
    fn emit(&self, DeleteUserRequest(id): DeleteUserRequest) -> Self::To {
        DeleteUserDto { id }
    }
}
