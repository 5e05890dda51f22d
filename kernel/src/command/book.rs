use crate::entity::{
    BookAuthor, BookDescription, BookQuantity, BookTitle, CoverImage, Genre, Isbn,
    PublicationYear,
};
use crate::{KernelError, Rejection};

/// Book record as entered on the admin form.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDraft {
    pub title: BookTitle,
    pub author: BookAuthor,
    pub isbn: Option<Isbn>,
    pub genre: Option<Genre>,
    pub description: Option<BookDescription>,
    pub total_quantity: BookQuantity,
    pub available_quantity: BookQuantity,
    pub publication_year: Option<PublicationYear>,
    pub cover_image: Option<CoverImage>,
}

impl BookDraft {
    pub fn validate(self) -> error_stack::Result<Self, KernelError> {
        if self.title.as_ref().trim().is_empty() {
            return Err(Rejection::MissingField("title").into_report());
        }
        if self.author.as_ref().trim().is_empty() {
            return Err(Rejection::MissingField("author").into_report());
        }
        let total = *self.total_quantity.as_ref();
        let available = *self.available_quantity.as_ref();
        if total < 0 || !(0..=total).contains(&available) {
            return Err(Rejection::InvalidQuantity.into_report());
        }
        Ok(self)
    }
}
