mod author;
mod detail;
mod genre;
mod id;
mod isbn;
mod quantity;
mod title;

pub use self::{author::*, detail::*, genre::*, id::*, isbn::*, quantity::*, title::*};
use crate::{KernelError, Rejection};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: Option<Isbn>,
    genre: Option<Genre>,
    description: Option<BookDescription>,
    total_quantity: BookQuantity,
    available_quantity: BookQuantity,
    publication_year: Option<PublicationYear>,
    cover_image: Option<CoverImage>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        isbn: Option<Isbn>,
        genre: Option<Genre>,
        description: Option<BookDescription>,
        total_quantity: BookQuantity,
        available_quantity: BookQuantity,
        publication_year: Option<PublicationYear>,
        cover_image: Option<CoverImage>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            isbn,
            genre,
            description,
            total_quantity,
            available_quantity,
            publication_year,
            cover_image,
        }
    }

    pub fn is_available(&self) -> bool {
        *self.available_quantity.as_ref() > 0
    }

    /// Takes one copy out of circulation.
    pub fn check_out(&mut self) -> error_stack::Result<(), KernelError> {
        if !self.is_available() {
            return Err(Rejection::NoCopyAvailable.into_report());
        }
        let available = *self.available_quantity.as_ref() - 1;
        self.substitute(|book| *book.available_quantity = BookQuantity::new(available));
        Ok(())
    }

    /// Puts one copy back; never exceeds the total stock.
    pub fn check_in(&mut self) {
        let total = *self.total_quantity.as_ref();
        let available = (*self.available_quantity.as_ref() + 1).min(total);
        self.substitute(|book| *book.available_quantity = BookQuantity::new(available));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::fixture::book;

    #[test]
    fn check_out_last_copy_then_refuse() {
        let mut dune = book(1, "Dune", "Frank Herbert", "Fiction", 1);
        assert!(dune.check_out().is_ok());
        assert_eq!(*dune.available_quantity().as_ref(), 0);

        let refused = dune.check_out().unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Rejected);
        assert_eq!(*dune.available_quantity().as_ref(), 0);
    }

    #[test]
    fn availability_stays_within_stock() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let mut dune = book(1, "Dune", "Frank Herbert", "Fiction", 3);
        for _ in 0..500 {
            if rng.gen_bool(0.5) {
                let _ = dune.check_out();
            } else {
                dune.check_in();
            }
            let available = *dune.available_quantity().as_ref();
            assert!((0..=*dune.total_quantity().as_ref()).contains(&available));
        }
    }
}
