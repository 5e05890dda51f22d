use time::OffsetDateTime;

use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnReviewQuery,
    ReviewQuery,
};
use kernel::prelude::catalogue::{facets, CatalogueFilter};
use kernel::prelude::eligibility::ReviewEligibility;
use kernel::prelude::entity::{average_rating, paginate, BookId, SelectLimit, SelectOffset, Session};
use kernel::prelude::policy::suggested_due_date;
use kernel::KernelError;

use crate::transfer::{BookDetailDto, BookDto, CatalogueDto, GetBookDto, GetCatalogueDto};

#[async_trait::async_trait]
pub trait GetCatalogueService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_catalogue(
        &self,
        session: &Session,
        dto: GetCatalogueDto,
    ) -> error_stack::Result<CatalogueDto, KernelError> {
        let books = self.book_query().find_all(session).await?;
        let selected = CatalogueFilter::from(&dto).apply(&books);

        let (genres, authors) = tokio::join!(
            self.book_query().genres(session),
            self.book_query().popular_authors(session)
        );
        let (local_genres, local_authors) = facets(&books);
        let genres = genres.unwrap_or_else(|report| {
            tracing::warn!("genre list unavailable, derived from the catalogue: {report:?}");
            local_genres
        });
        let authors = authors.unwrap_or_else(|report| {
            tracing::warn!("author list unavailable, derived from the catalogue: {report:?}");
            local_authors
        });

        let limit = dto.limit.map(SelectLimit::new).unwrap_or_default();
        let offset = dto.offset.map(SelectOffset::new).unwrap_or_default();
        Ok(CatalogueDto {
            total: selected.len(),
            books: paginate(&selected, &limit, &offset)
                .into_iter()
                .map(BookDto::from)
                .collect(),
            genres: genres.into_iter().map(Into::into).collect(),
            authors: authors.into_iter().map(Into::into).collect(),
            suggested_due_date: suggested_due_date(OffsetDateTime::now_utc().date()),
        })
    }
}

impl<T> GetCatalogueService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait GetBookDetailService:
    'static + Sync + Send + DependOnBookQuery + DependOnReviewQuery + DependOnBorrowingQuery
{
    async fn get_book_detail(
        &self,
        session: &Session,
        dto: GetBookDto,
    ) -> error_stack::Result<Option<BookDetailDto>, KernelError> {
        let id = BookId::new(dto.id);
        let Some(book) = self.book_query().find_by_id(session, &id).await? else {
            return Ok(None);
        };
        let reviews = self.review_query().find_by_book_id(session, &id).await?;
        let can_review = match session.user() {
            Ok(user) => {
                let mine = self.borrowing_query().find_mine(session).await?;
                ReviewEligibility::compute(user.id(), &mine, &reviews).can_review(&id)
            }
            Err(_) => false,
        };
        Ok(Some(BookDetailDto {
            book: BookDto::from(book),
            average_rating: average_rating(&reviews),
            reviews: reviews.into_iter().map(Into::into).collect(),
            can_review,
            suggested_due_date: suggested_due_date(OffsetDateTime::now_utc().date()),
        }))
    }
}

impl<T> GetBookDetailService for T where
    T: DependOnBookQuery + DependOnReviewQuery + DependOnBorrowingQuery
{
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixture::Library;
    use kernel::prelude::entity::Role;
    use time::Duration;

    #[tokio::test]
    async fn fiction_named_dune_only() -> error_stack::Result<(), KernelError> {
        let library = Library::default();
        library.book("Dune", "Frank Herbert", "Fiction", 2);
        library.book("Dune: A Study", "J. Critic", "Essay", 1);
        library.book("Foundation", "Isaac Asimov", "Fiction", 1);

        let catalogue = library
            .get_catalogue(
                &Session::Anonymous,
                GetCatalogueDto {
                    search: Some(String::from("Dune")),
                    genre: Some(String::from("fiction")),
                    ..GetCatalogueDto::default()
                },
            )
            .await?;
        let titles = catalogue
            .books
            .iter()
            .map(|book| book.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Dune"]);
        assert_eq!(catalogue.total, 1);
        assert_eq!(catalogue.genres, vec!["Essay", "Fiction"]);
        assert_eq!(catalogue.authors.len(), 3);
        assert_eq!(
            catalogue.suggested_due_date,
            OffsetDateTime::now_utc().date() + Duration::days(15)
        );
        Ok(())
    }

    #[tokio::test]
    async fn catalogue_pages() -> error_stack::Result<(), KernelError> {
        let library = Library::default();
        for title in ["A", "B", "C", "D", "E"] {
            library.book(title, "Anon", "Fiction", 1);
        }
        let page = library
            .get_catalogue(
                &Session::Anonymous,
                GetCatalogueDto {
                    limit: Some(2),
                    offset: Some(2),
                    ..GetCatalogueDto::default()
                },
            )
            .await?;
        let titles = page.books.iter().map(|book| book.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["C", "D"]);
        assert_eq!(page.total, 5);
        Ok(())
    }

    #[tokio::test]
    async fn detail_opens_reviews_after_return() -> error_stack::Result<(), KernelError> {
        let library = Library::default();
        let dune = library.book("Dune", "Frank Herbert", "Fiction", 1);
        let reader = library.sign_up("Amina", Role::Student);
        let id = *dune.id().as_ref();

        let anonymous = library
            .get_book_detail(&Session::Anonymous, GetBookDto { id })
            .await?
            .unwrap();
        assert!(!anonymous.can_review);
        assert_eq!(anonymous.average_rating, None);

        library.loan(&reader, &dune, OffsetDateTime::now_utc() - Duration::days(1));
        let borrowed = library
            .get_book_detail(&reader, GetBookDto { id })
            .await?
            .unwrap();
        assert!(!borrowed.can_review);

        assert!(library
            .get_book_detail(&reader, GetBookDto { id: 999 })
            .await?
            .is_none());
        Ok(())
    }
}
