use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::{Book, BookAuthor, Genre};

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogueSort {
    #[default]
    Title,
    Author,
    Newest,
    Availability,
}

/// Filter state of the catalogue page. Empty fields do not filter.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct CatalogueFilter {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub available_only: bool,
    pub sort: CatalogueSort,
}

impl CatalogueFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if self.available_only && !book.is_available() {
            return false;
        }
        if let Some(genre) = normalised(&self.genre) {
            let same = book
                .genre()
                .as_ref()
                .is_some_and(|own| own.as_ref().to_lowercase() == genre);
            if !same {
                return false;
            }
        }
        if let Some(author) = normalised(&self.author) {
            if book.author().as_ref().to_lowercase() != author {
                return false;
            }
        }
        if let Some(search) = normalised(&self.search) {
            let title = book.title().as_ref().to_lowercase();
            let author = book.author().as_ref().to_lowercase();
            let isbn = book
                .isbn()
                .as_ref()
                .map(|isbn| isbn.as_ref().to_lowercase())
                .unwrap_or_default();
            if !(title.contains(&search) || author.contains(&search) || isbn.contains(&search)) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, books: &[Book]) -> Vec<Book> {
        let mut selected = books
            .iter()
            .filter(|book| self.matches(book))
            .cloned()
            .collect::<Vec<_>>();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }

    fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let by_title = || {
            a.title()
                .as_ref()
                .to_lowercase()
                .cmp(&b.title().as_ref().to_lowercase())
        };
        match self.sort {
            CatalogueSort::Title => by_title(),
            CatalogueSort::Author => a
                .author()
                .as_ref()
                .to_lowercase()
                .cmp(&b.author().as_ref().to_lowercase())
                .then_with(by_title),
            CatalogueSort::Newest => b
                .publication_year()
                .cmp(a.publication_year())
                .then_with(by_title),
            CatalogueSort::Availability => b
                .available_quantity()
                .cmp(a.available_quantity())
                .then_with(by_title),
        }
    }
}

fn normalised(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Distinct genres and authors present in `books`, sorted.
pub fn facets(books: &[Book]) -> (Vec<Genre>, Vec<BookAuthor>) {
    let genres = books
        .iter()
        .filter_map(|book| book.genre().clone())
        .collect::<BTreeSet<_>>();
    let authors = books
        .iter()
        .map(|book| book.author().clone())
        .collect::<BTreeSet<_>>();
    (genres.into_iter().collect(), authors.into_iter().collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entity::fixture::book;

    fn shelf() -> Vec<Book> {
        vec![
            book(1, "Dune", "Frank Herbert", "Fiction", 2),
            book(2, "Dune Messiah", "Frank Herbert", "Fiction", 0),
            book(3, "Dune: A Study", "J. Critic", "Essay", 1),
            book(4, "Foundation", "Isaac Asimov", "Fiction", 1),
        ]
    }

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|book| book.title().as_ref().as_str()).collect()
    }

    #[test]
    fn genre_and_search_combine() {
        let filter = CatalogueFilter {
            search: Some(String::from("dune")),
            genre: Some(String::from("Fiction")),
            ..CatalogueFilter::default()
        };
        assert_eq!(titles(&filter.apply(&shelf())), vec!["Dune", "Dune Messiah"]);
    }

    #[test]
    fn search_covers_author_and_isbn() {
        let filter = CatalogueFilter {
            search: Some(String::from("ASIMOV")),
            ..CatalogueFilter::default()
        };
        assert_eq!(titles(&filter.apply(&shelf())), vec!["Foundation"]);

        let filter = CatalogueFilter {
            search: Some(String::from("000003")),
            ..CatalogueFilter::default()
        };
        assert_eq!(titles(&filter.apply(&shelf())), vec!["Dune: A Study"]);
    }

    #[test]
    fn empty_filter_keeps_everything_sorted_by_title() {
        let filter = CatalogueFilter {
            search: Some(String::from("   ")),
            ..CatalogueFilter::default()
        };
        assert_eq!(
            titles(&filter.apply(&shelf())),
            vec!["Dune", "Dune Messiah", "Dune: A Study", "Foundation"]
        );
    }

    #[test]
    fn available_only_and_availability_sort() {
        let filter = CatalogueFilter {
            available_only: true,
            sort: CatalogueSort::Availability,
            ..CatalogueFilter::default()
        };
        assert_eq!(
            titles(&filter.apply(&shelf())),
            vec!["Dune", "Dune: A Study", "Foundation"]
        );
    }

    #[test]
    fn facets_are_distinct() {
        let (genres, authors) = facets(&shelf());
        assert_eq!(genres, vec![Genre::new("Essay"), Genre::new("Fiction")]);
        assert_eq!(authors.len(), 3);
    }
}
