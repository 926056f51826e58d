//! The in-memory book store. Every operation the UI offers is a plain method on
//! [`Library`], so the whole behaviour can be exercised without a terminal.
//! The store is owned by the running session and dropped with it.

use tracing::{debug, info, warn};

use crate::error::LibraryError;
use crate::models::{
    Book, BookField, BookId, LibraryStats, NewBook, SearchField, MAX_YEAR, MIN_YEAR,
};

/// Ordered collection of books. Insertion order is preserved and is the order
/// every listing uses.
#[derive(Debug, Default)]
pub struct Library {
    books: Vec<Book>,
    next_id: u64,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a book after checking the required text fields and the year
    /// range. Nothing is stored when validation fails. Values are kept exactly
    /// as given.
    pub fn add(&mut self, book: NewBook) -> Result<&Book, LibraryError> {
        if let Err(err) = validate(&book) {
            warn!(title = %book.title, error = %err, "rejected book");
            return Err(err);
        }

        self.next_id += 1;
        let NewBook {
            title,
            author,
            year,
            genre,
            read,
        } = book;
        self.books.push(Book {
            id: BookId(self.next_id),
            title,
            author,
            year,
            genre,
            read,
        });

        let added = &self.books[self.books.len() - 1];
        info!(id = %added.id, title = %added.title, "added book");
        Ok(added)
    }

    /// Drop every book whose title equals `title` exactly (case-sensitive) and
    /// return how many were removed. An unknown title leaves the library
    /// untouched.
    pub fn remove_by_title(&mut self, title: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|book| book.title != title);
        let removed = before - self.books.len();
        info!(title, removed, "removed books by title");
        removed
    }

    /// Remove the single book carrying `id`.
    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let index = self.books.iter().position(|book| book.id == id)?;
        let book = self.books.remove(index);
        info!(id = %book.id, title = %book.title, "removed book");
        Some(book)
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Distinct titles in the order they first appear. These are the choices
    /// offered when removing by title.
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = Vec::new();
        for book in &self.books {
            if !titles.contains(&book.title.as_str()) {
                titles.push(&book.title);
            }
        }
        titles
    }

    /// Number of books whose title equals `title` exactly.
    pub fn count_titled(&self, title: &str) -> usize {
        self.books.iter().filter(|book| book.title == title).count()
    }

    /// Case-insensitive substring search over the chosen field.
    ///
    /// Returns `None` when `term` is empty because no search is performed in
    /// that case. `Some` with an empty vector means nothing matched.
    pub fn search(&self, field: SearchField, term: &str) -> Option<Vec<&Book>> {
        if term.is_empty() {
            return None;
        }

        let needle = term.to_lowercase();
        let results: Vec<&Book> = self
            .books
            .iter()
            .filter(|book| field.value_of(book).to_lowercase().contains(&needle))
            .collect();
        debug!(field = field.label(), term, matches = results.len(), "searched library");
        Some(results)
    }

    /// Every book with its 1-based display position.
    pub fn list(&self) -> impl Iterator<Item = (usize, &Book)> + '_ {
        self.books.iter().enumerate().map(|(idx, book)| (idx + 1, book))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Count the books and the share already read. An empty library reports
    /// `0.0` percent.
    pub fn statistics(&self) -> LibraryStats {
        let total = self.books.len();
        let read = self.books.iter().filter(|book| book.read).count();
        let percent_read = if total > 0 {
            read as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        LibraryStats {
            total,
            read,
            percent_read,
        }
    }
}

fn validate(book: &NewBook) -> Result<(), LibraryError> {
    let required = [
        (BookField::Title, &book.title),
        (BookField::Author, &book.author),
        (BookField::Genre, &book.genre),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(LibraryError::MissingField(*field));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&book.year) {
        return Err(LibraryError::YearOutOfRange { year: book.year });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, author: &str, read: bool) -> NewBook {
        NewBook::new(title, author, 1954, "Fantasy", read)
    }

    fn sample_library() -> Library {
        let mut library = Library::new();
        library.add(book("The Hobbit", "J.R.R. Tolkien", true)).unwrap();
        library.add(book("Dune", "Frank Herbert", false)).unwrap();
        library.add(book("The Silmarillion", "J.R.R. Tolkien", false)).unwrap();
        library.add(book("Neuromancer", "William Gibson", false)).unwrap();
        library
    }

    #[test]
    fn add_appends_book_with_all_fields() {
        let mut library = sample_library();
        let before = library.len();

        let added = library
            .add(NewBook::new("Emma", "Jane Austen", 1815, "Classic", true))
            .unwrap()
            .clone();

        assert_eq!(library.len(), before + 1);
        let last = library.books().last().unwrap();
        assert_eq!(last, &added);
        assert_eq!(last.title, "Emma");
        assert_eq!(last.author, "Jane Austen");
        assert_eq!(last.year, 1815);
        assert_eq!(last.genre, "Classic");
        assert!(last.read);
    }

    #[test]
    fn add_rejects_missing_text_fields() {
        let mut library = sample_library();
        let before = library.len();

        let cases = [
            (NewBook::new("", "Author", 2000, "Genre", false), BookField::Title),
            (NewBook::new("Title", "", 2000, "Genre", false), BookField::Author),
            (NewBook::new("Title", "Author", 2000, "", false), BookField::Genre),
        ];

        for (input, field) in cases {
            assert_eq!(library.add(input), Err(LibraryError::MissingField(field)));
        }
        assert_eq!(library.len(), before);
    }

    #[test]
    fn add_accepts_whitespace_only_text_as_given() {
        let mut library = Library::new();
        let added = library
            .add(NewBook::new(" ", "Frank Herbert", 1965, "  ", false))
            .unwrap()
            .clone();

        assert_eq!(library.len(), 1);
        assert_eq!(added.title, " ");
        assert_eq!(added.genre, "  ");
    }

    #[test]
    fn add_rejects_year_outside_range() {
        let mut library = Library::new();
        let err = library
            .add(NewBook::new("Old", "Someone", 1799, "History", false))
            .unwrap_err();
        assert_eq!(err, LibraryError::YearOutOfRange { year: 1799 });
        assert!(library.add(NewBook::new("Edge", "Someone", 2100, "History", false)).is_ok());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn add_keeps_duplicates_with_distinct_ids() {
        let mut library = Library::new();
        let first = library.add(book("Dune", "Frank Herbert", false)).unwrap().id;
        let second = library.add(book("Dune", "Frank Herbert", false)).unwrap().id;
        assert_ne!(first, second);
        assert_eq!(library.count_titled("Dune"), 2);
        assert_eq!(library.titles(), vec!["Dune"]);
    }

    #[test]
    fn remove_by_title_drops_every_exact_match() {
        let mut library = sample_library();
        library.add(book("Dune", "Frank Herbert", true)).unwrap();

        assert_eq!(library.remove_by_title("Dune"), 2);
        assert_eq!(library.len(), 3);
        assert!(library.books().iter().all(|b| b.title != "Dune"));
        let titles: Vec<&str> = library.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["The Hobbit", "The Silmarillion", "Neuromancer"]);
    }

    #[test]
    fn remove_by_title_is_case_sensitive_and_tolerates_misses() {
        let mut library = sample_library();
        assert_eq!(library.remove_by_title("dune"), 0);
        assert_eq!(library.remove_by_title("Missing"), 0);
        assert_eq!(library.len(), 4);
    }

    #[test]
    fn remove_by_id_targets_one_record() {
        let mut library = Library::new();
        let first = library.add(book("Dune", "Frank Herbert", false)).unwrap().id;
        let second = library.add(book("Dune", "Frank Herbert", true)).unwrap().id;

        let removed = library.remove(first).unwrap();
        assert_eq!(removed.id, first);
        assert!(library.get(first).is_none());
        assert!(library.get(second).is_some());
        assert!(library.remove(first).is_none());
    }

    #[test]
    fn search_matches_case_insensitive_substrings() {
        let library = sample_library();

        let by_author = library.search(SearchField::Author, "tol").unwrap();
        let titles: Vec<&str> = by_author.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["The Hobbit", "The Silmarillion"]);

        let by_title = library.search(SearchField::Title, "DUNE").unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].author, "Frank Herbert");
    }

    #[test]
    fn search_with_empty_term_is_skipped() {
        let library = sample_library();
        assert!(library.search(SearchField::Title, "").is_none());
    }

    #[test]
    fn search_without_matches_returns_empty_results() {
        let library = sample_library();
        assert_eq!(library.search(SearchField::Title, "tolkien"), Some(vec![]));
    }

    #[test]
    fn list_is_one_indexed_in_insertion_order() {
        let library = sample_library();
        let positions: Vec<(usize, &str)> = library
            .list()
            .map(|(idx, book)| (idx, book.title.as_str()))
            .collect();
        assert_eq!(
            positions,
            vec![
                (1, "The Hobbit"),
                (2, "Dune"),
                (3, "The Silmarillion"),
                (4, "Neuromancer"),
            ]
        );
    }

    #[test]
    fn statistics_on_empty_library_are_zero() {
        let stats = Library::new().statistics();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.read, 0);
        assert_eq!(stats.percent_read, 0.0);
    }

    #[test]
    fn statistics_report_share_read() {
        let stats = sample_library().statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.read, 1);
        assert_eq!(stats.percent_read, 25.0);
    }

    #[test]
    fn display_summarises_book() {
        let library = sample_library();
        assert_eq!(
            library.books()[0].to_string(),
            "The Hobbit by J.R.R. Tolkien (1954) - Fantasy - Read"
        );
    }
}
