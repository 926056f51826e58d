//! Domain models shared by the library store and the TUI. These types stay
//! light-weight data holders so the store can focus on the operations and the
//! UI can focus on presentation.

use std::fmt;

/// Earliest publication year the add form accepts.
pub const MIN_YEAR: i32 = 1800;
/// Latest publication year the add form accepts.
pub const MAX_YEAR: i32 = 2100;

/// Identifier handed out by [`crate::Library`] when a book is inserted. Ids are
/// unique within a library and never reused, so two books sharing a title can
/// still be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub(crate) u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A book record held by the library.
pub struct Book {
    /// Assigned by the library on insertion.
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Publication year, always within [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub year: i32,
    pub genre: String,
    /// Whether the owner has read the book.
    pub read: bool,
}

impl Book {
    /// Human-readable read status used by every listing.
    pub fn read_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl fmt::Display for Book {
    /// Render the one-line summary shared by the list and search views.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.read_label()
        )
    }
}

/// The user-supplied fields of a book before the library assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub read: bool,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        }
    }
}

/// Text fields a book cannot be stored without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Genre,
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Genre => "genre",
        };
        f.write_str(name)
    }
}

/// Which field a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    pub fn label(self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
        }
    }

    /// Flip between the two search modes.
    pub fn toggle(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Title,
        }
    }

    /// The text of `book` this mode searches in.
    pub(crate) fn value_of(self, book: &Book) -> &str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
        }
    }
}

/// Summary numbers for the statistics view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    /// Share of read books in percent; `0.0` for an empty library.
    pub percent_read: f64,
}
