use thiserror::Error;

use crate::models::{BookField, MAX_YEAR, MIN_YEAR};

/// Reasons [`crate::Library::add`] refuses a book. The messages are shown to
/// the user verbatim in the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("Please fill in all fields ({0} is missing).")]
    MissingField(BookField),
    #[error(
        "Publication year {year} must be between {min} and {max}.",
        min = MIN_YEAR,
        max = MAX_YEAR
    )]
    YearOutOfRange { year: i32 },
}
