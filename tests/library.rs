use personal_library::{BookField, Library, LibraryError, NewBook, SearchField};

#[test]
fn add_list_remove_round_trip() {
    let mut library = Library::new();
    library
        .add(NewBook::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true))
        .unwrap();

    let listed: Vec<_> = library.list().collect();
    assert_eq!(listed.len(), 1);
    let (position, book) = listed[0];
    assert_eq!(position, 1);
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Frank Herbert");
    assert_eq!(book.year, 1965);
    assert_eq!(book.genre, "Sci-Fi");
    assert!(book.read);

    assert_eq!(library.remove_by_title("Dune"), 1);
    assert!(library.is_empty());
    assert_eq!(library.list().count(), 0);
}

#[test]
fn rejected_add_leaves_library_untouched() {
    let mut library = Library::new();
    library
        .add(NewBook::new("Emma", "Jane Austen", 1815, "Classic", false))
        .unwrap();

    let err = library
        .add(NewBook::new("Persuasion", "", 1817, "Classic", false))
        .unwrap_err();
    assert_eq!(err, LibraryError::MissingField(BookField::Author));
    assert_eq!(err.to_string(), "Please fill in all fields (author is missing).");
    assert_eq!(library.len(), 1);
}

#[test]
fn search_and_statistics_reflect_current_books() {
    let mut library = Library::new();
    for (title, author, read) in [
        ("The Hobbit", "J.R.R. Tolkien", true),
        ("The Two Towers", "J.R.R. Tolkien", false),
        ("Dune", "Frank Herbert", false),
        ("Foundation", "Isaac Asimov", false),
    ] {
        library
            .add(NewBook::new(title, author, 1950, "Fiction", read))
            .unwrap();
    }

    let hits = library.search(SearchField::Author, "tol").unwrap();
    assert_eq!(hits.len(), 2);
    assert!(library.search(SearchField::Title, "").is_none());

    let stats = library.statistics();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.percent_read, 25.0);

    library.remove_by_title("The Hobbit");
    assert_eq!(library.statistics().percent_read, 0.0);
}
