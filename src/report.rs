use std::fmt::Write;

use crate::{book_state::BookState, library::Library};

/// Text reports over a library's catalog and roster
#[derive(Debug)]
pub struct LibraryReport;

impl LibraryReport {
    /// Generate a markdown table of the catalog
    #[must_use]
    pub fn catalog_table(library: &Library) -> String {
        let mut table = String::from("| Id | Key | Title | Comic | Drama | Edu | State |\n");
        table.push_str("|----|-----|-------|-------|-------|-----|-------|\n");

        for (id, book) in library.books() {
            let values = book.values();
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} | {} |",
                id.get(),
                book.key(),
                book.title(),
                values.comic,
                values.dramatic,
                values.educational,
                Self::format_state(library, book.state())
            );
        }

        table
    }

    /// Generate a markdown table of the patron roster
    #[must_use]
    pub fn roster_table(library: &Library) -> String {
        let mut table = String::from("| Id | Key | Name | Threshold | Borrowed |\n");
        table.push_str("|----|-----|------|-----------|----------|\n");

        for (id, patron) in library.patrons() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {}/{} |",
                id.get(),
                patron.key(),
                patron.display_name(),
                patron.enjoyment_threshold(),
                library.borrowed_count(id),
                library.max_borrowed_books()
            );
        }

        table
    }

    /// Print capacity usage and loan totals
    pub fn print_stats(library: &Library) {
        println!("=== Library Statistics ===");
        println!(
            "Books: {} of {} slots used",
            library.books().count(),
            library.max_book_capacity()
        );
        println!(
            "Patrons: {} of {} slots used",
            library.patrons().count(),
            library.max_patron_capacity()
        );
        println!("Books on loan: {}", library.books_on_loan());
        println!("Borrow limit per patron: {}", library.max_borrowed_books());
    }

    /// Format a book state, naming the borrower when known
    fn format_state(library: &Library, state: BookState) -> String {
        match state {
            BookState::Available => "available".to_string(),
            BookState::Borrowed(patron) => library
                .patron(patron)
                .map_or_else(|| state.to_string(), |p| format!("borrowed by {}", p.display_name())),
        }
    }
}
