//! Demo front end: load a catalog, let every patron borrow their suggested
//! book, then print the resulting catalog and roster.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use lending_library::{
    Book, BookKey, CatalogFile, ConfigError, Library, LibraryConfig, LibraryReport,
    LiteraryValues, Patron, PatronId, PatronKey, SuggestionScope, Tendencies, TransitionLogger,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Command-line arguments for the lending library demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON catalog with library settings, books and patrons (built-in demo if omitted)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Override the number of book slots
    #[arg(long)]
    max_books: Option<usize>,

    /// Override the per-patron borrow limit
    #[arg(long)]
    max_borrowed: Option<usize>,

    /// Override the number of patron slots
    #[arg(long)]
    max_patrons: Option<usize>,

    /// Let suggestions consider every catalogued book, not only the first max-borrowed slots
    #[arg(long)]
    catalog_wide_suggestions: bool,

    /// Enable debug logging (`RUST_LOG` takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();
    init_tracing(args.verbose);

    println!("{}", "Lending Library Demonstration".green().bold());
    println!("=============================\n");

    let mut catalog = match &args.catalog {
        Some(path) => CatalogFile::load(path)?,
        None => demo_catalog(),
    };
    apply_overrides(&mut catalog.library, &args);
    if let Err(err) = catalog.library.validate() {
        tracing::warn!(%err, "this library cannot lend anything");
    }

    let (mut library, failures) = catalog.build();
    for failure in &failures {
        println!("{}", format!("Registration failed: {failure}").red());
    }
    library.register_observer(Box::new(TransitionLogger));

    println!("{}", "Lending suggested books...".yellow().bold());
    lend_suggestions(&mut library);

    println!("\n{}", "Catalog".yellow().bold());
    print!("{}", LibraryReport::catalog_table(&library));
    println!("\n{}", "Roster".yellow().bold());
    print!("{}", LibraryReport::roster_table(&library));
    println!();
    LibraryReport::print_stats(&library);

    println!("\n{}", "Demonstration complete!".green().bold());
    Ok(())
}

/// Install a `tracing` subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(env_filter).init();
}

/// Apply command-line overrides on top of the file configuration
fn apply_overrides(config: &mut LibraryConfig, args: &Args) {
    if let Some(max_books) = args.max_books {
        config.max_book_capacity = max_books;
    }
    if let Some(max_borrowed) = args.max_borrowed {
        config.max_borrowed_books = max_borrowed;
    }
    if let Some(max_patrons) = args.max_patrons {
        config.max_patron_capacity = max_patrons;
    }
    if args.catalog_wide_suggestions {
        config.suggestion_scope = SuggestionScope::Catalog;
    }
}

/// Ask for a suggestion on behalf of every patron and try to borrow it
fn lend_suggestions(library: &mut Library) {
    let patrons: Vec<PatronId> = library.patrons().map(|(id, _)| id).collect();

    for patron_id in patrons {
        let name = library.patron(patron_id).map(Patron::display_name).unwrap_or_default();
        let Some(book_id) = library.suggest_book_id(patron_id) else {
            println!("{}", format!("{name}: nothing to suggest").dimmed());
            continue;
        };
        let title = library.book(book_id).map(|book| book.title().to_string()).unwrap_or_default();

        match library.try_borrow_book(book_id, patron_id) {
            Ok(()) => println!("{} {name} borrowed \"{title}\"", "[lent]".green()),
            Err(reason) => {
                println!("{} {name} could not borrow \"{title}\": {reason}", "[refused]".red());
            }
        }
    }
}

/// Two books, a one-book borrow limit and two patrons
///
/// With the default suggestion scope only the first slot is ever suggested,
/// so the second patron gets nothing until `--catalog-wide-suggestions`.
fn demo_catalog() -> CatalogFile {
    CatalogFile {
        library: LibraryConfig::new(2, 1, 2),
        books: vec![
            Book::new(
                BookKey::new("978-0-7432-7356-5"),
                "Catch-22",
                "Joseph Heller",
                LiteraryValues::new(3, 0, 0),
            ),
            Book::new(
                BookKey::new("978-0-14-118776-1"),
                "Wuthering Heights",
                "Emily Bronte",
                LiteraryValues::new(0, 5, 0),
            ),
        ],
        patrons: vec![
            Patron::new(PatronKey::new("card-0001"), "Ricky", "Bobby", Tendencies::new(2, 0, 0), 5),
            Patron::new(PatronKey::new("card-0002"), "Cal", "Naughton", Tendencies::new(0, 1, 0), 5),
        ],
    }
}
