//! Fill the `books` table with synthetic records for load and pagination testing.

use clap::Parser;
use rand::{seq::SliceRandom, Rng};
use sqlx::{postgres::PgPoolOptions, Postgres, QueryBuilder};

use book_tracker::{config::AppConfig, models::isbn::isbn13_check_digit, models::NewBook};

const WORDS: &[&str] = &[
    "silent", "river", "empire", "garden", "shadow", "winter", "glass", "city", "ocean", "machine",
    "letter", "forest", "stone", "memory", "fire", "northern", "house", "night", "journey", "crown",
    "paper", "island", "storm", "mirror", "orchard", "bridge", "signal", "harvest", "lantern", "valley",
];

const FIRST_NAMES: &[&str] = &[
    "Anna", "Piotr", "Maria", "James", "Olga", "Tomasz", "Elena", "Victor", "Ruth", "Marek",
    "Laura", "Samuel", "Irena", "Daniel", "Zofia", "Henry",
];

const LAST_NAMES: &[&str] = &[
    "Nowak", "Smith", "Kowalski", "Garcia", "Ivanova", "Brown", "Lewandowska", "Moreau",
    "Fischer", "Wright", "Zielinski", "Rossi", "Novak", "Keller",
];

#[derive(Parser, Debug)]
#[command(name = "generate-books")]
#[command(about = "Insert synthetic books into the configured database", long_about = None)]
struct Args {
    /// Number of books to insert
    #[arg(short, long, default_value_t = 10_000_000)]
    count: usize,

    /// Rows per INSERT statement and transaction
    #[arg(short, long, default_value_t = 10_000)]
    batch_size: usize,
}

fn fake_title(rng: &mut impl Rng) -> String {
    let words = rng.gen_range(1..=5);
    let mut title: Vec<String> = (0..words)
        .filter_map(|_| WORDS.choose(rng).map(|w| w.to_string()))
        .collect();
    if let Some(first) = title.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().chain(chars).collect();
        }
    }
    title.join(" ")
}

fn fake_author(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Anna");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Nowak");
    format!("{} {}", first, last)
}

/// Random hyphenated ISBN-13 with a valid check digit, e.g. `978-1-23456-789-7`.
fn fake_isbn13(rng: &mut impl Rng) -> String {
    let mut digits = [0u32; 12];
    digits[..3].copy_from_slice(if rng.gen_bool(0.5) { &[9, 7, 8] } else { &[9, 7, 9] });
    for digit in digits.iter_mut().skip(3) {
        *digit = rng.gen_range(0..10);
    }
    let check = isbn13_check_digit(&digits);

    let s: String = digits.iter().map(|d| char::from_digit(*d, 10).unwrap_or('0')).collect();
    format!("{}-{}-{}-{}-{}", &s[..3], &s[3..4], &s[4..9], &s[9..12], check)
}

fn fake_book(rng: &mut impl Rng) -> NewBook {
    let isbn = fake_isbn13(rng);
    NewBook {
        title: fake_title(rng),
        author: fake_author(rng),
        isbn,
        pages: rng.gen_range(100..=1000),
        rating: rng.gen_range(1..=5),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "generate_books=info".into()),
        )
        .init();

    let args = Args::parse();
    // Five bind parameters per row, Postgres accepts at most 65535 per statement.
    anyhow::ensure!(
        (1..=13_000).contains(&args.batch_size),
        "batch size must be between 1 and 13000"
    );

    let config = AppConfig::load()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    let mut rng = rand::thread_rng();
    let mut inserted = 0usize;

    while inserted < args.count {
        let size = args.batch_size.min(args.count - inserted);
        let batch: Vec<NewBook> = (0..size).map(|_| fake_book(&mut rng)).collect();

        let mut tx = pool.begin().await?;
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO books (title, author, isbn, pages, rating) ");
        builder.push_values(batch, |mut row, book| {
            row.push_bind(book.title)
                .push_bind(book.author)
                .push_bind(book.isbn)
                .push_bind(book.pages)
                .push_bind(book.rating);
        });
        builder.build().execute(&mut *tx).await?;
        tx.commit().await?;

        inserted += size;
        tracing::info!(inserted, total = args.count, "inserted batch of books");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use book_tracker::models::isbn;

    #[test]
    fn test_fake_books_are_valid() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let book = fake_book(&mut rng);
            assert!(isbn::normalize(&book.isbn).is_ok(), "{}", book.isbn);
            assert!(!book.title.is_empty());
            assert!((1..=5).contains(&book.rating));
            assert!((100..=1000).contains(&book.pages));
        }
    }
}
