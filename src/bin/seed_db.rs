use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::{Parser, ValueEnum};
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use budget_tracker::{
    Category, EntryStore, LocalEntryStore, NewEntry, PaymentMethod, SqliteEntryStore, Status,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StoreKind {
    Sqlite,
    Local,
}

/// A utility for creating a store of sample budget entries for manual testing.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The kind of store to create.
    #[arg(long, value_enum, default_value_t = StoreKind::Sqlite)]
    store: StoreKind,

    /// File path to save the store to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a store for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'entries.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating {:?} store at {output_path:#?}", args.store);
    let mut store: Box<dyn EntryStore> = match args.store {
        StoreKind::Sqlite => Box::new(SqliteEntryStore::new(Connection::open(output_path)?)?),
        StoreKind::Local => Box::new(LocalEntryStore::new(output_path)),
    };

    println!("Creating sample entries...");
    let today = OffsetDateTime::now_utc().date();
    let entries = [
        (42.5, "Groceries", Category::Food, PaymentMethod::DebitCard, Status::Completed),
        (120.0, "Power bill", Category::Bills, PaymentMethod::BankTransfer, Status::Pending),
        (1800.0, "Rent", Category::Housing, PaymentMethod::BankTransfer, Status::Completed),
        (18.0, "Movie night", Category::Entertainment, PaymentMethod::CreditCard, Status::Pending),
        (3.5, "Bus fare", Category::Transport, PaymentMethod::Cash, Status::OnHold),
        (250.0, "Rainy day fund", Category::Savings, PaymentMethod::BankTransfer, Status::NotStarted),
        (12.75, "Lunch", Category::Food, PaymentMethod::Cash, Status::InProgress),
    ];

    for (days_ago, (amount, description, category, payment_method, status)) in
        entries.into_iter().enumerate()
    {
        store.create(NewEntry {
            amount,
            description: Some(description.to_owned()),
            date: today - Duration::days(days_ago as i64),
            category,
            payment_method,
            status,
            notes: None,
        })?;
    }

    println!("Success!");

    Ok(())
}
