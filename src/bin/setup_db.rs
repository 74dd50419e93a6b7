use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use keuangan_rs::{Category, Ledger, NewTransaction, create_transaction, initialize_db};

/// A utility for creating the database of keuangan_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// Insert one sample income and one sample expense dated today.
    #[arg(long)]
    with_sample_data: bool,
}

/// Create the income and expense tables, optionally with sample rows.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'keuangan.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'keuangan.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    if args.with_sample_data {
        println!("Inserting sample data...");

        let today = OffsetDateTime::now_utc().date();
        let samples = [
            NewTransaction::new(
                Ledger::Income,
                Category::Salary,
                "Gaji bulanan",
                5_000_000,
                today,
            )?,
            NewTransaction::new(
                Ledger::Expense,
                Category::HouseholdNeeds,
                "Belanja bulanan",
                1_500_000,
                today,
            )?,
        ];

        for sample in samples {
            create_transaction(sample, &conn)?;
        }
    }

    println!("Success!");

    Ok(())
}
