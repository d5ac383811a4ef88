use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use spendwise::{
    Category, ExpenseFields, Identity, UserID, add_category, add_expense, current_month,
    initialize_db, set_budget, suggest_category,
};

/// A utility for creating a test database for the REST API server of spendwise.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The ID of the user that owns the test data.
    #[arg(long, short, default_value_t = 1)]
    user_id: i64,
}

/// Names and colors of the stored test categories.
///
/// None of these are default categories, so listings show whether stored rows replaced the
/// defaults.
const TEST_CATEGORIES: [(&str, &str); 4] = [
    ("Groceries", "#22c55e"),
    ("Rent", "#0ea5e9"),
    ("Travel", "#f97316"),
    ("Pets", "#a855f7"),
];

/// Notes and amounts for the test expenses, spaced three days apart counting back from today.
const TEST_EXPENSES: [(&str, f64); 10] = [
    ("Lunch at the food court", 14.5),
    ("Uber to work", 23.0),
    ("Amazon order", 59.99),
    ("Movie night", 32.0),
    ("Electric bill", 120.75),
    ("Pharmacy", 18.2),
    ("Birthday present", 45.0),
    ("Pizza with friends", 27.5),
    ("Bus pass top-up", 20.0),
    ("Internet", 79.0),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
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

    let identity = Identity::User(UserID::new(args.user_id));

    println!("Creating categories for user {}...", args.user_id);
    for (name, color) in TEST_CATEGORIES {
        let category = Category {
            name: name.to_owned(),
            color: color.to_owned(),
        };
        add_category(identity, category, &conn)?;
    }

    println!("Creating expenses...");
    let today = OffsetDateTime::now_utc().date();
    for (days_ago, (note, amount)) in TEST_EXPENSES.into_iter().enumerate() {
        let date = today - Duration::days(days_ago as i64 * 3);

        add_expense(
            identity,
            ExpenseFields {
                amount,
                category: suggest_category(note).to_owned(),
                note: note.to_owned(),
                date: date.to_string(),
            },
            &conn,
        )?;
    }

    let month = current_month(OffsetDateTime::now_utc());
    println!("Setting budget for {month}...");
    set_budget(identity, &month, 500.0, &conn)?;

    println!("Success!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use spendwise::default_categories;

    use super::TEST_CATEGORIES;

    #[test]
    fn test_categories_are_not_defaults() {
        let defaults = default_categories();

        for (name, _) in TEST_CATEGORIES {
            assert!(
                defaults.iter().all(|category| category.name != name),
                "{name} is a default category"
            );
        }
    }
}
