//! Exporting expenses as a CSV document.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use rusqlite::Connection;

use crate::{Error, identity::Identity};

use super::{
    core::Expense,
    query::{ExpenseQuery, list_expenses},
};

/// The header row of exported CSV documents.
pub(crate) const CSV_HEADER: [&str; 4] = ["Date", "Amount", "Category", "Description"];

/// Export the caller's expenses that match `query` as a CSV document, newest first.
///
/// Anonymous callers get a document containing only the header row.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if the expenses could not be fetched,
/// - or [Error::CsvError] if the document could not be written.
pub fn export_expenses_csv(
    identity: Identity,
    query: &ExpenseQuery,
    connection: &Connection,
) -> Result<String, Error> {
    let expenses = list_expenses(identity, query, connection)?;

    write_expenses_csv(&expenses)
}

/// Write `expenses` as CSV with one row per expense.
///
/// The description column is always quoted, with embedded quotes doubled. The other columns are
/// written as is.
pub(crate) fn write_expenses_csv(expenses: &[Expense]) -> Result<String, Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for expense in expenses {
        let amount = expense.amount.to_string();
        let description = quote(&expense.note);

        writer.write_record([&expense.date, &amount, &expense.category, &description])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.error().to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
