//! Listing and filtering a user's expenses for the reports page.

use rusqlite::{Connection, ToSql};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    identity::{Identity, UserID},
};

use super::core::{Expense, map_expense_row};

/// Filters for listing expenses.
///
/// Absent filters impose no constraint. All present filters must hold.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    /// Only include expenses with exactly this category label.
    pub category: Option<String>,
    /// Only include expenses dated on or after this "YYYY-MM-DD" date.
    pub start_date: Option<String>,
    /// Only include expenses dated on or before this "YYYY-MM-DD" date.
    pub end_date: Option<String>,
    /// Only include expenses whose note contains this text, ignoring case.
    pub search: Option<String>,
}

impl ExpenseQuery {
    /// Whether `expense` satisfies every filter in the query.
    pub fn matches(&self, expense: &Expense) -> bool {
        let category_matches =
            non_empty(&self.category).is_none_or(|category| expense.category == *category);
        let after_start =
            non_empty(&self.start_date).is_none_or(|start_date| expense.date >= *start_date);
        let before_end =
            non_empty(&self.end_date).is_none_or(|end_date| expense.date <= *end_date);
        let note_matches = non_empty(&self.search).is_none_or(|search| {
            expense
                .note
                .to_lowercase()
                .contains(&search.to_lowercase())
        });

        category_matches && after_start && before_end && note_matches
    }
}

/// The expenses matching a report's filters and their total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    /// The matching expenses, newest first.
    pub expenses: Vec<Expense>,
    /// The sum of the amounts of `expenses`.
    pub total_amount: f64,
}

/// List the caller's expenses that match `query`, sorted by date with the newest first.
///
/// Anonymous callers get an empty list.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn list_expenses(
    identity: Identity,
    query: &ExpenseQuery,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    match identity.user_id() {
        Some(user_id) => query_expenses(user_id, query, connection),
        None => Ok(Vec::new()),
    }
}

/// List the caller's expenses that match `query` along with their total amount.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_expense_report(
    identity: Identity,
    query: &ExpenseQuery,
    connection: &Connection,
) -> Result<ExpenseReport, Error> {
    let expenses = list_expenses(identity, query, connection)?;
    let total_amount = expenses
        .iter()
        .fold(0.0, |total, expense| total + expense.amount);

    Ok(ExpenseReport {
        expenses,
        total_amount,
    })
}

/// Get the expenses owned by `user_id` that match `query`, newest first.
///
/// The category and date filters are evaluated by SQLite against the `(user_id, category)` and
/// `(user_id, date)` indexes. The note search is applied afterwards so that case folding works
/// for non-ASCII text. Expenses on the same date keep the order they were added in.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub(crate) fn query_expenses(
    user_id: UserID,
    query: &ExpenseQuery,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let user_id = user_id.as_i64();
    let mut sql = "SELECT id, user_id, amount, category, note, date FROM expense \
        WHERE user_id = ?"
        .to_owned();
    let mut params: Vec<&dyn ToSql> = vec![&user_id];

    if let Some(category) = non_empty(&query.category) {
        sql.push_str(" AND category = ?");
        params.push(category);
    }

    if let Some(start_date) = non_empty(&query.start_date) {
        sql.push_str(" AND date >= ?");
        params.push(start_date);
    }

    if let Some(end_date) = non_empty(&query.end_date) {
        sql.push_str(" AND date <= ?");
        params.push(end_date);
    }

    sql.push_str(" ORDER BY date DESC, id ASC");

    let expenses = connection
        .prepare(&sql)?
        .query_map(params.as_slice(), map_expense_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let expenses = match non_empty(&query.search) {
        Some(_) => expenses
            .into_iter()
            .filter(|expense| query.matches(expense))
            .collect(),
        None => expenses,
    };

    Ok(expenses)
}

/// Empty strings are treated as a missing filter.
fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod query_tests {
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        expense::{Expense, ExpenseFields, core::create_expense},
        identity::{Identity, UserID},
    };

    use super::{ExpenseQuery, get_expense_report, list_expenses};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert(conn: &Connection, user_id: i64, amount: f64, category: &str, date: &str) -> Expense {
        create_expense(
            UserID::new(user_id),
            ExpenseFields {
                amount,
                category: category.to_owned(),
                note: format!("{category} on {date}"),
                date: date.to_owned(),
            },
            conn,
        )
        .expect("Could not create test expense")
    }

    fn dates(expenses: &[Expense]) -> Vec<&str> {
        expenses.iter().map(|expense| expense.date.as_str()).collect()
    }

    #[test]
    fn lists_all_expenses_newest_first() {
        let conn = get_test_connection();
        insert(&conn, 1, 10.0, "Food", "2024-01-05");
        insert(&conn, 1, 20.0, "Food", "2024-01-20");
        insert(&conn, 1, 5.0, "Food", "2024-02-01");

        let got = list_expenses(
            Identity::User(UserID::new(1)),
            &ExpenseQuery::default(),
            &conn,
        )
        .unwrap();

        assert_eq!(dates(&got), vec!["2024-02-01", "2024-01-20", "2024-01-05"]);
    }

    #[test]
    fn filters_by_category_and_start_date() {
        let conn = get_test_connection();
        insert(&conn, 1, 10.0, "Food", "2024-01-05");
        insert(&conn, 1, 20.0, "Food", "2024-01-20");
        insert(&conn, 1, 5.0, "Food", "2024-02-01");
        insert(&conn, 1, 7.0, "Transportation", "2024-01-25");

        let query = ExpenseQuery {
            category: Some("Food".to_owned()),
            start_date: Some("2024-01-10".to_owned()),
            ..Default::default()
        };
        let got = list_expenses(Identity::User(UserID::new(1)), &query, &conn).unwrap();

        assert_eq!(dates(&got), vec!["2024-02-01", "2024-01-20"]);
        assert!(got.iter().all(|expense| expense.category == "Food"));
    }

    #[test]
    fn end_date_is_inclusive() {
        let conn = get_test_connection();
        insert(&conn, 1, 10.0, "Food", "2024-01-05");
        insert(&conn, 1, 20.0, "Food", "2024-01-20");

        let query = ExpenseQuery {
            end_date: Some("2024-01-05".to_owned()),
            ..Default::default()
        };
        let got = list_expenses(Identity::User(UserID::new(1)), &query, &conn).unwrap();

        assert_eq!(dates(&got), vec!["2024-01-05"]);
    }

    #[test]
    fn empty_filters_are_ignored() {
        let conn = get_test_connection();
        insert(&conn, 1, 10.0, "Food", "2024-01-05");

        let query = ExpenseQuery {
            category: Some(String::new()),
            start_date: Some(String::new()),
            end_date: Some(String::new()),
            search: Some(String::new()),
        };
        let got = list_expenses(Identity::User(UserID::new(1)), &query, &conn).unwrap();

        assert_eq!(got.len(), 1);
    }

    #[test]
    fn search_ignores_case() {
        let conn = get_test_connection();
        insert(&conn, 1, 10.0, "Food", "2024-01-05");
        insert(&conn, 1, 20.0, "Shopping", "2024-01-06");

        let query = ExpenseQuery {
            search: Some("FOOD ON".to_owned()),
            ..Default::default()
        };
        let got = list_expenses(Identity::User(UserID::new(1)), &query, &conn).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].category, "Food");
    }

    #[test]
    fn only_lists_callers_expenses() {
        let conn = get_test_connection();
        insert(&conn, 1, 10.0, "Food", "2024-01-05");
        insert(&conn, 2, 20.0, "Food", "2024-01-06");

        let got = list_expenses(
            Identity::User(UserID::new(2)),
            &ExpenseQuery::default(),
            &conn,
        )
        .unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].user_id, UserID::new(2));
    }

    #[test]
    fn anonymous_caller_gets_empty_list() {
        let conn = get_test_connection();
        insert(&conn, 1, 10.0, "Food", "2024-01-05");

        let got = list_expenses(Identity::Anonymous, &ExpenseQuery::default(), &conn).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn same_day_expenses_are_in_insertion_order() {
        let conn = get_test_connection();
        let first = insert(&conn, 1, 1.0, "Food", "2024-01-05");
        let second = insert(&conn, 1, 2.0, "Food", "2024-01-05");

        let got = list_expenses(
            Identity::User(UserID::new(1)),
            &ExpenseQuery::default(),
            &conn,
        )
        .unwrap();

        assert_eq!(got, vec![first, second]);
    }

    #[test]
    fn report_totals_listed_expenses() {
        let conn = get_test_connection();
        insert(&conn, 1, 10.0, "Food", "2024-01-05");
        insert(&conn, 1, 20.5, "Food", "2024-01-20");
        insert(&conn, 1, 5.0, "Shopping", "2024-01-21");

        let query = ExpenseQuery {
            category: Some("Food".to_owned()),
            ..Default::default()
        };
        let report = get_expense_report(Identity::User(UserID::new(1)), &query, &conn).unwrap();

        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.total_amount, 30.5);
    }

    #[test]
    fn query_matches_checks_every_filter() {
        let expense = Expense {
            id: 1,
            user_id: UserID::new(1),
            amount: 10.0,
            category: "Food".to_owned(),
            note: "Pizza with friends".to_owned(),
            date: "2024-01-15".to_owned(),
        };

        assert!(ExpenseQuery::default().matches(&expense));
        assert!(
            ExpenseQuery {
                category: Some("Food".to_owned()),
                start_date: Some("2024-01-15".to_owned()),
                end_date: Some("2024-01-15".to_owned()),
                search: Some("pizza".to_owned()),
            }
            .matches(&expense)
        );
        assert!(
            !ExpenseQuery {
                category: Some("Shopping".to_owned()),
                ..Default::default()
            }
            .matches(&expense)
        );
        assert!(
            !ExpenseQuery {
                start_date: Some("2024-01-16".to_owned()),
                ..Default::default()
            }
            .matches(&expense)
        );
        assert!(
            !ExpenseQuery {
                end_date: Some("2024-01-14".to_owned()),
                ..Default::default()
            }
            .matches(&expense)
        );
    }
}
