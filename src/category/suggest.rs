//! Keyword based category suggestions for expense notes.

/// The label suggested when no keyword matches.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Keyword sets and the category they suggest, checked in order.
const KEYWORD_RULES: [(&[&str], &str); 6] = [
    (
        &["pizza", "restaurant", "food", "lunch", "dinner"],
        "Food & Dining",
    ),
    (&["gas", "uber", "taxi", "bus", "train"], "Transportation"),
    (&["amazon", "shopping", "store", "mall"], "Shopping"),
    (
        &["movie", "concert", "game", "entertainment"],
        "Entertainment",
    ),
    (
        &["electric", "water", "internet", "phone", "bill"],
        "Bills & Utilities",
    ),
    (&["doctor", "hospital", "pharmacy", "medical"], "Healthcare"),
];

/// Suggest a category label for an expense `note`.
///
/// The first rule with a keyword anywhere in the note wins, ignoring case. Keywords match
/// substrings, so "busy" matches "bus".
pub fn suggest_category(note: &str) -> &'static str {
    let note = note.to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| note.contains(keyword)))
        .map(|(_, category)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}
