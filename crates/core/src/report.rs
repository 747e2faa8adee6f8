//! Error aggregation keyed by record identity, and the terminal result type.

use indexmap::IndexMap;
use serde::Serialize;

use crate::schema::labels;
use crate::student::Student;
use crate::table::RawRow;

/// Key used for the record key when the CPF cell is empty.
pub const CPF_FALLBACK: &str = "cpf não localizado";
/// Key used for the record key when the name cell is empty.
pub const NAME_FALLBACK: &str = "nome não localizado";
/// Report key for problems that concern the whole sheet.
pub const GENERAL_KEY: &str = "Geral";

/// `"{cpf}: {name}"` with fixed fallbacks for empty cells.
///
/// Keys are not guaranteed unique; rows that collide share one entry.
pub fn record_key(row: &RawRow<'_>) -> String {
    let cpf = row.text(labels::CPF);
    let name = row.text(labels::NAME);
    format!(
        "{}: {}",
        cpf.as_deref().unwrap_or(CPF_FALLBACK),
        name.as_deref().unwrap_or(NAME_FALLBACK)
    )
}

/// Per-record error messages, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    entries: IndexMap<String, Vec<String>>,
}

impl ErrorReport {
    /// Append `message` under `key`, creating the entry if needed.
    ///
    /// A message already filed under the same key is not repeated.
    pub fn push(&mut self, key: &str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.entries.entry(key.to_string()).or_default();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of record keys with at least one message.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, messages)| (key.as_str(), messages.as_slice()))
    }
}

/// Outcome of one pipeline run. All-or-nothing: any reported error rejects
/// the whole upload.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Success { records: Vec<Student> },
    Rejected { errors: ErrorReport },
}

impl ValidationResult {
    /// Decide the outcome from what both passes produced.
    pub fn from_parts(records: Vec<Student>, errors: ErrorReport) -> Self {
        if errors.is_empty() {
            Self::Success { records }
        } else {
            Self::Rejected { errors }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Wire name of the outcome.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Rejected { .. } => "rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RawTable;

    #[test]
    fn push_suppresses_repeated_messages() {
        let mut report = ErrorReport::default();
        report.push("k", "a");
        report.push("k", "b");
        report.push("k", "a");
        assert_eq!(report.get("k").unwrap(), ["a", "b"]);
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut report = ErrorReport::default();
        report.push("z", "1");
        report.push("a", "2");
        report.push("m", "3");
        let keys: Vec<&str> = report.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut report = ErrorReport::default();
        report.push("k", "msg");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({ "k": ["msg"] }));
    }

    #[test]
    fn record_key_uses_fallbacks() {
        let table = RawTable::from_grid(
            [labels::CPF, labels::NAME],
            vec![
                vec!["123.456.789-09".into(), "Ana".into()],
                vec![crate::table::RawCell::Empty, "Bia".into()],
                vec!["987.654.321-00".into(), " ".into()],
            ],
        );
        let keys: Vec<String> = table.rows().map(|r| record_key(&r)).collect();
        assert_eq!(
            keys,
            [
                "123.456.789-09: Ana",
                "cpf não localizado: Bia",
                "987.654.321-00: nome não localizado",
            ]
        );
    }

    #[test]
    fn result_is_rejected_whenever_errors_exist() {
        let mut errors = ErrorReport::default();
        assert!(ValidationResult::from_parts(vec![], errors.clone()).is_success());
        errors.push(GENERAL_KEY, "x");
        let result = ValidationResult::from_parts(vec![], errors);
        assert_eq!(result.status(), "rejected");
    }
}
