//! Header check run before any row is looked at.

use crate::error::MissingColumnsError;
use crate::table::RawTable;

/// Confirm every label in `required_labels` is present in the table header.
///
/// Missing labels are reported in the order they were requested.
pub fn validate_columns(
    table: &RawTable,
    required_labels: &[&str],
) -> Result<(), MissingColumnsError> {
    let missing: Vec<String> = required_labels
        .iter()
        .filter(|label| !table.has_column(label))
        .map(|label| label.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingColumnsError { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{labels, required_labels};

    #[test]
    fn passes_when_all_required_present() {
        let table = RawTable::new(required_labels());
        assert_eq!(validate_columns(&table, &required_labels()), Ok(()));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut header = required_labels();
        header.push("LinkedIn");
        let table = RawTable::new(header);
        assert!(validate_columns(&table, &required_labels()).is_ok());
    }

    #[test]
    fn reports_exactly_the_missing_labels() {
        let header: Vec<&str> = required_labels()
            .into_iter()
            .filter(|l| *l != labels::PHONE && *l != labels::CPF)
            .collect();
        let table = RawTable::new(header);

        let err = validate_columns(&table, &required_labels()).unwrap_err();
        assert_eq!(err.missing, vec![labels::PHONE, labels::CPF]);
        assert_eq!(
            err.to_string(),
            "Colunas obrigatórias ausentes: Telefone, CPF (só números)"
        );
    }

    #[test]
    fn empty_header_misses_everything() {
        let table = RawTable::new(Vec::<String>::new());
        let err = validate_columns(&table, &required_labels()).unwrap_err();
        assert_eq!(err.missing.len(), required_labels().len());
    }
}
