//! Record pipeline: header check, per-row coercion, duplicate detection.
//!
//! A run scans the table twice. The first pass validates each row on its
//! own; the second looks for values repeated across rows in unique fields.
//! Both passes file their findings into one [`ErrorReport`], and any finding
//! rejects the whole upload.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::columns::validate_columns;
use crate::diagnostics::{DiagnosticsSink, PipelineEvent};
use crate::error::CoreError;
use crate::report::{record_key, ErrorReport, ValidationResult, GENERAL_KEY};
use crate::rules::{self, RuleResult};
use crate::schema::{required_labels, unique_specs, FieldKind, FieldSpec, FIELD_SPECS};
use crate::student::{CoercedRow, FieldValue, Student};
use crate::table::{RawRow, RawTable};

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate a whole table without observing diagnostics.
pub fn process(table: &RawTable) -> Result<ValidationResult, CoreError> {
    process_with(table, &mut ())
}

/// Validate a whole table, reporting progress to `sink`.
///
/// Missing required columns reject the upload under the
/// [`GENERAL_KEY`] entry before any row is looked at. The `Err` arm is
/// reserved for internal failures.
pub fn process_with<S>(table: &RawTable, sink: &mut S) -> Result<ValidationResult, CoreError>
where
    S: DiagnosticsSink + ?Sized,
{
    if let Err(missing) = validate_columns(table, &required_labels()) {
        sink.record(PipelineEvent::MissingColumns {
            missing: missing.missing.clone(),
        });
        let mut errors = ErrorReport::default();
        errors.push(GENERAL_KEY, missing.to_string());
        return Ok(ValidationResult::Rejected { errors });
    }

    let mut errors = ErrorReport::default();
    let mut candidates: Vec<(usize, Student)> = Vec::new();

    for (index, row) in table.rows().enumerate() {
        match check_row(&row) {
            Ok(coerced) => candidates.push((index, Student::from_coerced(coerced)?)),
            Err(messages) => {
                let key = record_key(&row);
                sink.record(PipelineEvent::RowRejected {
                    row: index,
                    key: key.clone(),
                    errors: messages.len(),
                });
                for message in messages {
                    errors.push(&key, message);
                }
            }
        }
    }

    let duplicated_rows = flag_duplicates(table, &mut errors, sink);
    candidates.retain(|(index, _)| !duplicated_rows.contains(index));

    sink.record(PipelineEvent::Finished {
        rows: table.len(),
        accepted: candidates.len(),
        rejected_keys: errors.len(),
    });

    let records = candidates.into_iter().map(|(_, student)| student).collect();
    Ok(ValidationResult::from_parts(records, errors))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Message filed for an empty required cell.
pub fn empty_field_message(label: &str) -> String {
    format!("Campo obrigatório '{label}' está vazio.")
}

/// Message filed for a value that failed its field rule.
pub fn invalid_field_message(label: &str, reason: &str) -> String {
    format!("Campo '{label}' inválido: {reason}.")
}

/// Message filed for every row holding a repeated unique value.
pub fn duplicate_message(label: &str, value: &str) -> String {
    format!("Campo único '{label}' possui valor duplicado: {value}.")
}

// ---------------------------------------------------------------------------
// Row validation
// ---------------------------------------------------------------------------

/// Validate one row in isolation.
///
/// Empty required cells short-circuit: when any is found, only those
/// messages are returned and no field rule runs. Otherwise every field rule
/// runs and all failures are collected, one message per field.
pub fn check_row(row: &RawRow<'_>) -> Result<CoercedRow, Vec<String>> {
    let empty: Vec<String> = FIELD_SPECS
        .iter()
        .filter(|spec| spec.required && row.cell(spec.label).is_empty())
        .map(|spec| empty_field_message(spec.label))
        .collect();
    if !empty.is_empty() {
        return Err(empty);
    }

    let mut coerced = CoercedRow::default();
    let mut messages = Vec::new();

    for spec in FIELD_SPECS {
        // Empty optional cells stay absent and are not validated.
        let Some(text) = row.text(spec.label) else {
            continue;
        };
        match coerce(spec, &text) {
            Ok(value) => coerced.insert(spec.field, value),
            Err(reason) => messages.push(invalid_field_message(spec.label, &reason)),
        }
    }

    if messages.is_empty() {
        Ok(coerced)
    } else {
        Err(messages)
    }
}

/// Apply the rule for `spec` to the normalized text of its cell.
pub fn coerce(spec: &FieldSpec, text: &str) -> RuleResult<FieldValue> {
    match spec.kind {
        FieldKind::Text => rules::text(text, spec.max_chars).map(FieldValue::Text),
        FieldKind::Email => rules::email(text).map(FieldValue::Text),
        FieldKind::Choice(choices) => rules::choice(text, choices).map(FieldValue::Text),
        FieldKind::List {
            delimiters,
            max_items,
        } => rules::list(text, delimiters, max_items).map(FieldValue::List),
        FieldKind::YesNo => rules::yes_no(text).map(FieldValue::Bool),
        FieldKind::Date => rules::date(text).map(FieldValue::Date),
        FieldKind::GraduationForecast => {
            rules::graduation_forecast(text).map(FieldValue::Text)
        }
        FieldKind::Integer { range } => rules::integer(text, range).map(FieldValue::Integer),
        FieldKind::Phone => rules::phone(text).map(FieldValue::Text),
        FieldKind::Cpf => rules::cpf(text).map(FieldValue::Text),
    }
}

// ---------------------------------------------------------------------------
// Duplicate detection
// ---------------------------------------------------------------------------

/// Second pass: flag every row whose unique-field value repeats.
///
/// Runs regardless of per-row validity. Returns the indices of the flagged
/// rows.
fn flag_duplicates<S>(table: &RawTable, errors: &mut ErrorReport, sink: &mut S) -> HashSet<usize>
where
    S: DiagnosticsSink + ?Sized,
{
    let mut flagged = HashSet::new();

    for spec in unique_specs() {
        let values: Vec<_> = table.rows().map(|row| row.text(spec.label)).collect();

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for value in values.iter().flatten() {
            *counts.entry(&**value).or_default() += 1;
        }

        for (value, &rows) in counts.iter().filter(|(_, n)| **n > 1) {
            sink.record(PipelineEvent::DuplicateValue {
                label: spec.label,
                value: value.to_string(),
                rows,
            });
        }

        for (index, (row, value)) in table.rows().zip(&values).enumerate() {
            let Some(value) = value else {
                continue;
            };
            if counts.get(&**value).copied().unwrap_or(0) > 1 {
                errors.push(&record_key(&row), duplicate_message(spec.label, value));
                flagged.insert(index);
            }
        }
    }

    flagged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::schema::labels;
    use crate::table::RawCell;

    /// Header with every required column plus a few optional ones.
    fn header() -> Vec<&'static str> {
        vec![
            labels::NAME,
            labels::EMAIL,
            labels::UNIVERSITY,
            labels::COURSE,
            labels::GRADUATION_YEAR,
            labels::PHONE,
            labels::CITY,
            labels::STATE,
            labels::COUNTRY,
            labels::CPF,
            labels::INTERNSHIP_MODALITIES,
            labels::COMPETENCIES,
            labels::HAS_INTERNED,
            labels::SHARES_DATA,
            labels::BIRTH_DATE,
            labels::AREAS_OF_INTEREST,
        ]
    }

    /// A fully valid row for `header()`; `n` keeps unique fields distinct.
    fn valid_row(n: u32) -> Vec<RawCell> {
        vec![
            format!("Aluno {}", ["Um", "Dois", "Tres", "Quatro", "Cinco"][n as usize]).into(),
            format!("aluno{n}@example.com").into(),
            "Universidade Federal".into(),
            "Engenharia".into(),
            RawCell::Number(2026.0),
            format!("(11) 91234-567{n}").into(),
            "São Paulo".into(),
            "SP".into(),
            "Brasil".into(),
            format!("123.456.789-0{n}").into(),
            "Remoto, Presencial".into(),
            "Python, FastAPI".into(),
            "Não".into(),
            "Sim".into(),
            RawCell::Empty,
            RawCell::Empty,
        ]
    }

    fn table(rows: Vec<Vec<RawCell>>) -> RawTable {
        RawTable::from_grid(header(), rows)
    }

    fn set(row: &mut [RawCell], label: &str, value: RawCell) {
        let position = header().iter().position(|l| *l == label).unwrap();
        row[position] = value;
    }

    fn rejected(result: ValidationResult) -> ErrorReport {
        match result {
            ValidationResult::Rejected { errors } => errors,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn single_valid_row_succeeds_with_normalized_fields() {
        let result = process(&table(vec![valid_row(0)])).unwrap();
        let records = assert_matches!(result, ValidationResult::Success { records } => records);
        assert_eq!(records.len(), 1);
        let student = &records[0];
        assert_eq!(student.name, "Aluno Um");
        assert_eq!(student.graduation_year, 2026);
        assert_eq!(student.competencies, vec!["Python", "FastAPI"]);
        assert_eq!(student.internship_modalities, vec!["Remoto", "Presencial"]);
        assert!(!student.has_interned);
        assert!(student.shares_data);
        assert_eq!(student.birth_date, None);
    }

    #[test]
    fn missing_columns_reject_before_rows() {
        let header: Vec<&str> = header()
            .into_iter()
            .filter(|l| *l != labels::CPF)
            .collect();
        // Row content is irrelevant; it would fail if evaluated.
        let table = RawTable::from_grid(header, vec![vec![RawCell::Empty; 15]]);

        let mut events = Vec::new();
        let errors = rejected(process_with(&table, &mut events).unwrap());

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(GENERAL_KEY).unwrap(),
            ["Colunas obrigatórias ausentes: CPF (só números)"]
        );
        assert_eq!(
            events,
            vec![PipelineEvent::MissingColumns {
                missing: vec![labels::CPF.to_string()]
            }]
        );
    }

    #[test]
    fn empty_required_field_short_circuits_format_checks() {
        let mut row = valid_row(0);
        set(&mut row, labels::NAME, RawCell::Empty);
        set(&mut row, labels::PHONE, "not a phone".into());
        set(&mut row, labels::HAS_INTERNED, "Talvez".into());

        let rows = vec![valid_row(1), valid_row(2), row];
        let errors = rejected(process(&table(rows)).unwrap());

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("123.456.789-00: nome não localizado").unwrap(),
            ["Campo obrigatório 'Nome' está vazio."]
        );
    }

    #[test]
    fn one_empty_message_per_missing_required_field() {
        let mut row = valid_row(0);
        set(&mut row, labels::CITY, RawCell::Empty);
        set(&mut row, labels::COMPETENCIES, "   ".into());

        let errors = rejected(process(&table(vec![row])).unwrap());
        assert_eq!(
            errors.get("123.456.789-00: Aluno Um").unwrap(),
            [
                "Campo obrigatório 'Cidade' está vazio.",
                "Campo obrigatório 'Competências' está vazio.",
            ]
        );
    }

    #[test]
    fn format_errors_accumulate_one_per_field() {
        let mut row = valid_row(0);
        set(&mut row, labels::EMAIL, "not-an-email".into());
        set(&mut row, labels::GRADUATION_YEAR, RawCell::Number(1800.0));
        set(&mut row, labels::HAS_INTERNED, "Talvez".into());
        set(&mut row, labels::BIRTH_DATE, "2001-13-01".into());

        let errors = rejected(process(&table(vec![row])).unwrap());
        let messages = errors.get("123.456.789-00: Aluno Um").unwrap();
        assert_eq!(messages.len(), 4);
        assert!(messages[0].starts_with("Campo 'Email de contato' inválido"));
        assert!(messages[1].starts_with("Campo 'Ano de graduação' inválido"));
        assert!(messages[2].starts_with("Campo 'Já estagiou?/ Está estagiando?' inválido"));
        assert!(messages[3].starts_with("Campo 'Data de nascimento (DD/MM/AA)' inválido"));
    }

    #[test]
    fn talvez_is_a_field_error() {
        let mut row = valid_row(0);
        set(&mut row, labels::HAS_INTERNED, "Talvez".into());
        let errors = rejected(process(&table(vec![row])).unwrap());
        assert_eq!(
            errors.get("123.456.789-00: Aluno Um").unwrap(),
            [invalid_field_message(
                labels::HAS_INTERNED,
                "valor inválido 'Talvez', use 'Sim' ou 'Não'"
            )]
        );
    }

    #[test]
    fn duplicate_cpf_flags_both_rows_and_rejects() {
        let first = valid_row(0);
        let mut second = valid_row(1);
        set(&mut second, labels::CPF, "123.456.789-00".into());

        let mut events = Vec::new();
        let errors = rejected(process_with(&table(vec![first, second]), &mut events).unwrap());

        let expected = duplicate_message(labels::CPF, "123.456.789-00");
        assert_eq!(errors.get("123.456.789-00: Aluno Um").unwrap(), [expected.clone()]);
        assert_eq!(errors.get("123.456.789-00: Aluno Dois").unwrap(), [expected]);
        assert!(events.contains(&PipelineEvent::DuplicateValue {
            label: labels::CPF,
            value: "123.456.789-00".to_string(),
            rows: 2,
        }));
        assert_matches!(
            events.last(),
            Some(PipelineEvent::Finished {
                rows: 2,
                accepted: 0,
                rejected_keys: 2
            })
        );
    }

    #[test]
    fn duplicates_merge_into_existing_row_errors() {
        let mut first = valid_row(0);
        set(&mut first, labels::STATE, "S4o Paulo".into());
        let mut second = valid_row(1);
        set(&mut second, labels::EMAIL, "aluno0@example.com".into());

        let errors = rejected(process(&table(vec![first, second])).unwrap());
        assert_eq!(
            errors.get("123.456.789-00: Aluno Um").unwrap(),
            [
                invalid_field_message(labels::STATE, "deve conter apenas letras e espaços"),
                duplicate_message(labels::EMAIL, "aluno0@example.com"),
            ]
        );
        assert_eq!(
            errors.get("123.456.789-01: Aluno Dois").unwrap(),
            [duplicate_message(labels::EMAIL, "aluno0@example.com")]
        );
    }

    #[test]
    fn colliding_keys_share_one_entry_without_repeats() {
        // Same CPF and name: both rows map to one key and the duplicate
        // message for each unique field is filed once.
        let first = valid_row(0);
        let mut second = valid_row(1);
        set(&mut second, labels::NAME, "Aluno Um".into());
        set(&mut second, labels::CPF, "123.456.789-00".into());

        let errors = rejected(process(&table(vec![first, second])).unwrap());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("123.456.789-00: Aluno Um").unwrap(),
            [
                duplicate_message(labels::NAME, "Aluno Um"),
                duplicate_message(labels::CPF, "123.456.789-00"),
            ]
        );
    }

    #[test]
    fn empty_values_are_not_duplicates() {
        let mut first = valid_row(0);
        set(&mut first, labels::NAME, RawCell::Empty);
        let mut second = valid_row(1);
        set(&mut second, labels::NAME, RawCell::Empty);

        let errors = rejected(process(&table(vec![first, second])).unwrap());
        for (_, messages) in errors.iter() {
            assert!(messages.iter().all(|m| !m.contains("duplicado")));
        }
    }

    #[test]
    fn processing_is_idempotent() {
        let mut bad = valid_row(2);
        set(&mut bad, labels::PHONE, "(11) 91234-5670".into());
        let table = table(vec![valid_row(0), valid_row(1), bad]);
        assert_eq!(process(&table).unwrap(), process(&table).unwrap());
    }

    #[test]
    fn optional_fields_are_validated_when_present() {
        let mut row = valid_row(0);
        set(&mut row, labels::BIRTH_DATE, "2001-05-17".into());
        set(&mut row, labels::AREAS_OF_INTEREST, "Dados; Finanças, Marketing".into());

        let result = process(&table(vec![row])).unwrap();
        let records = assert_matches!(result, ValidationResult::Success { records } => records);
        assert_eq!(
            records[0].birth_date,
            chrono::NaiveDate::from_ymd_opt(2001, 5, 17)
        );
        assert_eq!(
            records[0].areas_of_interest.as_deref(),
            Some(&["Dados".to_string(), "Finanças".to_string(), "Marketing".to_string()][..])
        );
    }

    #[test]
    fn records_keep_row_order() {
        let result = process(&table(vec![valid_row(3), valid_row(1), valid_row(4)])).unwrap();
        let records = assert_matches!(result, ValidationResult::Success { records } => records);
        let names: Vec<&str> = records.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Aluno Quatro", "Aluno Dois", "Aluno Cinco"]);
    }

    #[test]
    fn empty_table_with_full_header_succeeds() {
        let result = process(&table(vec![])).unwrap();
        assert_eq!(result, ValidationResult::Success { records: vec![] });
    }
}
