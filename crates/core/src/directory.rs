//! Lookup of registered students by CPF.
//!
//! [`StudentDirectory`] is the seam between the HTTP layer and wherever
//! accepted records live. [`InMemoryDirectory`] backs local development and
//! tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::student::Student;

/// Read access to registered students.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Find a student by CPF. Punctuation is ignored, so `123.456.789-09`
    /// and `12345678909` name the same student.
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Student>, CoreError>;
}

/// Digits of a CPF with formatting stripped.
pub fn cpf_digits(cpf: &str) -> String {
    cpf.chars().filter(char::is_ascii_digit).collect()
}

/// Directory held in process memory, keyed by CPF digits.
#[derive(Clone, Default)]
pub struct InMemoryDirectory {
    students: Arc<RwLock<HashMap<String, Student>>>,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding `students`. A later record with the same
    /// CPF replaces an earlier one.
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        let map = students
            .into_iter()
            .map(|student| (cpf_digits(&student.cpf), student))
            .collect();
        Self {
            students: Arc::new(RwLock::new(map)),
        }
    }

    /// Add or replace a record.
    pub fn insert(&self, student: Student) -> Result<(), CoreError> {
        let mut students = self
            .students
            .write()
            .map_err(|e| CoreError::Internal(format!("student directory lock poisoned: {e}")))?;
        students.insert(cpf_digits(&student.cpf), student);
        Ok(())
    }

    /// Number of records held.
    pub fn len(&self) -> Result<usize, CoreError> {
        let students = self
            .students
            .read()
            .map_err(|e| CoreError::Internal(format!("student directory lock poisoned: {e}")))?;
        Ok(students.len())
    }
}

#[async_trait]
impl StudentDirectory for InMemoryDirectory {
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Student>, CoreError> {
        let key = cpf_digits(cpf);
        if key.is_empty() {
            return Ok(None);
        }
        let students = self
            .students
            .read()
            .map_err(|e| CoreError::Internal(format!("student directory lock poisoned: {e}")))?;
        Ok(students.get(&key).cloned())
    }
}
