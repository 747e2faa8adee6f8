//! The normalized student record and its assembly from coerced values.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::schema::Field;

/// A coerced cell value, tagged by the shape the field rule produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Bool(bool),
    Integer(i64),
    Date(NaiveDate),
}

impl FieldValue {
    fn into_text(self) -> Result<String, Self> {
        match self {
            Self::Text(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_list(self) -> Result<Vec<String>, Self> {
        match self {
            Self::List(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_bool(self) -> Result<bool, Self> {
        match self {
            Self::Bool(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_integer(self) -> Result<i64, Self> {
        match self {
            Self::Integer(v) => Ok(v),
            other => Err(other),
        }
    }

    fn into_date(self) -> Result<NaiveDate, Self> {
        match self {
            Self::Date(v) => Ok(v),
            other => Err(other),
        }
    }
}

/// Values coerced from one row, before they are shaped into a [`Student`].
#[derive(Debug, Default)]
pub struct CoercedRow {
    values: HashMap<Field, FieldValue>,
}

impl CoercedRow {
    pub fn insert(&mut self, field: Field, value: FieldValue) {
        self.values.insert(field, value);
    }

    fn take<T>(
        &mut self,
        field: Field,
        extract: fn(FieldValue) -> Result<T, FieldValue>,
    ) -> Result<Option<T>, CoreError> {
        match self.values.remove(&field) {
            None => Ok(None),
            Some(value) => extract(value).map(Some).map_err(|other| {
                CoreError::Internal(format!(
                    "field {field:?} was coerced to an unexpected shape: {other:?}"
                ))
            }),
        }
    }

    fn require<T>(
        &mut self,
        field: Field,
        extract: fn(FieldValue) -> Result<T, FieldValue>,
    ) -> Result<T, CoreError> {
        self.take(field, extract)?.ok_or_else(|| {
            CoreError::Internal(format!("required field {field:?} has no coerced value"))
        })
    }
}

/// A fully validated registration row.
///
/// Serialized field names follow the registration form's JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "email_institucional")]
    pub institutional_email: Option<String>,
    #[serde(rename = "universidade")]
    pub university: String,
    #[serde(rename = "curso")]
    pub course: String,
    #[serde(rename = "ano_graduacao")]
    pub graduation_year: i64,
    #[serde(rename = "aberto_proposta_trabalho")]
    pub open_to_offers: Option<String>,
    #[serde(rename = "areas_interesse")]
    pub areas_of_interest: Option<Vec<String>>,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "pais")]
    pub country: String,
    pub cpf: String,
    #[serde(rename = "modalidade_estagio")]
    pub internship_modalities: Vec<String>,
    #[serde(rename = "competencias")]
    pub competencies: Vec<String>,
    #[serde(rename = "ja_estagiou")]
    pub has_interned: bool,
    #[serde(rename = "autoriza_dados")]
    pub shares_data: bool,
    #[serde(rename = "organizacoes_estudantis")]
    pub student_organizations: Option<Vec<String>>,
    #[serde(rename = "etnia")]
    pub ethnicity: Option<String>,
    #[serde(rename = "pcd")]
    pub disability: Option<String>,
    pub lgbtqia: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "ano_ingresso")]
    pub enrollment_year: Option<i64>,
    #[serde(rename = "previsao_formatura")]
    pub graduation_forecast: Option<String>,
    #[serde(rename = "nivel_espanhol")]
    pub spanish_level: Option<String>,
    #[serde(rename = "nivel_ingles")]
    pub english_level: Option<String>,
    #[serde(rename = "nivel_excel")]
    pub excel_level: Option<String>,
    #[serde(rename = "setores_interesse")]
    pub sector_interests: Option<Vec<String>>,
    #[serde(rename = "primeira_empresa")]
    pub first_company: Option<String>,
    #[serde(rename = "outras_competencias")]
    pub other_competencies: Option<Vec<String>>,
    #[serde(rename = "se_sim_setor")]
    pub interned_sector: Option<String>,
}

impl Student {
    /// Shape a coerced row into a record.
    ///
    /// A missing required value or a value of the wrong shape means the
    /// pipeline and the field catalogue disagree, which is an internal error
    /// rather than a problem with the uploaded data.
    pub fn from_coerced(mut row: CoercedRow) -> Result<Self, CoreError> {
        use FieldValue as V;

        Ok(Self {
            name: row.require(Field::Name, V::into_text)?,
            email: row.require(Field::Email, V::into_text)?,
            institutional_email: row.take(Field::InstitutionalEmail, V::into_text)?,
            university: row.require(Field::University, V::into_text)?,
            course: row.require(Field::Course, V::into_text)?,
            graduation_year: row.require(Field::GraduationYear, V::into_integer)?,
            open_to_offers: row.take(Field::OpenToOffers, V::into_text)?,
            areas_of_interest: row.take(Field::AreasOfInterest, V::into_list)?,
            phone: row.require(Field::Phone, V::into_text)?,
            city: row.require(Field::City, V::into_text)?,
            state: row.require(Field::State, V::into_text)?,
            country: row.require(Field::Country, V::into_text)?,
            cpf: row.require(Field::Cpf, V::into_text)?,
            internship_modalities: row.require(Field::InternshipModalities, V::into_list)?,
            competencies: row.require(Field::Competencies, V::into_list)?,
            has_interned: row.require(Field::HasInterned, V::into_bool)?,
            shares_data: row.require(Field::SharesData, V::into_bool)?,
            student_organizations: row.take(Field::StudentOrganizations, V::into_list)?,
            ethnicity: row.take(Field::Ethnicity, V::into_text)?,
            disability: row.take(Field::Disability, V::into_text)?,
            lgbtqia: row.take(Field::Lgbtqia, V::into_text)?,
            birth_date: row.take(Field::BirthDate, V::into_date)?,
            enrollment_year: row.take(Field::EnrollmentYear, V::into_integer)?,
            graduation_forecast: row.take(Field::GraduationForecast, V::into_text)?,
            spanish_level: row.take(Field::SpanishLevel, V::into_text)?,
            english_level: row.take(Field::EnglishLevel, V::into_text)?,
            excel_level: row.take(Field::ExcelLevel, V::into_text)?,
            sector_interests: row.take(Field::SectorInterests, V::into_list)?,
            first_company: row.take(Field::FirstCompany, V::into_text)?,
            other_competencies: row.take(Field::OtherCompetencies, V::into_list)?,
            interned_sector: row.take(Field::InternedSector, V::into_text)?,
        })
    }
}
