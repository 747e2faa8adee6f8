//! Static field catalogue for the student registration sheet.
//!
//! Every column the service understands is declared once in
//! [`FIELD_SPECS`]: the header label it is read from, the target field, how
//! the value is coerced, and whether it is required or must be unique across
//! the upload. Both the column validator and the record pipeline consult this
//! table; nothing else hard-codes a label.

// ---------------------------------------------------------------------------
// Column labels
// ---------------------------------------------------------------------------

/// Column labels as they appear in the sheet header.
pub mod labels {
    pub const NAME: &str = "Nome";
    pub const EMAIL: &str = "Email de contato";
    pub const INSTITUTIONAL_EMAIL: &str = "Email institucional";
    pub const UNIVERSITY: &str = "Universidade";
    pub const COURSE: &str = "Curso";
    pub const GRADUATION_YEAR: &str = "Ano de graduação";
    pub const OPEN_TO_OFFERS: &str = "Aberto a propostas de trabalho";
    pub const AREAS_OF_INTEREST: &str = "Áreas de interesse";
    pub const PHONE: &str = "Telefone";
    pub const CITY: &str = "Cidade";
    pub const STATE: &str = "Estado";
    pub const COUNTRY: &str = "País";
    pub const CPF: &str = "CPF (só números)";
    pub const INTERNSHIP_MODALITIES: &str = "Modalidades de estágio buscadas";
    pub const COMPETENCIES: &str = "Competências";
    pub const HAS_INTERNED: &str = "Já estagiou?/ Está estagiando?";
    pub const SHARES_DATA: &str = "Você autoriza o compartilhamento dos seus dados para os bancos de talentos das empresas presentes no WI34?";
    pub const STUDENT_ORGANIZATIONS: &str = "Organizações estudantis";
    pub const ETHNICITY: &str = "Etnia";
    pub const DISABILITY: &str = "PCD";
    pub const LGBTQIA: &str = "LGBTQIA+";
    pub const BIRTH_DATE: &str = "Data de nascimento (DD/MM/AA)";
    pub const ENROLLMENT_YEAR: &str = "Ano de ingresso na universidade";
    pub const GRADUATION_FORECAST: &str = "Previsão Formatura";
    pub const SPANISH_LEVEL: &str = "Nível de Espanhol";
    pub const ENGLISH_LEVEL: &str = "Nível de Inglês";
    pub const EXCEL_LEVEL: &str = "Nível de Excel";
    pub const SECTOR_INTERESTS: &str = "Setores de Interesse";
    pub const FIRST_COMPANY: &str = "Qual é a primeira empresa que vem à sua mente quando pensa em estagiar?";
    pub const OTHER_COMPETENCIES: &str = "Caso tenha outras competências, indique quais";
    pub const INTERNED_SECTOR: &str = "Se sim, em qual setor(es)?";
}

// ---------------------------------------------------------------------------
// Field catalogue types
// ---------------------------------------------------------------------------

/// Target fields of a [`Student`](crate::student::Student).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    InstitutionalEmail,
    University,
    Course,
    GraduationYear,
    OpenToOffers,
    AreasOfInterest,
    Phone,
    City,
    State,
    Country,
    Cpf,
    InternshipModalities,
    Competencies,
    HasInterned,
    SharesData,
    StudentOrganizations,
    Ethnicity,
    Disability,
    Lgbtqia,
    BirthDate,
    EnrollmentYear,
    GraduationForecast,
    SpanishLevel,
    EnglishLevel,
    ExcelLevel,
    SectorInterests,
    FirstCompany,
    OtherCompetencies,
    InternedSector,
}

/// How a raw cell is coerced and constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Letters (accented Latin included) and whitespace only.
    Text,
    /// Syntactically valid address with a bounded local part.
    Email,
    /// Case-insensitive match against a fixed set; the original text is kept.
    Choice(&'static [&'static str]),
    /// Delimited list; every item is letters and whitespace only.
    List {
        delimiters: &'static [char],
        max_items: usize,
    },
    /// `sim` / `não`, coerced to a boolean.
    YesNo,
    /// `YYYY-MM-DD` that is also a real calendar date.
    Date,
    /// `YYYY.D`, a year and a term digit.
    GraduationForecast,
    /// Whole number, optionally bounded (inclusive).
    Integer { range: Option<(i64, i64)> },
    /// `(DD) DDDDD-DDDD`, the space being optional.
    Phone,
    /// `DDD.DDD.DDD-DD`.
    Cpf,
}

/// One entry of the field catalogue.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub unique: bool,
    pub max_chars: Option<usize>,
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const LIST_DELIMITERS: &[char] = &[';', ','];
pub const COMMA_ONLY: &[char] = &[','];
pub const MAX_LIST_ITEMS: usize = 100;
pub const MAX_INTERNSHIP_MODALITIES: usize = 10;
pub const GRADUATION_YEAR_RANGE: (i64, i64) = (1900, 2100);
pub const YES_NO_CHOICES: &[&str] = &["sim", "não"];

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

const fn spec(field: Field, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        field,
        label,
        kind,
        required: false,
        unique: false,
        max_chars: None,
    }
}

const fn required(mut spec: FieldSpec) -> FieldSpec {
    spec.required = true;
    spec
}

const fn unique(mut spec: FieldSpec) -> FieldSpec {
    spec.unique = true;
    spec
}

const LIST: FieldKind = FieldKind::List {
    delimiters: LIST_DELIMITERS,
    max_items: MAX_LIST_ITEMS,
};

/// The full catalogue, in sheet order.
pub static FIELD_SPECS: &[FieldSpec] = &[
    unique(required(FieldSpec {
        max_chars: Some(100),
        ..spec(Field::Name, labels::NAME, FieldKind::Text)
    })),
    unique(required(spec(Field::Email, labels::EMAIL, FieldKind::Email))),
    spec(Field::InstitutionalEmail, labels::INSTITUTIONAL_EMAIL, FieldKind::Email),
    required(spec(Field::University, labels::UNIVERSITY, FieldKind::Text)),
    required(spec(Field::Course, labels::COURSE, FieldKind::Text)),
    required(spec(
        Field::GraduationYear,
        labels::GRADUATION_YEAR,
        FieldKind::Integer {
            range: Some(GRADUATION_YEAR_RANGE),
        },
    )),
    spec(
        Field::OpenToOffers,
        labels::OPEN_TO_OFFERS,
        FieldKind::Choice(YES_NO_CHOICES),
    ),
    spec(Field::AreasOfInterest, labels::AREAS_OF_INTEREST, LIST),
    unique(required(spec(Field::Phone, labels::PHONE, FieldKind::Phone))),
    required(spec(Field::City, labels::CITY, FieldKind::Text)),
    required(spec(Field::State, labels::STATE, FieldKind::Text)),
    required(spec(Field::Country, labels::COUNTRY, FieldKind::Text)),
    unique(required(spec(Field::Cpf, labels::CPF, FieldKind::Cpf))),
    required(spec(
        Field::InternshipModalities,
        labels::INTERNSHIP_MODALITIES,
        FieldKind::List {
            delimiters: COMMA_ONLY,
            max_items: MAX_INTERNSHIP_MODALITIES,
        },
    )),
    required(spec(Field::Competencies, labels::COMPETENCIES, LIST)),
    required(spec(Field::HasInterned, labels::HAS_INTERNED, FieldKind::YesNo)),
    required(spec(Field::SharesData, labels::SHARES_DATA, FieldKind::YesNo)),
    spec(Field::StudentOrganizations, labels::STUDENT_ORGANIZATIONS, LIST),
    spec(Field::Ethnicity, labels::ETHNICITY, FieldKind::Text),
    spec(Field::Disability, labels::DISABILITY, FieldKind::Text),
    spec(Field::Lgbtqia, labels::LGBTQIA, FieldKind::Text),
    spec(Field::BirthDate, labels::BIRTH_DATE, FieldKind::Date),
    spec(
        Field::EnrollmentYear,
        labels::ENROLLMENT_YEAR,
        FieldKind::Integer { range: None },
    ),
    spec(
        Field::GraduationForecast,
        labels::GRADUATION_FORECAST,
        FieldKind::GraduationForecast,
    ),
    spec(Field::SpanishLevel, labels::SPANISH_LEVEL, FieldKind::Text),
    spec(Field::EnglishLevel, labels::ENGLISH_LEVEL, FieldKind::Text),
    spec(Field::ExcelLevel, labels::EXCEL_LEVEL, FieldKind::Text),
    spec(Field::SectorInterests, labels::SECTOR_INTERESTS, LIST),
    spec(Field::FirstCompany, labels::FIRST_COMPANY, FieldKind::Text),
    spec(Field::OtherCompetencies, labels::OTHER_COMPETENCIES, LIST),
    spec(Field::InternedSector, labels::INTERNED_SECTOR, FieldKind::Text),
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Labels of every required column, in catalogue order.
pub fn required_labels() -> Vec<&'static str> {
    FIELD_SPECS
        .iter()
        .filter(|s| s.required)
        .map(|s| s.label)
        .collect()
}

/// Specs whose values must not repeat across rows, in catalogue order.
pub fn unique_specs() -> impl Iterator<Item = &'static FieldSpec> {
    FIELD_SPECS.iter().filter(|s| s.unique)
}

/// Look up the spec for a field.
pub fn spec_for(field: Field) -> Option<&'static FieldSpec> {
    FIELD_SPECS.iter().find(|s| s.field == field)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
