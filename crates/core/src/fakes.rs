//! Deterministic sample records for demos and tests.
//!
//! Every sample passes the field rules: names and lists are letters only,
//! phones and CPFs are well formed (CPFs carry valid check digits), and
//! unique fields never repeat within one call to [`sample_students`].

use chrono::NaiveDate;

use crate::student::Student;

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Camila", "Diego", "Elisa", "Fernando", "Gabriela", "Henrique", "Isabela",
    "João",
];
const LAST_NAMES: &[&str] = &[
    "Silva", "Souza", "Oliveira", "Santos", "Pereira", "Costa", "Rodrigues", "Almeida",
    "Nascimento", "Lima", "Araújo",
];
const UNIVERSITIES: &[&str] = &[
    "Universidade de São Paulo",
    "Universidade Estadual de Campinas",
    "Universidade Federal do Rio de Janeiro",
    "Universidade Federal de Minas Gerais",
];
const COURSES: &[&str] = &[
    "Engenharia de Produção",
    "Ciência da Computação",
    "Economia",
    "Administração",
    "Engenharia Civil",
];
const CITIES: &[(&str, &str)] = &[
    ("São Paulo", "SP"),
    ("Campinas", "SP"),
    ("Rio de Janeiro", "RJ"),
    ("Belo Horizonte", "MG"),
];
const MODALITIES: &[&str] = &["Presencial", "Remoto", "Híbrido"];
const COMPETENCIES: &[&str] = &["Python", "Excel", "SQL", "Comunicação", "Liderança", "Finanças"];
const SECTORS: &[&str] = &["Tecnologia", "Consultoria", "Mercado Financeiro", "Indústria", "Varejo"];
const LEVELS: &[&str] = &["Básico", "Intermediário", "Avançado", "Fluente"];

/// One sample record.
pub fn sample_student() -> Student {
    make_student(0)
}

/// `n` sample records with pairwise distinct unique fields.
pub fn sample_students(n: usize) -> Vec<Student> {
    (0..n).map(make_student).collect()
}

fn pick<'a>(items: &[&'a str], index: usize) -> &'a str {
    items[index % items.len()]
}

fn pick_many(items: &[&str], index: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|offset| pick(items, index + offset).to_string())
        .collect()
}

fn make_student(index: usize) -> Student {
    // The two name parts cycle with coprime periods, so names stay distinct
    // for the first 110 samples; the suffix keeps them distinct beyond that.
    let mut name = format!(
        "{} {}",
        pick(FIRST_NAMES, index),
        pick(LAST_NAMES, index)
    );
    let round = index / (FIRST_NAMES.len() * LAST_NAMES.len());
    if round > 0 {
        name.push_str(&format!(" {}", pick(LAST_NAMES, index + round)));
    }

    let (city, state) = CITIES[index % CITIES.len()];
    let graduation_year = 2025 + (index % 4) as i64;
    let has_interned = index % 2 == 1;

    Student {
        email: format!("aluno{index:04}@example.com"),
        institutional_email: Some(format!("aluno{index:04}@universidade.edu.br")),
        university: pick(UNIVERSITIES, index).to_string(),
        course: pick(COURSES, index).to_string(),
        graduation_year,
        open_to_offers: Some(if index % 3 == 0 { "Sim" } else { "Não" }.to_string()),
        areas_of_interest: Some(pick_many(SECTORS, index, 2)),
        phone: sample_phone(index),
        city: city.to_string(),
        state: state.to_string(),
        country: "Brasil".to_string(),
        cpf: sample_cpf(index),
        internship_modalities: pick_many(MODALITIES, index, 2),
        competencies: pick_many(COMPETENCIES, index, 3),
        has_interned,
        shares_data: true,
        student_organizations: None,
        ethnicity: None,
        disability: None,
        lgbtqia: None,
        birth_date: NaiveDate::from_ymd_opt(2000 + (index % 5) as i32, 1 + (index % 12) as u32, 10),
        enrollment_year: Some(graduation_year - 5),
        graduation_forecast: Some(format!("{graduation_year}.{}", 1 + index % 2)),
        spanish_level: Some(pick(LEVELS, index).to_string()),
        english_level: Some(pick(LEVELS, index + 2).to_string()),
        excel_level: Some(pick(LEVELS, index + 1).to_string()),
        sector_interests: Some(pick_many(SECTORS, index + 1, 2)),
        first_company: None,
        other_competencies: None,
        interned_sector: has_interned.then(|| pick(SECTORS, index).to_string()),
        name,
    }
}

/// `(11) 9XXXX-XXXX` with the index in the last eight digits.
fn sample_phone(index: usize) -> String {
    let digits = format!("{:08}", (10_000_000 + index * 7_919) % 100_000_000);
    format!("(11) 9{}-{}", &digits[..4], &digits[4..])
}

/// A formatted CPF with valid check digits.
fn sample_cpf(index: usize) -> String {
    let base = format!("{:09}", (123_456_000 + index * 9_973) % 1_000_000_000);
    let mut digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
    digits.push(cpf_check_digit(&digits));
    digits.push(cpf_check_digit(&digits));

    let s: String = digits.iter().map(|d| char::from(b'0' + *d as u8)).collect();
    format!("{}.{}.{}-{}", &s[0..3], &s[3..6], &s[6..9], &s[9..11])
}

/// Mod-11 check digit over `digits` with weights counting down to 2.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}
