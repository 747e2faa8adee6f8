pub mod students;
pub mod upload;
