#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod backup;
pub mod indexed_db;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;
pub mod record;
