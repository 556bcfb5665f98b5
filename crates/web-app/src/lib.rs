#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod dashboard;
pub mod history;
pub mod log;
pub mod profile;
pub mod runner;
pub mod screen;
pub mod service;
pub mod service_worker;
pub mod settings;
pub mod summary;
pub mod workouts;

pub use settings::*;
