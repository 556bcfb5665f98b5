#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod backup;
mod calendar;
mod error;
mod muscle;
mod name;
mod profile;
mod runner;
mod service;
mod session;
mod statistics;
mod workout;

pub use backup::*;
pub use calendar::*;
pub use error::*;
pub use muscle::*;
pub use name::*;
pub use profile::*;
pub use runner::*;
pub use service::*;
pub use session::*;
pub use statistics::*;
pub use workout::*;
