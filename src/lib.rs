#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod api;
pub mod avatar;
pub mod config;
pub mod error;
pub mod forms;
pub mod session;
pub mod submission;
pub mod ui;
pub mod validation;

pub use config::Config;
pub use error::{BookwiseError, Result};
