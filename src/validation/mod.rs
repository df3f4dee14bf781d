//! Form validation: declarative rules, a single interpreter over them, and the
//! per-field error map handed to the display layer.

pub mod engine;
pub mod errors;
pub mod input;
pub mod rule;

pub use engine::{FieldFailure, ValidationOutcome, validate};
pub use errors::ErrorMap;
pub use input::FormInput;
pub use rule::{FieldRule, Predicate, Rule, Schema, SchemaBuilder};
