use super::errors::ErrorMap;
use super::input::FormInput;
use super::rule::{Rule, Schema};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern compiles")
});

/// One rule failure, attributed to the field the rule is declared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: String,
    pub message: String,
}

/// Result of running a schema over an input. Returned by value, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// Every failure of every field, in schema declaration order.
    Invalid(Vec<FieldFailure>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn failures(&self) -> &[FieldFailure] {
        match self {
            Self::Valid => &[],
            Self::Invalid(failures) => failures,
        }
    }

    /// Per-field messages for display, or `None` when valid.
    pub fn error_map(&self) -> Option<ErrorMap> {
        match self {
            Self::Valid => None,
            Self::Invalid(failures) => Some(ErrorMap::from_failures(failures)),
        }
    }
}

/// Evaluate every rule of every field against `input`.
///
/// Nothing short-circuits: a failing field does not stop later fields, and a
/// failing rule does not stop later rules on the same field.
pub fn validate(schema: &Schema, input: &FormInput) -> ValidationOutcome {
    let mut failures = Vec::new();

    for field_rule in schema.fields() {
        let field = field_rule.field();
        let value = input.get(field);
        for rule in field_rule.rules() {
            evaluate(rule, field, value, input, &mut failures);
        }
    }

    if failures.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid(failures)
    }
}

fn evaluate(
    rule: &Rule,
    field: &str,
    value: &str,
    input: &FormInput,
    failures: &mut Vec<FieldFailure>,
) {
    let failed_with = match rule {
        Rule::Required { message } => value.trim().is_empty().then_some(message),
        Rule::MinLength { min, message } => (value.chars().count() < *min).then_some(message),
        Rule::Email { message } => {
            (!value.is_empty() && !EMAIL_SHAPE.is_match(value)).then_some(message)
        }
        Rule::EqualsField { other, message } => (value != input.get(other)).then_some(message),
        Rule::Conditional {
            trigger,
            predicate,
            then,
            otherwise,
        } => {
            let branch = if predicate.holds(input.get(trigger)) {
                then
            } else {
                otherwise
            };
            for nested in branch {
                evaluate(nested, field, value, input, failures);
            }
            None
        }
    };

    if let Some(message) = failed_with {
        failures.push(FieldFailure {
            field: field.to_string(),
            message: message.clone(),
        });
    }
}
