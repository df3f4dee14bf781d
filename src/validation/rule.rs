//! Declarative field rules and the schema that orders them.

use crate::error::SchemaError;
use std::collections::HashSet;

/// Test applied to a trigger field's value by [`Rule::Conditional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Value has at least one character.
    NonEmpty,
    /// Value has no characters.
    Empty,
}

impl Predicate {
    pub fn holds(self, value: &str) -> bool {
        match self {
            Self::NonEmpty => !value.is_empty(),
            Self::Empty => value.is_empty(),
        }
    }
}

/// A single constraint on one field. Every variant carries the message shown
/// to the user when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Fails when the value is blank (whitespace only counts as blank).
    Required { message: String },
    /// Fails when the value has fewer than `min` characters, including when empty.
    MinLength { min: usize, message: String },
    /// Fails when a non-empty value does not look like `local@domain.tld`.
    Email { message: String },
    /// Fails when the value differs from the value of `other`.
    EqualsField { other: String, message: String },
    /// Applies `then` when `predicate` holds for the value of `trigger`,
    /// otherwise applies `otherwise` (often empty).
    Conditional {
        trigger: String,
        predicate: Predicate,
        then: Vec<Rule>,
        otherwise: Vec<Rule>,
    },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    pub fn equals_field(other: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EqualsField {
            other: other.into(),
            message: message.into(),
        }
    }

    pub fn when(
        trigger: impl Into<String>,
        predicate: Predicate,
        then: Vec<Rule>,
        otherwise: Vec<Rule>,
    ) -> Self {
        Self::Conditional {
            trigger: trigger.into(),
            predicate,
            then,
            otherwise,
        }
    }
}

/// All rules for one logical field, evaluated in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    field: String,
    rules: Vec<Rule>,
}

impl FieldRule {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Rule::required(message))
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::min_length(min, message))
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.rule(Rule::email(message))
    }

    pub fn equals_field(self, other: impl Into<String>, message: impl Into<String>) -> Self {
        self.rule(Rule::equals_field(other, message))
    }

    /// Rules that only apply when the `trigger` field is non-empty.
    pub fn when_filled(self, trigger: impl Into<String>, then: Vec<Rule>) -> Self {
        self.rule(Rule::when(trigger, Predicate::NonEmpty, then, Vec::new()))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Ordered set of field rules; no two share a field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new(fields: Vec<FieldRule>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.field()) {
                return Err(SchemaError::DuplicateField(field.field().to_string()));
            }
        }
        Ok(Self { fields })
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldRule::field)
    }
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldRule>,
}

impl SchemaBuilder {
    pub fn field(mut self, field: FieldRule) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::new(self.fields)
    }
}
