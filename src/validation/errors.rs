use super::engine::FieldFailure;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field name → the single message to display next to that field.
///
/// Built from a failure list by keeping the first failure seen for each field.
/// The engine emits failures in schema declaration order, so "first seen" is
/// the first failing rule as declared. Iteration follows the same order.
/// Fields without failures are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(String, String)>,
}

impl ErrorMap {
    pub fn from_failures(failures: &[FieldFailure]) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for failure in failures {
            if entries.iter().any(|(field, _)| *field == failure.field) {
                continue;
            }
            entries.push((failure.field.clone(), failure.message.clone()));
        }
        Self { entries }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}
