use thiserror::Error;

use crate::domain::UserField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required. Missing: {}", join_fields(.0))]
    MissingFields(Vec<UserField>),
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("unknown status filter '{0}', expected all, active or inactive")]
    UnknownStatusFilter(String),
}

impl ValidationError {
    /// Text shown in the blocking alert when a submit is rejected.
    pub fn alert_message(&self) -> String {
        match self {
            Self::MissingFields(_) => "All fields are required.".to_string(),
            other => other.to_string(),
        }
    }
}

fn join_fields(fields: &[UserField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
