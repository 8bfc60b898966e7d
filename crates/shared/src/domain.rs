use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Accepts either a JSON string or a JSON integer and keeps it as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Text(text) => text,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

/// Identifier assigned by the users service. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_or_number(deserializer).map(UserId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "string_or_number")]
    pub phone: String,
    pub status: bool,
}

impl UserRecord {
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            status: self.status,
        }
    }

    /// Overwrites the editable fields, keeping the id.
    pub fn apply(&mut self, draft: UserDraft) {
        self.name = draft.name;
        self.email = draft.email;
        self.phone = draft.phone;
        self.status = draft.status;
    }

    pub fn status_label(&self) -> &'static str {
        if self.status {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// A user that has not been persisted yet, or the editable fields of one that has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "string_or_number")]
    pub phone: String,
    pub status: bool,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            status: true,
        }
    }
}

impl UserDraft {
    /// Every text field must be non-empty before the draft may be sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<UserField> = [
            (UserField::Name, &self.name),
            (UserField::Email, &self.email),
            (UserField::Phone, &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    pub fn field(&self, field: UserField) -> String {
        match field {
            UserField::Name => self.name.clone(),
            UserField::Email => self.email.clone(),
            UserField::Phone => self.phone.clone(),
            UserField::Status => self.status.to_string(),
        }
    }

    /// Form inputs arrive as strings; `status` is only `true` for the literal `"true"`.
    pub fn set_field(&mut self, field: UserField, value: &str) {
        match field {
            UserField::Name => self.name = value.to_string(),
            UserField::Email => self.email = value.to_string(),
            UserField::Phone => self.phone = value.to_string(),
            UserField::Status => self.status = value == "true",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Name,
    Email,
    Phone,
    Status,
}

impl UserField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "status" => Ok(Self::Status),
            other => Err(ValidationError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [Self::All, Self::Active, Self::Inactive];

    pub fn matches(self, status: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => status,
            Self::Inactive => !status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(ValidationError::UnknownStatusFilter(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_ids_and_phones_from_the_service() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id":7,"name":"Ada","email":"ada@example.com","phone":5551234,"status":false}"#,
        )
        .expect("record");

        assert_eq!(record.id, UserId::new("7"));
        assert_eq!(record.phone, "5551234");
        assert!(!record.status);
    }

    #[test]
    fn keeps_string_ids_verbatim() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id":"a1f3","name":"Bo","email":"bo@example.com","phone":"12","status":true}"#,
        )
        .expect("record");

        assert_eq!(record.id.as_str(), "a1f3");
        assert_eq!(
            serde_json::to_value(&record.id).expect("id json"),
            serde_json::json!("a1f3")
        );
    }

    #[test]
    fn empty_template_defaults_to_active() {
        let draft = UserDraft::default();
        assert!(draft.status);
        assert!(draft.name.is_empty());
    }

    #[test]
    fn status_field_only_accepts_literal_true() {
        let mut draft = UserDraft::default();
        draft.set_field(UserField::Status, "false");
        assert!(!draft.status);
        draft.set_field(UserField::Status, "true");
        assert!(draft.status);
        draft.set_field(UserField::Status, "yes");
        assert!(!draft.status);
    }

    #[test]
    fn validate_reports_every_missing_field() {
        let draft = UserDraft {
            name: String::new(),
            email: "a@b.com".into(),
            phone: String::new(),
            status: true,
        };

        match draft.validate() {
            Err(ValidationError::MissingFields(fields)) => {
                assert_eq!(fields, vec![UserField::Name, UserField::Phone]);
            }
            other => panic!("unexpected validation result: {other:?}"),
        }
    }

    #[test]
    fn parses_filter_and_field_names() {
        assert_eq!("inactive".parse::<StatusFilter>().ok(), Some(StatusFilter::Inactive));
        assert!("archived".parse::<StatusFilter>().is_err());
        assert_eq!("phone".parse::<UserField>().ok(), Some(UserField::Phone));
        assert!("age".parse::<UserField>().is_err());
    }

    #[test]
    fn filter_matches_on_status_equality() {
        assert!(StatusFilter::All.matches(false));
        assert!(StatusFilter::Active.matches(true));
        assert!(!StatusFilter::Active.matches(false));
        assert!(StatusFilter::Inactive.matches(false));
    }
}
