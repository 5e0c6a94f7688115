use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::{FieldError, Rule, ValidationErrors};
use crate::{Error, Result};

/// A student record as persisted by the store.
///
/// `id` is assigned by the store on creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub email: String,
}

/// Inbound body of create and update requests.
///
/// Absent and `null` fields decode to their zero value, so a missing field
/// and an empty one are indistinguishable. Any `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

impl StudentPayload {
    /// Decodes a payload from a raw request body.
    ///
    /// A body that is empty or only whitespace yields [`Error::EmptyBody`].
    pub fn from_json(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::EmptyBody);
        }
        Ok(serde_json::from_slice(body)?)
    }

    /// Validates a payload used to create a new student.
    ///
    /// Every field is required. Failures are reported in field order
    /// `name`, `age`, `email`.
    pub fn validate_new(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.is_empty() {
            errors.push(FieldError::new("name", Rule::Required));
        }
        if self.age == 0 {
            errors.push(FieldError::new("age", Rule::Required));
        } else if self.age < 0 {
            errors.push(FieldError::new("age", Rule::Positive));
        }
        if self.email.is_empty() {
            errors.push(FieldError::new("email", Rule::Required));
        }
        errors.into_result()
    }

    /// Validates a sparse update payload.
    ///
    /// Zero values mean "keep the stored value", so nothing is required.
    pub fn validate_update(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.age < 0 {
            errors.push(FieldError::new("age", Rule::Positive));
        }
        errors.into_result()
    }

    /// Merges this payload over an existing record.
    ///
    /// Only non-empty strings and a non-zero age overwrite stored values.
    #[must_use]
    pub fn apply_to(&self, mut existing: Student) -> Student {
        if !self.name.is_empty() {
            existing.name.clone_from(&self.name);
        }
        if !self.email.is_empty() {
            existing.email.clone_from(&self.email);
        }
        if self.age != 0 {
            existing.age = self.age;
        }
        existing
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
