//! School records and the insert payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_contact, is_valid_email, ValidationError};

/// A registered school, as stored and as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Untrusted submission fields as they arrive over the wire.
///
/// Every field is optional so that an absent key reports as a missing
/// field instead of a deserialization failure. Scalar JSON values are
/// accepted as text: `9876543210` reads as `"9876543210"`, while `null`,
/// `false` and `0` read as absent. Arrays and objects are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolPayload {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub image: Option<String>,
}

/// Any JSON scalar a submission field may carry
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Flag(bool),
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = match Option::<Scalar>::deserialize(deserializer)? {
        None | Some(Scalar::Flag(false)) | Some(Scalar::Int(0)) | Some(Scalar::UInt(0)) => None,
        Some(Scalar::Float(f)) if f == 0.0 => None,
        Some(Scalar::Text(s)) => Some(s),
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::UInt(n)) => Some(n.to_string()),
        Some(Scalar::Float(f)) => Some(f.to_string()),
        Some(Scalar::Flag(true)) => Some("true".to_string()),
    };
    Ok(text)
}

impl SchoolPayload {
    /// Look up a field by its wire name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "name" => &self.name,
            "address" => &self.address,
            "city" => &self.city,
            "state" => &self.state,
            "contact" => &self.contact,
            "email_id" => &self.email_id,
            "image" => &self.image,
            _ => return None,
        };
        value.as_deref()
    }
}

/// A school submission that passed the server rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    name: String,
    address: String,
    city: String,
    state: String,
    contact: String,
    email_id: String,
    image: Option<String>,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl NewSchool {
    /// Validate a payload against the server rules.
    ///
    /// Checks run in order and the first failure is returned:
    /// required fields, then email format, then contact format.
    /// An empty `image` is treated as no image.
    pub fn validate(payload: SchoolPayload) -> Result<Self, ValidationError> {
        let (Some(name), Some(address), Some(city), Some(state), Some(contact), Some(email_id)) = (
            required(payload.name),
            required(payload.address),
            required(payload.city),
            required(payload.state),
            required(payload.contact),
            required(payload.email_id),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        if !is_valid_email(&email_id) {
            return Err(ValidationError::InvalidEmail);
        }

        if !is_valid_contact(&contact) {
            return Err(ValidationError::InvalidContact);
        }

        Ok(Self {
            name,
            address,
            city,
            state,
            contact,
            email_id,
            image: required(payload.image),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn email_id(&self) -> &str {
        &self.email_id
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SchoolPayload {
        SchoolPayload {
            name: Some("Riverside High".into()),
            address: Some("42 River Road".into()),
            city: Some("Pune".into()),
            state: Some("Maharashtra".into()),
            contact: Some("9876543210".into()),
            email_id: Some("info@riverside.in".into()),
            image: Some("/uploads/abc.png".into()),
        }
    }

    #[test]
    fn accepts_valid_payload() {
        let school = NewSchool::validate(payload()).unwrap();
        assert_eq!(school.name(), "Riverside High");
        assert_eq!(school.image(), Some("/uploads/abc.png"));
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = NewSchool::validate(SchoolPayload {
            city: None,
            ..payload()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
    }

    #[test]
    fn empty_field_is_rejected() {
        let err = NewSchool::validate(SchoolPayload {
            state: Some(String::new()),
            ..payload()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
    }

    #[test]
    fn required_check_runs_before_format_checks() {
        let err = NewSchool::validate(SchoolPayload {
            name: None,
            email_id: Some("bad".into()),
            contact: Some("123".into()),
            ..payload()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
    }

    #[test]
    fn email_checked_before_contact() {
        let err = NewSchool::validate(SchoolPayload {
            email_id: Some("bad".into()),
            contact: Some("123".into()),
            ..payload()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);

        let err = NewSchool::validate(SchoolPayload {
            contact: Some("123".into()),
            ..payload()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidContact);
    }

    #[test]
    fn empty_image_becomes_none() {
        let school = NewSchool::validate(SchoolPayload {
            image: Some(String::new()),
            ..payload()
        })
        .unwrap();
        assert_eq!(school.image(), None);
    }

    #[test]
    fn payload_tolerates_missing_keys() {
        let payload: SchoolPayload = serde_json::from_str(r#"{"name":"Only a name"}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Only a name"));
        assert!(payload.email_id.is_none());
        assert_eq!(payload.field("name"), Some("Only a name"));
        assert_eq!(payload.field("unknown"), None);
    }

    #[test]
    fn numeric_contact_reads_as_digits() {
        let payload: SchoolPayload =
            serde_json::from_str(r#"{"contact": 9876543210, "name": null, "city": false}"#)
                .unwrap();
        assert_eq!(payload.contact.as_deref(), Some("9876543210"));
        assert_eq!(payload.name, None);
        assert_eq!(payload.city, None);

        let payload: SchoolPayload = serde_json::from_str(r#"{"contact": 12.5}"#).unwrap();
        assert_eq!(payload.contact.as_deref(), Some("12.5"));
    }

    #[test]
    fn zero_reads_as_missing() {
        let payload: SchoolPayload = serde_json::from_str(r#"{"contact": 0}"#).unwrap();
        assert_eq!(payload.contact, None);
    }

    #[test]
    fn structured_field_values_are_rejected() {
        assert!(serde_json::from_str::<SchoolPayload>(r#"{"name": ["a"]}"#).is_err());
        assert!(serde_json::from_str::<SchoolPayload>(r#"{"name": {"a": 1}}"#).is_err());
    }

    #[test]
    fn school_serializes_null_image() {
        let created = "2024-05-01T10:00:00Z".parse().unwrap();
        let school = School {
            id: 7,
            name: "A".into(),
            address: "B".into(),
            city: "C".into(),
            state: "D".into(),
            contact: "0123456789".into(),
            email_id: "a@b.c".into(),
            image: None,
            created_at: created,
            updated_at: created,
        };
        let value = serde_json::to_value(&school).unwrap();
        assert!(value["image"].is_null());
        assert_eq!(value["id"], 7);
        assert_eq!(value["created_at"], "2024-05-01T10:00:00Z");
    }
}
