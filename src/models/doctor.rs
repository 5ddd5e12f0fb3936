use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use super::validation::{validate_cnic, validate_iso_date, validate_person_name};
use super::Gender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specialization {
    Cardiology,
    Dermatology,
    Orthopedics,
    Pediatrics,
    Neurology,
}

impl Specialization {
    pub fn all() -> &'static [Specialization] {
        &[
            Specialization::Cardiology,
            Specialization::Dermatology,
            Specialization::Orthopedics,
            Specialization::Pediatrics,
            Specialization::Neurology,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialization::Cardiology => "Cardiology",
            Specialization::Dermatology => "Dermatology",
            Specialization::Orthopedics => "Orthopedics",
            Specialization::Pediatrics => "Pediatrics",
            Specialization::Neurology => "Neurology",
        }
    }
}

impl FromStr for Specialization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialization::all()
            .iter()
            .copied()
            .find(|spec| spec.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown specialization: {}", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Education {
    #[validate(length(min = 1, message = "Degree is required."))]
    pub degree: String,
    #[validate(length(min = 1, message = "School is required."))]
    pub school: String,
    #[validate(length(min = 4, max = 4, message = "Year must have four digits."))]
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub cnic: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default, deserialize_with = "lenient_education")]
    pub education: Education,
    /// Kept as text: older records predate the fixed list.
    pub specialization: String,
    #[serde(default)]
    pub hospital_name: Option<String>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn display_name(&self) -> String {
        format!("Dr. {}", self.full_name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub specialization: String,
    #[serde(default)]
    pub hospital_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewDoctor {
    #[validate(
        length(min = 2, max = 50, message = "Must be between 2 and 50 characters."),
        custom(function = "validate_person_name")
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 50, message = "Must be between 2 and 50 characters."),
        custom(function = "validate_person_name")
    )]
    pub last_name: String,
    pub gender: Gender,
    #[validate(custom(function = "validate_iso_date"))]
    pub date_of_birth: String,
    #[validate(custom(function = "validate_cnic"))]
    pub cnic: String,
    #[validate(nested)]
    pub education: Education,
    pub specialization: Specialization,
    #[validate(length(min = 2, message = "Valid hospital name required."))]
    pub hospital_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Picture must be a URL."))]
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DoctorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<Specialization>,
}

/// The backend has stored education as an object, a JSON string, a Python
/// `OrderedDict(...)` repr, or a placeholder like `-`.
fn lenient_education<'de, D>(deserializer: D) -> Result<Education, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(education_from_value(value))
}

pub(crate) fn education_from_value(value: Value) -> Education {
    match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        Value::String(text) => education_from_text(&text),
        _ => Education::default(),
    }
}

fn education_from_text(text: &str) -> Education {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Education::default();
    }
    if trimmed.starts_with("OrderedDict") {
        return education_from_ordered_dict(trimmed);
    }
    if let Ok(edu) = serde_json::from_str::<Education>(trimmed) {
        return edu;
    }
    if let Ok(edu) = serde_json::from_str::<Education>(&trimmed.replace('\'', "\"")) {
        return edu;
    }
    Education {
        school: trimmed.to_string(),
        ..Education::default()
    }
}

fn education_from_ordered_dict(text: &str) -> Education {
    let mut edu = Education::default();
    for tuple in text.split("('").skip(1) {
        let Some((key, rest)) = tuple.split_once("', '") else {
            continue;
        };
        let Some((value, _)) = rest.split_once("')") else {
            continue;
        };
        match key {
            "degree" => edu.degree = value.to_string(),
            "school" => edu.school = value.to_string(),
            "year" => edu.year = value.to_string(),
            _ => {}
        }
    }
    edu
}
