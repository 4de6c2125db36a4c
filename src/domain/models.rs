use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope shared by the paged listing endpoints (`/api/users`, `/api/unknown`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Page<T> {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserData {
    pub id: u32,
    pub email: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColorsData {
    pub id: u32,
    pub name: String,
    pub year: i32,
    pub color: String,
    pub pantone_value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Register {
    pub email: String,
    pub password: String,
}

impl Register {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SuccessRegistration {
    pub id: u32,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UnSuccessReg {
    pub error: String,
}

/// Either body `POST /api/register` can answer with.
///
/// The two shapes share no field, so untagged matching is unambiguous.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RegistrationOutcome {
    Success(SuccessRegistration),
    Failure(UnSuccessReg),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserTime {
    pub name: String,
    pub job: String,
}

impl UserTime {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}

/// The echoed update request plus the timestamp assigned by the server.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserTimeResponse {
    #[serde(flatten)]
    pub user: UserTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
