use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TremorReading {
    pub date: DateTime<Utc>,
    pub resting: f64,
    pub postural: f64,
}

/// A medication or exercise period. `enddate` is absent while ongoing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub startdate: DateTime<Utc>,
    #[serde(default)]
    pub enddate: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub uid: u64,
    pub name: String,
}

/// Whose data is on screen. Zero stands for the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub u64);

impl SubjectId {
    pub const SELF: SubjectId = SubjectId(0);

    pub fn is_self(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectQuery {
    #[serde(default)]
    pub uid: u64,
}

impl SubjectQuery {
    pub fn subject(&self) -> SubjectId {
        SubjectId(self.uid)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RangeRequest {
    pub range: crate::chart::Range,
}
