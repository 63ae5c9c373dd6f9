use serde::{Deserialize, Deserializer, Serialize};

/// A user record as held in the local collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned identifier
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_id")]
    pub server_id: Option<String>,
    /// Client-side identifier (timestamp ids from the in-memory backend)
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub last_name: String,
    /// Single-field name carried by older records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub country: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub billing: bool,
}

impl UserRecord {
    /// Identifier used for every lookup: `_id` when the server sent one, else `id`.
    pub fn key(&self) -> &str {
        self.server_id
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("")
    }

    /// Name for display, falling back to `full_name` for older records
    pub fn display_name(&self) -> String {
        let joined = format!("{} {}", self.first_name, self.last_name);
        let joined = joined.trim();
        match (&self.full_name, joined.is_empty()) {
            (Some(full_name), true) => full_name.clone(),
            _ => joined.to_string(),
        }
    }

    /// Overwrite every editable field with the submitted values
    pub fn apply_draft(&mut self, draft: &UserDraft) {
        self.first_name = draft.first_name.clone();
        self.last_name = draft.last_name.clone();
        self.email = draft.email.clone();
        self.address = draft.address.clone();
        self.city = draft.city.clone();
        self.country = draft.country.clone();
        self.state = draft.state.clone();
        self.role = draft.role.clone();
        self.billing = draft.billing;
    }
}

/// Editable field values of a user, as captured by the form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub state: String,
    pub role: String,
    pub billing: bool,
}

impl From<&UserRecord> for UserDraft {
    fn from(record: &UserRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            address: record.address.clone(),
            city: record.city.clone(),
            country: record.country.clone(),
            state: record.state.clone(),
            role: record.role.clone(),
            billing: record.billing,
        }
    }
}

/// Pagination metadata as reported by the API
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetadata {
    pub limit: u32,
    /// Signed: previous-page navigation is not clamped
    pub page: i64,
    pub total: u64,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            limit: 0,
            page: 1,
            total: 0,
        }
    }
}

/// One entry of a fixed select list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

impl SelectOption {
    const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

pub const COUNTRY_OPTIONS: &[SelectOption] = &[
    SelectOption::new("United States", "US"),
    SelectOption::new("CANADA", "CA"),
    SelectOption::new("Viet Nam", "VN"),
];

pub const STATE_OPTIONS: &[SelectOption] = &[
    SelectOption::new("Phu Nhuan", "Phu nhuan"),
    SelectOption::new("Q1", "Q1"),
    SelectOption::new("Q2", "Q2"),
];

pub const ROLE_OPTIONS: &[SelectOption] = &[
    SelectOption::new("Admin", "admin"),
    SelectOption::new("Operator", "operator"),
    SelectOption::new("Member", "member"),
];

/// Label for a stored value, or the raw value when it is not a known option
pub fn option_label<'a>(options: &[SelectOption], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
        .unwrap_or(value)
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(|id| match id {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

/// Scalar JSON value accepted by text and flag fields
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Bool(b)) => b.to_string(),
        Some(Scalar::Int(n)) => n.to_string(),
        Some(Scalar::Float(n)) => n.to_string(),
    })
}

/// `null` reads as false; "true"/"false" strings and 0/1 are accepted
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Scalar::Bool(b)) => Ok(b),
        Some(Scalar::Int(n)) => Ok(n != 0),
        Some(Scalar::Float(n)) => Ok(n != 0.0),
        Some(Scalar::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, got {:?}",
                other
            ))),
        },
    }
}
