//! Wire types for the user API

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

use crate::models::{PageMetadata, UserDraft, UserRecord};

/// Endpoint paths relative to the API base URL
pub struct UserEndpoints;

impl UserEndpoints {
    pub const LIST: &'static str = "/api/user";
    pub const SIGNUP: &'static str = "/api/user/signup";
}

/// `GET /api/user?page=P&limit=L` response
#[derive(Debug, Deserialize)]
pub struct UserListResponse {
    /// Raw items; each one is decoded on its own by `users()`
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub limit: u32,
    #[serde(default = "first_page", deserialize_with = "lenient_number")]
    pub page: i64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: u64,
}

impl UserListResponse {
    /// Decode every item, skipping the ones that do not describe a user
    pub fn users(&self) -> Vec<UserRecord> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match UserRecord::deserialize(item) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed user record");
                    None
                }
            })
            .collect()
    }

    pub fn metadata(&self) -> PageMetadata {
        PageMetadata {
            limit: self.limit,
            page: self.page,
            total: self.total,
        }
    }
}

/// A page of users together with its pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct UserPage {
    pub users: Vec<UserRecord>,
    pub metadata: PageMetadata,
}

impl From<UserListResponse> for UserPage {
    fn from(response: UserListResponse) -> Self {
        Self {
            users: response.users(),
            metadata: response.metadata(),
        }
    }
}

/// `POST /api/user/signup` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub data: SignupPayload,
}

/// Fields sent on signup. The billing flag is not part of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub state: String,
    pub country: String,
    pub address: String,
    pub city: String,
    pub password: String,
}

impl SignupRequest {
    pub fn from_draft(draft: &UserDraft, password: &str) -> Self {
        Self {
            data: SignupPayload {
                first_name: draft.first_name.clone(),
                last_name: draft.last_name.clone(),
                email: draft.email.clone(),
                role: draft.role.clone(),
                state: draft.state.clone(),
                country: draft.country.clone(),
                address: draft.address.clone(),
                city: draft.city.clone(),
                password: password.to_string(),
            },
        }
    }
}

/// `POST /api/user/signup` response; `message` is set on failure
#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    pub data: Option<UserRecord>,
    pub message: Option<String>,
}

/// `DELETE /api/user/:id` response. The flag name is spelled as the server sends it.
#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    #[serde(rename = "isSucess", default)]
    pub is_sucess: bool,
    pub message: Option<String>,
}

/// Error body some endpoints return alongside a non-2xx status
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
}

fn first_page() -> i64 {
    1
}

/// Accept a number or a numeric string (query parameters echoed back as text)
fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_deserialization() {
        let body = r#"{
            "data": [
                { "_id": "u1", "first_name": "Alice1", "last_name": "Smith1" },
                { "_id": "u2", "first_name": "Bobby1", "last_name": "Jones1" }
            ],
            "limit": "1000",
            "page": 1,
            "total": 2
        }"#;

        let page: UserPage = serde_json::from_str::<UserListResponse>(body).unwrap().into();
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.users[0].key(), "u1");
        assert_eq!(page.users[1].key(), "u2");
        assert_eq!(
            page.metadata,
            PageMetadata {
                limit: 1000,
                page: 1,
                total: 2
            }
        );
    }

    #[test]
    fn test_malformed_item_does_not_discard_page() {
        let body = r#"{
            "data": [
                { "_id": "u1", "first_name": "Alice1", "billing": null },
                { "_id": "u2", "first_name": "Bobby1", "city": 12345 },
                { "_id": "u3", "first_name": { "nested": true } },
                "not a user",
                { "_id": "u4", "first_name": "Carol1" }
            ],
            "limit": 1000,
            "page": 1,
            "total": 5
        }"#;

        let page: UserPage = serde_json::from_str::<UserListResponse>(body).unwrap().into();
        let keys: Vec<_> = page.users.iter().map(|u| u.key()).collect();
        assert_eq!(keys, vec!["u1", "u2", "u4"]);
        assert!(!page.users[0].billing);
        assert_eq!(page.users[1].city, "12345");
        assert_eq!(page.metadata.total, 5);
    }

    #[test]
    fn test_signup_request_shape() {
        let draft = UserDraft {
            first_name: "Alice1".to_string(),
            last_name: "Smith1".to_string(),
            email: "a@b.com".to_string(),
            address: "12 Main St".to_string(),
            city: "Hanoi".to_string(),
            country: "VN".to_string(),
            state: "Q1".to_string(),
            role: "admin".to_string(),
            billing: true,
        };

        let body = serde_json::to_value(SignupRequest::from_draft(&draft, "123456")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data": {
                    "first_name": "Alice1",
                    "last_name": "Smith1",
                    "email": "a@b.com",
                    "role": "admin",
                    "state": "Q1",
                    "country": "VN",
                    "address": "12 Main St",
                    "city": "Hanoi",
                    "password": "123456"
                }
            })
        );
    }

    #[test]
    fn test_delete_response_flag() {
        let ok: DeleteResponse = serde_json::from_str(r#"{ "isSucess": true }"#).unwrap();
        assert!(ok.is_sucess);

        let missing: DeleteResponse = serde_json::from_str(r#"{ "message": "nope" }"#).unwrap();
        assert!(!missing.is_sucess);
        assert_eq!(missing.message.as_deref(), Some("nope"));
    }
}
