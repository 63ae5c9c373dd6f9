//! HTTP client for the user API

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::{debug, info, warn};

use crate::api::{
    ApiError, ApiErrorResponse, DeleteResponse, SignupRequest, SignupResponse, UserEndpoints,
    UserListResponse, UserPage,
};
use crate::config::Config;
use crate::models::UserRecord;

/// Operations the admin shell needs from a user backend
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch one page of users
    async fn list_users(&self, page: i64, limit: u32) -> Result<UserPage, ApiError>;

    /// Create a user; returns the record as stored by the backend
    async fn create_user(&self, request: &SignupRequest) -> Result<UserRecord, ApiError>;

    /// Delete a user by id
    async fn delete_user(&self, id: &str) -> Result<(), ApiError>;
}

/// `UserApi` backed by the REST service
pub struct HttpUserApi {
    client: Client,
    base_url: String,
}

impl HttpUserApi {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = config.api_base().to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::Config(format!(
                "API URL must start with http:// or https://: {}",
                config.api_url
            )));
        }

        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/api/user/{id}` with `id` percent-encoded as one path segment
    fn item_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url(UserEndpoints::LIST))
            .map_err(|e| ApiError::Config(format!("Invalid API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("API URL cannot have a path: {}", self.base_url)))?
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self, page: i64, limit: u32) -> Result<UserPage, ApiError> {
        let url = self.url(UserEndpoints::LIST);
        debug!(url = %url, page, limit, "Fetching users");

        let response = self
            .client
            .get(&url)
            .query(&[("page", page.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;

        let body = success_body(response).await?;
        let parsed: UserListResponse = serde_json::from_str(&body)?;

        let page = UserPage::from(parsed);

        info!(count = page.users.len(), total = page.metadata.total, "Fetched users");
        Ok(page)
    }

    async fn create_user(&self, request: &SignupRequest) -> Result<UserRecord, ApiError> {
        let url = self.url(UserEndpoints::SIGNUP);
        debug!(url = %url, email = %request.data.email, "Creating user");

        let response = self.client.post(&url).json(request).send().await?;

        let body = success_body(response).await?;
        let parsed: SignupResponse = serde_json::from_str(&body)?;

        match parsed.data {
            Some(user) => {
                info!(id = %user.key(), "Created user");
                Ok(user)
            }
            None => {
                let message = parsed
                    .message
                    .unwrap_or_else(|| "Signup failed".to_string());
                warn!("Signup response carried no user: {}", message);
                Err(ApiError::Rejected(message))
            }
        }
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::Rejected("User id is empty".to_string()));
        }
        let url = self.item_url(id)?;
        debug!(url = %url, "Deleting user");

        let response = self.client.delete(url).send().await?;

        let body = success_body(response).await?;
        let parsed: DeleteResponse = serde_json::from_str(&body)?;

        if !parsed.is_sucess {
            let message = parsed
                .message
                .unwrap_or_else(|| format!("Delete of user {} was not acknowledged", id));
            warn!("{}", message);
            return Err(ApiError::Rejected(message));
        }

        info!(id, "Deleted user");
        Ok(())
    }
}

/// Read the body of a 2xx response, or turn the response into `ApiError::Status`.
async fn success_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(error_response) => error_response.message,
        Err(_) => body,
    };

    warn!(status = status.as_u16(), "User API returned an error: {}", message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
