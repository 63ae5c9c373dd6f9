//! In-memory user backend used by `--offline`

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::api::{ApiError, SignupRequest, UserApi, UserPage};
use crate::models::{PageMetadata, UserRecord};

#[derive(Debug, Default)]
struct LocalState {
    users: Vec<UserRecord>,
    last_id: i64,
}

/// Keeps users in memory and assigns millisecond-timestamp ids
#[derive(Debug, Default)]
pub struct LocalUserApi {
    state: Mutex<LocalState>,
}

impl LocalUserApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing set of users
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            state: Mutex::new(LocalState { users, last_id: 0 }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LocalState>, ApiError> {
        self.state
            .lock()
            .map_err(|_| ApiError::Rejected("in-memory user store is unavailable".to_string()))
    }
}

impl LocalState {
    /// Current time in milliseconds, bumped so ids never repeat
    fn next_id(&mut self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id.to_string()
    }
}

#[async_trait]
impl UserApi for LocalUserApi {
    async fn list_users(&self, page: i64, limit: u32) -> Result<UserPage, ApiError> {
        let state = self.lock()?;
        let limit_len = limit as usize;

        let users = if page < 1 || limit == 0 {
            Vec::new()
        } else {
            let start = (page as usize - 1).saturating_mul(limit_len);
            state.users.iter().skip(start).take(limit_len).cloned().collect()
        };

        Ok(UserPage {
            users,
            metadata: PageMetadata {
                limit,
                page,
                total: state.users.len() as u64,
            },
        })
    }

    async fn create_user(&self, request: &SignupRequest) -> Result<UserRecord, ApiError> {
        let mut state = self.lock()?;
        let payload = &request.data;

        let user = UserRecord {
            server_id: None,
            id: Some(state.next_id()),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            full_name: None,
            email: payload.email.clone(),
            address: payload.address.clone(),
            city: payload.city.clone(),
            country: payload.country.clone(),
            state: payload.state.clone(),
            role: payload.role.clone(),
            billing: false,
        };

        info!(id = %user.key(), "Created user in memory");
        state.users.push(user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        if id.is_empty() {
            return Err(ApiError::Rejected("User id is empty".to_string()));
        }
        let mut state = self.lock()?;
        let before = state.users.len();
        state.users.retain(|u| u.key() != id);

        if state.users.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        info!(id, "Deleted user from memory");
        Ok(())
    }
}
