//! Application shell: keeps the local user collection in step with the API
//!
//! Remote calls run on spawned tasks and report back over a channel, so the
//! event loop keeps handling keys while a call is outstanding. Completed
//! calls are applied by `drain`. Failures become notifications; nothing here
//! propagates an error to the event loop.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::user_store::UserStore;
use crate::admin_tui::components::StatusDisplay;
use crate::admin_tui::screens::UserForm;
use crate::api::{ApiError, SignupRequest, UserApi, UserPage};
use crate::config::Config;
use crate::models::{UserDraft, UserRecord};

pub const ADD_SUCCESS: &str = "Add Successfully";
pub const ADD_FAILED: &str = "Can not add new item";
pub const UPDATE_SUCCESS: &str = "Update Successfully";
pub const DELETE_SUCCESS: &str = "Delete Successfully";
pub const DELETE_FAILED: &str = "Can not delete";
pub const LOAD_FAILED: &str = "Can not load users";

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; each field carries its own message
    Invalid,
    /// Signup request is in flight
    Sent,
    Updated,
    /// Edit target vanished from the collection; nothing changed
    UpdateSkipped,
}

/// Completion of a remote call started by `UserSync`
#[derive(Debug)]
pub enum SyncMessage {
    Loaded(Result<UserPage, ApiError>),
    Created {
        draft: UserDraft,
        result: Result<UserRecord, ApiError>,
    },
    Deleted {
        id: String,
        result: Result<(), ApiError>,
    },
}

/// Owns the user collection, the API handle, and the notification area
pub struct UserSync {
    api: Arc<dyn UserApi>,
    store: UserStore,
    pub notices: StatusDisplay,
    page_limit: u32,
    default_password: String,
    load_started: bool,
    loaded: bool,
    pending: usize,
    tx: mpsc::UnboundedSender<SyncMessage>,
    rx: mpsc::UnboundedReceiver<SyncMessage>,
}

impl UserSync {
    pub fn new(api: Arc<dyn UserApi>, config: &Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            store: UserStore::new(),
            notices: StatusDisplay::new(),
            page_limit: config.page_limit,
            default_password: config.default_password.clone(),
            load_started: false,
            loaded: false,
            pending: 0,
            tx,
            rx,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn users(&self) -> &[UserRecord] {
        self.store.users()
    }

    /// True once the initial load has completed, successfully or not
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of remote calls still outstanding
    pub fn pending(&self) -> usize {
        self.pending
    }

    fn spawn_call<F>(&mut self, call: F)
    where
        F: Future<Output = SyncMessage> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if tx.send(call.await).is_err() {
                debug!("Shell closed before the call completed");
            }
        });
    }

    /// Start fetching page 1. Only the first call does anything.
    pub fn start_load(&mut self) -> bool {
        if self.load_started {
            return false;
        }
        self.load_started = true;

        let api = Arc::clone(&self.api);
        let limit = self.page_limit;
        self.spawn_call(async move { SyncMessage::Loaded(api.list_users(1, limit).await) });
        true
    }

    /// Validate the form, then create or update depending on its mode.
    /// An update resets the form at once; a create resets it when the
    /// signup succeeds.
    pub fn submit(&mut self, form: &mut UserForm) -> SubmitOutcome {
        let Some(draft) = form.submit() else {
            return SubmitOutcome::Invalid;
        };

        match form.editing_id().map(str::to_string) {
            Some(id) => {
                if self.update(&id, &draft) {
                    form.reset();
                    SubmitOutcome::Updated
                } else {
                    SubmitOutcome::UpdateSkipped
                }
            }
            None => {
                self.start_create(draft);
                SubmitOutcome::Sent
            }
        }
    }

    /// Send a signup request built from `draft` and the default password
    pub fn start_create(&mut self, draft: UserDraft) {
        let request = SignupRequest::from_draft(&draft, &self.default_password);
        let api = Arc::clone(&self.api);
        self.spawn_call(async move {
            let result = api.create_user(&request).await;
            SyncMessage::Created { draft, result }
        });
    }

    /// Patch the local record in place. No remote call is made.
    pub fn update(&mut self, id: &str, draft: &UserDraft) -> bool {
        if self.store.update(id, draft) {
            info!(id, "Updated user locally");
            self.notices.success(UPDATE_SUCCESS);
            true
        } else {
            warn!(id, "Update target not found, skipping");
            false
        }
    }

    /// Send a delete request. Records without an id are refused.
    pub fn start_delete(&mut self, id: &str) -> bool {
        if id.is_empty() {
            warn!("Refusing to delete a user without an id");
            return false;
        }

        let api = Arc::clone(&self.api);
        let id = id.to_string();
        self.spawn_call(async move {
            let result = api.delete_user(&id).await;
            SyncMessage::Deleted { id, result }
        });
        true
    }

    /// Apply every completed call without waiting. Returns how many were applied.
    pub fn drain(&mut self, form: &mut UserForm) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message, form);
            applied += 1;
        }
        applied
    }

    /// Patch local state with the outcome of one remote call
    pub fn apply(&mut self, message: SyncMessage, form: &mut UserForm) {
        self.pending = self.pending.saturating_sub(1);

        match message {
            SyncMessage::Loaded(Ok(page)) => {
                info!(count = page.users.len(), "Loaded users");
                self.store.replace(page);
                self.loaded = true;
            }
            SyncMessage::Loaded(Err(e)) => {
                error!(error = %e, "Failed to load users");
                self.notices.error(LOAD_FAILED);
                self.loaded = true;
            }
            SyncMessage::Created {
                draft,
                result: Ok(user),
            } => {
                self.store.append(user);
                self.notices.success(ADD_SUCCESS);
                // Keep whatever was typed after the request went out
                if !form.is_edit_mode() && form.values() == draft {
                    form.reset();
                }
            }
            SyncMessage::Created {
                draft,
                result: Err(e),
            } => {
                error!(error = %e, email = %draft.email, "Failed to create user");
                self.notices.error(ADD_FAILED);
            }
            SyncMessage::Deleted { id, result: Ok(()) } => {
                self.store.remove(&id);
                self.notices.success(DELETE_SUCCESS);
            }
            SyncMessage::Deleted { id, result: Err(e) } => {
                error!(error = %e, id = %id, "Failed to delete user");
                self.notices.error(DELETE_FAILED);
            }
        }
    }

    /// Load the record with `id` into the form for editing
    pub fn begin_edit(&self, form: &mut UserForm, id: &str) -> bool {
        match self.store.find(id) {
            Some(user) => {
                form.load_record(user);
                true
            }
            None => false,
        }
    }

    pub fn next_page(&mut self) -> i64 {
        self.store.next_page()
    }

    pub fn prev_page(&mut self) -> i64 {
        self.store.prev_page()
    }
}

#[cfg(test)]
impl UserSync {
    /// Wait for every outstanding call and apply it
    pub(crate) async fn settle(&mut self, form: &mut UserForm) {
        while self.pending > 0 {
            match self.rx.recv().await {
                Some(message) => self.apply(message, form),
                None => break,
            }
        }
    }
}
