//! SessionStore - authenticated user, token and points balance
//!
//! The persisted slice (`user`, `token`, `authenticated`) survives process
//! restarts under `{data_dir}/session.json`; loading flags never do. The
//! points balance is a cache of server truth: optimistic decrements go
//! through [`SessionStore::update_user`] and are superseded by the next
//! authoritative profile fetch.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pixelbox_client::{Api, AuthApi, UserApi};
use rust_decimal::Decimal;
use shared::{
    LoginRequest, PageQuery, PointsHistory, RegisterRequest, UpdateProfileRequest, User,
};
use validator::Validate;

use super::{validation_message, StoreError, StoreResult};

/// In-memory session state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub authenticated: bool,
    pub loading: bool,
}

/// Persisted slice of the session
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SessionFile {
    user: Option<User>,
    token: Option<String>,
    authenticated: bool,
}

/// Session store
pub struct SessionStore {
    api: Arc<dyn Api>,
    file_path: PathBuf,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Load the session from disk, restoring the token into the transport.
    pub fn load(api: Arc<dyn Api>, data_dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        let file_path = data_dir.join("session.json");

        let mut state = SessionState::default();
        if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            match serde_json::from_str::<SessionFile>(&content) {
                Ok(file) => {
                    if let Some(token) = &file.token {
                        api.set_token(Some(token.as_str()));
                    }
                    if let Some(user) = &file.user {
                        tracing::info!(username = %user.username, "restored cached session");
                    }
                    state.user = file.user;
                    state.token = file.token;
                    state.authenticated = file.authenticated;
                }
                Err(e) => {
                    // A corrupt cache is treated as no session at all
                    tracing::warn!("discarding unreadable session cache: {}", e);
                    let _ = std::fs::remove_file(&file_path);
                }
            }
        }

        Ok(Self {
            api,
            file_path,
            state: Mutex::new(state),
        })
    }

    /// Snapshot of the current state for rendering
    pub fn state(&self) -> SessionState {
        self.state.lock().expect("session lock poisoned").clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.lock().expect("session lock poisoned").user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().expect("session lock poisoned").authenticated
    }

    /// Cached points balance, if logged in
    pub fn points(&self) -> Option<Decimal> {
        self.state
            .lock()
            .expect("session lock poisoned")
            .user
            .as_ref()
            .map(|u| u.points)
    }

    fn set_loading(&self, loading: bool) {
        self.state.lock().expect("session lock poisoned").loading = loading;
    }

    fn persist(&self) -> StoreResult<()> {
        let file = {
            let state = self.state.lock().expect("session lock poisoned");
            SessionFile {
                user: state.user.clone(),
                token: state.token.clone(),
                authenticated: state.authenticated,
            }
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!("session persisted");
        Ok(())
    }

    /// Clear local state and the persisted file. Never touches the network.
    fn clear_local(&self) {
        self.api.set_token(None);
        {
            let mut state = self.state.lock().expect("session lock poisoned");
            state.user = None;
            state.token = None;
            state.authenticated = false;
        }
        if self.file_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.file_path) {
                tracing::warn!("failed to clear session cache: {}", e);
            }
        }
    }

    /// Force a local logout, used when the server rejects the token (401)
    pub fn force_logout(&self) {
        tracing::info!("session cleared after authorization failure");
        self.clear_local();
    }

    /// Login and persist the session
    pub async fn login(&self, req: LoginRequest) -> StoreResult<()> {
        self.set_loading(true);
        let result = self.api.login(&req).await;
        self.set_loading(false);

        let data = result?;
        self.api.set_token(Some(data.token.as_str()));
        {
            let mut state = self.state.lock().expect("session lock poisoned");
            state.user = Some(data.user);
            state.token = Some(data.token);
            state.authenticated = true;
        }
        if let Err(e) = self.persist() {
            tracing::warn!("failed to persist session: {}", e);
        }
        tracing::info!(username = %req.username, "logged in");
        Ok(())
    }

    /// Register a new account. Validates locally first; does not log in.
    pub async fn register(&self, req: &RegisterRequest) -> StoreResult<()> {
        if let Err(errors) = req.validate() {
            return Err(StoreError::Validation(validation_message(&errors)));
        }

        self.set_loading(true);
        let result = self.api.register(req).await;
        self.set_loading(false);

        result?;
        tracing::info!(username = %req.username, "registered");
        Ok(())
    }

    /// Logout. The server call is best-effort; local state is cleared even
    /// when it fails.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!("logout request failed, clearing local session anyway: {}", e);
        }
        self.clear_local();
        tracing::info!("logged out");
    }

    /// Refresh the auth token. Fails closed: any failure clears the session.
    pub async fn refresh_token(&self) -> StoreResult<()> {
        match self.api.refresh_token().await {
            Ok(data) => {
                self.api.set_token(Some(data.token.as_str()));
                self.state.lock().expect("session lock poisoned").token = Some(data.token);
                if let Err(e) = self.persist() {
                    tracing::warn!("failed to persist refreshed token: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!("token refresh failed, clearing session: {}", e);
                self.clear_local();
                Err(e.into())
            }
        }
    }

    /// Shallow-merge a change into the cached user and persist it. Used for
    /// optimistic balance updates.
    pub fn update_user(&self, patch: impl FnOnce(&mut User)) -> StoreResult<()> {
        {
            let mut state = self.state.lock().expect("session lock poisoned");
            let user = state.user.as_mut().ok_or(StoreError::NotAuthenticated)?;
            patch(user);
        }
        self.persist()
    }

    /// Fetch the authoritative profile, replacing the cached user wholesale
    pub async fn fetch_profile(&self) -> StoreResult<()> {
        let user = self.api.profile().await?;
        tracing::debug!(points = %user.points, "profile reconciled");
        self.state.lock().expect("session lock poisoned").user = Some(user);
        self.persist()
    }

    /// Update profile fields on the server, caching the merged record
    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> StoreResult<()> {
        if let Err(errors) = req.validate() {
            return Err(StoreError::Validation(validation_message(&errors)));
        }
        let user = self.api.update_profile(req).await?;
        self.state.lock().expect("session lock poisoned").user = Some(user);
        self.persist()
    }

    /// Paginated points ledger
    pub async fn points_history(&self, page: u32, limit: u32) -> StoreResult<PointsHistory> {
        Ok(self.api.points_history(&PageQuery::new(page, limit)).await?)
    }
}
