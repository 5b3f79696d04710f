use api_types::auth::AuthUser;
use tracing::{info, warn};

use super::finish;
use crate::{client::Client, error::Result, session::Session};

/// Login state, persisted to the session file on every change.
#[derive(Debug)]
pub struct AuthStore {
    client: Client,
    session_path: String,
    session: Session,
    loading: bool,
    error: Option<String>,
}

impl AuthStore {
    pub fn new(client: Client, session_path: impl Into<String>) -> Self {
        Self {
            client,
            session_path: session_path.into(),
            session: Session::default(),
            loading: false,
            error: None,
        }
    }

    /// Loads the persisted session. A corrupted one ends up logged out.
    pub fn restore(&mut self) -> Result<&Session> {
        self.session = Session::load(&self.session_path)?;
        self.client.set_token(self.session.token.clone());
        Ok(&self.session)
    }

    /// Client carrying the current access token.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn current_user(&self) -> Option<&AuthUser> {
        self.session.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub async fn login(&mut self, email: &str) -> Result<&AuthUser> {
        self.loading = true;
        self.error = None;
        let result = self.client.login(email).await;
        self.loading = false;

        let response = finish(&mut self.error, result)?;
        info!(user = %response.user.username, "logged in");
        self.session = Session {
            token: Some(response.access_token),
            refresh_token: Some(response.refresh_token),
            user: Some(response.user),
        };
        self.session.save(&self.session_path)?;
        self.client.set_token(self.session.token.clone());
        self.current_user()
            .ok_or_else(|| crate::error::AppError::Usage("login returned no user".to_string()))
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Returns `false` without a refresh token. Any failure logs out.
    pub async fn refresh(&mut self) -> Result<bool> {
        let Some(refresh_token) = self.session.refresh_token.clone() else {
            return Ok(false);
        };

        match self.client.refresh(&refresh_token).await {
            Ok(response) => {
                self.session.token = Some(response.access_token);
                self.session.save(&self.session_path)?;
                self.client.set_token(self.session.token.clone());
                Ok(true)
            }
            Err(err) => {
                warn!("token refresh failed, logging out: {err}");
                self.logout()?;
                Ok(false)
            }
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session = Session::default();
        self.error = None;
        self.client.set_token(None);
        self.session.save(&self.session_path)
    }
}
