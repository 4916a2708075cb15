use super::OpState;
use crate::api::{AuthResponse, BackendClient};
use crate::models::UserProfile;
use crate::session::{self, SharedSession};
use tracing::{error, warn};

/// Sign-in, sign-up and profile state. The session file is the source of
/// truth for who is logged in; this store only coordinates requests and
/// keeps the file in sync.
pub struct AuthStore {
    api: BackendClient,
    session: SharedSession,
    op: OpState,
}

impl AuthStore {
    pub fn new(api: BackendClient, session: SharedSession) -> Self {
        Self {
            api,
            session,
            op: OpState::default(),
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) {
        self.op.pending();
        match self.api.login(email, password).await {
            Ok(AuthResponse {
                token: Some(token),
                user: Some(user),
            }) => {
                if let Err(err) = session::lock(&self.session).persist(token, user) {
                    warn!("Failed to persist session: {}", err);
                }
                self.op.fulfilled();
            }
            Ok(_) => {
                warn!("Login response carried no token or user");
                self.op.rejected("Login failed");
            }
            Err(err) => {
                error!("Login request failed: {}", err);
                self.op.rejected(err.user_message("Login failed"));
            }
        }
    }

    /// Registers the account. Some deployments return a token straight away
    /// and some expect a follow-up login; the session is only written when a
    /// full token and profile pair comes back.
    pub async fn register(&mut self, username: &str, email: &str, password: &str) {
        self.op.pending();
        match self.api.register(username, email, password).await {
            Ok(response) => {
                if let (Some(token), Some(user)) = (response.token, response.user) {
                    if let Err(err) = session::lock(&self.session).persist(token, user) {
                        warn!("Failed to persist session: {}", err);
                    }
                }
                self.op.fulfilled();
            }
            Err(err) => {
                error!("Registration request failed: {}", err);
                self.op.rejected(err.user_message("Registration failed"));
            }
        }
    }

    /// The server call is best effort; the local session is cleared no
    /// matter what the server says.
    pub async fn logout(&mut self) {
        self.op.pending();
        let token = session::lock(&self.session).token().map(str::to_string);
        if let Some(token) = token {
            if let Err(err) = self.api.logout(&token).await {
                warn!("Logout request failed: {}", err);
            }
        }
        session::lock(&self.session).clear();
        self.op.fulfilled();
    }

    pub async fn update_profile(&mut self, username: &str, email: &str) {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() {
            self.op.rejected("Username is required");
            return;
        }
        if email.is_empty() {
            self.op.rejected("Email is required");
            return;
        }
        if !valid_email(email) {
            self.op.rejected("Please enter a valid email address");
            return;
        }

        self.op.pending();
        let credentials = {
            let session = session::lock(&self.session);
            match (session.token(), session.user()) {
                (Some(token), Some(user)) => Some((token.to_string(), user.clone())),
                _ => None,
            }
        };
        let (token, user) = match credentials {
            Some(credentials) => credentials,
            None => {
                self.op.rejected("Please log in to continue");
                return;
            }
        };

        match self
            .api
            .update_profile(&token, &user.id, username, email)
            .await
        {
            Ok(()) => {
                let updated = UserProfile {
                    username: username.to_string(),
                    email: email.to_string(),
                    ..user
                };
                if let Err(err) = session::lock(&self.session).update_user(updated) {
                    warn!("Failed to persist session: {}", err);
                }
                self.op.fulfilled();
            }
            Err(err) => {
                error!("Profile update failed: {}", err);
                self.op.rejected(err.user_message("Failed to update profile"));
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        session::lock(&self.session).is_authenticated()
    }

    pub fn user(&self) -> Option<UserProfile> {
        session::lock(&self.session).user().cloned()
    }

    pub fn loading(&self) -> bool {
        self.op.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.op.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.op.clear_error();
    }
}

/// Minimal address shape check: one `@`, a non-empty local part and a
/// dotted domain. Anything fancier belongs to the backend.
fn valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
