// Login form state.
// Collects credentials and signs in on a background task.

use crate::api::AuthClient;
use crate::error::{FALLBACK_LOGIN_MESSAGE, JournalError, Result};

use super::resource::{DataSink, LoadStatus, SharedResource};

/// Which input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// State of the login form.
#[derive(Debug, Default)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Status of the last submit; `Error` carries the message to show.
    pub attempt: SharedResource<()>,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    pub fn is_submitting(&self) -> bool {
        self.attempt.lock().is_loading()
    }

    /// Start signing in. Ignored while a previous attempt is running.
    pub fn submit(&mut self, client: &AuthClient) {
        if self.is_submitting() {
            return;
        }
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.attempt
                .set_error("Enter username and password".to_string());
            self.attempt.set_status(LoadStatus::Error);
            return;
        }

        self.attempt.set_status(LoadStatus::Loading);
        let client = client.clone();
        let attempt = self.attempt.clone();
        let username = self.username.trim().to_string();
        let password = self.password.clone();

        tokio::spawn(async move {
            match sign_in(&client, &username, &password).await {
                Ok(()) => attempt.set_status(LoadStatus::Success),
                Err(err) => {
                    attempt.set_error(login_message(&err));
                    attempt.set_status(LoadStatus::Error);
                }
            }
        });
    }

    /// Forget everything typed and any previous outcome.
    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focus = LoginField::Username;
        self.attempt.reset();
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Exchange credentials for a token and store it in the client's session.
pub async fn sign_in(client: &AuthClient, username: &str, password: &str) -> Result<()> {
    let token = client.login(username, password).await?;
    client.session().sign_in(&token.access_token)
}

/// Message for a failed sign-in. A 401 here means bad credentials, not an expired session.
pub fn login_message(err: &JournalError) -> String {
    match err {
        JournalError::Unauthorized => "Invalid username or password".to_string(),
        other => other.user_message(FALLBACK_LOGIN_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::session::Session;
    use crate::storage::MemoryStorage;
    use crate::testing::{MockTransport, Reply};

    fn client_with(replies: Vec<Reply>) -> AuthClient {
        let session = Session::restore(Arc::new(MemoryStorage::new()));
        AuthClient::new(Arc::new(MockTransport::new(replies)), session)
    }

    #[tokio::test]
    async fn test_sign_in_stores_token() {
        let client = client_with(vec![Reply::ok_json(
            json!({"access_token": "fresh", "token_type": "bearer"}),
        )]);

        sign_in(&client, "ivan", "pw").await.unwrap();

        assert!(client.session().is_authenticated());
        assert_eq!(client.session().token(), Some("fresh".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_sign_in_shows_server_detail() {
        let client = client_with(vec![Reply::Respond(
            StatusCode::BAD_REQUEST,
            json!({"detail": "Account locked"}).to_string(),
        )]);

        let err = sign_in(&client, "ivan", "pw").await.unwrap_err();
        assert_eq!(login_message(&err), "Account locked");
        assert!(!client.session().is_authenticated());
    }

    #[test]
    fn test_bad_credentials_message() {
        assert_eq!(
            login_message(&JournalError::Unauthorized),
            "Invalid username or password"
        );
        assert_eq!(
            login_message(&JournalError::Config("x".into())),
            FALLBACK_LOGIN_MESSAGE
        );
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = LoginState::new();
        form.push_char('a');
        form.toggle_focus();
        form.push_char('b');
        form.push_char('c');
        form.pop_char();

        assert_eq!(form.username, "a");
        assert_eq!(form.password, "b");
    }

    #[test]
    fn test_empty_submit_is_rejected_locally() {
        let client = client_with(Vec::new());
        let mut form = LoginState::new();

        form.submit(&client);

        let attempt = form.attempt.snapshot();
        assert_eq!(attempt.status, LoadStatus::Error);
        assert!(attempt.error.is_some());
    }
}
