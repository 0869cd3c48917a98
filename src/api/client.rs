// Journal API client.
// Attaches the session's bearer token to every request and ends the session on 401.

use std::sync::Arc;

use reqwest::{
    Method, StatusCode,
    header::{AUTHORIZATION, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{JournalError, Result};
use crate::session::Session;

use super::transport::{ApiRequest, ApiResponse, RequestBody, RequestOptions, Transport};
use super::types::ApiErrorBody;

/// API client bound to a session.
///
/// Each request reads the credential at dispatch time, so a token cleared
/// by one failed request is never sent by the next one.
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self { transport, session }
    }

    /// The session this client reads credentials from and clears on 401.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send a request and decode the JSON response.
    ///
    /// Errors:
    /// - [`JournalError::Unauthorized`] on 401, after the credential was cleared;
    /// - [`JournalError::Rejected`] on any other non-2xx status;
    /// - [`JournalError::NetworkUnavailable`] when no response arrived.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<T> {
        let mut headers = options.headers;
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| JournalError::InvalidCredential(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        debug!(%method, path, authenticated = headers.contains_key(AUTHORIZATION), "dispatching request");

        let request = ApiRequest {
            method,
            path: path.to_string(),
            query: options.query,
            headers,
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(path, error = %err, "request failed without response");
                return Err(err);
            }
        };

        let body = self.check_response(path, response)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None, RequestOptions::default())
            .await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let options = params
            .iter()
            .fold(RequestOptions::new(), |options, (name, value)| {
                options.query(*name, value.clone())
            });
        self.request(Method::GET, path, None, options).await
    }

    /// Check response status and convert errors.
    fn check_response(&self, path: &str, response: ApiResponse) -> Result<String> {
        match response.status {
            status if status.is_success() => Ok(response.body),
            StatusCode::UNAUTHORIZED => {
                // Clear before the caller sees the error.
                if let Err(err) = self.session.sign_out() {
                    warn!(error = %err, "stored credential could not be removed");
                }
                warn!(path, "request unauthorized, credential cleared");
                Err(JournalError::Unauthorized)
            }
            status => {
                let detail = ApiErrorBody::detail_from(&response.body);
                warn!(path, %status, detail = detail.as_deref().unwrap_or(""), "request rejected");
                Err(JournalError::Rejected { status, detail })
            }
        }
    }
}
