// Journal API endpoint functions.
// Provides typed methods for signing in and fetching schedule and profile data.

use chrono::NaiveDate;
use reqwest::Method;

use crate::error::Result;

use super::client::AuthClient;
use super::transport::{RequestBody, RequestOptions};
use super::types::{LessonItem, TokenResponse, UserInfo};

/// API route paths, relative to the base address.
pub mod routes {
    pub const AUTH_LOGIN: &str = "/auth/login";
    pub const USER_ME: &str = "/user/me";
    pub const SCHEDULE_TODAY: &str = "/schedule/today";
    pub const SCHEDULE_BY_DATE: &str = "/schedule/by-date";
    pub const SCHEDULE_MONTH: &str = "/schedule/month";
}

fn date_filter(date: NaiveDate) -> [(&'static str, String); 1] {
    [("date_filter", date.format("%Y-%m-%d").to_string())]
}

impl AuthClient {
    /// Exchange credentials for a bearer token (OAuth2 password form).
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let form = vec![
            ("grant_type".to_string(), "password".to_string()),
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        let options = RequestOptions::new().content_type("application/x-www-form-urlencoded");

        self.request(
            Method::POST,
            routes::AUTH_LOGIN,
            Some(RequestBody::Form(form)),
            options,
        )
        .await
    }

    /// Get the signed-in student's profile.
    pub async fn get_me(&self) -> Result<UserInfo> {
        self.get(routes::USER_ME).await
    }

    /// Get today's lessons.
    pub async fn get_schedule_today(&self) -> Result<Vec<LessonItem>> {
        self.get(routes::SCHEDULE_TODAY).await
    }

    /// Get lessons for a specific day.
    pub async fn get_schedule_by_date(&self, date: NaiveDate) -> Result<Vec<LessonItem>> {
        self.get_with_params(routes::SCHEDULE_BY_DATE, &date_filter(date))
            .await
    }

    /// Get lessons for the whole month containing `date`.
    pub async fn get_schedule_month(&self, date: NaiveDate) -> Result<Vec<LessonItem>> {
        self.get_with_params(routes::SCHEDULE_MONTH, &date_filter(date))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::header::CONTENT_TYPE;
    use serde_json::json;

    use super::*;
    use crate::session::Session;
    use crate::storage::MemoryStorage;
    use crate::testing::{MockTransport, Reply};

    #[tokio::test]
    async fn test_login_sends_password_form() {
        let transport = Arc::new(MockTransport::new([Reply::ok_json(
            json!({"access_token": "abc", "token_type": "bearer"}),
        )]));
        let session = Session::restore(Arc::new(MemoryStorage::new()));
        let client = AuthClient::new(transport.clone(), session);

        let token = client.login("ivan", "secret").await.unwrap();
        assert_eq!(token.access_token, "abc");

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, routes::AUTH_LOGIN);
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap().to_str().unwrap(),
            "application/x-www-form-urlencoded"
        );
        match &request.body {
            Some(RequestBody::Form(fields)) => {
                assert!(fields.contains(&("grant_type".to_string(), "password".to_string())));
                assert!(fields.contains(&("username".to_string(), "ivan".to_string())));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_schedule_month_uses_date_filter() {
        let lesson = json!({
            "date": "2026-03-02", "lesson": 1,
            "started_at": "09:00", "finished_at": "10:30",
            "subject": "Algorithms", "room": "204", "teacher": "Smirnova A."
        });
        let transport = Arc::new(MockTransport::new([Reply::ok_json(json!([lesson]))]));
        let session = Session::restore(Arc::new(MemoryStorage::new()));
        let client = AuthClient::new(transport.clone(), session);

        let date = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
        let lessons = client.get_schedule_month(date).await.unwrap();

        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].subject, "Algorithms");
        let request = &transport.requests()[0];
        assert_eq!(request.path, routes::SCHEDULE_MONTH);
        assert_eq!(
            request.query,
            vec![("date_filter".to_string(), "2026-03-17".to_string())]
        );
    }
}
