//! HTTP response wrapper.

use reqwest::{Response, StatusCode};

/// Status plus the still-unread body of a response.
pub struct HttpResponse {
    pub status: StatusCode,
    pub(crate) response: Response,
}

impl HttpResponse {
    /// Get response body as text.
    pub async fn text(self) -> Result<String, reqwest::Error> {
        self.response.text().await
    }
}
