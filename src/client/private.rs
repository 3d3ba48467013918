use crate::{error::Result, session::Session};
use async_trait::async_trait;
use log::trace;
use reqwest::{header::HeaderMap, Method, Response};

/// Everything about a request except the session it's made in.
#[derive(Debug)]
pub struct RequestParts {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) send_cookies: bool,
    pub(crate) send_auth: bool,
}

/// Every REST client implements this trait.
pub trait BuildHttpRequest: crate::private::Sealed {
    /// Returns a new [RequestBuilder](reqwest::RequestBuilder) with the session's headers (CSRF token, auth token,
    /// cookies) filled in. You probably shouldn't call this function directly; instead use
    /// [send_http_request](SendHttpRequest::send_http_request).
    fn build_http_request(&self, session: &Session, parts: RequestParts) -> Result<reqwest::RequestBuilder>;
}

/// Every REST client implements this trait.
#[async_trait]
pub trait SendHttpRequest: BuildHttpRequest {
    /// Builds an HTTP request, sends it, and merges the response's cookies into the session. The response is returned
    /// whatever its status.
    async fn send_http_request(&self, session: &Session, parts: RequestParts) -> Result<Response>;
}

#[async_trait]
impl<C> SendHttpRequest for C
where
    C: BuildHttpRequest + Sync,
{
    async fn send_http_request(&self, session: &Session, parts: RequestParts) -> Result<Response> {
        let request = self.build_http_request(session, parts)?;
        let response = request.send().await?;
        trace!("Response: {response:?}");

        session.set_cookies_from_headers(response.headers());
        Ok(response)
    }
}
