use super::{
    private::{RequestParts, SendHttpRequest},
    RestClient,
};
use crate::{error::Result, session::Session};
use log::{trace, warn};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{borrow::Cow, fmt::Debug};

/// A request to an API endpoint, returned from [RestClient::request].
///
/// By default the request is a POST without a body, made to the client's API version, and carries the session's
/// cookies and, if the session is logged in, its auth token. The `X-CsrfToken` and `Content-Type: application/json`
/// headers are always sent. Headers set with [header](Self::header) are applied last and override any of these.
pub struct RequestBuilder<'a, B = ()> {
    client: &'a RestClient,
    session: &'a Session,
    method: Method,
    endpoint: Cow<'static, str>,
    version: Option<Cow<'static, str>>,
    query_params: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<B>,
    send_cookies: bool,
    send_auth: bool,
}

impl<'a> RequestBuilder<'a, ()> {
    pub(crate) fn new<S>(client: &'a RestClient, session: &'a Session, endpoint: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self {
            client,
            session,
            method: Method::POST,
            endpoint: endpoint.into(),
            version: None,
            query_params: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            send_cookies: true,
            send_auth: true,
        }
    }
}

impl<'a, B> RequestBuilder<'a, B>
where
    B: Debug + Serialize,
{
    pub fn method(self, method: Method) -> Self {
        Self { method, ..self }
    }

    /// Use a different API version than the client's for this request.
    pub fn version<S>(self, version: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self {
            version: Some(version.into()),
            ..self
        }
    }

    pub fn query<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query_params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Whether to send the session's cookies. Defaults to `true`.
    pub fn cookies(self, send_cookies: bool) -> Self {
        Self { send_cookies, ..self }
    }

    /// Whether to send the session's auth token, if it has one. Defaults to `true`.
    pub fn auth(self, send_auth: bool) -> Self {
        Self { send_auth, ..self }
    }

    /// Send the given value as the request's JSON body.
    pub fn body<T>(self, body: T) -> RequestBuilder<'a, T>
    where
        T: Debug + Serialize,
    {
        RequestBuilder {
            client: self.client,
            session: self.session,
            method: self.method,
            endpoint: self.endpoint,
            version: self.version,
            query_params: self.query_params,
            headers: self.headers,
            body: Some(body),
            send_cookies: self.send_cookies,
            send_auth: self.send_auth,
        }
    }

    /// Send the request and parse the response body as JSON. Non-2xx responses fail with their
    /// [HTTP error](crate::Error::HttpError) after their cookies have been merged into the session.
    pub async fn send<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send_raw().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Got {status} response from {}", response.url());
        }

        let response = response.error_for_status()?;
        let body = response.text().await?;
        trace!("Response body: {body}");

        Ok(serde_json::from_str(&body)?)
    }

    /// Send the request and return the response as is, without checking its status or reading its body. The response's
    /// cookies are still merged into the session.
    pub async fn send_raw(self) -> Result<Response> {
        let client = self.client;
        let session = self.session;
        let parts = self.into_parts()?;

        client.send_http_request(session, parts).await
    }

    fn into_parts(self) -> Result<RequestParts> {
        let url = self.client.endpoint_url(
            self.version.as_deref().unwrap_or_else(|| self.client.api_version()),
            &self.endpoint,
        );

        let body = match self.body {
            Some(body) => {
                trace!("Request body: {body:?}");
                Some(serde_json::to_value(body)?)
            }

            None => None,
        };

        Ok(RequestParts {
            method: self.method,
            url,
            query_params: self.query_params,
            headers: self.headers,
            body,
            send_cookies: self.send_cookies,
            send_auth: self.send_auth,
        })
    }
}
