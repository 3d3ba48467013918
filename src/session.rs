//! The session context every request is made in.
//!
//! A [Session] holds the cookie jar, the CSRF token the server hands out in its `csrftoken` cookie, and after login the
//! auth token and listener ID. It is a cheap handle: clones share the same state, so a session can be passed to
//! concurrent requests and every response's cookies land in the same jar.

use crate::cookie::CookieJar;
use log::debug;
use reqwest::header::{self, HeaderMap};
use std::sync::{Arc, PoisonError, RwLock};

/// Name of the cookie carrying the anti-forgery token that has to be echoed in the `X-CsrfToken` header.
pub const CSRF_TOKEN_COOKIE: &str = "csrftoken";

#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<SessionRef>,
}

#[derive(Debug, Default)]
struct SessionRef {
    cookies: RwLock<CookieJar>,
    auth: RwLock<Option<Authentication>>,
}

/// The credentials a successful login leaves in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    pub auth_token: String,
    pub listener_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from existing cookies, for example ones saved from an earlier run.
    pub fn with_cookies(cookies: CookieJar) -> Self {
        Self {
            inner: Arc::new(SessionRef {
                cookies: RwLock::new(cookies),
                auth: RwLock::new(None),
            }),
        }
    }

    /// A snapshot of the session's cookies.
    pub fn cookies(&self) -> CookieJar {
        self.inner
            .cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The value for the `Cookie` request header, or None if the session has no cookies yet.
    pub fn cookie_header(&self) -> Option<String> {
        let cookies = self.inner.cookies.read().unwrap_or_else(PoisonError::into_inner);
        (!cookies.is_empty()).then(|| cookies.serialize())
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.inner
            .cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(CSRF_TOKEN_COOKIE)
            .map(str::to_owned)
    }

    /// Merge `Set-Cookie` header values into the session's cookie jar.
    pub fn set_cookies<'a, I>(&self, header_lines: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.inner
            .cookies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(header_lines);
    }

    /// Merge every `Set-Cookie` header of a response into the session's cookie jar.
    pub(crate) fn set_cookies_from_headers(&self, headers: &HeaderMap) {
        let lines = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>();

        if !lines.is_empty() {
            debug!("Got {} Set-Cookie headers", lines.len());
            self.set_cookies(lines);
        }
    }

    pub fn authentication(&self) -> Option<Authentication> {
        self.inner.auth.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn auth_token(&self) -> Option<String> {
        self.authentication().map(|auth| auth.auth_token)
    }

    pub fn listener_id(&self) -> Option<String> {
        self.authentication().and_then(|auth| auth.listener_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.auth.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Store the credentials from a login. Replaces whatever an earlier login stored.
    pub(crate) fn authenticate(&self, authentication: Authentication) {
        *self.inner.auth.write().unwrap_or_else(PoisonError::into_inner) = Some(authentication);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn csrf_token_comes_from_cookie() {
        let session = Session::new();
        assert_eq!(session.csrf_token(), None);
        assert_eq!(session.cookie_header(), None);

        session.set_cookies(["csrftoken=0123abcd; Path=/", "lang=en-US"]);

        assert_eq!(session.csrf_token().as_deref(), Some("0123abcd"));
        assert_eq!(session.cookie_header().as_deref(), Some("csrftoken=0123abcd; lang=en-US"));
    }

    #[test]
    fn clones_share_state() {
        let session = Session::new();
        let other = session.clone();

        other.set_cookies(["a=1"]);
        other.authenticate(Authentication {
            auth_token: "T1".to_owned(),
            listener_id: Some("L1".to_owned()),
        });

        assert_eq!(session.cookies().get("a"), Some("1"));
        assert!(session.is_authenticated());
        assert_eq!(session.auth_token().as_deref(), Some("T1"));
        assert_eq!(session.listener_id().as_deref(), Some("L1"));
    }

    #[test]
    fn merges_every_set_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, HeaderValue::from_static("csrftoken=x; Path=/"));
        headers.append(header::SET_COOKIE, HeaderValue::from_static("at=y; HttpOnly"));
        headers.append(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let session = Session::with_cookies(["at=old"].into_iter().collect());
        session.set_cookies_from_headers(&headers);

        assert_eq!(session.cookie_header().as_deref(), Some("at=y; csrftoken=x"));
    }
}
