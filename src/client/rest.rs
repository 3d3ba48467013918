use super::{
    object::{FragmentBody, FragmentResponse, LoginBody, StationsResponse},
    private::{BuildHttpRequest, RequestParts},
    FragmentOptions, RequestBuilder, StationListOptions, AUTH_LOGIN_ENDPOINT, AUTH_TOKEN_HEADER, CSRF_TOKEN_HEADER,
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, PLAYLIST_GET_FRAGMENT_ENDPOINT, STATION_GET_STATIONS_ENDPOINT,
};
use crate::{
    error::Result,
    event::{Event, EventPublisher},
    model::user::UserObject,
    session::{Session, CSRF_TOKEN_COOKIE},
};
use log::{debug, warn};
use reqwest::{
    header::{self, HeaderValue},
    Client as AsyncClient,
};
use std::{borrow::Cow, sync::Arc};

/// The REST layer of the API.
///
/// The client itself holds no session state: every call takes the [Session] it is made in, and the session is where
/// the response's cookies end up. Cloning the client is cheap.
#[derive(Debug, Clone)]
pub struct RestClient {
    inner: Arc<RestClientRef>,
    http_client: AsyncClient,
}

#[derive(Debug)]
struct RestClientRef {
    base_url: String,
    api_version: String,
    events: EventPublisher,
}

impl RestClient {
    pub(crate) fn new(http_client: AsyncClient, base_url: String, api_version: String, events: EventPublisher) -> Self {
        Self {
            inner: Arc::new(RestClientRef {
                base_url,
                api_version,
                events,
            }),
            http_client,
        }
    }

    /// The base URL of the website, with a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    /// The full URL for an endpoint in the given API version.
    pub fn endpoint_url(&self, version: &str, endpoint: &str) -> String {
        format!(
            "{}api/{}/{}",
            self.inner.base_url,
            version,
            endpoint.trim_start_matches('/')
        )
    }

    /// Start building a request to an endpoint, such as `station/getStations`, made in the given session.
    pub fn request<'a, S>(&'a self, session: &'a Session, endpoint: S) -> RequestBuilder<'a>
    where
        S: Into<Cow<'static, str>>,
    {
        RequestBuilder::new(self, session, endpoint)
    }

    /// Send a HEAD request to the website to get the session's initial cookies, among them the CSRF token. Returns
    /// the CSRF token if the server sent one.
    pub async fn get_csrf_token(&self, session: &Session) -> Result<Option<String>> {
        let url = self.base_url();
        debug!("Requesting CSRF token from {url}");
        self.inner.events.publish(Event::Debug(format!("HEAD {url}")));

        let response = self.http_client.head(url).send().await?;
        session.set_cookies_from_headers(response.headers());
        response.error_for_status()?;

        let token = session.csrf_token();
        if token.is_none() {
            warn!("No {CSRF_TOKEN_COOKIE} cookie in response to CSRF token request");
        }

        Ok(token)
    }

    /// Log in with an account's credentials. Returns the account payload, which contains the auth token for the
    /// session; storing it in the session is left to the caller. Bad credentials fail with the server's HTTP error.
    pub async fn auth_login(&self, session: &Session, username: &str, password: &str) -> Result<UserObject> {
        self.request(session, AUTH_LOGIN_ENDPOINT)
            .auth(false)
            .body(LoginBody { username, password })
            .send()
            .await
    }

    /// List the logged-in account's stations.
    pub async fn get_stations(&self, session: &Session, options: &StationListOptions) -> Result<StationsResponse> {
        self.request(session, STATION_GET_STATIONS_ENDPOINT)
            .body(options)
            .send()
            .await
    }

    /// Request a fragment of tracks for a station.
    pub async fn playlist_get_fragment(
        &self,
        session: &Session,
        station_id: &str,
        is_station_start: bool,
        options: &FragmentOptions,
    ) -> Result<FragmentResponse> {
        self.request(session, PLAYLIST_GET_FRAGMENT_ENDPOINT)
            .body(FragmentBody {
                station_id,
                is_station_start,
                options,
            })
            .send()
            .await
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new(
            AsyncClient::new(),
            DEFAULT_BASE_URL.to_owned(),
            DEFAULT_API_VERSION.to_owned(),
            EventPublisher::new(1),
        )
    }
}

impl crate::private::Sealed for RestClient {}

impl BuildHttpRequest for RestClient {
    fn build_http_request(&self, session: &Session, parts: RequestParts) -> Result<reqwest::RequestBuilder> {
        debug!("{} {}", parts.method, parts.url);
        self.inner
            .events
            .publish(Event::Debug(format!("{} {}", parts.method, parts.url)));

        let mut request = self
            .http_client
            .request(parts.method, &parts.url)
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(csrf_token) = session.csrf_token() {
            request = request.header(CSRF_TOKEN_HEADER, HeaderValue::from_str(&csrf_token)?);
        } else {
            warn!("Session has no CSRF token, request to {} will likely be rejected", parts.url);
        }

        if parts.send_auth {
            if let Some(auth_token) = session.auth_token() {
                request = request.header(AUTH_TOKEN_HEADER, HeaderValue::from_str(&auth_token)?);
            }
        }

        if parts.send_cookies {
            if let Some(cookies) = session.cookie_header() {
                request = request.header(header::COOKIE, HeaderValue::from_str(&cookies)?);
            }
        }

        if !parts.query_params.is_empty() {
            request = request.query(&parts.query_params);
        }

        if let Some(body) = &parts.body {
            request = request.json(body);
        }

        Ok(request.headers(parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest_client() -> RestClient {
        RestClient::new(
            AsyncClient::new(),
            "http://localhost:8080/".to_owned(),
            "v1".to_owned(),
            EventPublisher::new(8),
        )
    }

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|value| value.to_str().ok())
    }

    #[test]
    fn endpoint_urls() {
        let client = rest_client();

        assert_eq!(
            client.endpoint_url("v1", "auth/login"),
            "http://localhost:8080/api/v1/auth/login"
        );
        assert_eq!(
            client.endpoint_url("v4", "/station/getStations"),
            "http://localhost:8080/api/v4/station/getStations"
        );
    }

    #[test]
    fn attaches_session_headers() {
        let client = rest_client();
        let session = Session::new();
        session.set_cookies(["csrftoken=abc; Path=/", "lang=en"]);
        session.authenticate(crate::session::Authentication {
            auth_token: "T1".to_owned(),
            listener_id: None,
        });

        let parts = RequestParts {
            method: reqwest::Method::POST,
            url: client.endpoint_url("v1", "station/getStations"),
            query_params: vec![("a".to_owned(), "b c".to_owned())],
            headers: Default::default(),
            body: Some(serde_json::json!({"pageSize": 1})),
            send_cookies: true,
            send_auth: true,
        };

        let request = client.build_http_request(&session, parts).unwrap().build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/v1/station/getStations?a=b+c"
        );
        assert_eq!(header(&request, "x-csrftoken"), Some("abc"));
        assert_eq!(header(&request, "x-authtoken"), Some("T1"));
        assert_eq!(header(&request, "cookie"), Some("csrftoken=abc; lang=en"));
        assert_eq!(header(&request, "content-type"), Some("application/json"));
    }

    #[test]
    fn cookies_and_auth_can_be_left_out() {
        let client = rest_client();
        let session = Session::new();
        session.set_cookies(["csrftoken=abc"]);
        session.authenticate(crate::session::Authentication {
            auth_token: "T1".to_owned(),
            listener_id: None,
        });

        let parts = RequestParts {
            method: reqwest::Method::POST,
            url: client.endpoint_url("v1", "auth/login"),
            query_params: Vec::new(),
            headers: Default::default(),
            body: None,
            send_cookies: false,
            send_auth: false,
        };

        let request = client.build_http_request(&session, parts).unwrap().build().unwrap();

        assert_eq!(header(&request, "x-csrftoken"), Some("abc"));
        assert_eq!(header(&request, "x-authtoken"), None);
        assert_eq!(header(&request, "cookie"), None);
    }

    #[test]
    fn custom_headers_override_defaults() {
        let client = rest_client();
        let session = Session::new();

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let parts = RequestParts {
            method: reqwest::Method::GET,
            url: client.endpoint_url("v1", "anything"),
            query_params: Vec::new(),
            headers,
            body: None,
            send_cookies: true,
            send_auth: true,
        };

        let request = client.build_http_request(&session, parts).unwrap().build().unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(header(&request, "content-type"), Some("text/plain"));
        assert_eq!(header(&request, "x-csrftoken"), None);
    }

    #[test]
    fn requests_publish_debug_events() {
        let client = rest_client();
        let mut events = client.inner.events.subscribe();

        let parts = RequestParts {
            method: reqwest::Method::POST,
            url: client.endpoint_url("v1", "auth/login"),
            query_params: Vec::new(),
            headers: Default::default(),
            body: None,
            send_cookies: true,
            send_auth: true,
        };

        client.build_http_request(&Session::new(), parts).unwrap();

        assert_eq!(
            events.try_recv().ok(),
            Some(Event::Debug("POST http://localhost:8080/api/v1/auth/login".to_owned()))
        );
    }
}
