//! The client for the API.
//!
//! [PandoraClient] is the entry point: it logs in and holds the resulting [User]. The lower-level [RestClient] it uses
//! is available with [PandoraClient::rest] for calling endpoints the library doesn't wrap:
//!
//! ```no_run
//! # async fn run(client: pandora_web::PandoraClient) -> pandora_web::Result<()> {
//! let response: serde_json::Value = client
//!     .rest()
//!     .request(client.session(), "station/getGenreStations")
//!     .body(serde_json::json!({}))
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod object;
pub(crate) mod private;
mod request_builder;
mod rest;

pub use self::{
    object::{
        FragmentOptions, FragmentResponse, StationListOptions, StationsResponse, FRAGMENT_REQUEST_REASON_NORMAL,
    },
    request_builder::RequestBuilder,
    rest::RestClient,
};

use crate::{
    error::{Error, Result},
    event::{Event, EventPublisher},
    model::user::User,
    session::{Authentication, Session},
};
use const_format::concatcp;
use log::{debug, warn};
use reqwest::Client as AsyncClient;
use tokio::sync::broadcast;

const DEFAULT_BASE_URL: &str = "https://www.pandora.com/";
const DEFAULT_API_VERSION: &str = "v1";
const DEFAULT_EVENT_CAPACITY: usize = 64;

const USER_AGENT: &str = concatcp!("pandora-web/", env!("CARGO_PKG_VERSION"));

const CSRF_TOKEN_HEADER: &str = "X-CsrfToken";
const AUTH_TOKEN_HEADER: &str = "X-AuthToken";

const AUTH_GROUP: &str = "auth/";
const STATION_GROUP: &str = "station/";
const PLAYLIST_GROUP: &str = "playlist/";

const AUTH_LOGIN_ENDPOINT: &str = concatcp!(AUTH_GROUP, "login");
const STATION_GET_STATIONS_ENDPOINT: &str = concatcp!(STATION_GROUP, "getStations");
const PLAYLIST_GET_FRAGMENT_ENDPOINT: &str = concatcp!(PLAYLIST_GROUP, "getFragment");

/// Where a client is in its login lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Not logged in yet.
    Anonymous,
    /// A login is in progress.
    Authenticating,
    /// Logged in; [PandoraClient::user] is available.
    Authenticated,
}

/// A client for Pandora's web API.
///
/// Log in with [login](Self::login), after which the account is available as a [User]. There is no logout; logging in
/// again replaces the user. The client's [Session] is kept across logins, so its cookies carry over.
#[derive(Debug)]
pub struct PandoraClient {
    rest: RestClient,
    session: Session,
    events: EventPublisher,
    state: ClientState,
    user: Option<User>,
}

#[derive(Debug, Clone, Default)]
pub struct PandoraClientBuilder {
    base_url: Option<String>,
    api_version: Option<String>,
    http_client: Option<AsyncClient>,
    event_capacity: Option<usize>,
    session: Option<Session>,
}

impl PandoraClient {
    /// Build a client with the default settings.
    pub fn new() -> Result<Self> {
        PandoraClientBuilder::new().build()
    }

    pub fn builder() -> PandoraClientBuilder {
        PandoraClientBuilder::new()
    }

    /// Get a CSRF token, log in, and build the account's [User]. On success an [Event::Ready] is published.
    ///
    /// A failed login leaves the client as it was before the call and returns the failure as is: bad credentials give
    /// the server's HTTP error (see [Error::status]). So does a login whose future is dropped before it completes, for
    /// example by a timeout.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&mut User> {
        let state = StateGuard::enter(&mut self.state, ClientState::Authenticating);
        debug!("Logging in as {username}");

        match authenticate(&self.rest, &self.session, username, password).await {
            Ok(user) => {
                state.commit(ClientState::Authenticated);
                debug!("Logged in as {username}");

                let user = self.user.insert(user);
                self.events.publish(Event::Ready);

                Ok(user)
            }

            Err(err) => {
                warn!("Login failed: {err}");
                Err(err)
            }
        }
    }

    /// Subscribe to the client's [events](Event). Only events published after subscribing are received.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    /// The logged-in account, or None before the first successful login.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_mut(&mut self) -> Option<&mut User> {
        self.user.as_mut()
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

async fn authenticate(rest: &RestClient, session: &Session, username: &str, password: &str) -> Result<User> {
    rest.get_csrf_token(session).await?;

    let object = rest.auth_login(session, username, password).await?;
    let auth_token = object
        .token
        .clone()
        .filter(|token| !token.is_empty())
        .ok_or(Error::NotAuthenticated)?;

    session.authenticate(Authentication {
        auth_token,
        listener_id: object.id.clone(),
    });

    Ok(User::new(rest.clone(), session.clone(), object))
}

/// Holds a client in a transitional state. Dropping the guard without committing puts the previous state back.
struct StateGuard<'a> {
    state: &'a mut ClientState,
    previous: ClientState,
    committed: bool,
}

impl<'a> StateGuard<'a> {
    fn enter(state: &'a mut ClientState, transitional: ClientState) -> Self {
        let previous = std::mem::replace(state, transitional);

        Self {
            state,
            previous,
            committed: false,
        }
    }

    fn commit(mut self, state: ClientState) {
        *self.state = state;
        self.committed = true;
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            *self.state = self.previous;
        }
    }
}

impl PandoraClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The website the API is under. Defaults to `https://www.pandora.com/`.
    pub fn base_url<S>(self, base_url: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            base_url: Some(base_url.into()),
            ..self
        }
    }

    /// The API version used in request paths. Defaults to `v1`.
    pub fn api_version<S>(self, api_version: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            api_version: Some(api_version.into()),
            ..self
        }
    }

    /// Use an existing HTTP client, for example one with a timeout or proxy configured.
    pub fn http_client(self, http_client: AsyncClient) -> Self {
        Self {
            http_client: Some(http_client),
            ..self
        }
    }

    /// How many events a subscriber may lag behind before it starts losing them. Defaults to 64.
    pub fn event_capacity(self, event_capacity: usize) -> Self {
        Self {
            event_capacity: Some(event_capacity),
            ..self
        }
    }

    /// Start from an existing session instead of an empty one.
    pub fn session(self, session: Session) -> Self {
        Self {
            session: Some(session),
            ..self
        }
    }

    pub fn build(self) -> Result<PandoraClient> {
        let http_client = match self.http_client {
            Some(http_client) => http_client,
            None => AsyncClient::builder().user_agent(USER_AGENT).build()?,
        };

        let mut base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let api_version = self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_owned());
        let events = EventPublisher::new(self.event_capacity.unwrap_or(DEFAULT_EVENT_CAPACITY));

        debug!("Building client for {base_url} with API version {api_version}");

        Ok(PandoraClient {
            rest: RestClient::new(http_client, base_url, api_version, events.clone()),
            session: self.session.unwrap_or_default(),
            events,
            state: ClientState::Anonymous,
            user: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(AUTH_LOGIN_ENDPOINT, "auth/login");
        assert_eq!(STATION_GET_STATIONS_ENDPOINT, "station/getStations");
        assert_eq!(PLAYLIST_GET_FRAGMENT_ENDPOINT, "playlist/getFragment");
    }

    #[test]
    fn builder_normalizes_base_url() {
        let client = PandoraClient::builder()
            .base_url("http://127.0.0.1:3000")
            .api_version("v2")
            .build()
            .unwrap();

        assert_eq!(client.rest().base_url(), "http://127.0.0.1:3000/");
        assert_eq!(
            client.rest().endpoint_url(client.rest().api_version(), AUTH_LOGIN_ENDPOINT),
            "http://127.0.0.1:3000/api/v2/auth/login"
        );
    }

    #[test]
    fn new_client_is_anonymous() {
        let client = PandoraClient::new().unwrap();

        assert_eq!(client.state(), ClientState::Anonymous);
        assert!(client.user().is_none());
        assert!(!client.session().is_authenticated());
        assert_eq!(client.rest().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn state_guard_restores_unless_committed() {
        let mut state = ClientState::Authenticated;

        let guard = StateGuard::enter(&mut state, ClientState::Authenticating);
        assert_eq!(*guard.state, ClientState::Authenticating);
        drop(guard);
        assert_eq!(state, ClientState::Authenticated);

        StateGuard::enter(&mut state, ClientState::Authenticating).commit(ClientState::Anonymous);
        assert_eq!(state, ClientState::Anonymous);
    }
}
