//! A wrapper for Pandora's private web API.
//!
//! The API is undocumented and used by Pandora's own web player. A session is established in three steps: a
//! header-only request harvests the `csrftoken` cookie, the account credentials are posted to `auth/login`, and the
//! returned auth token is sent in the `X-AuthToken` header on every later call alongside the session's cookies.
//!
//! The entry point is [PandoraClient](client::PandoraClient):
//!
//! ```no_run
//! use pandora_web::{client::PandoraClient, FragmentOptions};
//!
//! # async fn run() -> pandora_web::Result<()> {
//! let mut client = PandoraClient::new()?;
//! let user = client.login("user@example.com", "hunter2").await?;
//!
//! let stations = user.get_stations().await?;
//! if let Some(station) = stations.first() {
//!     let tracks = station
//!         .get_random_tracks(true, FragmentOptions::new().audio_format("aacplus"))
//!         .await?;
//!
//!     for track in tracks {
//!         println!("{} - {}", track.artist().name.unwrap_or("?"), track.title().unwrap_or("?"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every object built from an API payload is a read-only mirror of what the server sent. Fields the server omits are
//! `None`; they are never errors.

pub mod client;
pub mod collection;
pub mod cookie;
mod error;
pub mod event;
pub mod model;
pub mod session;
mod util;

pub use crate::{
    client::{
        FragmentOptions, PandoraClient, PandoraClientBuilder, RestClient, StationListOptions,
        FRAGMENT_REQUEST_REASON_NORMAL,
    },
    collection::Collection,
    cookie::CookieJar,
    error::{Error, Result},
    event::Event,
    session::Session,
};

mod private {
    pub trait Sealed {}
}
