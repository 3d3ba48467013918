use crate::{
    model::{station::StationObject, track::TrackObject},
    util::lenient,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Fragment request reason the web player sends for ordinary playback.
pub const FRAGMENT_REQUEST_REASON_NORMAL: &str = "Normal";

#[derive(Serialize)]
pub(crate) struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

// request bodies end up in trace logs, keep the password out of them
impl Debug for LoginBody<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginBody")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FragmentBody<'a> {
    pub station_id: &'a str,
    pub is_station_start: bool,
    #[serde(flatten)]
    pub options: &'a FragmentOptions,
}

/// Options for listing stations.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
}

impl StationListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many stations the server should return.
    pub fn page_size(self, page_size: u32) -> Self {
        Self {
            page_size: Some(page_size),
        }
    }
}

/// Options for requesting a playlist fragment.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment_request_reason: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl FragmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The format of the tracks' audio URLs. The web player asks for `"aacplus"`; the full set of formats is unknown.
    pub fn audio_format<S>(self, audio_format: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            audio_format: Some(audio_format.into()),
            ..self
        }
    }

    /// Why the fragment is requested. The web player sends [FRAGMENT_REQUEST_REASON_NORMAL] when it runs out of
    /// tracks; other reasons are unknown.
    pub fn fragment_request_reason<S>(self, reason: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            fragment_request_reason: Some(reason.into()),
            ..self
        }
    }

    /// Any other parameter to add to the request body.
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// The payload returned from `station/getStations`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationsResponse {
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub stations: Vec<StationObject>,
    #[serde(rename = "totalStations", deserialize_with = "lenient::none_on_error")]
    pub total_stations: Option<u32>,
}

/// The payload returned from `playlist/getFragment`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentResponse {
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub tracks: Vec<TrackObject>,
}
