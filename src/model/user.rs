//! The logged-in account.
//!
//! A [User] is built from the `auth/login` response by [PandoraClient::login](crate::client::PandoraClient::login).
//! Besides the account's settings it owns the account's stations, which are fetched with
//! [get_stations](User::get_stations).

use super::station::{Station, StationObject};
use crate::{
    client::{RestClient, StationListOptions},
    collection::Collection,
    error::Result,
    session::Session,
    util::{duration, lenient},
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// The account payload returned from `auth/login`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserObject {
    #[serde(rename = "authToken", deserialize_with = "lenient::none_on_error")]
    pub token: Option<String>,
    #[serde(rename = "listenerId", deserialize_with = "lenient::none_on_error")]
    pub id: Option<String>,
    #[serde(rename = "username", deserialize_with = "lenient::none_on_error")]
    pub email: Option<String>,
    #[serde(rename = "webname", deserialize_with = "lenient::none_on_error")]
    pub username: Option<String>,
    #[serde(rename = "explicitContentFilterEnabled", deserialize_with = "lenient::none_on_error")]
    pub explicit_content_filter_enabled: Option<bool>,
    #[serde(rename = "birthYear", deserialize_with = "lenient::none_on_error")]
    pub birth_year: Option<u32>,
    #[serde(rename = "zipCode", deserialize_with = "lenient::none_on_error")]
    pub zip: Option<String>,
    #[serde(rename = "gender", deserialize_with = "lenient::none_on_error")]
    pub gender: Option<String>,
    #[serde(rename = "minor", deserialize_with = "lenient::none_on_error")]
    pub minor: Option<bool>,
    #[serde(rename = "profilePrivate", deserialize_with = "lenient::none_on_error")]
    pub private: Option<bool>,
    #[serde(rename = "emailOptOut", deserialize_with = "lenient::none_on_error")]
    pub email_opt_out: Option<bool>,
    #[serde(rename = "allowProfileComments", deserialize_with = "lenient::none_on_error")]
    pub allow_comments: Option<bool>,
    #[serde(rename = "notifyOnComment", deserialize_with = "lenient::none_on_error")]
    pub notify_on_comment: Option<bool>,
    #[serde(rename = "notifyOnFollower", deserialize_with = "lenient::none_on_error")]
    pub notify_on_follower: Option<bool>,
    #[serde(rename = "artistPromoEmailsEnabled", deserialize_with = "lenient::none_on_error")]
    pub receive_artist_emails: Option<bool>,
    #[serde(rename = "artistAudioMessagesEnabled", deserialize_with = "lenient::none_on_error")]
    pub receive_audio_promos: Option<bool>,
    #[serde(rename = "isNew", deserialize_with = "lenient::none_on_error")]
    pub is_new: Option<bool>,
    #[serde(rename = "config", deserialize_with = "lenient::default_on_error")]
    pub config: UserConfig,
    // ad targeting key-values; the shape isn't known
    #[serde(rename = "adkv")]
    pub adkv: Option<Value>,
    #[serde(rename = "activeVxRewards")]
    pub active_vx_rewards: Option<Value>,
    #[serde(rename = "listenerToken", deserialize_with = "lenient::none_on_error")]
    pub listener_token: Option<String>,
    #[serde(rename = "highQualityStreamingEnabled", deserialize_with = "lenient::none_on_error")]
    pub high_quality: Option<bool>,
    #[serde(rename = "seenEducation", deserialize_with = "lenient::none_on_error")]
    pub seen_tutorial: Option<bool>,
    #[serde(rename = "smartConversionAdUrl", deserialize_with = "lenient::none_on_error")]
    pub smart_conversion_ad_url: Option<String>,
    #[serde(rename = "smartConversionTimeoutMillis", with = "duration::millis")]
    pub smart_conversion_timeout: Option<Duration>,
    #[serde(rename = "smartConversionDisabled", deserialize_with = "lenient::none_on_error")]
    pub smart_conversion_disabled: Option<bool>,
    #[serde(rename = "stationCount", deserialize_with = "lenient::none_on_error")]
    pub station_count: Option<u32>,
    #[serde(rename = "webClientVersion", deserialize_with = "lenient::none_on_error")]
    pub web_client_version: Option<String>,
    #[serde(rename = "placeholderProfileImageUrl", deserialize_with = "lenient::none_on_error")]
    pub placeholder_image_url: Option<String>,
    #[serde(rename = "autoplayEnabled", deserialize_with = "lenient::none_on_error")]
    pub autoplay: Option<bool>,
    #[serde(rename = "kruxToken", deserialize_with = "lenient::none_on_error")]
    pub krux_token: Option<String>,
}

/// Per-account limits and settings, from the `config` object in the login payload.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    #[serde(rename = "branding", deserialize_with = "lenient::none_on_error")]
    pub branding: Option<String>,
    #[serde(rename = "dailySkipLimit", deserialize_with = "lenient::none_on_error")]
    pub daily_skip_limit: Option<u32>,
    #[serde(rename = "stationSkipLimit", deserialize_with = "lenient::none_on_error")]
    pub station_skip_limit: Option<u32>,
    /// Seconds without activity before the web player times out.
    #[serde(rename = "inactivityTimeout", deserialize_with = "lenient::none_on_error")]
    pub inactivity_timeout: Option<u64>,
    #[serde(rename = "experiments")]
    pub experiments: Option<Value>,
    /// Subscription related flags, such as whether the account is Plus or Premium.
    #[serde(rename = "flags", deserialize_with = "lenient::skip_invalid")]
    pub flags: Vec<String>,
    #[serde(rename = "monthlyListeningCapHours", deserialize_with = "lenient::none_on_error")]
    pub monthly_listening_cap_hours: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct User {
    rest: RestClient,
    session: Session,
    object: UserObject,
    stations: Collection<String, Station>,
}

impl User {
    pub fn new(rest: RestClient, session: Session, object: UserObject) -> Self {
        Self {
            rest,
            session,
            object,
            stations: Collection::new(),
        }
    }

    /// Clear the user's stations and fetch them all again. Every [Station] from an earlier call is dropped from the
    /// collection, even if an equal station is in the new response. Stations the server lists without an ID are
    /// skipped.
    pub async fn get_stations(&mut self) -> Result<&Collection<String, Station>> {
        self.get_stations_with(StationListOptions::default()).await
    }

    /// Like [get_stations](Self::get_stations), with options for the request.
    pub async fn get_stations_with(&mut self, options: StationListOptions) -> Result<&Collection<String, Station>> {
        self.stations.clear();

        let response = self.rest.get_stations(&self.session, &options).await?;
        debug!("Got {} stations", response.stations.len());

        self.set_stations(response.stations);
        Ok(&self.stations)
    }

    // a station without an ID can't be keyed or played
    fn set_stations(&mut self, objects: Vec<StationObject>) {
        for object in objects {
            match object.id.clone() {
                Some(id) if !id.is_empty() => {
                    let station = Station::new(self.rest.clone(), self.session.clone(), object);
                    self.stations.set(id, station);
                }

                _ => warn!("Skipping station without an ID: {:?}", object.name),
            }
        }
    }

    /// The stations from the latest [get_stations](Self::get_stations) call, in the order the server listed them.
    pub fn stations(&self) -> &Collection<String, Station> {
        &self.stations
    }

    /// The login payload this user was built from.
    pub fn object(&self) -> &UserObject {
        &self.object
    }

    /// The auth token sent with every request made for this user.
    pub fn token(&self) -> Option<&str> {
        self.object.token.as_deref()
    }

    /// The user's listener ID.
    pub fn id(&self) -> Option<&str> {
        self.object.id.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.object.email.as_deref()
    }

    /// The user's public profile name.
    pub fn username(&self) -> Option<&str> {
        self.object.username.as_deref()
    }

    /// Whether explicit content is allowed, i.e. the explicit content filter is not enabled.
    pub fn explicit(&self) -> bool {
        !self.object.explicit_content_filter_enabled.unwrap_or(false)
    }

    pub fn birth_year(&self) -> Option<u32> {
        self.object.birth_year
    }

    /// The zip code on the account. Possibly estimated by the server.
    pub fn zip(&self) -> Option<&str> {
        self.object.zip.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.object.gender.as_deref()
    }

    pub fn minor(&self) -> Option<bool> {
        self.object.minor
    }

    pub fn private(&self) -> Option<bool> {
        self.object.private
    }

    pub fn email_opt_out(&self) -> Option<bool> {
        self.object.email_opt_out
    }

    pub fn allow_comments(&self) -> Option<bool> {
        self.object.allow_comments
    }

    pub fn notify_on_comment(&self) -> Option<bool> {
        self.object.notify_on_comment
    }

    pub fn notify_on_follower(&self) -> Option<bool> {
        self.object.notify_on_follower
    }

    pub fn receive_artist_emails(&self) -> Option<bool> {
        self.object.receive_artist_emails
    }

    pub fn receive_audio_promos(&self) -> Option<bool> {
        self.object.receive_audio_promos
    }

    pub fn is_new(&self) -> Option<bool> {
        self.object.is_new
    }

    pub fn config(&self) -> &UserConfig {
        &self.object.config
    }

    pub fn adkv(&self) -> Option<&Value> {
        self.object.adkv.as_ref()
    }

    pub fn active_vx_rewards(&self) -> Option<&Value> {
        self.object.active_vx_rewards.as_ref()
    }

    pub fn listener_token(&self) -> Option<&str> {
        self.object.listener_token.as_deref()
    }

    pub fn high_quality(&self) -> Option<bool> {
        self.object.high_quality
    }

    /// Whether the user has gone through the web player's introduction.
    pub fn seen_tutorial(&self) -> Option<bool> {
        self.object.seen_tutorial
    }

    pub fn smart_conversion_ad_url(&self) -> Option<&str> {
        self.object.smart_conversion_ad_url.as_deref()
    }

    pub fn smart_conversion_timeout(&self) -> Option<Duration> {
        self.object.smart_conversion_timeout
    }

    pub fn smart_conversion_disabled(&self) -> Option<bool> {
        self.object.smart_conversion_disabled
    }

    /// The number of stations the server says the user has. Available without fetching the stations.
    pub fn station_count(&self) -> Option<u32> {
        self.object.station_count
    }

    pub fn web_client_version(&self) -> Option<&str> {
        self.object.web_client_version.as_deref()
    }

    pub fn placeholder_image_url(&self) -> Option<&str> {
        self.object.placeholder_image_url.as_deref()
    }

    pub fn autoplay(&self) -> Option<bool> {
        self.object.autoplay
    }

    pub fn krux_token(&self) -> Option<&str> {
        self.object.krux_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_login_payload() {
        let object: UserObject = serde_json::from_str(
            r#"{
                "authToken": "T1",
                "listenerId": "L1",
                "username": "user@example.com",
                "webname": "u",
                "explicitContentFilterEnabled": true,
                "birthYear": 1990,
                "smartConversionTimeoutMillis": 1500,
                "config": {"dailySkipLimit": 12, "flags": ["onDemand"], "branding": "Pandora"},
                "adkv": {"gnd": "1"},
                "somethingNew": [1, 2, 3]
            }"#,
        )
        .unwrap();

        assert_eq!(object.token.as_deref(), Some("T1"));
        assert_eq!(object.id.as_deref(), Some("L1"));
        assert_eq!(object.email.as_deref(), Some("user@example.com"));
        assert_eq!(object.username.as_deref(), Some("u"));
        assert_eq!(object.birth_year, Some(1990));
        assert_eq!(object.smart_conversion_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(object.config.daily_skip_limit, Some(12));
        assert_eq!(object.config.flags, ["onDemand"]);
        assert_eq!(object.config.branding.as_deref(), Some("Pandora"));
        assert!(object.adkv.is_some());
    }

    #[test]
    fn missing_config_is_empty() {
        let object: UserObject = serde_json::from_str(r#"{"authToken": "T1"}"#).unwrap();

        assert_eq!(object.config, UserConfig::default());
        assert_eq!(object.id, None);
    }

    #[test]
    fn explicit_is_the_inverse_of_the_filter() {
        let user = |filter: Option<bool>| {
            User::new(
                RestClient::default(),
                Session::new(),
                UserObject {
                    explicit_content_filter_enabled: filter,
                    ..Default::default()
                },
            )
        };

        assert!(!user(Some(true)).explicit());
        assert!(user(Some(false)).explicit());
        assert!(user(None).explicit());
    }

    #[test]
    fn null_and_mistyped_fields_fall_back() {
        let object: UserObject = serde_json::from_str(
            r#"{
                "authToken": "T1",
                "birthYear": "1990",
                "stationCount": -3,
                "config": null,
                "smartConversionTimeoutMillis": null
            }"#,
        )
        .unwrap();

        assert_eq!(object.token.as_deref(), Some("T1"));
        assert_eq!(object.birth_year, None);
        assert_eq!(object.station_count, None);
        assert_eq!(object.config, UserConfig::default());
        assert_eq!(object.smart_conversion_timeout, None);

        let config: UserConfig = serde_json::from_str(r#"{"flags": null, "dailySkipLimit": "6"}"#).unwrap();
        assert!(config.flags.is_empty());
        assert_eq!(config.daily_skip_limit, None);
    }

    #[test]
    fn stations_without_an_id_are_skipped() {
        let mut user = User::new(RestClient::default(), Session::new(), UserObject::default());
        let station = |id: Option<&str>, name: &str| StationObject {
            id: id.map(str::to_owned),
            name: Some(name.to_owned()),
            ..Default::default()
        };

        user.set_stations(vec![
            station(Some("S1"), "Thumbprint Radio"),
            station(None, "Nameless"),
            station(Some(""), "Empty"),
            station(Some("S2"), "Jazz Radio"),
        ]);

        assert_eq!(user.stations().len(), 2);
        assert_eq!(user.stations().first().and_then(Station::name), Some("Thumbprint Radio"));
        assert!(!user.stations().has(""));
        assert_eq!(user.stations().get("S2").and_then(Station::name), Some("Jazz Radio"));
    }
}
