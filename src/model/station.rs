//! Stations, the streaming channels of an account.

use super::{track::Track, Art};
use crate::{
    client::{FragmentOptions, RestClient},
    error::Result,
    session::Session,
    util::lenient,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// One entry of the station list returned from `station/getStations`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationObject {
    #[serde(rename = "stationId", deserialize_with = "lenient::none_on_error")]
    pub id: Option<String>,
    #[serde(rename = "name", deserialize_with = "lenient::none_on_error")]
    pub name: Option<String>,
    #[serde(rename = "stationFactoryPandoraId", deserialize_with = "lenient::none_on_error")]
    pub factory_id: Option<String>,
    #[serde(rename = "pandoraId", deserialize_with = "lenient::none_on_error")]
    pub pandora_id: Option<String>,
    #[serde(rename = "art", deserialize_with = "lenient::skip_invalid")]
    pub art: Vec<Art>,
    #[serde(rename = "dateCreated", deserialize_with = "lenient::none_on_error")]
    pub created: Option<String>,
    #[serde(rename = "lastPlayed", deserialize_with = "lenient::none_on_error")]
    pub last_played: Option<String>,
    #[serde(rename = "isNew", deserialize_with = "lenient::none_on_error")]
    pub is_new: Option<bool>,
    #[serde(rename = "allowDelete", deserialize_with = "lenient::none_on_error")]
    pub deleting_allowed: Option<bool>,
    #[serde(rename = "allowRename", deserialize_with = "lenient::none_on_error")]
    pub renaming_allowed: Option<bool>,
    #[serde(rename = "allowEditDescription", deserialize_with = "lenient::none_on_error")]
    pub editing_allowed: Option<bool>,
    #[serde(rename = "allowAddSeed", deserialize_with = "lenient::none_on_error")]
    pub seeding_allowed: Option<bool>,
    #[serde(rename = "isShared", deserialize_with = "lenient::none_on_error")]
    pub shared: Option<bool>,
    #[serde(rename = "isTransformAllowed", deserialize_with = "lenient::none_on_error")]
    pub transforming_allowed: Option<bool>,
    #[serde(rename = "isOnDemandEditorialStation", deserialize_with = "lenient::none_on_error")]
    pub on_demand_editorial: Option<bool>,
    #[serde(rename = "isAdvertiser", deserialize_with = "lenient::none_on_error")]
    pub advertiser: Option<bool>,
    #[serde(rename = "canShuffleStation", deserialize_with = "lenient::none_on_error")]
    pub shuffle_allowed: Option<bool>,
    #[serde(rename = "canAutoshare", deserialize_with = "lenient::none_on_error")]
    pub auto_sharing_allowed: Option<bool>,
    #[serde(rename = "advertisingKey", deserialize_with = "lenient::none_on_error")]
    pub advertising_key: Option<String>,
    #[serde(rename = "isArtistMessagesEnabled", deserialize_with = "lenient::none_on_error")]
    pub artist_messages: Option<bool>,
    #[serde(rename = "isThumbprint", deserialize_with = "lenient::none_on_error")]
    pub thumbprint: Option<bool>,
    #[serde(rename = "isShuffle", deserialize_with = "lenient::none_on_error")]
    pub shuffle: Option<bool>,
    #[serde(rename = "genre", deserialize_with = "lenient::skip_invalid")]
    pub genres: Vec<String>,
    #[serde(rename = "genreSponsorship", deserialize_with = "lenient::none_on_error")]
    pub genre_sponsorship: Option<String>,
    #[serde(rename = "adGenre", deserialize_with = "lenient::none_on_error")]
    pub ad_genre: Option<String>,
    #[serde(rename = "antiTarget", deserialize_with = "lenient::none_on_error")]
    pub anti_target: Option<bool>,
    #[serde(rename = "initialSeed", deserialize_with = "lenient::default_on_error")]
    pub initial_seed: InitialSeed,
    #[serde(rename = "adkv", deserialize_with = "lenient::default_on_error")]
    pub adkv: StationAdkv,
    #[serde(rename = "creatorWebname", deserialize_with = "lenient::none_on_error")]
    pub creator_username: Option<String>,
    #[serde(rename = "artId", deserialize_with = "lenient::none_on_error")]
    pub art_id: Option<String>,
}

/// The seed the station was created from. Empty if the server didn't send one.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialSeed {
    #[serde(rename = "musicId", deserialize_with = "lenient::default_on_error")]
    pub music_id: String,
    #[serde(rename = "pandoraId", deserialize_with = "lenient::default_on_error")]
    pub pandora_id: String,
}

/// Ad targeting key-values of a station. Empty if the server didn't send them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationAdkv {
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub artist: String,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub genre: String,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub clean: String,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub gcat: String,
}

#[derive(Debug, Clone)]
pub struct Station {
    rest: RestClient,
    session: Session,
    object: StationObject,
}

impl Station {
    pub fn new(rest: RestClient, session: Session, object: StationObject) -> Self {
        Self { rest, session, object }
    }

    /// Request a fragment of tracks to play from this station. `is_station_start` should be `true` when the station
    /// is started for the first time. Every call returns new tracks; nothing is cached.
    pub async fn get_random_tracks(&self, is_station_start: bool, options: FragmentOptions) -> Result<Vec<Track>> {
        let station_id = self.id().unwrap_or_default();
        let response = self
            .rest
            .playlist_get_fragment(&self.session, station_id, is_station_start, &options)
            .await?;

        debug!("Got {} tracks for station {station_id}", response.tracks.len());

        Ok(response
            .tracks
            .into_iter()
            .map(|object| Track::new(station_id, object))
            .collect())
    }

    /// The station list entry this station was built from.
    pub fn object(&self) -> &StationObject {
        &self.object
    }

    pub fn id(&self) -> Option<&str> {
        self.object.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.object.name.as_deref()
    }

    pub fn factory_id(&self) -> Option<&str> {
        self.object.factory_id.as_deref()
    }

    pub fn pandora_id(&self) -> Option<&str> {
        self.object.pandora_id.as_deref()
    }

    pub fn art(&self) -> &[Art] {
        &self.object.art
    }

    /// When the station was created, as the timestamp string the server sent.
    pub fn created(&self) -> Option<&str> {
        self.object.created.as_deref()
    }

    /// When the station was last played, as the timestamp string the server sent.
    pub fn last_played(&self) -> Option<&str> {
        self.object.last_played.as_deref()
    }

    pub fn is_new(&self) -> Option<bool> {
        self.object.is_new
    }

    pub fn deleting_allowed(&self) -> Option<bool> {
        self.object.deleting_allowed
    }

    pub fn renaming_allowed(&self) -> Option<bool> {
        self.object.renaming_allowed
    }

    /// Whether the station's description may be edited.
    pub fn editing_allowed(&self) -> Option<bool> {
        self.object.editing_allowed
    }

    pub fn seeding_allowed(&self) -> Option<bool> {
        self.object.seeding_allowed
    }

    pub fn shared(&self) -> Option<bool> {
        self.object.shared
    }

    pub fn transforming_allowed(&self) -> Option<bool> {
        self.object.transforming_allowed
    }

    pub fn on_demand_editorial(&self) -> Option<bool> {
        self.object.on_demand_editorial
    }

    pub fn advertiser(&self) -> Option<bool> {
        self.object.advertiser
    }

    pub fn shuffle_allowed(&self) -> Option<bool> {
        self.object.shuffle_allowed
    }

    pub fn auto_sharing_allowed(&self) -> Option<bool> {
        self.object.auto_sharing_allowed
    }

    pub fn advertising_key(&self) -> Option<&str> {
        self.object.advertising_key.as_deref()
    }

    pub fn artist_messages(&self) -> Option<bool> {
        self.object.artist_messages
    }

    /// Whether this is the account's Thumbprint Radio, the station built from every track the user liked.
    pub fn thumbprint(&self) -> Option<bool> {
        self.object.thumbprint
    }

    pub fn shuffle(&self) -> Option<bool> {
        self.object.shuffle
    }

    pub fn genres(&self) -> &[String] {
        &self.object.genres
    }

    pub fn genre_sponsorship(&self) -> Option<&str> {
        self.object.genre_sponsorship.as_deref()
    }

    pub fn ad_genre(&self) -> Option<&str> {
        self.object.ad_genre.as_deref()
    }

    pub fn anti_target(&self) -> Option<bool> {
        self.object.anti_target
    }

    pub fn initial_seed(&self) -> &InitialSeed {
        &self.object.initial_seed
    }

    pub fn adkv(&self) -> &StationAdkv {
        &self.object.adkv
    }

    /// The profile name of the user who created the station.
    pub fn creator_username(&self) -> Option<&str> {
        self.object.creator_username.as_deref()
    }

    pub fn art_id(&self) -> Option<&str> {
        self.object.art_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_station_entry() {
        let object: StationObject = serde_json::from_str(
            r#"{
                "stationId": "S1",
                "name": "Thumbprint Radio",
                "isThumbprint": true,
                "allowDelete": false,
                "genre": ["Pop", "Rock"],
                "art": [{"url": "https://x/90W_90H.jpg", "size": 90}],
                "initialSeed": {"musicId": "M1", "pandoraId": "P1"},
                "dateCreated": "2017-05-01T20:32:33.493Z"
            }"#,
        )
        .unwrap();

        let station = Station::new(RestClient::default(), Session::new(), object);

        assert_eq!(station.id(), Some("S1"));
        assert_eq!(station.name(), Some("Thumbprint Radio"));
        assert_eq!(station.thumbprint(), Some(true));
        assert_eq!(station.deleting_allowed(), Some(false));
        assert_eq!(station.genres(), ["Pop", "Rock"]);
        assert_eq!(station.art()[0].size, Some(90));
        assert_eq!(station.initial_seed().music_id, "M1");
        assert_eq!(station.created(), Some("2017-05-01T20:32:33.493Z"));
    }

    #[test]
    fn optional_nested_objects_default_to_empty() {
        let object: StationObject = serde_json::from_str(r#"{"stationId": "S1"}"#).unwrap();

        assert_eq!(object.initial_seed, InitialSeed::default());
        assert_eq!(object.adkv, StationAdkv::default());
        assert!(object.art.is_empty());
        assert_eq!(object.name, None);
    }

    #[test]
    fn null_and_mistyped_fields_fall_back() {
        let object: StationObject = serde_json::from_str(
            r#"{
                "stationId": "S1",
                "name": 42,
                "isThumbprint": "yes",
                "genre": null,
                "art": [null, {"url": "https://x/90W_90H.jpg", "size": "90"}],
                "initialSeed": null,
                "adkv": {"artist": "a", "genre": null}
            }"#,
        )
        .unwrap();

        assert_eq!(object.id.as_deref(), Some("S1"));
        assert_eq!(object.name, None);
        assert_eq!(object.thumbprint, None);
        assert!(object.genres.is_empty());
        assert_eq!(object.art.len(), 1);
        assert_eq!(object.art[0].url.as_deref(), Some("https://x/90W_90H.jpg"));
        assert_eq!(object.art[0].size, None);
        assert_eq!(object.initial_seed, InitialSeed::default());
        assert_eq!(object.adkv.artist, "a");
        assert_eq!(object.adkv.genre, "");
    }
}
