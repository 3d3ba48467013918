//! Tracks returned in playlist fragments.
//!
//! Tracks are ephemeral: every [get_random_tracks](crate::model::station::Station::get_random_tracks) call builds new
//! ones, and the same song showing up in two fragments gives two unrelated [Track]s.
//!
//! The fragment payload is flat. The artist, album and track key fields are grouped into [TrackArtist], [TrackAlbum]
//! and [TrackKey] when read through a [Track].

use super::Art;
use crate::util::{duration, lenient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// One entry of the track list returned from `playlist/getFragment`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackObject {
    #[serde(rename = "userSeed", deserialize_with = "lenient::none_on_error")]
    pub user_seed: Option<String>,
    #[serde(rename = "genre", deserialize_with = "lenient::skip_invalid")]
    pub genres: Vec<String>,
    #[serde(rename = "monthlyListening", deserialize_with = "lenient::none_on_error")]
    pub monthly_listening: Option<u64>,
    #[serde(rename = "listeningTimestamp", deserialize_with = "lenient::none_on_error")]
    pub listening_timestamp: Option<String>,
    #[serde(rename = "shareLandingURL", deserialize_with = "lenient::none_on_error")]
    pub share_url: Option<String>,
    #[serde(rename = "isSeed", deserialize_with = "lenient::none_on_error")]
    pub seed: Option<bool>,
    #[serde(rename = "allowStartStationFromTrack", deserialize_with = "lenient::none_on_error")]
    pub can_start_from_track: Option<bool>,
    #[serde(rename = "allowShareTrack", deserialize_with = "lenient::none_on_error")]
    pub sharing_allowed: Option<bool>,
    #[serde(rename = "allowBuyTrack", deserialize_with = "lenient::none_on_error")]
    pub buying_allowed: Option<bool>,
    #[serde(rename = "allowTiredOfTrack", deserialize_with = "lenient::none_on_error")]
    pub tired_allowed: Option<bool>,
    #[serde(rename = "allowSkipTrackWithoutLimit", deserialize_with = "lenient::none_on_error")]
    pub skip_without_limit: Option<bool>,
    #[serde(rename = "allowSkip", deserialize_with = "lenient::none_on_error")]
    pub skipping_allowed: Option<bool>,
    #[serde(rename = "allowFeedback", deserialize_with = "lenient::none_on_error")]
    pub feedback_allowed: Option<bool>,
    #[serde(rename = "composerName", deserialize_with = "lenient::none_on_error")]
    pub composer_name: Option<String>,
    #[serde(rename = "artistSeoToken", deserialize_with = "lenient::none_on_error")]
    pub artist_seo_token: Option<String>,
    #[serde(rename = "albumSeoToken", deserialize_with = "lenient::none_on_error")]
    pub album_seo_token: Option<String>,
    #[serde(rename = "isCompilation", deserialize_with = "lenient::none_on_error")]
    pub compilation: Option<bool>,
    #[serde(rename = "amazonUrl", deserialize_with = "lenient::none_on_error")]
    pub amazon_url: Option<String>,
    #[serde(rename = "itunesUrl", deserialize_with = "lenient::none_on_error")]
    pub itunes_url: Option<String>,
    #[serde(rename = "isFeatured", deserialize_with = "lenient::none_on_error")]
    pub featured: Option<bool>,
    #[serde(rename = "isBookmarked", deserialize_with = "lenient::none_on_error")]
    pub bookmarked: Option<bool>,
    #[serde(rename = "adUrls", deserialize_with = "lenient::default_on_error")]
    pub ad_urls: AdUrls,
    #[serde(rename = "songTitle", deserialize_with = "lenient::none_on_error")]
    pub title: Option<String>,
    #[serde(rename = "musicId", deserialize_with = "lenient::none_on_error")]
    pub id: Option<String>,
    #[serde(rename = "trackType", deserialize_with = "lenient::none_on_error")]
    pub track_type: Option<String>,
    #[serde(rename = "pandoraId", deserialize_with = "lenient::none_on_error")]
    pub pandora_id: Option<String>,
    #[serde(rename = "trackToken", deserialize_with = "lenient::none_on_error")]
    pub token: Option<String>,
    #[serde(rename = "identity", deserialize_with = "lenient::none_on_error")]
    pub identity: Option<String>,
    #[serde(rename = "trackLength", with = "duration::seconds")]
    pub length: Option<Duration>,
    #[serde(rename = "rating", deserialize_with = "lenient::none_on_error")]
    pub rating: Option<i32>,
    #[serde(rename = "fileGain", deserialize_with = "lenient::none_on_error")]
    pub gain: Option<String>,
    #[serde(rename = "songDetailURL", deserialize_with = "lenient::none_on_error")]
    pub detail_url: Option<String>,
    #[serde(rename = "trackSeoToken", deserialize_with = "lenient::none_on_error")]
    pub track_seo_token: Option<String>,
    #[serde(rename = "audioURL", deserialize_with = "lenient::none_on_error")]
    pub audio_url: Option<String>,
    #[serde(rename = "rights")]
    pub rights: Option<Value>,
    #[serde(rename = "audioEncoding", deserialize_with = "lenient::none_on_error")]
    pub audio_encoding: Option<String>,
    #[serde(rename = "audioTokenId", deserialize_with = "lenient::none_on_error")]
    pub audio_token: Option<String>,
    #[serde(rename = "audioReceiptURL", alias = "audioReciptURL", deserialize_with = "lenient::none_on_error")]
    pub audio_receipt_url: Option<String>,
    #[serde(rename = "audioSkipURL", deserialize_with = "lenient::none_on_error")]
    pub audio_skip_url: Option<String>,
    #[serde(rename = "artistName", deserialize_with = "lenient::none_on_error")]
    pub artist_name: Option<String>,
    #[serde(rename = "artistMusicId", deserialize_with = "lenient::none_on_error")]
    pub artist_music_id: Option<String>,
    #[serde(rename = "artistArt", deserialize_with = "lenient::skip_invalid")]
    pub artist_art: Vec<Art>,
    #[serde(rename = "artistDetailURL", deserialize_with = "lenient::none_on_error")]
    pub artist_detail_url: Option<String>,
    #[serde(rename = "albumTitle", deserialize_with = "lenient::none_on_error")]
    pub album_title: Option<String>,
    #[serde(rename = "albumArt", deserialize_with = "lenient::skip_invalid")]
    pub album_art: Vec<Art>,
    #[serde(rename = "albumDetailURL", deserialize_with = "lenient::none_on_error")]
    pub album_detail_url: Option<String>,
    #[serde(rename = "trackId", deserialize_with = "lenient::none_on_error")]
    pub track_id: Option<String>,
    #[serde(rename = "spinId", deserialize_with = "lenient::none_on_error")]
    pub spin_id: Option<String>,
}

/// Ad URLs attached to a track. Empty if the server didn't send them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdUrls {
    /// Ad watched to earn more skips.
    #[serde(rename = "flexSkipAdUrl", deserialize_with = "lenient::default_on_error")]
    pub flex_skip: String,
    /// Ad watched to earn more replays.
    #[serde(rename = "flexReplayAdUrl", deserialize_with = "lenient::default_on_error")]
    pub flex_replay: String,
    /// Ad watched to skip by thumbing down.
    #[serde(rename = "flexThumbsDownAdUrl", deserialize_with = "lenient::default_on_error")]
    pub flex_thumbs_down: String,
    #[serde(rename = "nowPlayingStationAdUrl", deserialize_with = "lenient::default_on_error")]
    pub now_playing_station: String,
    #[serde(rename = "nowPlayingStationAdUnit", deserialize_with = "lenient::default_on_error")]
    pub now_playing_station_ad_unit: String,
    #[serde(rename = "nowPlayingStationAdTargeting", deserialize_with = "lenient::default_on_error")]
    pub now_playing_station_ad_targeting: String,
    #[serde(rename = "backstageAdUrl", deserialize_with = "lenient::default_on_error")]
    pub backstage: String,
    #[serde(rename = "backstageAdUnit", deserialize_with = "lenient::default_on_error")]
    pub backstage_ad_unit: String,
    #[serde(rename = "backstageAdTargeting", deserialize_with = "lenient::default_on_error")]
    pub backstage_ad_targeting: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackArtist<'a> {
    pub name: Option<&'a str>,
    pub music_id: Option<&'a str>,
    pub art: &'a [Art],
    pub detail_url: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackAlbum<'a> {
    pub title: Option<&'a str>,
    pub art: &'a [Art],
    pub detail_url: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackKey<'a> {
    pub track_id: Option<&'a str>,
    pub track_type: Option<&'a str>,
    pub spin_id: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    station_id: String,
    object: TrackObject,
}

impl Track {
    pub fn new<S>(station_id: S, object: TrackObject) -> Self
    where
        S: Into<String>,
    {
        Self {
            station_id: station_id.into(),
            object,
        }
    }

    /// The ID of the station whose fragment this track came from.
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// The fragment entry this track was built from.
    pub fn object(&self) -> &TrackObject {
        &self.object
    }

    pub fn user_seed(&self) -> Option<&str> {
        self.object.user_seed.as_deref()
    }

    pub fn genres(&self) -> &[String] {
        &self.object.genres
    }

    pub fn monthly_listening(&self) -> Option<u64> {
        self.object.monthly_listening
    }

    pub fn listening_timestamp(&self) -> Option<&str> {
        self.object.listening_timestamp.as_deref()
    }

    pub fn share_url(&self) -> Option<&str> {
        self.object.share_url.as_deref()
    }

    pub fn seed(&self) -> Option<bool> {
        self.object.seed
    }

    pub fn can_start_from_track(&self) -> Option<bool> {
        self.object.can_start_from_track
    }

    pub fn sharing_allowed(&self) -> Option<bool> {
        self.object.sharing_allowed
    }

    pub fn buying_allowed(&self) -> Option<bool> {
        self.object.buying_allowed
    }

    /// Whether the user may mark the track as one they're tired of.
    pub fn tired_allowed(&self) -> Option<bool> {
        self.object.tired_allowed
    }

    pub fn skip_without_limit(&self) -> Option<bool> {
        self.object.skip_without_limit
    }

    pub fn skipping_allowed(&self) -> Option<bool> {
        self.object.skipping_allowed
    }

    pub fn feedback_allowed(&self) -> Option<bool> {
        self.object.feedback_allowed
    }

    pub fn composer_name(&self) -> Option<&str> {
        self.object.composer_name.as_deref()
    }

    pub fn artist_seo_token(&self) -> Option<&str> {
        self.object.artist_seo_token.as_deref()
    }

    pub fn album_seo_token(&self) -> Option<&str> {
        self.object.album_seo_token.as_deref()
    }

    pub fn compilation(&self) -> Option<bool> {
        self.object.compilation
    }

    pub fn amazon_url(&self) -> Option<&str> {
        self.object.amazon_url.as_deref()
    }

    pub fn itunes_url(&self) -> Option<&str> {
        self.object.itunes_url.as_deref()
    }

    pub fn featured(&self) -> Option<bool> {
        self.object.featured
    }

    pub fn bookmarked(&self) -> Option<bool> {
        self.object.bookmarked
    }

    pub fn ad_urls(&self) -> &AdUrls {
        &self.object.ad_urls
    }

    pub fn title(&self) -> Option<&str> {
        self.object.title.as_deref()
    }

    /// The track's music ID.
    pub fn id(&self) -> Option<&str> {
        self.object.id.as_deref()
    }

    pub fn track_type(&self) -> Option<&str> {
        self.object.track_type.as_deref()
    }

    pub fn pandora_id(&self) -> Option<&str> {
        self.object.pandora_id.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.object.token.as_deref()
    }

    pub fn identity(&self) -> Option<&str> {
        self.object.identity.as_deref()
    }

    pub fn length(&self) -> Option<Duration> {
        self.object.length
    }

    pub fn rating(&self) -> Option<i32> {
        self.object.rating
    }

    /// The gain adjustment applied to the audio behind [audio_url](Self::audio_url).
    pub fn gain(&self) -> Option<&str> {
        self.object.gain.as_deref()
    }

    pub fn detail_url(&self) -> Option<&str> {
        self.object.detail_url.as_deref()
    }

    pub fn track_seo_token(&self) -> Option<&str> {
        self.object.track_seo_token.as_deref()
    }

    pub fn audio_url(&self) -> Option<&str> {
        self.object.audio_url.as_deref()
    }

    /// The playback rights for the track. These should be honored by anything playing [audio_url](Self::audio_url).
    pub fn rights(&self) -> Option<&Value> {
        self.object.rights.as_ref()
    }

    pub fn audio_encoding(&self) -> Option<&str> {
        self.object.audio_encoding.as_deref()
    }

    pub fn audio_token(&self) -> Option<&str> {
        self.object.audio_token.as_deref()
    }

    pub fn audio_receipt_url(&self) -> Option<&str> {
        self.object.audio_receipt_url.as_deref()
    }

    pub fn audio_skip_url(&self) -> Option<&str> {
        self.object.audio_skip_url.as_deref()
    }

    pub fn artist(&self) -> TrackArtist<'_> {
        TrackArtist {
            name: self.object.artist_name.as_deref(),
            music_id: self.object.artist_music_id.as_deref(),
            art: &self.object.artist_art,
            detail_url: self.object.artist_detail_url.as_deref(),
        }
    }

    pub fn album(&self) -> TrackAlbum<'_> {
        TrackAlbum {
            title: self.object.album_title.as_deref(),
            art: &self.object.album_art,
            detail_url: self.object.album_detail_url.as_deref(),
        }
    }

    pub fn track_key(&self) -> TrackKey<'_> {
        TrackKey {
            track_id: self.object.track_id.as_deref(),
            track_type: self.object.track_type.as_deref(),
            spin_id: self.object.spin_id.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT_TRACK: &str = r#"{
        "songTitle": "Song",
        "musicId": "M1",
        "trackToken": "tok",
        "trackLength": 215,
        "artistName": "Artist",
        "albumTitle": "Album",
        "albumArt": [{"url": "https://x/500W_500H.jpg", "size": 500}],
        "trackId": "TR1",
        "trackType": "Track",
        "spinId": "SP1",
        "audioReciptURL": "https://x/receipt",
        "adUrls": {"flexSkipAdUrl": "skip", "flexReplayAdUrl": "replay"},
        "rights": {"hasInteractive": true}
    }"#;

    #[test]
    fn groups_flat_fields() {
        let track = Track::new("S1", serde_json::from_str(FRAGMENT_TRACK).unwrap());

        assert_eq!(track.station_id(), "S1");
        assert_eq!(track.title(), Some("Song"));
        assert_eq!(track.length(), Some(Duration::from_secs(215)));
        assert_eq!(track.artist().name, Some("Artist"));
        assert_eq!(track.album().title, Some("Album"));
        assert_eq!(track.album().art[0].size, Some(500));
        assert_eq!(
            track.track_key(),
            TrackKey {
                track_id: Some("TR1"),
                track_type: Some("Track"),
                spin_id: Some("SP1"),
            }
        );
    }

    #[test]
    fn ad_urls_map_each_key() {
        let track = Track::new("S1", serde_json::from_str(FRAGMENT_TRACK).unwrap());

        assert_eq!(track.ad_urls().flex_skip, "skip");
        assert_eq!(track.ad_urls().flex_replay, "replay");
        assert_eq!(track.ad_urls().backstage, "");
    }

    #[test]
    fn receipt_url_accepts_both_spellings() {
        let track = Track::new("S1", serde_json::from_str(FRAGMENT_TRACK).unwrap());
        assert_eq!(track.audio_receipt_url(), Some("https://x/receipt"));

        let object: TrackObject = serde_json::from_str(r#"{"audioReceiptURL": "https://y"}"#).unwrap();
        assert_eq!(object.audio_receipt_url.as_deref(), Some("https://y"));
    }

    #[test]
    fn missing_ad_urls_are_empty() {
        let object: TrackObject = serde_json::from_str("{}").unwrap();

        assert_eq!(object.ad_urls, AdUrls::default());
        assert_eq!(object.length, None);
    }

    #[test]
    fn null_and_mistyped_fields_fall_back() {
        let object: TrackObject = serde_json::from_str(
            r#"{
                "songTitle": "Song",
                "adUrls": null,
                "genre": null,
                "artistArt": null,
                "albumArt": "none",
                "rating": "1",
                "trackLength": "215",
                "isSeed": null
            }"#,
        )
        .unwrap();

        assert_eq!(object.title.as_deref(), Some("Song"));
        assert_eq!(object.ad_urls, AdUrls::default());
        assert!(object.genres.is_empty());
        assert!(object.artist_art.is_empty());
        assert!(object.album_art.is_empty());
        assert_eq!(object.rating, None);
        assert_eq!(object.length, None);
        assert_eq!(object.seed, None);
    }
}
