//! Typed mirrors of the API's payloads.
//!
//! Each payload has an `*Object` struct whose serde attributes are its field mapping: the Rust field is what the
//! library calls the value and the `rename` is the key the server sends it under. Every field is optional, so a
//! payload missing fields still deserializes; the missing values are `None` or an empty default. The same goes for
//! fields that are `null` or of an unexpected type, and list entries that can't be read are dropped.
//!
//! The domain types ([User](user::User), [Station](station::Station), [Track](track::Track)) wrap those objects and add
//! the calls that fetch related data.

pub mod station;
pub mod track;
pub mod user;

use crate::util::lenient;
use serde::{Deserialize, Serialize};

/// A piece of art, such as a station's cover or an album's artwork, in one size.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Art {
    #[serde(deserialize_with = "lenient::none_on_error")]
    pub url: Option<String>,
    /// Width and height of the square image in pixels.
    #[serde(deserialize_with = "lenient::none_on_error")]
    pub size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn art_tolerates_missing_fields() {
        let art: Vec<Art> = serde_json::from_str(r#"[{"url": "https://x/500W_500H.jpg", "size": 500}, {}]"#).unwrap();

        assert_eq!(art[0].size, Some(500));
        assert_eq!(art[1], Art::default());
    }
}
