//! Serde helpers for optional durations the API sends as plain numbers. A value that isn't a number, or a number that
//! doesn't fit a [Duration] (negative, overflowing), becomes `None` like any other field the server didn't send
//! usefully.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

pub(crate) mod seconds {
    use serde::{Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub(crate) fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(duration) if duration.subsec_nanos() == 0 => duration.as_secs().serialize(serializer),
            Some(duration) => duration.as_secs_f64().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = super::number(deserializer)?;
        Ok(secs.and_then(super::from_secs))
    }
}

pub(crate) mod millis {
    use serde::{Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub(crate) fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(duration) => u64::try_from(duration.as_millis())
                .unwrap_or(u64::MAX)
                .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = super::number(deserializer)?;
        Ok(millis.and_then(|millis| super::from_secs(millis / 1000.0)))
    }
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn from_secs(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct Lengths {
        #[serde(with = "super::seconds")]
        secs: Option<Duration>,
        #[serde(with = "super::millis")]
        millis: Option<Duration>,
    }

    #[test]
    fn whole_and_fractional_seconds() {
        let lengths: Lengths = serde_json::from_str(r#"{"secs": 215, "millis": 1500}"#).unwrap();
        assert_eq!(lengths.secs, Some(Duration::from_secs(215)));
        assert_eq!(lengths.millis, Some(Duration::from_millis(1500)));

        let lengths: Lengths = serde_json::from_str(r#"{"secs": 1.5}"#).unwrap();
        assert_eq!(lengths.secs, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn missing_null_and_negative_are_none() {
        let lengths: Lengths = serde_json::from_str(r#"{"secs": null, "millis": -5}"#).unwrap();
        assert_eq!(lengths.secs, None);
        assert_eq!(lengths.millis, None);

        let lengths: Lengths = serde_json::from_str("{}").unwrap();
        assert_eq!(lengths.secs, None);
    }

    #[test]
    fn non_numbers_are_none() {
        let lengths: Lengths = serde_json::from_str(r#"{"secs": "215", "millis": {"value": 5}}"#).unwrap();
        assert_eq!(lengths.secs, None);
        assert_eq!(lengths.millis, None);
    }

    #[test]
    fn huge_millis_saturate() {
        let lengths = Lengths {
            secs: None,
            millis: Some(Duration::MAX),
        };

        assert_eq!(
            serde_json::to_value(&lengths).unwrap()["millis"],
            serde_json::json!(u64::MAX)
        );
    }

    #[test]
    fn whole_seconds_serialize_as_integers() {
        let lengths = Lengths {
            secs: Some(Duration::from_secs(215)),
            millis: None,
        };

        assert_eq!(
            serde_json::to_string(&lengths).unwrap(),
            r#"{"secs":215,"millis":null}"#
        );
    }
}
