//! Serde helpers for payload fields the server is loose about. A field that is `null` or has an unexpected type reads
//! as `None` or an empty default instead of failing the whole payload.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// For `Option<T>` fields.
pub(crate) fn none_on_error<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// For nested objects and strings that fall back to their default.
pub(crate) fn default_on_error<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// For lists. Items that don't deserialize are dropped; anything that isn't a list is an empty one.
pub(crate) fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()),

        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Inner {
        #[serde(deserialize_with = "super::default_on_error")]
        name: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Outer {
        #[serde(deserialize_with = "super::none_on_error")]
        count: Option<u32>,
        #[serde(deserialize_with = "super::default_on_error")]
        inner: Inner,
        #[serde(deserialize_with = "super::skip_invalid")]
        list: Vec<u32>,
    }

    #[test]
    fn well_formed_values_pass_through() {
        let outer: Outer = serde_json::from_str(r#"{"count": 3, "inner": {"name": "a"}, "list": [1, 2]}"#).unwrap();

        assert_eq!(outer.count, Some(3));
        assert_eq!(outer.inner.name, "a");
        assert_eq!(outer.list, [1, 2]);
    }

    #[test]
    fn nulls_become_defaults() {
        let outer: Outer = serde_json::from_str(r#"{"count": null, "inner": null, "list": null}"#).unwrap();

        assert_eq!(outer.count, None);
        assert_eq!(outer.inner, Inner::default());
        assert!(outer.list.is_empty());
    }

    #[test]
    fn mistyped_values_become_defaults() {
        let outer: Outer =
            serde_json::from_str(r#"{"count": "3", "inner": {"name": 7}, "list": [1, "two", null, 3]}"#).unwrap();

        assert_eq!(outer.count, None);
        assert_eq!(outer.inner.name, "");
        assert_eq!(outer.list, [1, 3]);

        let outer: Outer = serde_json::from_str(r#"{"count": -1, "inner": [], "list": {}}"#).unwrap();
        assert_eq!(outer.count, None);
        assert_eq!(outer.inner, Inner::default());
        assert!(outer.list.is_empty());
    }
}
