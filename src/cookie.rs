//! A minimal cookie jar.
//!
//! Only names and values are kept. Attributes such as `Path`, `Expires` or `HttpOnly` in `Set-Cookie` headers are
//! dropped; the API binds its session with a handful of plain cookies and nothing here needs more than that.

use crate::{collection::Collection, util::maybe_split_once::MaybeSplitOnce};
use log::trace;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Collection<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the cookies from zero or more `Set-Cookie` header values into the jar. A cookie that already exists has
    /// its value overwritten, so after this the jar holds the last value seen for every name.
    pub fn set<'a, I>(&mut self, header_lines: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in header_lines {
            match parse_set_cookie(line) {
                Some((name, value)) => {
                    trace!("Setting cookie {name}");
                    self.cookies.set(name.to_owned(), value.to_owned());
                }

                None => trace!("Ignoring malformed Set-Cookie line: {line:?}"),
            }
        }
    }

    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<String>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.cookies.set(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The value for a `Cookie` request header carrying every cookie in the jar.
    pub fn serialize(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<'a> FromIterator<&'a str> for CookieJar {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut jar = Self::new();
        jar.set(iter);
        jar
    }
}

/// Returns the name and value from a `Set-Cookie` header value, or None if its first segment isn't a `name=value`
/// pair with a nonempty name.
fn parse_set_cookie(line: &str) -> Option<(&str, &str)> {
    let (pair, _attributes) = line.maybe_split_once(';');
    let (name, value) = pair.maybe_split_once('=');

    let name = name.trim();
    let value = value?.trim();

    if name.is_empty() {
        return None;
    }

    let value = value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value);

    Some((name, value))
}
