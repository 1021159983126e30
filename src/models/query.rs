use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{FieldToolsError, Result};

/// Characters left unescaped when re-encoding keys and values.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'/');

/// Key/value pairs of an HTTP query string (the part of a URL after `?`).
///
/// ```
/// use fieldtools::models::HttpQuery;
///
/// let query: HttpQuery = "a=b&c=3&4=20".parse().unwrap();
/// assert_eq!(query.get("c"), Some("3"));
/// assert_eq!(query.to_string(), "4=20&a=b&c=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HttpQuery {
    pairs: BTreeMap<String, String>,
}

impl HttpQuery {
    pub fn parse(query: &str) -> Result<Self> {
        if query.is_empty() {
            return Err(FieldToolsError::InvalidQuery("query is empty".to_string()));
        }

        let mut pairs = BTreeMap::new();
        for item in query.split('&') {
            let parts: Vec<&str> = item.split('=').collect();
            if parts.len() != 2 {
                return Err(FieldToolsError::InvalidQuery(format!(
                    "'{}' in '{}' is not a key=value pair",
                    item, query
                )));
            }
            pairs.insert(decode(parts[0])?, decode(parts[1])?);
        }

        Ok(Self { pairs })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.pairs.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.pairs
    }
}

fn decode(component: &str) -> Result<String> {
    percent_decode_str(component)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| {
            FieldToolsError::InvalidQuery(format!("'{}' is not valid UTF-8: {}", component, e))
        })
}

impl FromStr for HttpQuery {
    type Err = FieldToolsError;

    fn from_str(s: &str) -> Result<Self> {
        HttpQuery::parse(s)
    }
}

impl fmt::Display for HttpQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )?;
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for HttpQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_pairs() {
        let query = HttpQuery::parse("a=b&c=3&4=20").unwrap();
        assert_eq!(query.len(), 3);
        assert_eq!(query.get("a"), Some("b"));
        assert_eq!(query.get("c"), Some("3"));
        assert_eq!(query.get("4"), Some("20"));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn test_percent_decoding() {
        let query = HttpQuery::parse("name=New%20York&path=%2Fdata%2Fx&plus=a+b").unwrap();
        assert_eq!(query.get("name"), Some("New York"));
        assert_eq!(query.get("path"), Some("/data/x"));
        assert_eq!(query.get("plus"), Some("a+b"));
    }

    #[test]
    fn test_empty_values_allowed() {
        let query = HttpQuery::parse("a=&=b").unwrap();
        assert_eq!(query.get("a"), Some(""));
        assert_eq!(query.get(""), Some("b"));
    }

    #[test]
    fn test_invalid_queries() {
        assert!(HttpQuery::parse("").is_err());
        assert!(HttpQuery::parse("novalue").is_err());
        assert!(HttpQuery::parse("a=b&").is_err());
        assert!(HttpQuery::parse("a=b=c").is_err());
        assert!(HttpQuery::parse("bad=%FF").is_err());
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let query = HttpQuery::parse("a=1&a=2").unwrap();
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("a"), Some("2"));
    }

    #[test]
    fn test_display_round_trip() {
        let text = "city=S%C3%A3o%20Paulo&dir=/tmp/a.b&q=a%26b%3Dc";
        let query = HttpQuery::parse(text).unwrap();
        assert_eq!(query.get("q"), Some("a&b=c"));
        assert_eq!(query.to_string(), text);
        assert_eq!(HttpQuery::parse(&query.to_string()).unwrap(), query);
    }

    #[test]
    fn test_build_from_pairs() {
        let mut query: HttpQuery = vec![("b".to_string(), "2".to_string())]
            .into_iter()
            .collect();
        query.insert("a", "x y");
        assert_eq!(query.to_string(), "a=x%20y&b=2");

        let pairs = query.into_inner();
        assert_eq!(pairs.get("a").map(String::as_str), Some("x y"));
        assert_eq!(pairs.len(), 2);
    }
}
