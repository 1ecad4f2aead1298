//! Conversion from plain string maps to the transport's header type.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Error, Result};

/// Convert a string-to-string map into a [`HeaderMap`].
///
/// Each key is set exactly once (overwrite, not append). `None` yields an
/// empty header set. Header names are case-normalized by the underlying
/// container; invalid names or values fail with [`Error::Build`] rather
/// than being silently dropped.
pub fn to_header_map(map: Option<&HashMap<String, String>>) -> Result<HeaderMap> {
    let Some(map) = map else {
        return Ok(HeaderMap::new());
    };
    let mut headers = HeaderMap::with_capacity(map.len());
    for (name, value) in map {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| Error::build(format!("invalid header name {name:?}: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| Error::build(format!("invalid header value for {name:?}: {err}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_entries_and_normalizes_name_case() {
        let mut map = HashMap::new();
        map.insert("X-Request-Id".to_string(), "abc123".to_string());
        map.insert("accept".to_string(), "application/json".to_string());

        let headers = to_header_map(Some(&map)).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("x-request-id").unwrap(), "abc123");
        assert_eq!(headers.get("Accept").unwrap(), "application/json");
    }

    #[test]
    fn absent_map_yields_empty_set() {
        assert!(to_header_map(None).unwrap().is_empty());
    }

    #[test]
    fn each_key_is_set_exactly_once() {
        let mut map = HashMap::new();
        map.insert("accept".to_string(), "text/plain".to_string());
        let headers = to_header_map(Some(&map)).unwrap();
        assert_eq!(headers.get_all("accept").iter().count(), 1);
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let mut map = HashMap::new();
        map.insert("bad header".to_string(), "x".to_string());
        assert!(matches!(
            to_header_map(Some(&map)),
            Err(Error::Build(_))
        ));
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let mut map = HashMap::new();
        map.insert("x-note".to_string(), "line\nbreak".to_string());
        assert!(matches!(
            to_header_map(Some(&map)),
            Err(Error::Build(_))
        ));
    }
}
