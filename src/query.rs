//! URL resolution: merge query parameters into a URL string.
//!
//! The resolver takes a URL (or a bare host/path reference like
//! `www.example.com`) and a set of query parameters, sets each parameter
//! into the existing query string, and re-serializes. Output ordering is
//! canonical (keys sorted lexicographically), so identical inputs always
//! produce identical strings.

use std::collections::{BTreeMap, HashMap};

use url::form_urlencoded;
use url::Url;

use crate::error::{Error, Result};

/// Merge `parameters` into the query string of `url_string`.
///
/// Each parameter key is **set** (overwriting any existing value for that
/// key); existing keys not present in `parameters` are kept, multi-value
/// keys included. The full query is re-encoded with standard
/// `application/x-www-form-urlencoded` percent-escaping, keys in sorted
/// order.
///
/// Fails with [`Error::UrlParse`] when `url_string` is not a valid URL or
/// URL-ish reference.
pub fn resolve(url_string: &str, parameters: Option<&HashMap<String, String>>) -> Result<String> {
    // Absolute URLs must parse. A scheme-less reference such as
    // "www.example.com" is accepted verbatim; the transport decides later
    // whether it can actually be requested.
    match Url::parse(url_string) {
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {}
        Err(err) => return Err(Error::UrlParse(err)),
    }

    // The query sits between the first '?' and the fragment.
    let (without_fragment, fragment) = match url_string.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url_string, None),
    };
    let (head, existing) = match without_fragment.split_once('?') {
        Some((head, query)) => (head, Some(query)),
        None => (without_fragment, None),
    };

    let mut pairs: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(query) = existing {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            pairs
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
    }
    if let Some(parameters) = parameters {
        // Set semantics: the whole value list for the key is replaced.
        for (key, value) in parameters {
            pairs.insert(key.clone(), vec![value.clone()]);
        }
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in &pairs {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    let query = serializer.finish();

    let mut resolved = String::with_capacity(url_string.len() + query.len() + 2);
    resolved.push_str(head);
    if !query.is_empty() {
        resolved.push('?');
        resolved.push_str(&query);
    }
    if let Some(fragment) = fragment {
        resolved.push('#');
        resolved.push_str(fragment);
    }
    Ok(resolved)
}
