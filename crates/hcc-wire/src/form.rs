// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `application/x-www-form-urlencoded` encode/decode, the wire format used
//! by every coordinator <-> snitch and CLI <-> coordinator call. Structured
//! values (JSON arrays/objects) are inlined as a JSON-encoded string field
//! rather than nested form keys, matching the original system's
//! `urllib.urlencode` + `json.dumps` combination.

use std::collections::BTreeMap;

pub type FormMap = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("malformed form field {0:?}")]
    MalformedPair(String),
    #[error("missing required field {0}")]
    MissingField(&'static str),
    #[error("field {field} is not valid JSON: {source}")]
    InvalidJson { field: &'static str, source: String },
}

pub fn form_encode(fields: &FormMap) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn form_decode(body: &str) -> Result<FormMap, FormError> {
    let mut map = FormMap::new();
    if body.is_empty() {
        return Ok(map);
    }
    for pair in body.split('&') {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next().filter(|s| !s.is_empty());
        let Some(key) = key else {
            return Err(FormError::MalformedPair(pair.to_string()));
        };
        let value = parts.next().unwrap_or("");
        let key = urlencoding::decode(key)
            .map_err(|_| FormError::MalformedPair(pair.to_string()))?
            .into_owned();
        let value = urlencoding::decode(value)
            .map_err(|_| FormError::MalformedPair(pair.to_string()))?
            .into_owned();
        map.insert(key, value);
    }
    Ok(map)
}

pub fn get_field<'a>(map: &'a FormMap, key: &'static str) -> Result<&'a str, FormError> {
    map.get(key).map(String::as_str).ok_or(FormError::MissingField(key))
}

pub fn get_json_field<T: serde::de::DeserializeOwned>(
    map: &FormMap,
    key: &'static str,
) -> Result<T, FormError> {
    let raw = get_field(map, key)?;
    serde_json::from_str(raw).map_err(|e| FormError::InvalidJson { field: key, source: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_simple_pairs() {
        let mut fields = FormMap::new();
        fields.insert("src".to_string(), "/hdfs/x".to_string());
        fields.insert("dst".to_string(), "gs://bucket/x".to_string());
        let encoded = form_encode(&fields);
        let decoded = form_decode(&encoded).unwrap();
        assert_eq!(decoded, fields);
    }

    #[test]
    fn decodes_url_escaped_values() {
        let decoded = form_decode("path=%2Fhdfs%2Fa%20b").unwrap();
        assert_eq!(decoded.get("path").unwrap(), "/hdfs/a b");
    }

    #[test]
    fn empty_body_decodes_to_empty_map() {
        assert!(form_decode("").unwrap().is_empty());
    }

    #[test]
    fn missing_field_is_an_error() {
        let map = form_decode("a=1").unwrap();
        assert_eq!(get_field(&map, "b"), Err(FormError::MissingField("b")));
    }

    #[test]
    fn json_field_parses_nested_array() {
        let map = form_decode("job_args=%5B%22a%22%2C%221%22%5D").unwrap();
        let args: Vec<String> = get_json_field(&map, "job_args").unwrap();
        assert_eq!(args, vec!["a".to_string(), "1".to_string()]);
    }
}
