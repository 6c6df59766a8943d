use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StreamFormat {
    Shout,
    Pls,
    Rtmp,
    // StreamTheWorld, not known to work in common players
    Stw,
}

impl StreamFormat {
    pub const ALL: [StreamFormat; 4] = [
        StreamFormat::Shout,
        StreamFormat::Pls,
        StreamFormat::Rtmp,
        StreamFormat::Stw,
    ];

    pub fn key(self) -> &'static str {
        match self {
            StreamFormat::Shout => "shoutcast_stream",
            StreamFormat::Pls => "pls_stream",
            StreamFormat::Rtmp => "secure_rtmp_stream",
            StreamFormat::Stw => "stw_stream",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            StreamFormat::Shout => "shout",
            StreamFormat::Pls => "pls",
            StreamFormat::Rtmp => "rtmp",
            StreamFormat::Stw => "stw",
        }
    }

    pub fn is_reliable(self) -> bool {
        self != StreamFormat::Stw
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stream type `{0}` (expected auto, shout, pls, rtmp or stw)")]
pub struct UnknownStreamType(pub String);

impl FromStr for StreamFormat {
    type Err = UnknownStreamType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.short_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStreamType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StreamRequest {
    #[default]
    Auto,
    Format(StreamFormat),
}

impl FromStr for StreamRequest {
    type Err = UnknownStreamType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(StreamRequest::Auto);
        }
        s.parse().map(StreamRequest::Format)
    }
}

impl TryFrom<String> for StreamFormat {
    type Error = UnknownStreamType;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StreamFormat> for String {
    fn from(f: StreamFormat) -> Self {
        f.short_name().to_string()
    }
}

impl TryFrom<String> for StreamRequest {
    type Error = UnknownStreamType;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StreamRequest> for String {
    fn from(r: StreamRequest) -> Self {
        match r {
            StreamRequest::Auto => "auto".to_string(),
            StreamRequest::Format(f) => f.short_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub streams: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StationRecord {
    /// URL for `format`, or `None` when the key is missing or its value is
    /// blank, null or not a string.
    pub fn stream(&self, format: StreamFormat) -> Option<&str> {
        self.streams
            .get(format.key())
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn available_formats(&self) -> Vec<StreamFormat> {
        StreamFormat::ALL
            .into_iter()
            .filter(|f| self.stream(*f).is_some())
            .collect()
    }

    pub fn unknown_stream_keys(&self) -> Vec<&str> {
        self.streams
            .keys()
            .map(String::as_str)
            .filter(|k| StreamFormat::from_key(k).is_none())
            .collect()
    }

    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_station_record() {
        let body = r#"{
            "ok": true,
            "name": "WOOD Radio",
            "streams": {
                "shoutcast_stream": "http://example.com/wood.mp3",
                "secure_rtmp_stream": "rtmp://example.com/wood"
            },
            "stream_urls": {"rtmp": null, "http": ""}
        }"#;
        let rec: StationRecord = serde_json::from_str(body).unwrap();
        assert!(rec.ok);
        assert_eq!(rec.name(), Some("WOOD Radio"));
        assert_eq!(
            rec.stream(StreamFormat::Shout),
            Some("http://example.com/wood.mp3")
        );
        assert_eq!(rec.stream(StreamFormat::Pls), None);
        assert_eq!(
            rec.available_formats(),
            vec![StreamFormat::Shout, StreamFormat::Rtmp]
        );
        assert!(rec.extra.contains_key("stream_urls"));
    }

    #[test]
    fn empty_and_null_streams_are_unavailable() {
        let body = r#"{"ok":true,"streams":{"pls_stream":"","stw_stream":null,"shoutcast_stream":false}}"#;
        let rec: StationRecord = serde_json::from_str(body).unwrap();
        assert!(rec.available_formats().is_empty());
    }

    #[test]
    fn missing_streams_defaults_to_empty() {
        let rec: StationRecord = serde_json::from_str(r#"{"ok":false,"error":"bad id"}"#).unwrap();
        assert!(!rec.ok);
        assert_eq!(rec.error.as_deref(), Some("bad id"));
        assert!(rec.streams.is_empty());
    }

    #[test]
    fn reports_unknown_stream_keys() {
        let body = r#"{"ok":true,"streams":{"hls_stream":"http://x/y.m3u8","pls_stream":"http://x/y.pls"}}"#;
        let rec: StationRecord = serde_json::from_str(body).unwrap();
        assert_eq!(rec.unknown_stream_keys(), vec!["hls_stream"]);
    }

    #[test]
    fn null_streams_decode_as_empty() {
        let rec: StationRecord = serde_json::from_str(r#"{"ok":true,"streams":null}"#).unwrap();
        assert!(rec.streams.is_empty());
        assert!(rec.available_formats().is_empty());
    }

    #[test]
    fn stream_url_is_returned_as_stored() {
        let rec: StationRecord =
            serde_json::from_str(r#"{"ok":true,"streams":{"shoutcast_stream":" http://a/s "}}"#)
                .unwrap();
        assert_eq!(rec.stream(StreamFormat::Shout), Some(" http://a/s "));
    }

    #[test]
    fn formats_deserialize_case_insensitively() {
        let formats: Vec<StreamFormat> = serde_json::from_str(r#"["PLS","Shout","rtmp"]"#).unwrap();
        assert_eq!(
            formats,
            vec![StreamFormat::Pls, StreamFormat::Shout, StreamFormat::Rtmp]
        );
        assert!(serde_json::from_str::<StreamFormat>(r#""auto""#).is_err());
        assert_eq!(serde_json::to_string(&StreamFormat::Stw).unwrap(), r#""stw""#);
    }

    #[test]
    fn parses_stream_requests() {
        assert_eq!("auto".parse::<StreamRequest>().unwrap(), StreamRequest::Auto);
        assert_eq!(
            "rtmp".parse::<StreamRequest>().unwrap(),
            StreamRequest::Format(StreamFormat::Rtmp)
        );
        assert_eq!(
            "SHOUT".parse::<StreamRequest>().unwrap(),
            StreamRequest::Format(StreamFormat::Shout)
        );
        assert!("hls".parse::<StreamRequest>().is_err());
    }

    #[test]
    fn short_names_map_to_stream_keys() {
        assert_eq!(StreamFormat::Rtmp.key(), "secure_rtmp_stream");
        assert_eq!(StreamFormat::Shout.key(), "shoutcast_stream");
        assert_eq!(StreamFormat::Stw.key(), "stw_stream");
        assert_eq!(StreamFormat::Pls.key(), "pls_stream");
        assert_eq!(StreamFormat::from_key("pls_stream"), Some(StreamFormat::Pls));
    }
}
