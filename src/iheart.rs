use crate::error::{Error, Result};
use crate::models::StationRecord;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://www.iheart.com/a/live/station/";
const STREAM_SUFFIX: &str = "stream/";
const MAX_BODY_BYTES: usize = 1_000_000;

/// The endpoint wants a non-empty POST body; its content is ignored.
const LOOKUP_BODY: &str = "1";

#[derive(Debug, Clone)]
pub struct IheartClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl IheartClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// `endpoint` is the station collection URL; a missing trailing slash is
    /// added so station ids join below it.
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        let mut endpoint = endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let endpoint = match Url::parse(&endpoint) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => return Err(Error::InvalidEndpoint(endpoint)),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("iheart-stream/", env!("CARGO_PKG_VERSION"))),
        );
        let http = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()?;

        Ok(Self { http, endpoint })
    }

    pub fn station_url(&self, station_id: u32) -> Url {
        station_url(&self.endpoint, station_id)
    }

    pub async fn lookup(&self, station_id: u32) -> Result<StationRecord> {
        let url = self.station_url(station_id);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(LOOKUP_BODY)
            .send()
            .await?
            .error_for_status()?;
        debug!(status = %resp.status(), "station response");

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !content_type.as_deref().is_some_and(is_json_utf8) {
            return Err(Error::UnexpectedResponseFormat { content_type });
        }

        let bytes = read_limited(resp, MAX_BODY_BYTES).await?;
        parse_station(&bytes)
    }
}

fn station_url(endpoint: &Url, station_id: u32) -> Url {
    // `endpoint` is a base URL ending in '/', joining relative segments onto it
    // cannot fail.
    endpoint
        .join(&format!("{station_id}/"))
        .and_then(|u| u.join(STREAM_SUFFIX))
        .unwrap_or_else(|_| endpoint.clone())
}

fn is_json_utf8(content_type: &str) -> bool {
    let mut parts = content_type.split(';').map(str::trim);
    let mime_ok = parts
        .next()
        .is_some_and(|m| m.eq_ignore_ascii_case("application/json"));
    let charset_ok = parts.any(|p| {
        p.split_once('=').is_some_and(|(k, v)| {
            k.trim().eq_ignore_ascii_case("charset")
                && v.trim().trim_matches('"').eq_ignore_ascii_case("utf-8")
        })
    });
    mime_ok && charset_ok
}

#[derive(Debug, Deserialize)]
struct StationStatus {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

fn parse_station(bytes: &[u8]) -> Result<StationRecord> {
    // A failed lookup may not carry a well-formed record, read the flag first.
    let status: StationStatus = serde_json::from_slice(bytes)?;
    if !status.ok {
        let message = status
            .error
            .unwrap_or_else(|| "unknown station error".to_string());
        return Err(Error::Station(message));
    }
    Ok(serde_json::from_slice(bytes)?)
}

async fn read_limited(resp: reqwest::Response, limit: usize) -> Result<Vec<u8>> {
    if let Some(len) = resp.content_length() {
        if len as usize > limit {
            return Err(Error::TooLarge(len));
        }
    }

    let mut data: Vec<u8> = Vec::new();
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if data.len().saturating_add(chunk.len()) > limit {
            return Err(Error::TooLarge((data.len() + chunk.len()) as u64));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}
