use crate::error::{Error, Result};
use crate::models::{StationRecord, StreamFormat, StreamRequest};
use std::fmt;
use tracing::{info, warn};

pub const AUTO_PREFERENCE: [StreamFormat; 4] = [
    StreamFormat::Shout,
    StreamFormat::Pls,
    StreamFormat::Rtmp,
    StreamFormat::Stw,
];

/// Non-fatal notices raised while picking a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamWarning {
    UnreliableFormat(StreamFormat),
    NoReliableFormat,
}

impl fmt::Display for StreamWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamWarning::UnreliableFormat(format) => {
                write!(f, "using {format}, this stream type is not known to work anywhere")
            }
            StreamWarning::NoReliableFormat => {
                f.write_str("station has no recognized reliable stream type")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSelector {
    preference: Vec<StreamFormat>,
}

impl Default for StreamSelector {
    fn default() -> Self {
        Self {
            preference: AUTO_PREFERENCE.to_vec(),
        }
    }
}

impl StreamSelector {
    /// Duplicates in `preference` are dropped, keeping the first occurrence.
    pub fn with_preference(preference: impl IntoIterator<Item = StreamFormat>) -> Self {
        let mut order: Vec<StreamFormat> = Vec::new();
        for format in preference {
            if !order.contains(&format) {
                order.push(format);
            }
        }
        Self { preference: order }
    }

    pub fn preference(&self) -> &[StreamFormat] {
        &self.preference
    }

    pub fn select(&self, station: &StationRecord, request: StreamRequest) -> Result<String> {
        self.select_with(station, request, |w| warn!("{w}"))
    }

    /// Like [`select`](Self::select), but hands warnings to `on_warning`.
    pub fn select_with<F>(
        &self,
        station: &StationRecord,
        request: StreamRequest,
        mut on_warning: F,
    ) -> Result<String>
    where
        F: FnMut(StreamWarning),
    {
        match request {
            StreamRequest::Auto => {
                let Some((format, url)) = self
                    .preference
                    .iter()
                    .find_map(|f| station.stream(*f).map(|url| (*f, url)))
                else {
                    on_warning(StreamWarning::NoReliableFormat);
                    return Err(Error::NoSuchStream);
                };
                info!("stream type auto: using {format}");
                if !format.is_reliable() {
                    on_warning(StreamWarning::UnreliableFormat(format));
                }
                Ok(url.to_string())
            }
            StreamRequest::Format(format) => {
                if !format.is_reliable() {
                    on_warning(StreamWarning::UnreliableFormat(format));
                }
                station
                    .stream(format)
                    .map(str::to_string)
                    .ok_or(Error::NoSuchStream)
            }
        }
    }
}

pub fn select_stream(station: &StationRecord, request: StreamRequest) -> Result<String> {
    StreamSelector::default().select(station, request)
}
