//! Look up iHeartRadio stations and pick a playable stream URL.
//!
//! ```no_run
//! # async fn demo() -> iheart_stream::Result<()> {
//! use iheart_stream::{lookup, select_stream, StreamRequest};
//!
//! let station = lookup(1165).await?;
//! let url = select_stream(&station, StreamRequest::Auto)?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod iheart;
pub mod models;
pub mod player;
pub mod select;

pub use error::{Error, Result};
pub use iheart::IheartClient;
pub use models::{StationRecord, StreamFormat, StreamRequest};
pub use select::{select_stream, StreamSelector, StreamWarning, AUTO_PREFERENCE};

pub async fn lookup(station_id: u32) -> Result<StationRecord> {
    IheartClient::new()?.lookup(station_id).await
}
