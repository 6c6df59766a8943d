use crate::models::StreamRequest;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Look up an iHeartRadio station and print (or play) its stream URL.
#[derive(Debug, Clone, Parser)]
#[command(name = "iheart-stream", version)]
pub struct Cli {
    /// Numeric station id, e.g. 1165.
    pub station_id: u32,

    /// Stream type: auto, shout, pls, rtmp or stw.
    #[arg(short = 't', long)]
    pub stream_type: Option<StreamRequest>,

    /// More output; -vv also dumps the station record.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Launch the player instead of printing the URL.
    #[arg(short, long)]
    pub play: bool,

    /// Player command line, the URL is appended.
    #[arg(long)]
    pub player: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
