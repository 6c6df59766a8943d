use crate::cli::Cli;
use crate::config::{default_config_path, AppConfig};
use crate::iheart::IheartClient;
use crate::models::StationRecord;
use crate::player::{self, DEFAULT_PLAYER};
use crate::select::StreamSelector;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Settings for one run, command line taking precedence over the config file.
#[derive(Debug, Clone)]
struct Resolved {
    selector: StreamSelector,
    player: Option<String>,
}

fn resolve(cli: &Cli, config: &AppConfig) -> Resolved {
    let selector = match &config.preference {
        Some(order) if !order.is_empty() => StreamSelector::with_preference(order.iter().copied()),
        _ => StreamSelector::default(),
    };
    let player = cli.play.then(|| {
        cli.player
            .clone()
            .or_else(|| config.player.clone())
            .unwrap_or_else(|| DEFAULT_PLAYER.to_string())
    });
    Resolved { selector, player }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config.clone() {
        Some(p) => p,
        None => default_config_path()?,
    };
    let config = AppConfig::load_from(&config_path)?;
    let settings = resolve(&cli, &config);
    let request = cli.stream_type.unwrap_or(config.stream_type);

    let client = match config.endpoint.as_deref() {
        Some(endpoint) => IheartClient::with_endpoint(endpoint)?,
        None => IheartClient::new()?,
    };
    let station = client
        .lookup(cli.station_id)
        .await
        .with_context(|| format!("Station {} lookup failed", cli.station_id))?;
    describe(&station, cli.verbose)?;

    let url = settings.selector.select(&station, request)?;
    match settings.player {
        Some(player) => player::play(&player, &url).await,
        None => {
            println!("{url}");
            Ok(())
        }
    }
}

fn describe(station: &StationRecord, verbose: u8) -> Result<()> {
    let formats: Vec<&str> = station
        .available_formats()
        .into_iter()
        .map(|f| f.short_name())
        .collect();
    info!(
        name = station.name().unwrap_or("?"),
        formats = %formats.join(","),
        "station found"
    );
    let unknown = station.unknown_stream_keys();
    if !unknown.is_empty() {
        info!(keys = %unknown.join(","), "station lists unrecognized stream types");
    }
    if verbose >= 2 {
        let dump = serde_json::to_string_pretty(station).context("Failed to dump station")?;
        debug!("station record:\n{dump}");
    }
    Ok(())
}
