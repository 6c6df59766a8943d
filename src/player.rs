use anyhow::{anyhow, Context, Result};
use tokio::process::Command;
use tracing::info;

pub const DEFAULT_PLAYER: &str = "mpv";

fn player_argv(player: &str, url: &str) -> Result<(String, Vec<String>)> {
    let mut words = player.split_whitespace().map(str::to_string);
    let program = words
        .next()
        .ok_or_else(|| anyhow!("Player command is empty"))?;
    let mut args: Vec<String> = words.collect();
    args.push(url.to_string());
    Ok((program, args))
}

/// Runs `player` on `url` and waits for it to exit.
pub async fn play(player: &str, url: &str) -> Result<()> {
    let (program, args) = player_argv(player, url)?;
    info!(%program, %url, "starting player");
    let status = Command::new(&program)
        .args(&args)
        .kill_on_drop(true)
        .status()
        .await
        .with_context(|| format!("Failed to spawn player `{program}`"))?;
    if !status.success() {
        return Err(anyhow!("{program} exited: {status}"));
    }
    Ok(())
}
