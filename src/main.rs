#![forbid(unsafe_code)]

mod host;
mod options;
mod orchestrator;
mod replay;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use minroob_field::Strategy;
use std::io::stdout;
use std::time::Duration;

use crate::host::ReplayHost;
use crate::orchestrator::{Config, Orchestrator};

fn parse_capacity(s: &str) -> Result<usize, &'static str> {
    let n = s.parse().map_err(|_| "invalid number")?;
    if n == 0 {
        return Err("at least one game has to fit");
    }
    Ok(n)
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(
        help = "Recorded game message updates to play through.",
        env = "MINROOB_REPLAY",
    )]
    replay: std::path::PathBuf,
    #[arg(long, short, env = "MINROOB_NAME", help = "Our display name, as the turn indicators show it.")]
    name: String,
    #[arg(long, default_value = "minroobot", help = "Only messages sent via this bot are games.")]
    bot: String,
    #[arg(long, short, default_value = "densest", value_enum)]
    strategy: Strategy,
    #[arg(long, short, default_value = "1000", help = "Milliseconds to wait before every click.")]
    delay: u64,
    #[arg(long, short, default_value = "0", help = "Up to this many extra milliseconds are added to each wait.")]
    jitter: u64,
    #[arg(long, default_value = "64", help = "Games to keep track of at once.", value_parser = parse_capacity)]
    max_sessions: usize,
    #[arg(long, help = "Draw the board after every update.")]
    show: bool,
    #[arg(long, short, default_value = "frappe", value_enum)]
    theme: options::ThemeChoice,
    #[arg(long, short, default_value = "unicode", value_enum)]
    iconset: options::IconSetChoice,
    #[arg(long, short, help = "Log every update, not just clicks.")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    let text = std::fs::read_to_string(&args.replay)
        .with_context(|| format!("couldn't read {}", args.replay.display()))?;
    let updates = replay::parse(&text).with_context(|| format!("in {}", args.replay.display()))?;

    let theme = args.theme.theme();
    let icons = args.iconset.iconset();
    let mut orchestrator = Orchestrator::new(Config {
        first_name: args.name,
        bot: args.bot,
        strategy: args.strategy,
        delay: Duration::from_millis(args.delay),
        jitter: Duration::from_millis(args.jitter),
        max_sessions: args.max_sessions,
    });
    let mut host = ReplayHost::new(stdout()).with_join_timeouts(replay::join_timeouts(&updates));

    for update in &updates {
        orchestrator.handle(update, &mut host)?;
        if args.show {
            if let Some(game) = orchestrator.sessions().get(update.message) {
                let chosen = game.board().choose(args.strategy).ok().map(|c| c.position());
                ui::show_board(&mut stdout(), game.board(), chosen, &theme, &icons)?;
            }
        }
    }

    Ok(())
}
