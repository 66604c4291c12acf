//! Terminal front end: loads a saved level response and plays it on stdin.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use moyun_core::{DifficultyTable, GameKind, PlaySession, Tick};
use moyun_protocol::{LevelRequest, LevelResponse, RetryPolicy, fetch_with_retry};

mod command;
mod source;

use command::{Command, HELP};
use source::FileSource;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Level response JSON as the level server returns it
    level_file: PathBuf,

    /// Game to play: wordFind, charDiff, poetryConnect or a display name
    #[arg(short, long)]
    game: GameKind,

    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// TOML difficulty table replacing the built-in one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout seed, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Time limit in seconds, overrides the level response
    #[arg(long)]
    time_limit: Option<u32>,

    /// Player id; prints the progress report for a solved level
    #[arg(long)]
    player: Option<String>,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn load_table(path: &PathBuf) -> Result<DifficultyTable> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading difficulty table {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing difficulty table {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let player = args.player.clone().unwrap_or_else(|| "guest".to_owned());
    let request = LevelRequest::new(args.game, args.level, player);
    let mut source = FileSource::new(&args.level_file);
    let response: LevelResponse = fetch_with_retry(
        &mut source,
        &request,
        RetryPolicy::default(),
        std::thread::sleep,
    )
    .context("loading level")?;

    let payload = response.payload(args.game)?;
    let mut options = response.session_options(args.seed)?;
    if let Some(path) = &args.config {
        options.table = load_table(path)?;
    }
    if let Some(secs) = args.time_limit {
        options.time_limit = Some(secs);
    }

    let mut session = PlaySession::new(args.game, args.level, &payload, options)?;
    log::info!("Using seed {}", session.seed());
    session.start()?;
    println!(
        "{} level {} ({})",
        session.kind().display_name(),
        session.level(),
        session.tier()
    );
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut show = true;
    loop {
        if let Tick::Expired = session.frame() {
            println!("Time is up.");
            break;
        }
        if session.state().is_finished() {
            break;
        }
        if show {
            print!("{}", session.game().draw_state().to_text());
            println!("{}s left", session.timer().remaining_secs());
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            session.abandon();
            break;
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{:#}\n{}", err, HELP);
                show = false;
                continue;
            }
        };
        show = true;
        let reply = match command {
            Command::Tap { x, y } => session.tap_point(x, y).map(|outcome| match outcome {
                Some(outcome) => format!("{:?}", outcome),
                None => "Nothing there.".to_owned(),
            }),
            Command::Select(selection) => session
                .tap(selection)
                .map(|outcome| format!("{:?}", outcome)),
            Command::Hint => session.hint().map(|hint| hint.message()),
            Command::Clear => {
                session.clear_selection();
                Ok("Selection cleared.".to_owned())
            }
            Command::Show => continue,
            Command::Quit => {
                session.abandon();
                break;
            }
        };
        match reply {
            Ok(reply) => println!("{}", reply),
            Err(err) => {
                log::debug!("Rejected {:?}: {:?}", line, err);
                println!("{}", err);
            }
        }
    }

    let result = session
        .result()
        .context("session ended without a result")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    if let Some(player) = &args.player
        && let Some(report) = session.progress_report(player)
    {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
