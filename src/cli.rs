//! Command-line arguments for the `wordfall` binary.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DEFAULT_DECK_PATH: &str = "deck.json";
pub const DEFAULT_PROGRESS_PATH: &str = "progress.json";

pub const USAGE: &str = "\
usage: wordfall [play|packages|help] [options]

  play        play one package (default)
  packages    list packages with mastery and lock state

options:
  --deck <path>       deck file (default: deck.json)
  --progress <path>   progress file (default: progress.json)
  --package <id>      package to play (play only; default: newest unlocked)
  --hard              show translations and award hard-mode XP (play only)
  --seed <n>          shuffle seed (play only; default: clock)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayArgs {
    pub deck: PathBuf,
    pub progress: PathBuf,
    pub package: Option<String>,
    pub hard: bool,
    pub seed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagesArgs {
    pub deck: PathBuf,
    pub progress: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(PlayArgs),
    Packages(PackagesArgs),
    Help,
}

/// Parse arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let (name, rest) = match args.first().map(String::as_str) {
        None => ("play", args),
        Some("help" | "--help" | "-h") => return Ok(Command::Help),
        Some(cmd @ ("play" | "packages")) => (cmd, &args[1..]),
        Some(flag) if flag.starts_with("--") => ("play", args),
        Some(other) => return Err(anyhow!("unknown command: {}", other)),
    };

    let mut deck = PathBuf::from(DEFAULT_DECK_PATH);
    let mut progress = PathBuf::from(DEFAULT_PROGRESS_PATH);
    let mut package = None;
    let mut hard = false;
    let mut seed = None;

    let mut i = 0usize;
    while i < rest.len() {
        let flag = rest[i].as_str();
        let play_only = matches!(flag, "--package" | "--hard" | "--seed");
        if play_only && name != "play" {
            return Err(anyhow!("{}: {} is only valid for play", name, flag));
        }
        match flag {
            "--deck" => {
                i += 1;
                deck = PathBuf::from(value(rest, i, name, flag)?);
            }
            "--progress" => {
                i += 1;
                progress = PathBuf::from(value(rest, i, name, flag)?);
            }
            "--package" => {
                i += 1;
                package = Some(value(rest, i, name, flag)?.to_string());
            }
            "--hard" => hard = true,
            "--seed" => {
                i += 1;
                let v = value(rest, i, name, flag)?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("{}: invalid --seed value: {}", name, v))?,
                );
            }
            other => return Err(anyhow!("{}: unknown argument: {}", name, other)),
        }
        i += 1;
    }

    Ok(match name {
        "packages" => Command::Packages(PackagesArgs { deck, progress }),
        _ => Command::Play(PlayArgs {
            deck,
            progress,
            package,
            hard,
            seed,
        }),
    })
}

fn value<'a>(args: &'a [String], i: usize, cmd: &str, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{}: missing value for {}", cmd, flag))
}
