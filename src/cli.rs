//! CLI definitions for automouse
//!
//! The clap structure lives in the library so tests and completion generation
//! can reach it without going through main.rs.

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Version string including the git revision when the build had one.
pub fn version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !sha.is_empty() && sha != "unknown" => {
            format!("{} ({})", env!("CARGO_PKG_VERSION"), sha)
        }
        _ => env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Parser)]
#[command(name = "automouse")]
#[command(about = "[ automouse ] - record mouse movements and clicks, then replay them")]
#[command(
    long_about = "automouse - record mouse movements and clicks, then replay them.

A single recording is kept in a JSON file (by default
<data dir>/automouse/recording.json). Each new recording replaces it.

QUICK START:
    automouse record                 Record until Enter or Ctrl+C
    automouse play -n 3              Replay the recording three times
    automouse play --dry-run         Print what would be replayed
    automouse status                 Show what is stored"
)]
#[command(version = version())]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this recording file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record mouse input until Enter or Ctrl+C
    #[command(long_about = "Capture pointer moves and button presses/releases.

Recording stops when you press Enter in the terminal or hit Ctrl+C. The
captured events replace the stored recording. A recording with no events
is not saved.

EXAMPLES:
    automouse record                     Record until Enter
    automouse record --trim-last-click   Drop the click used to stop")]
    Record {
        /// Drop the final click and the last moments before it
        #[arg(long, help = "Drop the last click and the trailing window before it")]
        trim_last_click: bool,
    },

    /// Replay the stored recording
    #[command(long_about = "Replay the stored recording with its original timing.

Each iteration replays every event; a short pause separates iterations.
Failed events are skipped and reported unless --strict is set.
Ctrl+C stops playback after the current event.

EXAMPLES:
    automouse play                       Replay once
    automouse play -n 5                  Replay five times
    automouse play --delay 0             Start immediately
    automouse play --dry-run             Log actions instead of moving the mouse")]
    Play {
        /// Number of iterations
        #[arg(short = 'n', long, default_value_t = 1, help = "How many times to replay")]
        repeat: u32,
        /// Log actions instead of injecting input
        #[arg(long, help = "Print actions instead of moving the mouse")]
        dry_run: bool,
        /// Seconds to wait before the first event
        #[arg(long, value_name = "SECS", help = "Countdown before playback (overrides config)")]
        delay: Option<f64>,
        /// Abort on the first failed event
        #[arg(long, help = "Abort instead of skipping events that fail")]
        strict: bool,
    },

    /// Show the stored recording
    #[command(long_about = "Show where the recording lives and what it contains.

EXAMPLE:
    automouse status

OUTPUT:
    Recording: /home/me/.local/share/automouse/recording.json
       Events: 214 (208 moves, 3 clicks)
       Duration: 12.40s")]
    Status,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Print a completion script for the given shell.

EXAMPLE:
    automouse completions zsh > ~/.zfunc/_automouse")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

EXAMPLE:
    automouse config show")]
    Show,
    /// Print the configuration file path
    #[command(long_about = "Print where the configuration file is read from.

Config file location: ~/.config/automouse/config.toml

EXAMPLE:
    automouse config path")]
    Path,
    /// Write the default configuration file
    #[command(long_about = "Write a config file with every default filled in.

An existing file is left untouched unless --force is given.

EXAMPLE:
    automouse config init")]
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
