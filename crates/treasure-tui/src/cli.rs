#![forbid(unsafe_code)]

//! Command-line argument parsing for the terminal page.
//!
//! Parses args manually. Supports environment variable overrides via the
//! `TREASURE_MAP_*` prefix; explicit flags win over the environment.

use std::env;
use std::fmt;
use std::process;

use treasure_core::{PageConfig, Theme};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
Treasure Map: search treasure notes over an animated particle field

USAGE:
    treasure-map [OPTIONS]

OPTIONS:
    --particles=N        Particles per field (default: 80)
    --link-distance=F    Link particles closer than F pixels (default: 100)
    --delay-ms=N         Search delay in milliseconds (default: 500)
    --seed=N             Fixed particle seed (default: random)
    --theme=THEME        Start theme: 'light' (default) or 'dark'
    --fps=N              Animation frames per second (default: 30)
    --no-mouse           Disable mouse capture (no pointer links)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    typing          Edit the search query
    Backspace       Delete the last character
    Esc             Clear the query
    Ctrl+T / F2     Toggle light/dark theme
    Ctrl+C / Ctrl+Q Quit

ENVIRONMENT VARIABLES:
    TREASURE_MAP_PARTICLES      Override --particles
    TREASURE_MAP_LINK_DISTANCE  Override --link-distance
    TREASURE_MAP_DELAY_MS       Override --delay-ms
    TREASURE_MAP_SEED           Override --seed
    TREASURE_MAP_THEME          Override --theme
    TREASURE_MAP_FPS            Override --fps
    TREASURE_MAP_LOG            Write logs to this file (filter via RUST_LOG)";

const DEFAULT_FPS: u32 = 30;

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Page tunables.
    pub page: PageConfig,
    /// Animation frame rate.
    pub fps: u32,
    /// Whether mouse events are captured.
    pub mouse: bool,
    /// Log file, when logging is enabled.
    pub log_file: Option<String>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            fps: DEFAULT_FPS,
            mouse: true,
            log_file: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// A flag or environment value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// `--flag=value` with an unparsable value.
    InvalidValue { flag: &'static str, value: String },
    /// Flag not recognized.
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

fn parse_value<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_owned(),
    })
}

fn parse_theme(flag: &'static str, value: &str) -> Result<Theme, CliError> {
    Theme::from_name(value).ok_or_else(|| CliError::InvalidValue {
        flag,
        value: value.to_owned(),
    })
}

fn parse_fps(flag: &'static str, value: &str) -> Result<u32, CliError> {
    match parse_value::<u32>(flag, value)? {
        0 => Err(CliError::InvalidValue {
            flag,
            value: value.to_owned(),
        }),
        n => Ok(n),
    }
}

impl Opts {
    /// Parse the process arguments and environment, printing help or
    /// version and exiting when asked to.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("treasure-map {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` (without the program name) with `env` as the
    /// environment lookup.
    ///
    /// Unparsable environment values are ignored; unparsable flags are
    /// errors.
    pub fn parse_from(
        args: &[String],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, CliError> {
        let mut opts = Self::default();

        // Environment first
        if let Some(val) = env("TREASURE_MAP_PARTICLES")
            && let Ok(n) = val.parse()
        {
            opts.page.particle_count = n;
        }
        if let Some(val) = env("TREASURE_MAP_LINK_DISTANCE")
            && let Ok(d) = val.parse()
        {
            opts.page.link_distance = d;
        }
        if let Some(val) = env("TREASURE_MAP_DELAY_MS")
            && let Ok(n) = val.parse()
        {
            opts.page.search_delay_ms = n;
        }
        if let Some(val) = env("TREASURE_MAP_SEED")
            && let Ok(n) = val.parse()
        {
            opts.page.seed = Some(n);
        }
        if let Some(val) = env("TREASURE_MAP_THEME")
            && let Some(theme) = Theme::from_name(&val)
        {
            opts.page.theme = theme;
        }
        if let Some(val) = env("TREASURE_MAP_FPS")
            && let Ok(n) = parse_fps("TREASURE_MAP_FPS", &val)
        {
            opts.fps = n;
        }
        opts.log_file = env("TREASURE_MAP_LOG").filter(|p| !p.is_empty());

        // Flags override env vars
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--no-mouse" => opts.mouse = false,
                other => {
                    if let Some(val) = other.strip_prefix("--particles=") {
                        opts.page.particle_count = parse_value("--particles", val)?;
                    } else if let Some(val) = other.strip_prefix("--link-distance=") {
                        opts.page.link_distance = parse_value("--link-distance", val)?;
                    } else if let Some(val) = other.strip_prefix("--delay-ms=") {
                        opts.page.search_delay_ms = parse_value("--delay-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.page.seed = Some(parse_value("--seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--theme=") {
                        opts.page.theme = parse_theme("--theme", val)?;
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = parse_fps("--fps", val)?;
                    } else {
                        return Err(CliError::UnknownArgument(other.to_owned()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}
