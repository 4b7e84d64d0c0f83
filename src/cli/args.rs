//! CLI argument definitions using clap derive

use crate::cache::ExpiryPolicy;
use crate::plate::Denomination;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Rack - barbell plate calculator
///
/// Works out which plate pairs to load to reach a target weight, either
/// once from the command line or as a cached HTTP service.
#[derive(Parser, Debug)]
#[command(name = "rack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RACK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate the plates for one target weight
    Calc(CalcArgs),

    /// Run the HTTP API
    Serve(ServeArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the calc command
#[derive(Parser, Debug)]
pub struct CalcArgs {
    /// Target weight in pounds, bar included
    #[arg(allow_negative_numbers = true)]
    pub weight: i64,

    /// Bar weight (defaults to the configured bar)
    #[arg(short, long, allow_negative_numbers = true)]
    pub bar: Option<i64>,

    /// Available pairs, e.g. 45=4,25=2 (unlisted plates count as none)
    #[arg(short, long, value_delimiter = ',', value_parser = parse_plate)]
    pub plates: Vec<(Denomination, u32)>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind (defaults to config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to config)
    #[arg(short, long, env = "API_PORT")]
    pub port: Option<u16>,

    /// Cache entry lifetime: seconds or h/m/s units like 1h30m (0 or negative never expires)
    #[arg(long, env = "CACHE_TTL", allow_hyphen_values = true, value_parser = parse_ttl)]
    pub cache_ttl: Option<i64>,

    /// Cache expiry behaviour: timer or lazy
    #[arg(long)]
    pub expiry: Option<ExpiryPolicy>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for calc
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Achieved weight only
    Plain,
}

/// Parse a plate=pairs entry
fn parse_plate(s: &str) -> Result<(Denomination, u32), String> {
    let (plate, pairs) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid plate entry: {} (expected PLATE=PAIRS)", s))?;
    let denomination = plate.trim().parse::<Denomination>()?;
    let pairs = pairs
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid pair count for {}: {}", plate, pairs))?;
    Ok((denomination, pairs))
}

/// Parse a TTL as plain seconds or as `h`/`m`/`s` units (`90`, `1h`, `-1s`, `1h30m`)
fn parse_ttl(s: &str) -> Result<i64, String> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<i64>() {
        return Ok(secs);
    }

    let invalid = || format!("Invalid TTL: {} (expected seconds or a duration like 1h30m)", s);
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    if body.is_empty() {
        return Err(invalid());
    }

    let mut total: i64 = 0;
    let mut digits = String::new();
    for c in body.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid()),
        };
        let amount = digits.parse::<i64>().map_err(|_| invalid())?;
        total = amount
            .checked_mul(unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(invalid)?;
        digits.clear();
    }
    if !digits.is_empty() {
        return Err(invalid());
    }

    Ok(sign * total)
}
