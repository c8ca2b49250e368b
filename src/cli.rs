//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use fmpd_core::user_agent::DEFAULT_USER_AGENT;

/// Default cookie jar path.
pub const DEFAULT_COOKIES_FILE: &str = "cookies.txt";

/// Default file name template: the identifier plus `.jpg`.
pub const DEFAULT_NAME_TEMPLATE: &str = "f.jpg";

/// Download full-size pictures from the photo host by identifier.
///
/// Identifiers are taken from the arguments; a `-` argument also reads one
/// identifier per line from standard input. Blank lines and lines starting
/// with `#` are ignored.
///
/// Name templates: `f` is the identifier, `i`-runs count from the first
/// duplicate name, `I`-runs count from the first picture, date tokens
/// (`yyyy MM dd HH mm ss` ...) use the picture's Last-Modified time, and text
/// in single quotes is kept as is.
#[derive(Parser, Debug)]
#[command(name = "fmpd")]
#[command(author, version, about)]
pub struct Args {
    /// Picture identifiers; `-` reads more from stdin
    #[arg(value_name = "ID")]
    pub identifiers: Vec<String>,

    /// User-Agent sent with every request
    #[arg(short, long, default_value = DEFAULT_USER_AGENT, hide_default_value = true)]
    pub agent: String,

    /// Netscape cookie jar holding the session cookies
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_COOKIES_FILE)]
    pub cookies_file: PathBuf,

    /// File name template
    #[arg(short, long, value_name = "TEMPLATE", default_value = DEFAULT_NAME_TEMPLATE)]
    pub name: String,

    /// Do not print written paths or timestamp fallbacks
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory file names are resolved against
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Give up on a name after this many ordinals (default: never)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_ordinal: Option<u64>,

    /// Skip pictures whose download fails instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
