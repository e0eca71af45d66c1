use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "wicket", about = "API gateway helper: token validation and a second-level cache")]
pub(crate) struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "WICKET_CONFIG", default_value = "wicket.toml")]
    pub config: PathBuf,

    /// Log filter, e.g. "info" or "auth=debug,cache=debug".
    #[arg(long = "log", env = "WICKET_LOG", default_value = "info")]
    pub log_filter: String,
}
