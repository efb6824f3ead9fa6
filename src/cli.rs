use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Launch records file (.csv, .json or .parquet); overrides the config
    #[arg(value_name = "DATA_PATH")]
    pub data_path: Option<PathBuf>,

    /// Launch site selected at startup ("ALL" for every site)
    #[arg(long, default_value = "ALL")]
    pub site: String,

    /// Path to config TOML (default: launch-dash.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
