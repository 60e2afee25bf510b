use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "delfos", about = "Serve the delfos trivia api")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    Run(Run),
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[arg(
        short,
        long,
        help = "Directory holding the question bank profile documents"
    )]
    pub(crate) bank: PathBuf,

    #[arg(
        short,
        long,
        default_value = "data",
        help = "Directory for session records and the winner ledger"
    )]
    pub(crate) data_dir: PathBuf,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Allowed CORS origins, every origin is allowed when empty"
    )]
    pub(crate) origins: Vec<String>,

    #[arg(long, default_value = "dev", help = "Environment name used in logs")]
    pub(crate) env: String,
}
