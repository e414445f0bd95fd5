use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use crate::core::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "vlsm",
    version,
    about = "VLSM subnet calculator for IPv4 and IPv6",
    long_about = "Carve variable-length subnets out of one IPv4 or IPv6 base block.\n\nRequests are placed largest first, back to back from the start of the base block."
)]
pub struct Cli {
    #[arg(
        long = "log-level",
        value_enum,
        default_value_t = LogLevel::Warn,
        global = true,
        help = "Set stderr log verbosity"
    )]
    pub log_level: LogLevel,

    #[arg(
        long = "config",
        value_name = "PATH",
        global = true,
        help = "TOML config file (defaults to $VLSM_CONFIG, then built-in defaults)"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(
        about = "Allocate subnets for a list of host requirements",
        long_about = "Allocate one subnet per host requirement inside BASE_CIDR.\n\nHost requirements may be given as one comma separated argument (`100,50,20,10`) or as several arguments. Results are listed largest first, not in input order."
    )]
    Calculate {
        #[arg(value_name = "BASE_CIDR", help = "Base IPv4/IPv6 block, e.g. 192.168.1.0/24")]
        base: String,

        #[arg(
            value_name = "HOSTS",
            required = true,
            num_args = 1..,
            allow_negative_numbers = true,
            help = "Required host counts, comma separated or as separate arguments"
        )]
        hosts: Vec<String>,

        #[arg(
            long,
            value_enum,
            help = "Output format (overrides `output.format` from the config)"
        )]
        format: Option<FormatArg>,
    },
}
