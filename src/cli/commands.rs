use std::path::Path;

use crate::cli::args::Command;
use crate::cli::calculate::run_calculate_command;
use crate::error::VlsmError;

pub fn dispatch(command: &Command, config_path: Option<&Path>) -> Result<(), VlsmError> {
    match command {
        Command::Calculate {
            base,
            hosts,
            format,
        } => run_calculate_command(base, hosts, format.map(Into::into), config_path),
    }
}
