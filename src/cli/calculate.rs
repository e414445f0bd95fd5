use std::fmt::Write as _;
use std::path::Path;

use log::info;
use serde_json::json;

use crate::adapters::config::load_config;
use crate::core::allocator::{calculate_vlsm, parse_host_counts};
use crate::core::config::{LimitsConfig, OutputFormat};
use crate::core::subnet::{NOT_APPLICABLE, SubnetDescriptor};
use crate::error::VlsmError;

const TABLE_HEADER: &str = "hosts\tnetwork\tprefix\tmask\tfirst_usable\tlast_usable\tbroadcast";

#[allow(clippy::print_stdout)]
pub fn run_calculate_command(
    base: &str,
    hosts: &[String],
    format: Option<OutputFormat>,
    config_path: Option<&Path>,
) -> Result<(), VlsmError> {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(err) => return Err(report_failure(err, format)?),
    };
    let format = format.unwrap_or(config.output.format);

    let subnets = match allocate(base, hosts, &config.limits) {
        Ok(subnets) => subnets,
        Err(err) => return Err(report_failure(err, Some(format))?),
    };

    info!("allocated {} subnet(s) in {}", subnets.len(), base.trim());

    let rendered = match format {
        OutputFormat::Table => render_table(&subnets),
        OutputFormat::Json => render_json(&subnets)?,
    };
    println!("{rendered}");

    Ok(())
}

#[allow(clippy::print_stdout)]
fn report_failure(err: VlsmError, format: Option<OutputFormat>) -> Result<VlsmError, VlsmError> {
    if format == Some(OutputFormat::Json) {
        println!("{}", render_json_error(&err)?);
    }
    Ok(err)
}

pub(crate) fn allocate<S: AsRef<str>>(
    base: &str,
    hosts: &[S],
    limits: &LimitsConfig,
) -> Result<Vec<SubnetDescriptor>, VlsmError> {
    let joined = hosts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",");
    let host_counts = parse_host_counts(&joined)?;

    let limit = limits.max_requests;
    if host_counts.len() > usize::try_from(limit).unwrap_or(usize::MAX) {
        return Err(VlsmError::TooManyRequests {
            count: host_counts.len(),
            limit,
        });
    }

    Ok(calculate_vlsm(base, &host_counts)?)
}

pub(crate) fn render_table(subnets: &[SubnetDescriptor]) -> String {
    let mut out = String::from(TABLE_HEADER);
    for subnet in subnets {
        let _ = write!(
            out,
            "\n{}\t{}\t/{}\t{}\t{}\t{}\t{}",
            subnet.required_hosts(),
            subnet.network(),
            subnet.prefix(),
            subnet.mask().unwrap_or(NOT_APPLICABLE),
            subnet.first_usable(),
            subnet.last_usable(),
            subnet.broadcast()
        );
    }
    out
}

pub(crate) fn render_json(subnets: &[SubnetDescriptor]) -> Result<String, VlsmError> {
    serde_json::to_string_pretty(subnets).map_err(|err| VlsmError::ReportSerialize {
        reason: err.to_string(),
    })
}

pub(crate) fn render_json_error(err: &VlsmError) -> Result<String, VlsmError> {
    serde_json::to_string_pretty(&json!({ "error": err.to_string() })).map_err(|err| {
        VlsmError::ReportSerialize {
            reason: err.to_string(),
        }
    })
}
