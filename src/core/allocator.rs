use log::{debug, trace};
use thiserror::Error;

use crate::core::AddressFamily;
use crate::core::codec::{AddressCodec, Ipv4Codec, Ipv6Codec};
use crate::core::subnet::SubnetDescriptor;
use crate::core::wide::WideIntegerError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("invalid CIDR format: {input}")]
    MalformedCidr { input: String },

    #[error("missing host requirements")]
    MissingHostRequirements,

    #[error("invalid host requirement: {token}")]
    InvalidHostToken { token: String },

    #[error("invalid host requirement: {hosts}")]
    InvalidHostCount { hosts: i64 },

    #[error(
        "subnet for {hosts} hosts needs {host_bits} host bits and is larger than base network /{base_prefix}"
    )]
    SubnetTooLarge {
        hosts: i64,
        host_bits: u32,
        base_prefix: u8,
    },

    #[error("subnets exceed base network range (while placing {hosts} hosts)")]
    AddressSpaceExhausted { hosts: i64 },

    #[error(transparent)]
    WideInteger(#[from] WideIntegerError),
}

/// Largest-first VLSM allocator over one base block.
///
/// Subnets are carved from the start of the block in descending size order,
/// each one starting right after the previous broadcast. Because block sizes
/// are powers of two placed largest first, every cursor position is aligned
/// to the size of the next block.
///
/// An allocator performs a single run: [`VlsmAllocator::calculate`] consumes
/// it.
#[derive(Debug)]
pub struct VlsmAllocator<F: AddressCodec> {
    base_network: F::Raw,
    base_prefix: u8,
    base_broadcast: F::Raw,
    cursor: Option<F::Raw>,
}

impl<F: AddressCodec> VlsmAllocator<F> {
    pub fn new(base_cidr: &str) -> Result<Self, AllocationError> {
        let base_cidr = base_cidr.trim();
        let (address, prefix) =
            F::parse_cidr(base_cidr).ok_or_else(|| AllocationError::MalformedCidr {
                input: base_cidr.to_string(),
            })?;

        Ok(Self::from_parts(address, prefix))
    }

    pub fn from_parts(address: F::Raw, prefix: u8) -> Self {
        let base_prefix = prefix.min(F::WIDTH);
        let base_network = F::network_boundary(address, base_prefix);
        let base_broadcast = F::broadcast_address(base_network, base_prefix);

        Self {
            base_network,
            base_prefix,
            base_broadcast,
            cursor: Some(base_network),
        }
    }

    pub fn base_network(&self) -> F::Raw {
        self.base_network
    }

    pub fn base_prefix(&self) -> u8 {
        self.base_prefix
    }

    pub fn base_broadcast(&self) -> F::Raw {
        self.base_broadcast
    }

    pub fn calculate(
        mut self,
        host_counts: &[i64],
    ) -> Result<Vec<SubnetDescriptor>, AllocationError> {
        let mut ordered = host_counts.to_vec();
        // Stable: equal requests keep their caller order.
        ordered.sort_by(|left, right| right.cmp(left));

        debug!(
            "allocating {} {:?} subnet(s) in {}/{}",
            ordered.len(),
            F::FAMILY,
            F::format_address(self.base_network),
            self.base_prefix
        );

        let mut subnets = Vec::with_capacity(ordered.len());
        for hosts in ordered {
            subnets.push(self.place(hosts)?);
        }

        Ok(subnets)
    }

    fn place(&mut self, hosts: i64) -> Result<SubnetDescriptor, AllocationError> {
        if hosts <= 0 {
            return Err(AllocationError::InvalidHostCount { hosts });
        }

        let host_bits = required_host_bits(hosts);
        let prefix = u32::from(F::WIDTH)
            .checked_sub(host_bits)
            .and_then(|prefix| u8::try_from(prefix).ok())
            .filter(|prefix| *prefix >= self.base_prefix)
            .ok_or(AllocationError::SubnetTooLarge {
                hosts,
                host_bits,
                base_prefix: self.base_prefix,
            })?;

        let network = self
            .cursor
            .ok_or(AllocationError::AddressSpaceExhausted { hosts })?;
        let broadcast = F::broadcast_address(network, prefix);
        if F::compare_greater_than(broadcast, self.base_broadcast) {
            return Err(AllocationError::AddressSpaceExhausted { hosts });
        }

        trace!("cursor {}", F::format_bits(network));
        let subnet = SubnetDescriptor::derive::<F>(hosts, network, prefix);
        debug!("placed {hosts} host(s) at {subnet}");

        self.cursor = F::advance_cursor(broadcast)?;
        Ok(subnet)
    }
}

/// Smallest `b` such that a block of `2^b` addresses, minus network and
/// broadcast, holds `hosts`.
pub fn required_host_bits(hosts: i64) -> u32 {
    let hosts = i128::from(hosts);
    let mut bits = 0_u32;
    while (1_i128 << bits) - 2 < hosts {
        bits += 1;
    }
    bits
}

pub fn calculate_vlsm(
    base_cidr: &str,
    host_counts: &[i64],
) -> Result<Vec<SubnetDescriptor>, AllocationError> {
    let base_cidr = base_cidr.trim();
    match AddressFamily::detect(base_cidr) {
        AddressFamily::Ipv4 => VlsmAllocator::<Ipv4Codec>::new(base_cidr)?.calculate(host_counts),
        AddressFamily::Ipv6 => VlsmAllocator::<Ipv6Codec>::new(base_cidr)?.calculate(host_counts),
    }
}

/// Parse a comma separated host list such as `"100, 50,20"`. An empty token
/// counts as a request for zero hosts.
pub fn parse_host_counts(input: &str) -> Result<Vec<i64>, AllocationError> {
    if input.trim().is_empty() {
        return Err(AllocationError::MissingHostRequirements);
    }

    let mut counts = Vec::new();
    for token in input.split(',').map(str::trim) {
        if token.is_empty() {
            return Err(AllocationError::InvalidHostCount { hosts: 0 });
        }
        let hosts = token
            .parse::<i64>()
            .map_err(|_| AllocationError::InvalidHostToken {
                token: token.to_string(),
            })?;
        counts.push(hosts);
    }

    Ok(counts)
}
