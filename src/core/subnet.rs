use serde::Serialize;

use crate::core::codec::AddressCodec;

pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetDescriptor {
    required_hosts: i64,
    network: String,
    prefix: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    mask: Option<String>,
    first_usable: String,
    last_usable: String,
    broadcast: String,
}

impl SubnetDescriptor {
    pub fn derive<F: AddressCodec>(required_hosts: i64, network: F::Raw, prefix: u8) -> Self {
        let broadcast = F::broadcast_address(network, prefix);

        // A /31 or /32 (/127, /128) block has no separate usable range.
        let (first_usable, last_usable) = if prefix >= F::WIDTH.saturating_sub(1) {
            (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string())
        } else {
            (
                usable_or_na::<F>(F::next_address(network)),
                usable_or_na::<F>(F::previous_address(broadcast)),
            )
        };

        Self {
            required_hosts,
            network: F::format_address(network),
            prefix,
            mask: F::subnet_mask(prefix),
            first_usable,
            last_usable,
            broadcast: F::format_address(broadcast),
        }
    }

    pub fn required_hosts(&self) -> i64 {
        self.required_hosts
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn mask(&self) -> Option<&str> {
        self.mask.as_deref()
    }

    pub fn first_usable(&self) -> &str {
        &self.first_usable
    }

    pub fn last_usable(&self) -> &str {
        &self.last_usable
    }

    pub fn broadcast(&self) -> &str {
        &self.broadcast
    }
}

impl std::fmt::Display for SubnetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

fn usable_or_na<F: AddressCodec>(address: Option<F::Raw>) -> String {
    address.map_or_else(|| NOT_APPLICABLE.to_string(), F::format_address)
}
