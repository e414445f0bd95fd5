use std::net::Ipv4Addr;

use crate::core::AddressFamily;
use crate::core::wide::{self, WideIntegerError};

const IPV6_GROUPS: usize = 8;

/// Text and integer handling for one address family.
///
/// Implementations are zero-sized markers; every operation is an associated
/// function so the allocator can be written once over the trait.
pub trait AddressCodec {
    type Raw: Copy + Eq + Ord + std::fmt::Debug;

    const FAMILY: AddressFamily;
    const WIDTH: u8;

    fn parse_address(text: &str) -> Option<Self::Raw>;

    fn format_address(address: Self::Raw) -> String;

    fn format_bits(address: Self::Raw) -> String;

    fn network_boundary(address: Self::Raw, prefix: u8) -> Self::Raw;

    fn broadcast_address(network: Self::Raw, prefix: u8) -> Self::Raw;

    fn next_address(address: Self::Raw) -> Option<Self::Raw>;

    fn previous_address(address: Self::Raw) -> Option<Self::Raw>;

    fn compare_greater_than(a: Self::Raw, b: Self::Raw) -> bool {
        a > b
    }

    fn subnet_mask(prefix: u8) -> Option<String>;

    /// Step a cursor past `broadcast`. `Ok(None)` means the cursor left the
    /// address space without that being an error for this family.
    fn advance_cursor(broadcast: Self::Raw) -> Result<Option<Self::Raw>, WideIntegerError> {
        Ok(Self::next_address(broadcast))
    }

    fn parse_cidr(text: &str) -> Option<(Self::Raw, u8)> {
        let (address, prefix) = text.split_once('/')?;
        let prefix = parse_prefix(prefix, Self::WIDTH)?;
        let address = Self::parse_address(address)?;
        Some((address, prefix))
    }

    fn validate_cidr(text: &str) -> bool {
        Self::parse_cidr(text).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ipv4Codec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ipv6Codec;

impl AddressCodec for Ipv4Codec {
    type Raw = u32;

    const FAMILY: AddressFamily = AddressFamily::Ipv4;
    const WIDTH: u8 = AddressFamily::Ipv4.width();

    fn parse_address(text: &str) -> Option<u32> {
        text.parse::<Ipv4Addr>().ok().map(u32::from)
    }

    fn format_address(address: u32) -> String {
        Ipv4Addr::from(address).to_string()
    }

    fn format_bits(address: u32) -> String {
        format!("{address:032b}")
    }

    fn network_boundary(address: u32, prefix: u8) -> u32 {
        address & ipv4_mask(prefix)
    }

    fn broadcast_address(network: u32, prefix: u8) -> u32 {
        network | !ipv4_mask(prefix)
    }

    fn next_address(address: u32) -> Option<u32> {
        address.checked_add(1)
    }

    fn previous_address(address: u32) -> Option<u32> {
        address.checked_sub(1)
    }

    fn subnet_mask(prefix: u8) -> Option<String> {
        Some(cidr_to_mask(prefix))
    }
}

impl AddressCodec for Ipv6Codec {
    type Raw = u128;

    const FAMILY: AddressFamily = AddressFamily::Ipv6;
    const WIDTH: u8 = AddressFamily::Ipv6.width();

    fn parse_address(text: &str) -> Option<u128> {
        parse_ipv6(text)
    }

    fn format_address(address: u128) -> String {
        compress_groups(&ipv6_groups(address))
    }

    fn format_bits(address: u128) -> String {
        wide::to_bit_string(address)
    }

    fn network_boundary(address: u128, prefix: u8) -> u128 {
        let prefix = u32::from(prefix.min(Self::WIDTH));
        if prefix == 0 {
            return 0;
        }
        wide::bit_slice(address, 0, prefix) << (wide::WIDE_BITS - prefix)
    }

    fn broadcast_address(network: u128, prefix: u8) -> u128 {
        network | !ipv6_mask(prefix)
    }

    fn next_address(address: u128) -> Option<u128> {
        wide::increment(address, 1).ok()
    }

    fn previous_address(address: u128) -> Option<u128> {
        wide::decrement(address, 1).ok()
    }

    fn subnet_mask(_prefix: u8) -> Option<String> {
        None
    }

    fn compare_greater_than(a: u128, b: u128) -> bool {
        wide::compare_greater_than(a, b)
    }

    fn advance_cursor(broadcast: u128) -> Result<Option<u128>, WideIntegerError> {
        wide::increment(broadcast, 1).map(Some)
    }
}

pub fn cidr_to_mask(prefix: u8) -> String {
    Ipv4Addr::from(ipv4_mask(prefix)).to_string()
}

pub fn expand_ipv6(text: &str) -> Option<String> {
    let groups = ipv6_groups(parse_ipv6(text)?);
    Some(
        groups
            .iter()
            .map(|group| format!("{group:04x}"))
            .collect::<Vec<_>>()
            .join(":"),
    )
}

/// Compress any valid IPv6 text. Compressing an already compressed address
/// returns it unchanged.
pub fn compress_ipv6(text: &str) -> Option<String> {
    parse_ipv6(text).map(|address| compress_groups(&ipv6_groups(address)))
}

fn parse_prefix(text: &str, width: u8) -> Option<u8> {
    let max_digits = if width >= 100 { 3 } else { 2 };
    if text.is_empty() || text.len() > max_digits || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let prefix = text.parse::<u8>().ok()?;
    (prefix <= width).then_some(prefix)
}

fn parse_ipv6(text: &str) -> Option<u128> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_hexdigit() || b == b':') {
        return None;
    }

    let (head, tail, missing) = match text.split_once("::") {
        Some((head, tail)) => {
            if tail.contains("::") {
                return None;
            }
            let head = parse_hextets(head)?;
            let tail = parse_hextets(tail)?;
            let explicit = head.len() + tail.len();
            if explicit >= IPV6_GROUPS {
                return None;
            }
            (head, tail, IPV6_GROUPS - explicit)
        }
        None => {
            let groups = parse_hextets(text)?;
            if groups.len() != IPV6_GROUPS {
                return None;
            }
            (groups, Vec::new(), 0)
        }
    };

    let value = head
        .into_iter()
        .chain(std::iter::repeat_n(0_u16, missing))
        .chain(tail)
        .fold(0_u128, |acc, group| (acc << 16) | u128::from(group));
    Some(value)
}

fn parse_hextets(text: &str) -> Option<Vec<u16>> {
    if text.is_empty() {
        return Some(Vec::new());
    }

    text.split(':')
        .map(|group| {
            if group.is_empty() || group.len() > 4 {
                None
            } else {
                u16::from_str_radix(group, 16).ok()
            }
        })
        .collect()
}

fn ipv6_groups(address: u128) -> [u16; IPV6_GROUPS] {
    let mut groups = [0_u16; IPV6_GROUPS];
    for (idx, group) in (0_u32..).zip(groups.iter_mut()) {
        *group = u16::try_from(wide::bit_slice(address, idx * 16, 16)).unwrap_or(u16::MAX);
    }
    groups
}

fn compress_groups(groups: &[u16; IPV6_GROUPS]) -> String {
    let mut best_start = 0_usize;
    let mut best_len = 0_usize;
    let mut run_start = 0_usize;
    let mut run_len = 0_usize;

    for (idx, group) in groups.iter().enumerate() {
        if *group == 0 {
            if run_len == 0 {
                run_start = idx;
            }
            run_len += 1;
            if run_len > best_len {
                best_start = run_start;
                best_len = run_len;
            }
        } else {
            run_len = 0;
        }
    }

    if best_len < 2 {
        return join_groups(groups);
    }

    let head = groups.get(..best_start).unwrap_or_default();
    let tail = groups.get(best_start + best_len..).unwrap_or_default();
    format!("{}::{}", join_groups(head), join_groups(tail))
}

fn join_groups(groups: &[u16]) -> String {
    groups
        .iter()
        .map(|group| format!("{group:x}"))
        .collect::<Vec<_>>()
        .join(":")
}

fn ipv4_mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32_u32 - u32::from(prefix.min(32)))
    }
}

fn ipv6_mask(prefix: u8) -> u128 {
    if prefix == 0 {
        0
    } else {
        u128::MAX << (128_u32 - u32::from(prefix.min(128)))
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressCodec, Ipv4Codec, Ipv6Codec, cidr_to_mask, compress_ipv6, expand_ipv6};

    #[test]
    fn ipv4_cidr_validation() {
        assert!(Ipv4Codec::validate_cidr("192.168.1.0/24"));
        assert!(Ipv4Codec::validate_cidr("0.0.0.0/0"));
        assert!(Ipv4Codec::validate_cidr("10.0.0.1/32"));

        assert!(!Ipv4Codec::validate_cidr("10.0.0.0/33"));
        assert!(!Ipv4Codec::validate_cidr("10.0.0.0"));
        assert!(!Ipv4Codec::validate_cidr("10.0.0.0/"));
        assert!(!Ipv4Codec::validate_cidr("10.0.0.0/-1"));
        assert!(!Ipv4Codec::validate_cidr("10.0.0.0/024"));
        assert!(!Ipv4Codec::validate_cidr("256.0.0.0/8"));
        assert!(!Ipv4Codec::validate_cidr("10.0.0/8"));
        assert!(!Ipv4Codec::validate_cidr("10.0.0.0/8/8"));
        assert!(!Ipv4Codec::validate_cidr("2001:db8::/32"));
    }

    #[test]
    fn ipv6_cidr_validation() {
        assert!(Ipv6Codec::validate_cidr("2001:db8::/32"));
        assert!(Ipv6Codec::validate_cidr("::/0"));
        assert!(Ipv6Codec::validate_cidr("2001:DB8:0:0:0:0:0:1/128"));

        assert!(!Ipv6Codec::validate_cidr("2001:db8::/129"));
        assert!(!Ipv6Codec::validate_cidr("2001:db8::"));
        assert!(!Ipv6Codec::validate_cidr("2001:db8::1::2/64"));
        assert!(!Ipv6Codec::validate_cidr("2001:db8:::1/64"));
        assert!(!Ipv6Codec::validate_cidr("2001:db8:0:0:0:0:0/64"));
        assert!(!Ipv6Codec::validate_cidr("2001:db8:0:0:0:0:0:0:1/64"));
        assert!(!Ipv6Codec::validate_cidr("12345::/64"));
        assert!(!Ipv6Codec::validate_cidr("::ffff:10.0.0.1/128"));
        assert!(!Ipv6Codec::validate_cidr("192.168.1.0/24"));
    }

    #[test]
    fn ipv4_parse_and_format() {
        assert_eq!(Ipv4Codec::parse_address("192.168.1.5"), Some(0xc0a80105));
        assert_eq!(Ipv4Codec::format_address(0xc0a80105), "192.168.1.5");
        assert_eq!(Ipv4Codec::parse_address("1.2.3"), None);
        assert_eq!(Ipv4Codec::parse_address("1.2.3.4.5"), None);

        for value in [0_u32, 1, 0x0a000001, 0xc0a801ff, u32::MAX] {
            let text = Ipv4Codec::format_address(value);
            assert_eq!(Ipv4Codec::parse_address(&text), Some(value));
        }
    }

    #[test]
    fn ipv6_parse_distributes_zero_groups() {
        assert_eq!(
            Ipv6Codec::parse_address("2001:db8::1"),
            Some(0x20010db8000000000000000000000001)
        );
        assert_eq!(Ipv6Codec::parse_address("::1"), Some(1));
        assert_eq!(
            Ipv6Codec::parse_address("fe80::"),
            Some(0xfe800000000000000000000000000000)
        );
        assert_eq!(
            Ipv6Codec::parse_address("1:2:3:4:5:6:7::"),
            Some(0x00010002000300040005000600070000)
        );
        assert_eq!(Ipv6Codec::parse_address("::"), Some(0));
        assert_eq!(Ipv6Codec::parse_address(""), None);
        assert_eq!(Ipv6Codec::parse_address(":1:2:3:4:5:6:7"), None);
    }

    #[test]
    fn ipv6_round_trip() {
        for value in [
            0_u128,
            1,
            0x20010db8000000000000000000000000,
            0x20010db8000000000000000000000fff,
            0x00010000000000000000000000000001,
            0xffff0000ffff0000ffff0000ffff0000,
            u128::MAX,
        ] {
            let text = Ipv6Codec::format_address(value);
            assert_eq!(Ipv6Codec::parse_address(&text), Some(value), "{text}");
        }
    }

    #[test]
    fn ipv6_compression_rules() {
        assert_eq!(
            Ipv6Codec::format_address(0x20010db8000000000000000000000000),
            "2001:db8::"
        );
        assert_eq!(Ipv6Codec::format_address(0), "::");
        assert_eq!(Ipv6Codec::format_address(1), "::1");
        assert_eq!(
            Ipv6Codec::format_address(u128::MAX),
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"
        );
        assert_eq!(
            compress_ipv6("2001:0db8:0000:0001:0001:0001:0001:0001").as_deref(),
            Some("2001:db8:0:1:1:1:1:1")
        );
        assert_eq!(
            compress_ipv6("2001:0:0:1:0:0:0:1").as_deref(),
            Some("2001:0:0:1::1")
        );
        assert_eq!(
            compress_ipv6("2001:0:0:1:0:0:1:1").as_deref(),
            Some("2001::1:0:0:1:1")
        );
        assert_eq!(compress_ipv6("not-an-address"), None);
    }

    #[test]
    fn ipv6_compression_is_idempotent() {
        for text in [
            "2001:0db8:0000:0000:0000:0000:0000:0001",
            "0000:0000:0000:0000:0000:0000:0000:0000",
            "fe80:0000:0000:0000:0204:61ff:fe9d:f156",
            "2001:0:0:1:0:0:1:1",
            "1:0:1:0:1:0:1:0",
        ] {
            let once = compress_ipv6(text).expect("compress once");
            let twice = compress_ipv6(&once).expect("compress twice");
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn ipv6_expansion() {
        assert_eq!(
            expand_ipv6("2001:DB8::1").as_deref(),
            Some("2001:0db8:0000:0000:0000:0000:0000:0001")
        );
        assert_eq!(
            expand_ipv6("::").as_deref(),
            Some("0000:0000:0000:0000:0000:0000:0000:0000")
        );
        assert_eq!(expand_ipv6("1::2::3"), None);
    }

    #[test]
    fn boundary_and_broadcast() {
        assert_eq!(Ipv4Codec::network_boundary(0xc0a80105, 24), 0xc0a80100);
        assert_eq!(Ipv4Codec::broadcast_address(0xc0a80100, 24), 0xc0a801ff);
        assert_eq!(Ipv4Codec::network_boundary(0xc0a80105, 0), 0);
        assert_eq!(Ipv4Codec::broadcast_address(0, 0), u32::MAX);
        assert_eq!(Ipv4Codec::broadcast_address(0xc0a80105, 32), 0xc0a80105);

        let address = 0x20010db8000000000000000000000abc_u128;
        assert_eq!(
            Ipv6Codec::network_boundary(address, 64),
            0x20010db8000000000000000000000000
        );
        assert_eq!(
            Ipv6Codec::broadcast_address(0x20010db8000000000000000000000000, 118),
            0x20010db80000000000000000000003ff
        );
        assert_eq!(Ipv6Codec::network_boundary(address, 0), 0);
        assert_eq!(Ipv6Codec::network_boundary(address, 128), address);
        assert_eq!(Ipv6Codec::broadcast_address(0, 0), u128::MAX);
    }

    #[test]
    fn address_ordering_is_unsigned() {
        assert!(Ipv4Codec::compare_greater_than(0xc0a80200, 0xc0a801ff));
        assert!(!Ipv4Codec::compare_greater_than(0xc0a801ff, 0xc0a801ff));
        assert!(Ipv6Codec::compare_greater_than(1_u128 << 127, u128::from(u64::MAX)));
        assert!(!Ipv6Codec::compare_greater_than(0, u128::MAX));
    }

    #[test]
    fn ipv4_masks() {
        assert_eq!(cidr_to_mask(0), "0.0.0.0");
        assert_eq!(cidr_to_mask(24), "255.255.255.0");
        assert_eq!(cidr_to_mask(26), "255.255.255.192");
        assert_eq!(cidr_to_mask(32), "255.255.255.255");
        assert_eq!(Ipv6Codec::subnet_mask(64), None);
    }

    #[test]
    fn cursor_advance_differs_by_family() {
        assert_eq!(Ipv4Codec::advance_cursor(u32::MAX), Ok(None));
        assert_eq!(Ipv4Codec::advance_cursor(0xc0a800ff), Ok(Some(0xc0a80100)));
        assert!(Ipv6Codec::advance_cursor(u128::MAX).is_err());
        assert_eq!(Ipv6Codec::advance_cursor(0xff), Ok(Some(0x100)));
    }
}
