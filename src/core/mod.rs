pub mod allocator;
pub mod codec;
pub mod config;
pub mod subnet;
pub mod wide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    pub fn detect(input: &str) -> Self {
        if input.contains(':') {
            Self::Ipv6
        } else {
            Self::Ipv4
        }
    }

    pub const fn width(self) -> u8 {
        match self {
            Self::Ipv4 => 32,
            Self::Ipv6 => 128,
        }
    }
}
