use thiserror::Error;

pub const WIDE_BITS: u32 = 128;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WideIntegerError {
    #[error("IPv6 address out of range")]
    Overflow,

    #[error("IPv6 address underflow")]
    Underflow,
}

pub fn increment(value: u128, amount: u128) -> Result<u128, WideIntegerError> {
    value
        .checked_add(amount)
        .ok_or(WideIntegerError::Overflow)
}

pub fn decrement(value: u128, amount: u128) -> Result<u128, WideIntegerError> {
    value
        .checked_sub(amount)
        .ok_or(WideIntegerError::Underflow)
}

pub fn compare_greater_than(a: u128, b: u128) -> bool {
    a > b
}

/// Extract `len` bits starting at bit `start`, where bit 0 is the most
/// significant bit. The result is right aligned.
pub fn bit_slice(value: u128, start: u32, len: u32) -> u128 {
    if len == 0 || start >= WIDE_BITS {
        return 0;
    }

    let len = len.min(WIDE_BITS - start);
    let shifted = value << start;
    if len == WIDE_BITS {
        shifted
    } else {
        shifted >> (WIDE_BITS - len)
    }
}

pub fn to_bit_string(value: u128) -> String {
    format!("{value:0128b}")
}
