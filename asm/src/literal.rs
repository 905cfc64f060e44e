//! Classification of operand tokens: label identifiers and signed integer
//! literals in decimal, octal (`017`) or hexadecimal (`0x1F`) notation.

/// A letter followed by letters, digits or underscores.
pub fn is_label(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(head) if head.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Every character is a digit. Vacuously true for the empty string.
pub fn is_decimal(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

pub fn is_octal(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('0') && s.chars().all(|c| ('0'..='7').contains(&c))
}

pub fn is_hexadecimal(s: &str) -> bool {
    match (s.get(..2), s.get(2..)) {
        (Some(prefix), Some(digits)) if !digits.is_empty() => {
            prefix.eq_ignore_ascii_case("0x") && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        _ => false,
    }
}

/// Wraps at 32 bits, so `FFFFFFFF` reads as -1.
fn to_decimal(digits: &str, radix: u32) -> i32 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i32, |acc, d| acc.wrapping_mul(radix as i32).wrapping_add(d as i32))
}

/// Digits after the leading `0`.
pub fn octal_to_decimal(digits: &str) -> i32 {
    to_decimal(digits, 8)
}

/// Digits after the `0x` prefix.
pub fn hex_to_decimal(digits: &str) -> i32 {
    to_decimal(digits, 16)
}

/// Eight upper-case hex digits of the two's-complement representation.
pub fn to_hex8(value: i32) -> String {
    format!("{:08X}", value as u32)
}

/// Rewrites a signed literal into canonical decimal text. Octal and hex
/// values are folded into an `i32` with the sign applied; decimal text keeps
/// its sign as written and is range-checked only when encoded. `None` if the
/// token is not a number in any accepted notation.
pub fn canonical(token: &str) -> Option<String> {
    let (negative, body) = match token.chars().next() {
        Some(c @ ('+' | '-')) => (c == '-', &token[1..]),
        _ => (false, token),
    };
    let value = if is_octal(body) {
        octal_to_decimal(&body[1..])
    } else if is_hexadecimal(body) {
        hex_to_decimal(&body[2..])
    } else if is_decimal(body) {
        return Some(token.to_string());
    } else {
        return None;
    };
    match negative {
        true => Some(value.wrapping_neg().to_string()),
        false => Some(value.to_string()),
    }
}
