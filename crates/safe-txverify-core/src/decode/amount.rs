//! Human-readable token amounts

use alloy::primitives::U256;

/// Scale a raw token amount by `decimals`, with thousands separators.
///
/// Trailing zero fraction digits are trimmed; an all-zero fraction keeps two.
pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return add_commas(&digits);
    }

    let padded = if digits.len() <= decimals {
        format!("{digits:0>width$}", width = decimals + 1)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);

    let trimmed = frac_part.trim_end_matches('0');
    let frac = if trimmed.is_empty() {
        format!("{:0<2}", &frac_part[..frac_part.len().min(2)])
    } else {
        trimmed.to_owned()
    };

    format!("{}.{}", add_commas(int_part), frac)
}

/// Insert a comma every three digits from the right
pub fn add_commas(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
