//! Lenient parsing of free-text key lists
//!
//! Input is comma separated. Each token is trimmed and read as an
//! optional sign followed by leading decimal digits; anything after the
//! digits is ignored (`"12px"` → 12, `"3.9"` → 3). Tokens with no leading
//! digits, or that overflow `i64`, are dropped.

/// Parse one token, `None` when it carries no leading integer
pub fn parse_value(token: &str) -> Option<i64> {
    let token = token.trim();
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let digits = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let sign_len = token.len() - unsigned.len();
    token[..sign_len + digits].parse().ok()
}

/// Parse a comma-separated list, keeping order and duplicates
pub fn parse_values(input: &str) -> Vec<i64> {
    input.split(',').filter_map(parse_value).collect()
}
