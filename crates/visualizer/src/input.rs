//! Parsing of the value typed into the insert box

/// Parse the integer prefix of `input`.
///
/// Leading whitespace is skipped, an optional sign is accepted, and the run
/// of ASCII digits that follows is the value; anything after it is ignored.
/// Returns `None` when there are no digits or the value does not fit in an
/// `i64`, in which case the caller discards the input without reporting an
/// error.
pub fn parse_value(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let sign_len = trimmed.len() - unsigned.len();

    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }

    trimmed[..sign_len + digits].parse().ok()
}
