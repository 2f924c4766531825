//! Inbound host acknowledgement decoding.
//!
//! The host answers a prompt with an `M876 S<code>` command. The full
//! command parser lives elsewhere in the firmware; this module decodes
//! just that acknowledgement shape for the simulator's line loop.

/// Decode an `M876 S<code>` host acknowledgement line.
///
/// Returns the response code, or `None` if the line is not an M876
/// command or carries no valid `S` parameter. Matching is
/// case-insensitive and tolerant of surrounding whitespace.
#[must_use]
pub fn parse_host_response(line: &str) -> Option<u8> {
    let mut words = line.split_whitespace();
    let cmd = words.next()?;
    if !cmd.eq_ignore_ascii_case("M876") {
        return None;
    }
    words.find_map(|word| word.strip_prefix(['S', 's'])?.parse().ok())
}
