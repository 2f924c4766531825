//! Unit tests for `M876 S<code>` acknowledgement decoding.

use hostlink::gcode::parse_host_response;

#[test]
fn decodes_simple_acknowledgement() {
    assert_eq!(parse_host_response("M876 S0"), Some(0));
    assert_eq!(parse_host_response("M876 S1"), Some(1));
    assert_eq!(parse_host_response("M876 S255"), Some(255));
}

#[test]
fn command_and_parameter_are_case_insensitive() {
    assert_eq!(parse_host_response("m876 s2"), Some(2));
    assert_eq!(parse_host_response("M876 s1"), Some(1));
}

#[test]
fn tolerates_surrounding_whitespace() {
    assert_eq!(parse_host_response("  M876   S1  "), Some(1));
}

#[test]
fn rejects_other_commands() {
    assert_eq!(parse_host_response("M24"), None);
    assert_eq!(parse_host_response("G0 X10"), None);
    assert_eq!(parse_host_response(""), None);
}

#[test]
fn rejects_missing_or_invalid_parameter() {
    assert_eq!(parse_host_response("M876"), None);
    assert_eq!(parse_host_response("M876 S"), None);
    assert_eq!(parse_host_response("M876 Sx"), None);
    // Out of range for a u8 response code.
    assert_eq!(parse_host_response("M876 S300"), None);
}

#[test]
fn rejects_prefixed_command_words() {
    // "M8760" is a different command, not M876 with a trailing digit.
    assert_eq!(parse_host_response("M8760 S1"), None);
}
