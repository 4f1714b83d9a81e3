//! Edge case and property tests for moji-scan

use crate::{ScanConfig, ScanSummary, Scanner, DEFAULT_MAX_TOKEN_LEN};
use moji_lookup::{spawn, Client, LookupContext, ResolveError, ServiceHandle};
use proptest::prelude::*;

/// Resolver that knows a handful of descriptions.
fn resolve(description: &str, _: &LookupContext) -> Result<String, ResolveError> {
    match description {
        "wave" => Ok("👋".to_string()),
        "thumbs up" => Ok("👍".to_string()),
        "t-rex" => Ok("🦖".to_string()),
        _ => Err(ResolveError::NotFound),
    }
}

fn client() -> (Client, ServiceHandle) {
    spawn(resolve).unwrap()
}

fn scan_with(client: &mut Client, input: &[u8]) -> (Vec<u8>, ScanSummary) {
    let mut scanner =
        Scanner::new(client, LookupContext::new("table.json"), ScanConfig::default()).unwrap();
    let mut out = Vec::new();
    let summary = scanner.scan(input, &mut out).unwrap();
    (out, summary)
}

fn scan_str(input: &str) -> String {
    let (mut client, _handle) = client();
    let (out, _) = scan_with(&mut client, input.as_bytes());
    String::from_utf8(out).unwrap()
}

// ==================== EDGE CASES ====================

#[test]
fn test_edge_empty_input() {
    assert_eq!(scan_str(""), "");
}

#[test]
fn test_edge_lone_delimiter() {
    assert_eq!(scan_str(":"), ":");
}

#[test]
fn test_edge_empty_token() {
    assert_eq!(scan_str("::"), "::");
}

#[test]
fn test_edge_triple_delimiter() {
    assert_eq!(scan_str(":::"), ":::");
}

#[test]
fn test_edge_token_at_start_and_end() {
    assert_eq!(scan_str(":wave: and :wave:"), "👋 and 👋");
}

#[test]
fn test_edge_hyphenated_token() {
    assert_eq!(scan_str(":t-rex:"), "🦖");
}

#[test]
fn test_edge_newline_abandons_token() {
    assert_eq!(scan_str(":wave\n:"), ":wave\n:");
}

#[test]
fn test_edge_uppercase_abandons_token() {
    assert_eq!(scan_str(":Wave:"), ":Wave:");
}

#[test]
fn test_edge_multibyte_abandons_token() {
    assert_eq!(scan_str(":wavé:"), ":wavé:");
}

#[test]
fn test_edge_abandoned_then_valid() {
    // The closing delimiter of the abandoned candidate opens a new one.
    assert_eq!(scan_str(":a b:wave:"), ":a b👋");
}

#[test]
fn test_edge_time_of_day() {
    assert_eq!(scan_str("meet at 12:30:45"), "meet at 12:30:45");
}

#[test]
fn test_edge_url() {
    assert_eq!(scan_str("https://example.com"), "https://example.com");
}

#[test]
fn test_edge_windows_line_endings() {
    assert_eq!(scan_str(":wave:\r\n:wave:\r\n"), "👋\r\n👋\r\n");
}

#[test]
fn test_edge_invalid_utf8_passes_through() {
    let (mut client, _handle) = client();
    let input = b"\xff\xfe :wave: \x80";
    let (out, _) = scan_with(&mut client, input);
    assert_eq!(out, b"\xff\xfe \xF0\x9F\x91\x8B \x80");
}

#[test]
fn test_edge_token_at_length_cap() {
    let name = "a".repeat(DEFAULT_MAX_TOKEN_LEN);
    let input = format!(":{}:", name);
    assert_eq!(scan_str(&input), format!("?{}?", name));
}

#[test]
fn test_edge_token_past_length_cap() {
    let input = format!(":{}:", "a".repeat(DEFAULT_MAX_TOKEN_LEN + 1));
    assert_eq!(scan_str(&input), input);
}

#[test]
fn test_edge_huge_token_passes_through() {
    let input = format!(":{}: :wave:", "a".repeat(10_000));
    let (mut client, _handle) = client();
    let (out, summary) = scan_with(&mut client, input.as_bytes());

    assert_eq!(String::from_utf8(out).unwrap(), format!(":{}: 👋", "a".repeat(10_000)));
    assert_eq!(summary.tokens, 1);
}

#[test]
fn test_edge_long_unterminated_token() {
    let input = format!(":{}", "b".repeat(10_000));
    assert_eq!(scan_str(&input), input);
}

#[test]
fn test_edge_summary_counts() {
    let (mut client, _handle) = client();
    let (_, summary) = scan_with(&mut client, b":wave: :x y :open");
    assert_eq!(summary.tokens, 1);
    assert_eq!(summary.abandoned, 1);
    assert_eq!(summary.unterminated, 1);
    assert_eq!(summary.bytes_read, 17);
}

// ==================== PROPERTY TESTS ====================

/// A text fragment or a token, so generated inputs always have a known
/// expected rendering.
#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Token(&'static str),
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        "[^:]{0,12}".prop_map(Piece::Text),
        prop::sample::select(vec!["wave", "thumbs_up", "t-rex", "no_such_code", "x"])
            .prop_map(Piece::Token),
    ]
}

fn render(token: &str) -> String {
    match token {
        "wave" => "👋".to_string(),
        "thumbs_up" => "👍".to_string(),
        "t-rex" => "🦖".to_string(),
        other => format!("?{}?", other),
    }
}

proptest! {
    #[test]
    fn prop_text_without_delimiter_is_unchanged(input in "[^:]{0,200}") {
        prop_assert_eq!(scan_str(&input), input);
    }

    #[test]
    fn prop_tokens_substituted_in_order(pieces in prop::collection::vec(piece(), 0..20)) {
        let mut input = String::new();
        let mut expected = String::new();
        for piece in &pieces {
            match piece {
                Piece::Text(text) => {
                    input.push_str(text);
                    expected.push_str(text);
                }
                Piece::Token(token) => {
                    input.push(':');
                    input.push_str(token);
                    input.push(':');
                    expected.push_str(&render(token));
                }
            }
        }
        prop_assert_eq!(scan_str(&input), expected);
    }

    #[test]
    fn prop_surrounding_text_is_kept(body in "[a-z_]{1,30}") {
        let input = format!("<:{}:>", body);
        let out = scan_str(&input);
        prop_assert!(out.starts_with('<') && out.ends_with('>'));
    }
}
