use repair_json::strategies::{
    balance_brackets, fix_escaped_quotes, fix_missing_commas, fix_single_quotes,
    fix_unquoted_keys, fix_unterminated_strings, general_fixes, remove_invalid_characters,
    remove_trailing_commas,
};
use repair_json::extract::extract_candidate;
use repair_json::RepairOptions;
use serde_json::Value;

fn opts() -> RepairOptions {
    RepairOptions::default()
}

#[test]
fn trailing_commas_in_objects_and_arrays() {
    let out = remove_trailing_commas(r#"{"a": [1,], }"#, &opts());
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": [1] }"#);
}

#[test]
fn trailing_commas_noop_on_clean_input() {
    let out = remove_trailing_commas(r#"{"a": 1}"#, &opts());
    assert!(!out.modified);
    assert_eq!(out.result, r#"{"a": 1}"#);
}

#[test]
fn trailing_commas_respects_toggle() {
    let disabled = RepairOptions {
        remove_trailing_commas: false,
        ..opts()
    };
    let out = remove_trailing_commas(r#"{"a": 1,}"#, &disabled);
    assert!(!out.modified);
    assert_eq!(out.description, "");
}

#[test]
fn unquoted_keys_in_all_three_contexts() {
    let out = fix_unquoted_keys("{a: 1, b: {c: 2}}", &opts());
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": 1, "b": {"c": 2}}"#);
}

#[test]
fn unquoted_keys_respects_toggle() {
    let disabled = RepairOptions {
        fix_unquoted_keys: false,
        ..opts()
    };
    assert!(!fix_unquoted_keys("{a: 1}", &disabled).modified);
}

#[test]
fn single_quotes_with_inner_escape() {
    let out = fix_single_quotes(r"{'a': 'it\'s'}", &opts());
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": "it's"}"#);
}

#[test]
fn missing_commas_between_quoted_members() {
    let out = fix_missing_commas(r#"{"a": "x" "b": true "c": 2}"#);
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": "x", "b": true, "c": 2}"#);
}

#[test]
fn missing_commas_between_bare_key_members() {
    let out = fix_missing_commas(r#"{a: 1 b: 2}"#);
    assert!(out.modified);
    assert_eq!(out.result, r#"{a: 1, b: 2}"#);
}

#[test]
fn escaped_quotes_around_whole_value_are_unescaped() {
    let out = fix_escaped_quotes(r#"{"msg": \"hello\"}"#, &opts());
    assert!(out.modified);
    assert_eq!(out.result, r#"{"msg": "hello"}"#);
}

#[test]
fn escaped_quotes_inside_one_string_are_restored() {
    // Strip-then-re-escape round-trips a lone string whose middle segment
    // carries no ':' or ','.
    let out = fix_escaped_quotes(r#""a \"b\" c""#, &opts());
    assert!(!out.modified);
    assert_eq!(out.result, r#""a \"b\" c""#);
}

#[test]
fn escaped_quote_pass_can_disturb_valid_escapes() {
    // Known fidelity gap: inside an object, the middle segment of the first
    // quote quadruple holds the ':' separator, so the stripped quotes are
    // never re-escaped and previously valid input comes out unparseable.
    let out = fix_escaped_quotes(r#"{"k": "a \"b\" c"}"#, &opts());
    assert!(out.modified);
    assert_eq!(out.result, r#"{"k": "a "b" c"}"#);
    assert!(serde_json::from_str::<Value>(&out.result).is_err());
}

#[test]
fn invalid_characters_and_reexposed_trailing_commas() {
    let out = remove_invalid_characters("{\"a\": 1,\u{1}}");
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": 1}"#);
}

#[test]
fn balance_appends_missing_closers_braces_before_brackets() {
    // Closers append grouped by kind, not interleaved by nesting.
    let out = balance_brackets(r#"{"a": [1, 2"#, &opts());
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": [1, 2}]"#);
}

#[test]
fn balance_strips_excess_trailing_closers() {
    let out = balance_brackets(r#"{"a": 1}}"#, &opts());
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": 1}"#);

    let out = balance_brackets("[1]]", &opts());
    assert!(out.modified);
    assert_eq!(out.result, "[1]");
}

#[test]
fn balance_respects_toggle() {
    let disabled = RepairOptions {
        balance_brackets: false,
        ..opts()
    };
    assert!(!balance_brackets(r#"{"a": 1"#, &disabled).modified);
}

#[test]
fn unterminated_string_closed_before_structural_tail() {
    let out = fix_unterminated_strings(r#"{"a": "b}"#);
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": "b"}"#);
}

#[test]
fn unterminated_string_closed_before_next_structural_line() {
    let out = fix_unterminated_strings("{\"a\": \"b,\n}");
    assert!(out.modified);
    assert_eq!(out.result, "{\"a\": \"b\",\n}");
}

#[test]
fn unterminated_string_closed_at_end_of_input() {
    let out = fix_unterminated_strings(r#"{"a": "b"#);
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": "b""#);
}

#[test]
fn general_fixes_wrap_bare_members() {
    let out = general_fixes(r#""a": 1"#);
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": 1}"#);
}

#[test]
fn general_fixes_noop_when_already_braced() {
    assert!(!general_fixes(r#"{"a": 1}"#).modified);
}

#[test]
fn extraction_respects_toggle() {
    let disabled = RepairOptions {
        extract_from_text: false,
        ..opts()
    };
    let out = extract_candidate("prose {\"a\": 1} prose", &disabled);
    assert!(!out.modified);
}

#[test]
fn extraction_strips_fences_without_language_tag() {
    let out = extract_candidate("```\n{\"a\": 1}\n```", &opts());
    assert!(out.modified);
    assert_eq!(out.result, r#"{"a": 1}"#);
}
