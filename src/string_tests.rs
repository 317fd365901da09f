use super::*;

#[track_caller]
fn parsed(input: &str) -> String {
    let ok = string(input).unwrap_or_else(|e| panic!("failed to parse {input:?}: {e:?}"));
    assert_eq!(ok.rest, "", "input: {input:?}");
    ok.value
}

#[track_caller]
fn error_kinds(input: &str) -> Vec<String> {
    let err = string(input).expect_err(input);
    assert!(err.fatal, "input: {input:?}");
    err.stack
        .iter()
        .map(|frame| frame.message.kind.to_string())
        .filter(|kind| kind != "tag")
        .collect()
}

#[test]
fn basic_strings() {
    let cases = [
        (r#""""#, ""),
        (r#""hello""#, "hello"),
        (r#""tab\there""#, "tab\there"),
        (r#""say \"hi\"""#, "say \"hi\""),
        (r#""back\\slash""#, "back\\slash"),
        (r#""\b\f\n\r\e""#, "\u{8}\u{c}\n\r\u{1b}"),
        (r#""\x41\u00e9\U0001F600""#, "Aé😀"),
        ("\"unicode é ü\"", "unicode é ü"),
        ("\"# not a comment\"", "# not a comment"),
    ];
    for (input, expected) in cases {
        assert_eq!(parsed(input), expected, "input: {input}");
    }
}

#[test]
fn literal_strings() {
    let cases = [
        ("''", ""),
        (r"'C:\Users\nodejs\templates'", r"C:\Users\nodejs\templates"),
        (r#"'Tom "Dubs" Preston'"#, r#"Tom "Dubs" Preston"#),
        ("'<\\i\\c*\\s*>'", "<\\i\\c*\\s*>"),
    ];
    for (input, expected) in cases {
        assert_eq!(parsed(input), expected, "input: {input}");
    }
}

#[test]
fn multiline_basic_strings() {
    let cases = [
        ("\"\"\"\nRoses are red\nViolets are blue\"\"\"", "Roses are red\nViolets are blue"),
        ("\"\"\"\r\nwindows\r\n\"\"\"", "windows\r\n"),
        ("\"\"\"no leading newline\"\"\"", "no leading newline"),
        ("\"\"\"\n\nkeeps the second\"\"\"", "\nkeeps the second"),
        (
            "\"\"\"\nThe quick brown \\\n\n\n  fox jumps over \\\n    the lazy dog.\"\"\"",
            "The quick brown fox jumps over the lazy dog.",
        ),
        ("\"\"\"trailing \\   \n  trimmed\"\"\"", "trailing trimmed"),
        ("\"\"\"one \" two \"\" three\"\"\"", "one \" two \"\" three"),
        ("\"\"\"\"quoted\"\"\"\"", "\"quoted\""),
        ("\"\"\"ends with two\"\"\"\"\"", "ends with two\"\""),
        ("\"\"\"\"\"\"", ""),
        ("\"\"\"escaped \\\"\"\" quotes\"\"\"", "escaped \"\"\" quotes"),
        ("\"\"\"tab\\tnewline\\n\"\"\"", "tab\tnewline\n"),
    ];
    for (input, expected) in cases {
        assert_eq!(parsed(input), expected, "input: {input:?}");
    }
}

#[test]
fn multiline_literal_strings() {
    let cases = [
        ("'''\nThe first newline is\ntrimmed in raw strings.\n'''", "The first newline is\ntrimmed in raw strings.\n"),
        ("'''I [dw]on't need \\d{2} apples'''", "I [dw]on't need \\d{2} apples"),
        ("''''That,' she said, 'is still pointless.''''", "'That,' she said, 'is still pointless.'"),
        ("'''no \\escapes\\n'''", "no \\escapes\\n"),
    ];
    for (input, expected) in cases {
        assert_eq!(parsed(input), expected, "input: {input:?}");
    }
}

#[test]
fn string_stops_after_closing_delimiter() {
    let ok = string("\"a\" = 1").unwrap();
    assert_eq!((ok.value.as_str(), ok.rest), ("a", " = 1"));

    // Six quotes close a multiline string with two quotes of content; the
    // seventh is left over.
    let ok = ml_basic_string("\"\"\"x\"\"\"\"\"\"").unwrap();
    assert_eq!((ok.value.as_str(), ok.rest), ("x\"\"", "\""));
}

#[test]
fn not_a_string_is_recoverable() {
    for input in ["", "abc", "1", "[\"a\"]"] {
        let err = string(input).unwrap_err();
        assert!(!err.fatal, "input: {input}");
        assert_eq!(err.rest, input);
    }
}

#[test]
fn unterminated_strings() {
    let cases = ["\"abc", "\"abc\nd\"", "'abc", "'abc\n'", "\"\"\"abc", "'''abc''", "\"\"\"abc\"\""];
    for input in cases {
        assert_eq!(error_kinds(input).last().map(String::as_str), Some("unterminated-string"), "input: {input:?}");
    }
}

#[test]
fn invalid_escapes() {
    for input in [r#""\q""#, r#""\u12""#, r#""\x4""#, r#""\ ""#, "\"\"\"\\ x\"\"\""] {
        let kinds = error_kinds(input);
        assert!(kinds.contains(&"invalid-escape".to_string()), "input: {input:?}, kinds: {kinds:?}");
    }
}

#[test]
fn escapes_must_name_scalar_values() {
    for (input, code) in [(r#""\uD800""#, "D800"), (r#""\U00110000""#, "110000")] {
        let err = string(input).unwrap_err();
        assert!(err.fatal);
        let frame = &err.stack[0];
        assert_eq!(frame.message.kind, "invalid-escape-value", "input: {input}");
        assert_eq!(frame.message.detail, code, "input: {input}");
        assert_eq!(frame.at, &input[3..]);
    }
}
