use medlens::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_hyphenated_line_break_when_sanitizing_then_word_rejoined() {
    assert_eq!(
        sanitize_extracted_text("hemo-\nglobin level"),
        "hemoglobin level"
    );
}

#[test]
fn given_repeated_spaces_when_sanitizing_then_collapsed() {
    assert_eq!(sanitize_extracted_text("a    b  c"), "a b c");
}

#[test]
fn given_many_blank_lines_when_sanitizing_then_single_blank_line_kept() {
    assert_eq!(
        sanitize_extracted_text("Findings\n\n\n\nImpression"),
        "Findings\n\nImpression"
    );
}

#[test]
fn given_tabs_when_sanitizing_then_preserved() {
    assert_eq!(sanitize_extracted_text("Foo\t42"), "Foo\t42");
}

#[test]
fn given_control_and_compatibility_chars_when_sanitizing_then_normalized() {
    assert_eq!(sanitize_extracted_text("ﬁbrosis\u{0007}"), "fibrosis");
}
