use medlens::domain::{UploadCategory, file_extension, sanitize_filename};

#[test]
fn given_plain_name_when_sanitizing_then_unchanged() {
    assert_eq!(sanitize_filename("report.pdf").as_deref(), Some("report.pdf"));
}

#[test]
fn given_directory_components_when_sanitizing_then_only_last_component_kept() {
    assert_eq!(
        sanitize_filename("../../etc/evil.pdf").as_deref(),
        Some("evil.pdf")
    );
    assert_eq!(
        sanitize_filename("C:\\Users\\me\\scan.png").as_deref(),
        Some("scan.png")
    );
}

#[test]
fn given_spaces_and_symbols_when_sanitizing_then_replaced_with_underscore() {
    assert_eq!(
        sanitize_filename("blood test (march).pdf").as_deref(),
        Some("blood_test__march_.pdf")
    );
}

#[test]
fn given_dot_runs_when_sanitizing_then_collapsed() {
    assert_eq!(sanitize_filename("a...pdf").as_deref(), Some("a.pdf"));
    assert_eq!(sanitize_filename("..hidden.pdf").as_deref(), Some("hidden.pdf"));
}

#[test]
fn given_nothing_usable_when_sanitizing_then_none() {
    assert_eq!(sanitize_filename(""), None);
    assert_eq!(sanitize_filename(".."), None);
    assert_eq!(sanitize_filename("dir/"), None);
    assert_eq!(sanitize_filename("___"), None);
}

#[test]
fn given_mixed_case_extension_when_reading_then_lowercased() {
    assert_eq!(file_extension("Scan.PDF").as_deref(), Some("pdf"));
    assert_eq!(file_extension("noext"), None);
    assert_eq!(file_extension("trailing."), None);
}

#[test]
fn given_document_category_when_checking_extensions_then_matches_allow_list() {
    let category = UploadCategory::Document;
    for ext in ["pdf", "doc", "docx", "xlsx", "xls", "PDF"] {
        assert!(category.allows(ext), "{ext} should be allowed");
    }
    for ext in ["png", "exe", "txt", ""] {
        assert!(!category.allows(ext), "{ext} should be rejected");
    }
}

#[test]
fn given_image_category_when_checking_extensions_then_matches_allow_list() {
    let category = UploadCategory::Image;
    for ext in ["png", "jpg", "jpeg", "gif", "JPG"] {
        assert!(category.allows(ext));
    }
    assert!(!category.allows("pdf"));
    assert!(!category.allows("svg"));
}
