use medlens::domain::ReportStatus;

#[test]
fn given_plain_labels_when_parsing_status_then_mapped() {
    assert_eq!(ReportStatus::parse("Normal"), Some(ReportStatus::Normal));
    assert_eq!(ReportStatus::parse(" alert."), Some(ReportStatus::Alert));
    assert_eq!(
        ReportStatus::parse("Requires Consultation"),
        Some(ReportStatus::Consult)
    );
    assert_eq!(ReportStatus::parse("**consult**"), Some(ReportStatus::Consult));
    assert_eq!(ReportStatus::parse("unknown"), None);
}

#[test]
fn given_completion_with_classification_line_when_parsing_then_status_found() {
    let text = "Key findings: mildly elevated glucose.\n\nClassification: Alert";
    assert_eq!(ReportStatus::from_completion(text), Some(ReportStatus::Alert));
}

#[test]
fn given_several_classification_lines_when_parsing_then_last_wins() {
    let text = "Classification: Normal\nOn review:\n**Classification:** Requires Consultation";
    assert_eq!(
        ReportStatus::from_completion(text),
        Some(ReportStatus::Consult)
    );
}

#[test]
fn given_completion_without_classification_when_parsing_then_none() {
    assert_eq!(ReportStatus::from_completion("All values in range."), None);
}

#[test]
fn given_status_when_serializing_then_lowercase() {
    let json = serde_json::to_string(&ReportStatus::Consult).unwrap();
    assert_eq!(json, "\"consult\"");
}
