use serde::Serialize;

/// Triage tag attached to an analyzed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Normal,
    Alert,
    Consult,
}

impl ReportStatus {
    pub fn parse(label: &str) -> Option<Self> {
        let label = label
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        match label.as_str() {
            "normal" => Some(Self::Normal),
            "alert" => Some(Self::Alert),
            "consult" | "consultation" | "requires consultation" => Some(Self::Consult),
            _ => None,
        }
    }

    /// Finds the last `Classification:` line in a model answer.
    pub fn from_completion(text: &str) -> Option<Self> {
        text.lines().rev().find_map(|line| {
            let line = line.trim().trim_start_matches(['*', '-', '#', ' ']);
            let (key, value) = line.split_once(':')?;
            if key.trim().trim_end_matches('*').eq_ignore_ascii_case("classification") {
                Self::parse(value)
            } else {
                None
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseCode {
    pub code: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub summary: String,
    pub status: Option<ReportStatus>,
    pub disease_codes: Vec<DiseaseCode>,
    /// Set when the classification lookup failed and was tolerated.
    pub classification_degraded: bool,
}
