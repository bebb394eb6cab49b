//! Plain-text recommendation listing

use crate::model::{ScanOutcome, SectionType, ValidationFinding, NO_ISSUES_MESSAGE};

/// Heading used for a category block
fn heading(section: SectionType) -> &'static str {
    match section {
        SectionType::Failures => "Failures",
        SectionType::Warnings => "Warnings",
        SectionType::Skipped => "Skipped elements",
        SectionType::Success => "Successes",
    }
}

const ORDER: [SectionType; 4] = [
    SectionType::Failures,
    SectionType::Warnings,
    SectionType::Skipped,
    SectionType::Success,
];

pub fn generate(outcome: &ScanOutcome) -> String {
    let bundle = match outcome {
        ScanOutcome::Results(bundle) => bundle,
        ScanOutcome::Clean { message } => return format!("{}\n", message),
        ScanOutcome::Error { error } => return format!("Error: {}\n", error),
    };

    if bundle.has_no_findings() {
        return format!("{}\n", NO_ISSUES_MESSAGE);
    }

    let mut out = String::new();
    for section in ORDER {
        let findings = bundle.section(section);
        if findings.is_empty() {
            continue;
        }
        out.push_str(&format!("{} ({}):\n", heading(section), findings.len()));
        for finding in findings {
            out.push_str(&format!("  - {}\n", describe(finding)));
        }
    }

    if let Some(verdict) = bundle.serif_verdict() {
        out.push_str(&format!("\n{}\n", verdict));
    }

    out
}

fn describe(finding: &ValidationFinding) -> String {
    let message = finding.message.as_deref().unwrap_or("(no message)");
    match (&finding.guideline, &finding.technique) {
        (Some(g), Some(t)) => format!("[{} {}] {}", g, t, message),
        (Some(g), None) => format!("[{}] {}", g, message),
        _ => message.to_string(),
    }
}
