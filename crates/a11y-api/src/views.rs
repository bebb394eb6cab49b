//! Server-rendered HTML pages

use a11y_core::{DashboardView, ResultBundle, ScanOutcome, SectionType};

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Check a URL</a> | <a href="/dashboard/">Dashboard</a></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn section_label(section: SectionType) -> &'static str {
    match section {
        SectionType::Failures => "Failures",
        SectionType::Warnings => "Warnings",
        SectionType::Skipped => "Skipped",
        SectionType::Success => "Successes",
    }
}

const DISPLAY_ORDER: [SectionType; 4] = [
    SectionType::Failures,
    SectionType::Warnings,
    SectionType::Skipped,
    SectionType::Success,
];

/// URL form, with whatever the last submission produced
pub fn check_url_page(url: &str, form_error: Option<&str>, outcome: Option<&ScanOutcome>) -> String {
    let mut body = String::from("<h1>Accessibility check</h1>\n");
    body.push_str(&format!(
        r#"<form method="post" action="/">
<label for="url">Enter the URL to check</label>
<input type="url" id="url" name="url" maxlength="200" value="{}" required>
<button type="submit">Check</button>
</form>
"#,
        escape(url)
    ));

    if let Some(error) = form_error {
        body.push_str(&format!("<p class=\"form-error\">{}</p>\n", escape(error)));
    }

    match outcome {
        Some(ScanOutcome::Results(bundle)) => body.push_str(&results_section(bundle)),
        Some(ScanOutcome::Clean { message }) => {
            body.push_str(&format!("<p class=\"clean\">{}</p>\n", escape(message)));
        }
        Some(ScanOutcome::Error { error }) => {
            body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
        }
        None => {}
    }

    layout("Accessibility check", &body)
}

fn results_section(bundle: &ResultBundle) -> String {
    let mut out = String::from("<section class=\"results\">\n<h2>Results</h2>\n");

    if let Some(verdict) = bundle.serif_verdict() {
        out.push_str(&format!("<p class=\"serif\">{}</p>\n", escape(verdict)));
    }

    for section in DISPLAY_ORDER {
        let findings = bundle.section(section);
        if findings.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "<h3>{} ({})</h3>\n<ul>\n",
            section_label(section),
            findings.len()
        ));
        for finding in findings {
            let guideline = finding.guideline.as_deref().unwrap_or("");
            let message = finding.message.as_deref().unwrap_or("");
            out.push_str(&format!(
                "<li><code>{}</code> {}</li>\n",
                escape(guideline),
                escape(message)
            ));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("<p><a href=\"/download_json/\">Download results as JSON</a></p>\n</section>\n");
    out
}

/// Dashboard summarizing the most recent scan
pub fn dashboard_page(view: &DashboardView) -> String {
    let mut body = String::from("<h1>Dashboard</h1>\n");
    body.push_str(&format!(
        "<p>Last checked URL: <strong>{}</strong></p>\n",
        escape(&view.url)
    ));
    if let Some(at) = &view.checked_at {
        body.push_str(&format!("<p>Checked at: {}</p>\n", escape(at)));
    }

    body.push_str("<table>\n<tr><th>Category</th><th>Count</th><th>Example</th></tr>\n");
    for section in DISPLAY_ORDER {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            section_label(section),
            view.count(section),
            escape(view.example(section))
        ));
    }
    body.push_str("</table>\n");

    body.push_str(&format!(
        "<p>Serif font check: {}</p>\n<p><a href=\"/download_json/\">Download results as JSON</a></p>\n",
        escape(&view.serif_font_check)
    ));

    layout("Dashboard", &body)
}
