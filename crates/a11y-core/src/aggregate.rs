//! Flattening of decoded result trees into bundle rows

use crate::model::{ResultBundle, ValidationFinding};
use crate::tree::ResultTree;
use crate::ScanContext;

/// Append one row per entry in `tree` to the matching bundle list.
///
/// Returns the number of rows added.
pub fn flatten_into(bundle: &mut ResultBundle, tree: &ResultTree, ctx: &ScanContext, source_url: &str) -> usize {
    let mut added = 0;

    for section in &tree.sections {
        let rows = bundle.section_mut(section.section_type);
        for entry in section.entries() {
            rows.push(ValidationFinding {
                section_type: section.section_type,
                guideline: entry.guideline.clone(),
                technique: entry.technique.clone(),
                message: entry.message.clone(),
                error_code: entry.error_code.clone(),
                xpath: entry.xpath.clone(),
                classes: entry.classes.clone(),
                element_id: entry.id.clone(),
                timestamp: ctx.timestamp.clone(),
                source_url: source_url.to_string(),
            });
            added += 1;
        }
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionType;
    use serde_json::json;

    #[test]
    fn test_rows_copy_entry_fields() {
        let tree = ResultTree::decode(&json!({
            "failures": {
                "1.1.1": {
                    "H37": [{
                        "guideline": "1.1.1",
                        "technique": "H37",
                        "message": "Image has no alt text",
                        "error_code": "tarsier-1",
                        "xpath": "/html/body/img",
                        "classes": "hero",
                        "id": "banner"
                    }]
                }
            },
            "success": {
                "1.4.3": { "G18": [{ "message": "Contrast ok" }, { "message": "Contrast ok" }] }
            }
        }))
        .unwrap();

        let ctx = ScanContext::new();
        let mut bundle = ResultBundle::new("No serif fonts found in url.");
        let added = flatten_into(&mut bundle, &tree, &ctx, "https://example.com/");

        assert_eq!(added, 3);
        assert_eq!(bundle.failures.len(), 1);
        assert_eq!(bundle.success.len(), 2);

        let row = &bundle.failures[0];
        assert_eq!(row.section_type, SectionType::Failures);
        assert_eq!(row.element_id.as_deref(), Some("banner"));
        assert_eq!(row.classes.as_deref(), Some("hero"));
        assert_eq!(row.timestamp, ctx.timestamp);
        assert_eq!(row.source_url, "https://example.com/");

        let ok = &bundle.success[0];
        assert_eq!(ok.guideline, None);
        assert_eq!(ok.technique, None);
    }

    #[test]
    fn test_flatten_appends_across_trees() {
        let ctx = ScanContext::new();
        let mut bundle = ResultBundle::default();
        let tree = ResultTree::decode(&json!({
            "warnings": { "2.4.4": { "H30": [{ "message": "Ambiguous link" }] } }
        }))
        .unwrap();

        flatten_into(&mut bundle, &tree, &ctx, "https://example.com/");
        flatten_into(&mut bundle, &tree, &ctx, "https://example.com/");
        assert_eq!(bundle.warnings.len(), 2);
    }
}
