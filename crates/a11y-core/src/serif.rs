//! Serif-font heuristic
//!
//! Looks at every `font-family:` declaration in the markup, style blocks
//! and inline `style` attributes alike. Not a WCAG check; its verdict rides
//! along in the bundle without touching any counts.

use crate::model::{NO_SERIF_FOUND, SERIF_FOUND};
use once_cell::sync::Lazy;
use regex::Regex;

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)font-family\s*:\s*([^;{}<>]*)").expect("font-family pattern is valid")
});

/// Family tokens that name a serif face
pub fn serif_fonts(markup: &str) -> Vec<String> {
    DECLARATION
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .flat_map(|value| value.as_str().split(','))
        .filter_map(normalize_family)
        .filter(|family| is_serif_family(family))
        .collect()
}

/// Verdict string stored in `serif_font_check`
pub fn check_for_serif_fonts(markup: &str) -> &'static str {
    if serif_fonts(markup).is_empty() {
        NO_SERIF_FOUND
    } else {
        SERIF_FOUND
    }
}

// Inline declarations can run into the closing quote of the `style`
// attribute, so a token ends at the first quote after its opening one.
fn normalize_family(token: &str) -> Option<String> {
    let token = token.trim().trim_start_matches(['"', '\'']);
    let token = token
        .split(['"', '\'', '!'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn is_serif_family(family: &str) -> bool {
    family.ends_with("serif") && !family.ends_with("sans-serif") && !family.ends_with("sans serif")
}
