use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum slug length, in code points.
const MAX_SLUG_LENGTH: usize = 80;

/// Surrounding quote characters stripped before slugging.
const QUOTES: [char; 6] = ['\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
// word characters, hyphen, and the CJK Unified Ideographs block survive
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\-\x{4e00}-\x{9fff}]").unwrap());
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"--+").unwrap());

/// Turn a free-text title into a URL-safe identifier: lowercase, hyphens
/// for whitespace, everything outside the allow-list dropped, capped at 80
/// code points. An empty result is a valid outcome, not an error.
pub fn slug(title: &str) -> String {
    let bare = strip_quotes(title.trim());
    let lowered = bare.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    let filtered = DISALLOWED.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUN.replace_all(&filtered, "-");
    let capped: String = collapsed
        .trim_matches('-')
        .chars()
        .take(MAX_SLUG_LENGTH)
        .collect();
    // the cut can land right after a hyphen
    capped.trim_end_matches('-').to_string()
}

fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(&QUOTES[..]).unwrap_or(s);
    s.strip_suffix(&QUOTES[..]).unwrap_or(s)
}
