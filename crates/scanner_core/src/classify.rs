use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize_name;
use crate::ServiceName;

/// Known brands checked by substring when no extraction rule matched.
/// Order is the tie-break: the first entry found in the subject wins.
pub const BRAND_KEYWORDS: &[&str] = &[
    "Netflix",
    "Amazon",
    "Spotify",
    "Instagram",
    "Facebook",
    "Zomato",
    "Swiggy",
    "Snapchat",
    "Paytm",
    "Flipkart",
    "LinkedIn",
    "Twitter",
    "Google",
    "YouTube",
    "Uber",
    "Meesho",
    "Blinkit",
    "Firebase",
    "Google Cloud",
];

/// A single extraction pattern for lifecycle-email phrasing.
///
/// `groups` lists the capture groups to read in preference order; the first
/// non-empty one is the raw service name.
#[derive(Debug)]
pub struct ExtractionRule {
    name: &'static str,
    pattern: Regex,
    groups: &'static [usize],
}

impl ExtractionRule {
    fn new(name: &'static str, pattern: &str, groups: &'static [usize]) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("extraction pattern must compile"),
            groups,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the raw captured text if this rule matches `text`.
    pub fn extract<'t>(&self, text: &'t str) -> Option<&'t str> {
        let captures = self.pattern.captures(text)?;
        self.groups
            .iter()
            .filter_map(|&index| captures.get(index))
            .map(|m| m.as_str())
            .find(|value| !value.is_empty())
    }
}

static RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    vec![
        ExtractionRule::new(
            "welcome",
            r"(?i)welcome(?: to| aboard)?\s+(.+?)(?:[.!:-]|$)",
            &[1],
        ),
        ExtractionRule::new(
            "verify",
            r"(?i)verify (?:your|email for)\s+(.+?)(?:\s+account)?(?:[.!:-]|$)",
            &[1],
        ),
        ExtractionRule::new("confirm", r"(?i)confirm (?:your|the)\s+(.+?) account", &[1]),
        ExtractionRule::new(
            "account_created",
            r"(?i)account (?:created|activated|registered)\s+(?:with )?(.+?)(?:[.!:-]|$)",
            &[1],
        ),
        ExtractionRule::new(
            "thanks_signup",
            r"(?i)thanks for (?:signing|registering) (?:up|with)\s+(?:(?:with|for)\s+)?(.+?)(?:[.!:-]|$)",
            &[1],
        ),
        ExtractionRule::new(
            "password_reset",
            r"(?i)reset (?:your )?password(?: for)?\s+(.+?)(?:[.!:-]|$)",
            &[1],
        ),
        // Group 1 is the separator; the text after it is preferred.
        ExtractionRule::new(
            "order",
            r"(?i)order (?:confirmation|placed|shipped|delivered).*?(-|\s)[\s-]*(.+)",
            &[2, 1],
        ),
        ExtractionRule::new(
            "security_alert",
            r"(?i)security alert.*from\s+(.+?)(?:[.!:-]|$)",
            &[1],
        ),
    ]
});

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t]+").expect("line break pattern must compile"));

/// The extraction rules in priority order.
pub fn extraction_rules() -> &'static [ExtractionRule] {
    &RULES
}

/// Infers the sending service from a subject line.
///
/// Extraction rules run first (first match wins), then the brand keyword
/// list. Returns `None` when nothing is recognised.
pub fn classify(subject: &str) -> Option<ServiceName> {
    if subject.is_empty() {
        return None;
    }
    let flattened = LINE_BREAKS.replace_all(subject, " ");
    let text = flattened.trim();
    if text.is_empty() {
        return None;
    }

    for rule in extraction_rules() {
        if let Some(raw) = rule.extract(text) {
            let name = normalize_name(raw);
            if !name.is_empty() {
                return Some(name);
            }
        }
    }

    let lowered = text.to_lowercase();
    BRAND_KEYWORDS
        .iter()
        .find(|brand| lowered.contains(&brand.to_lowercase()))
        .map(|brand| ServiceName::from(*brand))
}
