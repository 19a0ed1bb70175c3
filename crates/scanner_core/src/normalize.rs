use crate::ServiceName;

/// Alias keys matched by case-insensitive containment. The first hit wins
/// and skips title-casing.
const ALIASES: &[(&str, &str)] = &[
    ("insta", "Instagram"),
    ("fb", "Facebook"),
    ("msg", "Messenger"),
];

/// Turns a raw captured fragment into a display name.
///
/// Quotes and parentheses are stripped, aliases are resolved, and anything
/// else is title-cased word by word.
pub fn normalize_name(raw: &str) -> ServiceName {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '(' | ')'))
        .collect();
    let cleaned = stripped.trim();

    let lowered = cleaned.to_lowercase();
    if let Some((_, canonical)) = ALIASES.iter().find(|(key, _)| lowered.contains(key)) {
        return ServiceName::from(*canonical);
    }

    let titled = cleaned
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");
    ServiceName::from(titled)
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
