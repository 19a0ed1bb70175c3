use std::sync::Once;

use scanner_core::{classify, normalize_name, BRAND_KEYWORDS};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn detect(subject: &str) -> Option<String> {
    classify(subject).map(|name| name.into_string())
}

#[test]
fn empty_subject_detects_nothing() {
    init_logging();
    assert_eq!(detect(""), None);
    assert_eq!(detect(" \r\n\t "), None);
    let missing: Option<&str> = None;
    assert_eq!(missing.and_then(classify), None);
}

#[test]
fn welcome_subject_yields_service() {
    init_logging();
    assert_eq!(detect("Welcome to Netflix!").as_deref(), Some("Netflix"));
}

#[test]
fn verify_subject_yields_service() {
    init_logging();
    assert_eq!(
        detect("Please verify your Spotify account").as_deref(),
        Some("Spotify")
    );
}

#[test]
fn shipped_phrasing_falls_back_to_keyword() {
    init_logging();
    assert_eq!(
        detect("Your Amazon order has shipped").as_deref(),
        Some("Amazon")
    );
}

#[test]
fn line_breaks_are_flattened_before_matching() {
    init_logging();
    assert_eq!(
        detect("Welcome to\r\n\tthe cool app.").as_deref(),
        Some("The Cool App")
    );
}

#[test]
fn captured_names_go_through_aliases() {
    init_logging();
    assert_eq!(detect("Welcome to Insta Lite!").as_deref(), Some("Instagram"));
    assert_eq!(
        detect("Confirm your \"Acme\" account").as_deref(),
        Some("Acme")
    );
}

#[test]
fn keyword_fallback_respects_list_order() {
    init_logging();
    // Google precedes Google Cloud, so the shorter brand wins.
    assert_eq!(
        detect("Your Google Cloud billing summary").as_deref(),
        Some("Google")
    );
    // Netflix precedes YouTube.
    assert_eq!(
        detect("youtube and netflix bundle").as_deref(),
        Some("Netflix")
    );
    assert_eq!(BRAND_KEYWORDS.first(), Some(&"Netflix"));
}

#[test]
fn keyword_fallback_returns_canonical_spelling() {
    init_logging();
    assert_eq!(
        detect("new LINKEDIN connection request").as_deref(),
        Some("LinkedIn")
    );
}

#[test]
fn unrecognised_subject_detects_nothing() {
    init_logging();
    assert_eq!(detect("Lunch on Friday?"), None);
}

#[test]
fn classification_is_deterministic() {
    init_logging();
    let subjects = [
        "Welcome to Netflix!",
        "Order placed - Meesho",
        "Security alert from Google.",
        "Lunch on Friday?",
    ];
    for subject in subjects {
        assert_eq!(detect(subject), detect(subject));
    }
}

#[test]
fn normalizer_examples() {
    init_logging();
    assert_eq!(normalize_name("INSTA").as_str(), "Instagram");
    assert_eq!(normalize_name("the cool app").as_str(), "The Cool App");
}
