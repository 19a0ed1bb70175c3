/// One `{name, value}` header as returned by the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Value of the first `Subject` header (name compared case-insensitively),
/// or `""` when there is none.
pub fn extract_subject(headers: &[HeaderField]) -> &str {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("subject"))
        .map(|h| h.value.as_str())
        .unwrap_or("")
}
