/// Shown in place of the list when no service was detected.
pub const EMPTY_STATE_TEXT: &str = "No services detected";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServicesView {
    pub services: Vec<String>,
}

impl ServicesView {
    pub fn new(services: &[String]) -> Self {
        Self {
            services: services.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// One display row per service, or the empty-state row.
    pub fn rows(&self) -> Vec<String> {
        if self.services.is_empty() {
            return vec![EMPTY_STATE_TEXT.to_string()];
        }
        self.services.clone()
    }
}
