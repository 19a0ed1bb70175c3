//! Scanner core: pure subject classification and result aggregation.
//!
//! Nothing in this crate performs I/O; the engine feeds it header data and
//! hands the resulting view to whatever presents it.
mod classify;
mod headers;
mod normalize;
mod service;
mod view_model;

pub use classify::{classify, extraction_rules, ExtractionRule, BRAND_KEYWORDS};
pub use headers::{extract_subject, HeaderField};
pub use normalize::normalize_name;
pub use service::{collect_services, ServiceName, ServiceSet};
pub use view_model::{ServicesView, EMPTY_STATE_TEXT};
