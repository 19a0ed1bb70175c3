//! Scanner engine: the async pipeline from sign-in to detected services.
mod auth;
mod batch;
mod fetch;
mod retry;
mod scan;
mod types;

pub use auth::{AccessToken, AuthError, SignIn, GMAIL_READONLY_SCOPE};
pub use batch::{run_in_batches, BatchSettings, NullProgressSink, ProgressSink, WorkItem};
pub use fetch::{ApiSettings, MailApi, ReqwestMailApi, GMAIL_API_BASE, METADATA_HEADERS};
pub use retry::{with_retries, RetryPolicy};
pub use scan::{
    Presenter, ScanError, ScanReport, ScanSettings, Scanner, DEFAULT_MAX_RESULTS, DEFAULT_QUERY,
    NO_MATCHES_TEXT, SEARCH_FAILED_TEXT, SIGNED_IN_TEXT,
};
pub use types::{
    FailureKind, FetchError, ItemOutcome, MessageMetadata, MessageRef, MetadataResult, ScanEvent,
};
