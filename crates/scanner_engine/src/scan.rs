use std::sync::Arc;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use scanner_core::{classify, extract_subject, ServiceSet};

use crate::batch::{run_in_batches, BatchSettings, NullProgressSink, ProgressSink};
use crate::{
    AccessToken, AuthError, FetchError, MailApi, MessageRef, MetadataResult, SignIn,
    GMAIL_READONLY_SCOPE,
};

pub const DEFAULT_QUERY: &str =
    r#"subject:(welcome OR verify OR "confirm your" OR "activate" OR "account") newer_than:365d"#;
pub const DEFAULT_MAX_RESULTS: u32 = 10;

pub const SIGNED_IN_TEXT: &str = "Signed in successfully. You can now scan Gmail.";
pub const NO_MATCHES_TEXT: &str = "No matching emails found. Try again later!";
pub const SEARCH_FAILED_TEXT: &str = "Failed to fetch Gmail messages. Check console for details.";

/// Where user-facing output goes.
pub trait Presenter: Send + Sync {
    /// A one-off notice, e.g. a sign-in failure.
    fn alert(&self, message: &str);
    /// The final list of detected services; may be empty.
    fn present(&self, services: &[String]);
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub query: String,
    pub max_results: u32,
    pub batch: BatchSettings,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            batch: BatchSettings::default(),
        }
    }
}

/// Failures that abort a whole run. Per-message failures never do.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("search failed: {0}")]
    Search(#[source] FetchError),
}

impl ScanError {
    pub fn user_message(&self) -> String {
        match self {
            ScanError::Auth(err) => err.user_message(),
            ScanError::Search(_) => SEARCH_FAILED_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanReport {
    pub message_count: usize,
    /// Ids whose metadata could not be fetched after all retries.
    pub failed_ids: Vec<String>,
    pub services: Vec<String>,
}

pub struct Scanner {
    api: Arc<dyn MailApi>,
    settings: ScanSettings,
    sink: Arc<dyn ProgressSink>,
}

impl Scanner {
    pub fn new(api: Arc<dyn MailApi>, settings: ScanSettings) -> Self {
        Self {
            api,
            settings,
            sink: Arc::new(NullProgressSink),
        }
    }

    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Entry point for one user activation: sign in, search, fetch, classify
    /// and present. Aborting errors are alerted before being returned.
    pub async fn on_activate(
        &self,
        sign_in: &dyn SignIn,
        presenter: &dyn Presenter,
    ) -> Result<ScanReport, ScanError> {
        match self.run(sign_in, presenter).await {
            Ok(report) => Ok(report),
            Err(err) => {
                engine_error!("Scan aborted: {}", err);
                presenter.alert(&err.user_message());
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        sign_in: &dyn SignIn,
        presenter: &dyn Presenter,
    ) -> Result<ScanReport, ScanError> {
        let token = sign_in.sign_in(&[GMAIL_READONLY_SCOPE]).await?;
        if token.is_empty() {
            return Err(AuthError::MissingCredential.into());
        }
        engine_info!("Got access token, length {}", token.len());
        presenter.alert(SIGNED_IN_TEXT);

        let messages = self
            .api
            .search(&token, &self.settings.query, self.settings.max_results)
            .await
            .map_err(ScanError::Search)?;

        if messages.is_empty() {
            engine_info!("Search returned no messages");
            presenter.alert(NO_MATCHES_TEXT);
            presenter.present(&[]);
            return Ok(ScanReport::default());
        }
        engine_info!("Found {} messages", messages.len());

        let outcomes = self.fetch_metadata(&token, &messages).await;
        let report = summarize(messages.len(), outcomes);
        presenter.present(&report.services);
        Ok(report)
    }

    /// Batch-fetches header metadata for every message, with retries.
    pub async fn fetch_metadata(
        &self,
        token: &AccessToken,
        messages: &[MessageRef],
    ) -> Vec<MetadataResult> {
        let api = self.api.as_ref();
        run_in_batches(
            messages,
            &self.settings.batch,
            self.sink.as_ref(),
            |message: &MessageRef| {
                let id = message.id.clone();
                async move { api.fetch_metadata(token, &id).await }
            },
        )
        .await
    }
}

fn summarize(message_count: usize, outcomes: Vec<MetadataResult>) -> ScanReport {
    let mut services = ServiceSet::new();
    let mut failed_ids = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(metadata) => {
                let subject = extract_subject(&metadata.headers);
                engine_debug!("Subject of {}: {}", outcome.id, subject);
                if let Some(name) = classify(subject) {
                    services.insert(name);
                }
            }
            Err(err) => {
                engine_warn!("Metadata fetch failed for {}: {}", outcome.id, err);
                failed_ids.push(outcome.id);
            }
        }
    }

    let services = services.into_names();
    engine_info!("Detected services: {:?}", services);
    ScanReport {
        message_count,
        failed_ids,
        services,
    }
}
