use chrono::Local;
use engine_logging::{engine_debug, engine_info};
use scanner_core::ServicesView;
use scanner_engine::{AccessToken, AuthError, Presenter, ProgressSink, ScanEvent, SignIn};

/// Prints notices and the detected services to stdout.
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn present(&self, services: &[String]) {
        println!(
            "Detected services ({}):",
            Local::now().format("%Y-%m-%d %H:%M")
        );
        for row in ServicesView::new(services).rows() {
            println!("  - {row}");
        }
    }
}

/// Sign-in backed by a token obtained out of band.
pub struct TokenSignIn {
    token: Option<String>,
}

impl TokenSignIn {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait::async_trait]
impl SignIn for TokenSignIn {
    async fn sign_in(&self, scopes: &[&str]) -> Result<AccessToken, AuthError> {
        engine_info!("Using supplied access token for scopes {:?}", scopes);
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
            _ => Err(AuthError::MissingCredential),
        }
    }
}

/// Mirrors pipeline progress into the debug log.
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: ScanEvent) {
        match event {
            ScanEvent::BatchStarted { index, size } => {
                engine_debug!("Batch {} started with {} messages", index, size);
            }
            ScanEvent::ItemFinished { id, ok } => {
                engine_debug!("Message {} finished ok={}", id, ok);
            }
            ScanEvent::BatchFinished { index } => {
                engine_debug!("Batch {} finished", index);
            }
        }
    }
}
