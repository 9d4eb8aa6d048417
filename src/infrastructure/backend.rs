use crate::domain::TrustApplication;
use std::fs;

/// Authentication gate checked once at startup.
///
/// The form itself has no account model; the gate is an external
/// collaborator and the bundled implementation accepts any credentials.
pub trait AuthGate {
    fn login(&self, username: &str, password: &str) -> Result<(), String>;
}

pub struct NoopAuthGate;

impl AuthGate for NoopAuthGate {
    fn login(&self, _username: &str, _password: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Destination for a finalized trust application.
///
/// The real backend is out of scope; the controller calls this exactly
/// once when the user creates the trust fund, and only the status
/// message reflects the outcome.
pub trait SubmissionSink {
    /// Accepts the record as final. Returns a short description of where
    /// it went, or an error message for the status bar.
    fn submit(&self, record: &TrustApplication) -> Result<String, String>;
}

/// Stand-in sink that serializes the record to a JSON file.
pub struct FileSubmissionSink {
    path: String,
}

impl FileSubmissionSink {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SubmissionSink for FileSubmissionSink {
    fn submit(&self, record: &TrustApplication) -> Result<String, String> {
        match serde_json::to_string_pretty(record) {
            Ok(json) => match fs::write(&self.path, &json) {
                Ok(_) => Ok(self.path.clone()),
                Err(e) => Err(e.to_string()),
            },
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }
}
