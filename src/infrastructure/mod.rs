//! External collaborators: the authentication gate and the submission
//! sink the form hands a finalized record to.

pub mod backend;

pub use backend::{AuthGate, FileSubmissionSink, NoopAuthGate, SubmissionSink};
