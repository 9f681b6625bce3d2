use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed; extraction signals nothing through the
///   exit code regardless of how many files it touched
/// - `Error` (2): Command failed due to internal error (config error, write
///   failure, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed.
    Success,
    /// Command failed due to internal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
