//! Nagios plugin status codes and the single line a check reports

use std::fmt;

use crate::check::error::CheckError;

/// Plugin return state. The discriminant is the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NagiosStatus {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl NagiosStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            NagiosStatus::Ok => "OK",
            NagiosStatus::Warning => "WARNING",
            NagiosStatus::Critical => "CRITICAL",
            NagiosStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for NagiosStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status plus human-readable detail, rendered as `STATUS: message`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: NagiosStatus,
    pub message: String,
}

impl CheckOutcome {
    pub fn new(status: NagiosStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.status.code()
    }
}

impl From<CheckError> for CheckOutcome {
    fn from(err: CheckError) -> Self {
        Self::new(err.status(), err.to_string())
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Status lines are single-line by contract
        let message = self.message.replace(['\r', '\n'], " ");
        write!(f, "{}: {}", self.status, message)
    }
}
