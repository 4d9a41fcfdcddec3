use std::fmt;
use std::path::PathBuf;

use vcmailbox::MailboxError;

#[derive(Debug)]
pub enum IdentityError {
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    Mailbox(MailboxError),
    FirmwareCommandFailed {
        command: String,
        detail: String,
    },
}

impl IdentityError {
    /// Stable identifier for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "source_unavailable",
            Self::Mailbox(err) => err.code(),
            Self::FirmwareCommandFailed { .. } => "firmware_command_failed",
        }
    }
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable { path, source } => {
                write!(f, "could not open {}: {}", path.display(), source)
            }
            Self::Mailbox(err) => write!(f, "{}", err),
            Self::FirmwareCommandFailed { command, detail } => {
                write!(f, "could not execute `{}` command: {}", command, detail)
            }
        }
    }
}

impl std::error::Error for IdentityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnavailable { source, .. } => Some(source),
            Self::Mailbox(err) => Some(err),
            Self::FirmwareCommandFailed { .. } => None,
        }
    }
}

impl From<MailboxError> for IdentityError {
    fn from(value: MailboxError) -> Self {
        Self::Mailbox(value)
    }
}

pub type IdentityResult<T> = std::result::Result<T, IdentityError>;
