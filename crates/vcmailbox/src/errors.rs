use std::fmt;
use std::path::PathBuf;

use crate::property::{PropertyTag, RESPONSE_PARSE_ERROR};

#[derive(Debug)]
pub enum MailboxError {
    ChannelUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    IoctlFailed {
        path: PathBuf,
        errno: i32,
    },
    FirmwareRequestFailed {
        tag: PropertyTag,
        code: u32,
    },
    InvalidRequest(String),
}

impl MailboxError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChannelUnavailable { .. } => "channel_unavailable",
            Self::IoctlFailed { .. } => "ioctl_failed",
            Self::FirmwareRequestFailed { .. } => "firmware_request_failed",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl fmt::Display for MailboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelUnavailable { path, source } => {
                write!(f, "could not open mailbox device {}: {}", path.display(), source)
            }
            Self::IoctlFailed { path, errno } => write!(
                f,
                "mailbox property ioctl on {} failed: {}",
                path.display(),
                std::io::Error::from_raw_os_error(*errno)
            ),
            Self::FirmwareRequestFailed { tag, code } if *code == RESPONSE_PARSE_ERROR => write!(
                f,
                "firmware could not parse {} request (code {:#010x})",
                tag.name(),
                code
            ),
            Self::FirmwareRequestFailed { tag, code } => write!(
                f,
                "firmware rejected {} request (code {:#010x})",
                tag.name(),
                code
            ),
            Self::InvalidRequest(msg) => write!(f, "invalid property request: {}", msg),
        }
    }
}

impl std::error::Error for MailboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ChannelUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type MailboxResult<T> = std::result::Result<T, MailboxError>;
