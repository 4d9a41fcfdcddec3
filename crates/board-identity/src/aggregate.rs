use serde::Serialize;
use tracing::{debug, info};
use vcmailbox::{render_hex_word, FirmwareProperties};

use crate::digest::fingerprint_hex;
use crate::errors::IdentityResult;
use crate::sources::{read_text_source, FirmwareCommand, SourcePaths, OTP_DUMP_COMMAND};

/// Identity inputs in blob order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    CpuInfo,
    BoardModel,
    BoardSerial,
    MacAddress,
    MailboxBoardModel,
    MailboxBoardRevision,
    MailboxBoardSerial,
    MailboxMacAddress,
    OtpDump,
}

impl IdentitySource {
    pub const ORDER: [IdentitySource; 9] = [
        Self::CpuInfo,
        Self::BoardModel,
        Self::BoardSerial,
        Self::MacAddress,
        Self::MailboxBoardModel,
        Self::MailboxBoardRevision,
        Self::MailboxBoardSerial,
        Self::MailboxMacAddress,
        Self::OtpDump,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CpuInfo => "CPU Info",
            Self::BoardModel | Self::MailboxBoardModel => "Board Model",
            Self::BoardSerial | Self::MailboxBoardSerial => "Board Serial",
            Self::MacAddress | Self::MailboxMacAddress => "MAC Address",
            Self::MailboxBoardRevision => "Board Revision",
            Self::OtpDump => "OTP",
        }
    }
}

/// Produces the raw bytes of one identity source.
pub trait IdentityProbe {
    fn collect(&self, source: IdentitySource) -> IdentityResult<Vec<u8>>;

    /// Where the bytes came from, for display.
    fn origin(&self, source: IdentitySource) -> String;
}

/// Reads the live board: kernel files, the property mailbox and the vendor
/// firmware command.
#[derive(Debug, Clone)]
pub struct SystemProbe<P, C> {
    paths: SourcePaths,
    properties: P,
    firmware: C,
}

impl<P: FirmwareProperties, C: FirmwareCommand> SystemProbe<P, C> {
    pub fn new(paths: SourcePaths, properties: P, firmware: C) -> Self {
        Self {
            paths,
            properties,
            firmware,
        }
    }

    pub fn paths(&self) -> &SourcePaths {
        &self.paths
    }
}

impl<P: FirmwareProperties, C: FirmwareCommand> IdentityProbe for SystemProbe<P, C> {
    fn collect(&self, source: IdentitySource) -> IdentityResult<Vec<u8>> {
        let bytes = match source {
            IdentitySource::CpuInfo => read_text_source(&self.paths.cpuinfo)?,
            IdentitySource::BoardModel => read_text_source(&self.paths.board_model)?,
            IdentitySource::BoardSerial => read_text_source(&self.paths.board_serial)?,
            IdentitySource::MacAddress => read_text_source(&self.paths.mac_address)?,
            IdentitySource::MailboxBoardModel => {
                render_hex_word(self.properties.board_model()?).into_bytes()
            }
            IdentitySource::MailboxBoardRevision => {
                render_hex_word(self.properties.board_revision()?).into_bytes()
            }
            IdentitySource::MailboxBoardSerial => {
                render_hex_word(self.properties.board_serial()?).into_bytes()
            }
            IdentitySource::MailboxMacAddress => {
                self.properties.mac_address()?.to_string().into_bytes()
            }
            IdentitySource::OtpDump => self.firmware.run(OTP_DUMP_COMMAND)?,
        };
        Ok(bytes)
    }

    fn origin(&self, source: IdentitySource) -> String {
        match source {
            IdentitySource::CpuInfo => format!("$ cat {}", self.paths.cpuinfo.display()),
            IdentitySource::BoardModel => format!("$ cat {}", self.paths.board_model.display()),
            IdentitySource::BoardSerial => {
                format!("$ cat {}", self.paths.board_serial.display())
            }
            IdentitySource::MacAddress => format!("$ cat {}", self.paths.mac_address.display()),
            IdentitySource::MailboxBoardModel => "$ vcmailbox 0x10001 0x4 0x0 0x0".to_string(),
            IdentitySource::MailboxBoardRevision => "$ vcmailbox 0x10002 0x4 0x0 0x0".to_string(),
            IdentitySource::MailboxBoardSerial => {
                "$ vcmailbox 0x10004 0x8 0x0 0x0 0x0".to_string()
            }
            IdentitySource::MailboxMacAddress => {
                "$ vcmailbox 0x10003 0x8 0x0 0x0 0x0".to_string()
            }
            IdentitySource::OtpDump => format!("vcgencmd {}", OTP_DUMP_COMMAND),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySegment {
    pub source: IdentitySource,
    pub origin: String,
    pub bytes: Vec<u8>,
}

/// Ordered raw source outputs. The concatenation is the fingerprint
/// pre-image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityBlob {
    segments: Vec<IdentitySegment>,
}

impl IdentityBlob {
    pub fn segments(&self) -> &[IdentitySegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.iter().map(|segment| segment.bytes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn concatenated(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for segment in &self.segments {
            out.extend_from_slice(&segment.bytes);
        }
        out
    }

    pub fn fingerprint(&self) -> String {
        fingerprint_hex(&self.concatenated())
    }
}

/// Collects every source in order. The first failure aborts collection.
pub fn collect_identity<P: IdentityProbe + ?Sized>(probe: &P) -> IdentityResult<IdentityBlob> {
    let mut segments = Vec::with_capacity(IdentitySource::ORDER.len());
    for source in IdentitySource::ORDER {
        let bytes = probe.collect(source)?;
        debug!(source = ?source, len = bytes.len(), "collected identity source");
        segments.push(IdentitySegment {
            source,
            origin: probe.origin(source),
            bytes,
        });
    }

    let blob = IdentityBlob { segments };
    info!(sources = blob.segments.len(), bytes = blob.len(), "identity blob assembled");
    Ok(blob)
}

#[cfg(test)]
mod tests;
