//! Kernel text files and the vendor firmware command.
//!
//! Both are read verbatim: no trimming, no parsing. The bytes feed the
//! identity blob exactly as the kernel or firmware produced them.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::errors::{IdentityError, IdentityResult};

pub const CPUINFO_PATH: &str = "/proc/cpuinfo";
pub const BOARD_MODEL_PATH: &str = "/sys/firmware/devicetree/base/model";
pub const BOARD_SERIAL_PATH: &str = "/sys/firmware/devicetree/base/serial-number";
pub const DEFAULT_NET_IFACE: &str = "eth0";

pub const OTP_DUMP_COMMAND: &str = "otp_dump";
pub const VCGENCMD_CANDIDATES: [&str; 2] = ["/usr/bin/vcgencmd", "/opt/vc/bin/vcgencmd"];

/// Size of the result buffer the vendor command interface fills.
pub const FIRMWARE_RESULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub cpuinfo: PathBuf,
    pub board_model: PathBuf,
    pub board_serial: PathBuf,
    pub mac_address: PathBuf,
}

impl SourcePaths {
    pub fn for_interface(iface: &str) -> Self {
        Self {
            cpuinfo: PathBuf::from(CPUINFO_PATH),
            board_model: PathBuf::from(BOARD_MODEL_PATH),
            board_serial: PathBuf::from(BOARD_SERIAL_PATH),
            mac_address: net_address_path(iface),
        }
    }
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self::for_interface(DEFAULT_NET_IFACE)
    }
}

pub fn net_address_path(iface: &str) -> PathBuf {
    Path::new("/sys/class/net").join(iface).join("address")
}

/// Whole-file byte slurp.
pub fn read_text_source(path: &Path) -> IdentityResult<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|source| {
        warn!(path = %path.display(), error = %source, "identity source unavailable");
        IdentityError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), len = bytes.len(), "read identity source");
    Ok(bytes)
}

pub trait FirmwareCommand {
    fn run(&self, command: &str) -> IdentityResult<Vec<u8>>;
}

/// Runs firmware commands through the vendor `vcgencmd` tool.
#[derive(Debug, Clone, Default)]
pub struct VcgencmdRunner {
    binary: Option<PathBuf>,
}

impl VcgencmdRunner {
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self { binary }
    }

    fn resolve_binary(&self) -> Option<PathBuf> {
        if let Some(binary) = &self.binary {
            return Some(binary.clone());
        }
        VCGENCMD_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    }
}

impl FirmwareCommand for VcgencmdRunner {
    fn run(&self, command: &str) -> IdentityResult<Vec<u8>> {
        let failed = |detail: String| {
            warn!(command, detail = %detail, "firmware command failed");
            IdentityError::FirmwareCommandFailed {
                command: command.to_string(),
                detail,
            }
        };

        let binary = self
            .resolve_binary()
            .ok_or_else(|| failed(format!("vcgencmd not found in {:?}", VCGENCMD_CANDIDATES)))?;
        let output = Command::new(&binary)
            .arg(command)
            .output()
            .map_err(|err| failed(format!("spawn {}: {}", binary.display(), err)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(failed(format!(
                "{} exited with {}{}",
                binary.display(),
                output.status,
                if stderr.is_empty() {
                    String::new()
                } else {
                    format!(": {}", stderr)
                }
            )));
        }

        let result = clamp_firmware_result(&output.stdout);
        debug!(command, len = result.len(), "firmware command completed");
        Ok(result)
    }
}

/// Applies the vendor result buffer semantics: the text ends at the first
/// NUL and never exceeds the buffer less its terminator.
pub fn clamp_firmware_result(raw: &[u8]) -> Vec<u8> {
    let end = raw
        .iter()
        .position(|byte| *byte == 0)
        .unwrap_or(raw.len())
        .min(FIRMWARE_RESULT_CAPACITY - 1);
    raw[..end].to_vec()
}
