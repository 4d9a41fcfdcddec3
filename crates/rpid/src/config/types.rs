use std::path::PathBuf;

use board_identity::{net_address_path, OutputMode, SourcePaths};

#[derive(Debug, Clone)]
pub struct RpidConfig {
    pub output: OutputMode,
    pub mailbox_device: PathBuf,
    pub net_iface: String,
    pub cpuinfo_path: PathBuf,
    pub board_model_path: PathBuf,
    pub board_serial_path: PathBuf,
    /// Explicit MAC file; otherwise derived from `net_iface`.
    pub mac_path: Option<PathBuf>,
    pub vcgencmd: Option<PathBuf>,
    pub expected_fingerprint: Option<String>,
}

impl RpidConfig {
    pub fn source_paths(&self) -> SourcePaths {
        SourcePaths {
            cpuinfo: self.cpuinfo_path.clone(),
            board_model: self.board_model_path.clone(),
            board_serial: self.board_serial_path.clone(),
            mac_address: self
                .mac_path
                .clone()
                .unwrap_or_else(|| net_address_path(&self.net_iface)),
        }
    }
}
