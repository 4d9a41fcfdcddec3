use std::path::PathBuf;

use board_identity::{
    OutputMode, BOARD_MODEL_PATH, BOARD_SERIAL_PATH, CPUINFO_PATH, DEFAULT_NET_IFACE,
};
use vcmailbox::DEFAULT_MAILBOX_DEVICE;

use super::types::RpidConfig;

impl Default for RpidConfig {
    fn default() -> Self {
        Self {
            output: OutputMode::default(),
            mailbox_device: PathBuf::from(DEFAULT_MAILBOX_DEVICE),
            net_iface: DEFAULT_NET_IFACE.to_string(),
            cpuinfo_path: PathBuf::from(CPUINFO_PATH),
            board_model_path: PathBuf::from(BOARD_MODEL_PATH),
            board_serial_path: PathBuf::from(BOARD_SERIAL_PATH),
            mac_path: None,
            vcgencmd: None,
            expected_fingerprint: None,
        }
    }
}
