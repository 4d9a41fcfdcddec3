use std::path::PathBuf;

use anyhow::Result;

use super::constants::{
    ENV_BOARD_MODEL_PATH, ENV_BOARD_SERIAL_PATH, ENV_CPUINFO_PATH, ENV_EXPECTED_FINGERPRINT,
    ENV_MAC_PATH, ENV_MAILBOX_DEVICE, ENV_NET_IFACE, ENV_OUTPUT, ENV_VCGENCMD,
};
use super::types::RpidConfig;
use super::util::{env_non_empty, parse_expected_fingerprint, parse_output_mode};

impl RpidConfig {
    pub(super) fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(v) = env_non_empty(ENV_OUTPUT) {
            self.output = parse_output_mode(&v)?;
        }
        if let Some(v) = env_non_empty(ENV_MAILBOX_DEVICE) {
            self.mailbox_device = PathBuf::from(v);
        }
        self.apply_env_sources();
        if let Some(v) = env_non_empty(ENV_VCGENCMD) {
            self.vcgencmd = Some(PathBuf::from(v));
        }
        if let Some(v) = env_non_empty(ENV_EXPECTED_FINGERPRINT) {
            self.expected_fingerprint = Some(parse_expected_fingerprint(&v)?);
        }
        Ok(())
    }

    fn apply_env_sources(&mut self) {
        if let Some(v) = env_non_empty(ENV_CPUINFO_PATH) {
            self.cpuinfo_path = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty(ENV_BOARD_MODEL_PATH) {
            self.board_model_path = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty(ENV_BOARD_SERIAL_PATH) {
            self.board_serial_path = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty(ENV_NET_IFACE) {
            self.net_iface = v;
        }
        if let Some(v) = env_non_empty(ENV_MAC_PATH) {
            self.mac_path = Some(PathBuf::from(v));
        }
    }
}
