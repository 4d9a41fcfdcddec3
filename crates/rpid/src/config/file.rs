use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::paths::resolve_config_path;
use super::types::RpidConfig;
use super::util::{non_empty, parse_expected_fingerprint, parse_output_mode};

impl RpidConfig {
    pub(super) fn apply_file_config(&mut self) -> Result<bool> {
        let Some(path) = resolve_config_path()? else {
            return Ok(false);
        };
        self.apply_file_at(&path)?;
        Ok(true)
    }

    pub(super) fn apply_file_at(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading config file {}", path.display()))?;
        let file_cfg: FileConfig = toml::from_str(&raw)
            .with_context(|| format!("failed parsing TOML config {}", path.display()))?;

        self.apply_file_output(file_cfg.output)?;
        self.apply_file_mailbox(file_cfg.mailbox);
        self.apply_file_sources(file_cfg.sources);
        self.apply_file_firmware(file_cfg.firmware);
        self.apply_file_verify(file_cfg.verify)?;

        debug!(path = %path.display(), "applied config file");
        Ok(())
    }

    fn apply_file_output(&mut self, output: Option<FileOutputConfig>) -> Result<()> {
        let Some(output) = output else {
            return Ok(());
        };
        if let Some(v) = non_empty(output.mode) {
            self.output = parse_output_mode(&v)?;
        }
        Ok(())
    }

    fn apply_file_mailbox(&mut self, mailbox: Option<FileMailboxConfig>) {
        let Some(mailbox) = mailbox else {
            return;
        };
        if let Some(v) = non_empty(mailbox.device) {
            self.mailbox_device = PathBuf::from(v);
        }
    }

    fn apply_file_sources(&mut self, sources: Option<FileSourcesConfig>) {
        let Some(sources) = sources else {
            return;
        };
        if let Some(v) = non_empty(sources.cpuinfo) {
            self.cpuinfo_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty(sources.board_model) {
            self.board_model_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty(sources.board_serial) {
            self.board_serial_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty(sources.net_iface) {
            self.net_iface = v;
        }
        if let Some(v) = non_empty(sources.mac_address) {
            self.mac_path = Some(PathBuf::from(v));
        }
    }

    fn apply_file_firmware(&mut self, firmware: Option<FileFirmwareConfig>) {
        let Some(firmware) = firmware else {
            return;
        };
        if let Some(v) = non_empty(firmware.vcgencmd) {
            self.vcgencmd = Some(PathBuf::from(v));
        }
    }

    fn apply_file_verify(&mut self, verify: Option<FileVerifyConfig>) -> Result<()> {
        let Some(verify) = verify else {
            return Ok(());
        };
        if let Some(v) = non_empty(verify.expected_fingerprint) {
            self.expected_fingerprint = Some(parse_expected_fingerprint(&v)?);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    output: Option<FileOutputConfig>,
    #[serde(default)]
    mailbox: Option<FileMailboxConfig>,
    #[serde(default)]
    sources: Option<FileSourcesConfig>,
    #[serde(default)]
    firmware: Option<FileFirmwareConfig>,
    #[serde(default)]
    verify: Option<FileVerifyConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct FileOutputConfig {
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileMailboxConfig {
    #[serde(default)]
    device: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileSourcesConfig {
    #[serde(default)]
    cpuinfo: Option<String>,
    #[serde(default)]
    board_model: Option<String>,
    #[serde(default)]
    board_serial: Option<String>,
    #[serde(default)]
    net_iface: Option<String>,
    #[serde(default)]
    mac_address: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileFirmwareConfig {
    #[serde(default)]
    vcgencmd: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileVerifyConfig {
    #[serde(default)]
    expected_fingerprint: Option<String>,
}
