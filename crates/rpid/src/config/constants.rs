pub(super) const CONFIG_ENV_VAR: &str = "RPID_CONFIG";
pub(super) const CONFIG_CANDIDATES: [&str; 1] = ["/etc/rpid/rpid.conf"];

pub(super) const ENV_OUTPUT: &str = "RPID_OUTPUT";
pub(super) const ENV_MAILBOX_DEVICE: &str = "RPID_MAILBOX_DEVICE";
pub(super) const ENV_NET_IFACE: &str = "RPID_NET_IFACE";
pub(super) const ENV_CPUINFO_PATH: &str = "RPID_CPUINFO_PATH";
pub(super) const ENV_BOARD_MODEL_PATH: &str = "RPID_BOARD_MODEL_PATH";
pub(super) const ENV_BOARD_SERIAL_PATH: &str = "RPID_BOARD_SERIAL_PATH";
pub(super) const ENV_MAC_PATH: &str = "RPID_MAC_PATH";
pub(super) const ENV_VCGENCMD: &str = "RPID_VCGENCMD";
pub(super) const ENV_EXPECTED_FINGERPRINT: &str = "RPID_EXPECTED_FINGERPRINT";
