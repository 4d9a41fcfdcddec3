//! Board identity fingerprinting.
//!
//! Collects kernel-exposed identifiers, firmware property-tag answers and the
//! OTP dump in a fixed order and folds them into one SHA-256 fingerprint.

mod aggregate;
mod digest;
mod errors;
mod report;
mod sources;

pub use aggregate::{
    collect_identity, IdentityBlob, IdentityProbe, IdentitySegment, IdentitySource, SystemProbe,
};
pub use digest::{
    fingerprint_digest, fingerprint_hex, normalize_fingerprint, verify_fingerprint,
    FINGERPRINT_DIGEST_LEN, FINGERPRINT_HEX_LEN,
};
pub use errors::{IdentityError, IdentityResult};
pub use report::{IdentityReport, OutputMode, SourceEntry};
pub use sources::{
    clamp_firmware_result, net_address_path, read_text_source, FirmwareCommand, SourcePaths,
    VcgencmdRunner, BOARD_MODEL_PATH, BOARD_SERIAL_PATH, CPUINFO_PATH, DEFAULT_NET_IFACE,
    FIRMWARE_RESULT_CAPACITY, OTP_DUMP_COMMAND, VCGENCMD_CANDIDATES,
};
