use anyhow::{Context, Result};
use board_identity::{normalize_fingerprint, OutputMode};

pub(super) fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty()).map(|s| s.trim().to_string())
}

pub(super) fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| non_empty(Some(v)))
}

pub(super) fn parse_output_mode(raw: &str) -> Result<OutputMode> {
    OutputMode::parse(raw)
        .with_context(|| format!("unknown output mode '{}' (fingerprint|sections|json)", raw))
}

pub(super) fn parse_expected_fingerprint(raw: &str) -> Result<String> {
    normalize_fingerprint(raw)
        .with_context(|| format!("expected fingerprint is not 64 hex characters: '{}'", raw))
}
