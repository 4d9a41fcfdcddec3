use sha2::{Digest, Sha256};

pub const FINGERPRINT_DIGEST_LEN: usize = 32;
pub const FINGERPRINT_HEX_LEN: usize = FINGERPRINT_DIGEST_LEN * 2;

pub fn fingerprint_digest(data: &[u8]) -> [u8; FINGERPRINT_DIGEST_LEN] {
    let mut out = [0u8; FINGERPRINT_DIGEST_LEN];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// SHA-256 of `data` as lowercase hex, most significant nibble first.
pub fn fingerprint_hex(data: &[u8]) -> String {
    to_hex(&fingerprint_digest(data))
}

pub fn normalize_fingerprint(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_ascii_lowercase();
    if normalized.len() != FINGERPRINT_HEX_LEN {
        return None;
    }
    if !normalized.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some(normalized)
}

pub fn verify_fingerprint(data: &[u8], expected: &str) -> bool {
    match normalize_fingerprint(expected) {
        Some(expected) => fingerprint_hex(data) == expected,
        None => false,
    }
}

fn to_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}
