use serde::Serialize;

use crate::aggregate::{IdentityBlob, IdentitySource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Fingerprint,
    Sections,
    Json,
}

impl OutputMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fingerprint" | "hash" => Some(Self::Fingerprint),
            "sections" | "dump" | "raw" => Some(Self::Sections),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fingerprint => "fingerprint",
            Self::Sections => "sections",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceEntry {
    pub source: IdentitySource,
    pub label: &'static str,
    pub origin: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentityReport {
    pub fingerprint: String,
    pub sources: Vec<SourceEntry>,
}

impl IdentityReport {
    pub fn from_blob(blob: &IdentityBlob) -> Self {
        let sources = blob
            .segments()
            .iter()
            .map(|segment| SourceEntry {
                source: segment.source,
                label: segment.source.label(),
                origin: segment.origin.clone(),
                value: String::from_utf8_lossy(&segment.bytes).into_owned(),
            })
            .collect();
        Self {
            fingerprint: blob.fingerprint(),
            sources,
        }
    }

    pub fn render(&self, mode: OutputMode) -> Result<String, serde_json::Error> {
        match mode {
            OutputMode::Fingerprint => Ok(format!("{}\n", self.fingerprint)),
            OutputMode::Sections => Ok(self.render_sections()),
            OutputMode::Json => {
                let mut out = serde_json::to_string_pretty(self)?;
                out.push('\n');
                Ok(out)
            }
        }
    }

    fn render_sections(&self) -> String {
        let mut out = String::new();
        for entry in &self.sources {
            out.push_str(&format!(
                "-------------------- {}: {} --------------------\n",
                entry.label, entry.origin
            ));
            out.push_str(&entry.value);
            out.push('\n');
        }
        out
    }
}
