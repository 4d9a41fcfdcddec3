mod config;

use std::io::Write;

use anyhow::{Context, Result};
use board_identity::{
    collect_identity, verify_fingerprint, IdentityReport, SystemProbe, VcgencmdRunner,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vcmailbox::{PropertyClient, VcioChannel};

use config::RpidConfig;

const LOG_ENV_VAR: &str = "RPID_LOG";

fn main() -> Result<()> {
    init_tracing();
    let config = RpidConfig::load()?;

    info!(
        output = config.output.as_str(),
        mailbox = %config.mailbox_device.display(),
        iface = %config.net_iface,
        verify = config.expected_fingerprint.is_some(),
        "rpid started"
    );

    let probe = SystemProbe::new(
        config.source_paths(),
        PropertyClient::new(VcioChannel::new(&config.mailbox_device)),
        VcgencmdRunner::new(config.vcgencmd.clone()),
    );
    let blob = collect_identity(&probe).context("failed collecting board identity")?;
    let report = IdentityReport::from_blob(&blob);

    if let Some(expected) = &config.expected_fingerprint {
        if !verify_fingerprint(&blob.concatenated(), expected) {
            warn!(expected = %expected, computed = %report.fingerprint, "fingerprint mismatch");
            anyhow::bail!(
                "board fingerprint mismatch: expected {}, computed {}",
                expected,
                report.fingerprint
            );
        }
        info!("fingerprint matches expected value");
    }

    let rendered = report
        .render(config.output)
        .context("failed rendering identity report")?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed writing output")?;
    stdout.flush().context("failed writing output")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
