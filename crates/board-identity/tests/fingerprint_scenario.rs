use std::path::{Path, PathBuf};

use board_identity::{
    collect_identity, FirmwareCommand, IdentityError, IdentityReport, IdentityResult, OutputMode,
    SourcePaths, SystemProbe,
};
use vcmailbox::{
    MailboxChannel, MailboxResult, PropertyClient, PropertyFrame, PropertyTag, RESPONSE_SUCCESS,
};

const SCENARIO_BLOB: &[u8] = b"XPi4SN1aa:bb:cc:dd:ee:ffa031111deadbeefaa:bb:cc:dd:ee:ffotp";
const SCENARIO_FINGERPRINT: &str =
    "8315b128d083c6cb62645e0ad5560f9e49e13232bfbe109ed54f7cb5ece18458";

struct StubFirmware;

impl MailboxChannel for StubFirmware {
    fn exchange(&self, frame: &mut PropertyFrame) -> MailboxResult<()> {
        let words: &[u32] = match frame.word(2).and_then(PropertyTag::from_id) {
            Some(PropertyTag::BoardModel) => &[0x00a0_3111],
            Some(PropertyTag::BoardRevision) => &[0x0000_0001],
            Some(PropertyTag::BoardSerial) => &[0xdead_beef, 0x1000_0000],
            Some(PropertyTag::BoardMacAddress) => &[0xddcc_bbaa, 0x0000_ffee],
            None => &[],
        };
        frame.set_word(1, RESPONSE_SUCCESS);
        for (offset, word) in words.iter().enumerate() {
            frame.set_word(5 + offset, *word);
        }
        Ok(())
    }
}

struct StubOtp;

impl FirmwareCommand for StubOtp {
    fn run(&self, command: &str) -> IdentityResult<Vec<u8>> {
        assert_eq!(command, "otp_dump");
        Ok(b"otp".to_vec())
    }
}

struct Fixture {
    dir: PathBuf,
    paths: SourcePaths,
}

impl Fixture {
    fn new(label: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "rpid-scenario-{}-{}",
            label,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default()
        ));
        std::fs::create_dir_all(&dir).expect("create fixture dir");

        let paths = SourcePaths {
            cpuinfo: write(&dir, "cpuinfo", b"X"),
            board_model: write(&dir, "model", b"Pi4"),
            board_serial: write(&dir, "serial-number", b"SN1"),
            mac_address: write(&dir, "address", b"aa:bb:cc:dd:ee:ff"),
        };
        Self { dir, paths }
    }

    fn probe(&self) -> SystemProbe<PropertyClient<StubFirmware>, StubOtp> {
        SystemProbe::new(self.paths.clone(), PropertyClient::new(StubFirmware), StubOtp)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn write(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture file");
    path
}

#[test]
fn scenario_reproduces_committed_fingerprint() {
    let fixture = Fixture::new("golden");
    let blob = collect_identity(&fixture.probe()).expect("collect identity");

    assert_eq!(blob.concatenated(), SCENARIO_BLOB);
    assert_eq!(blob.fingerprint(), SCENARIO_FINGERPRINT);
}

#[test]
fn repeated_runs_produce_identical_blobs() {
    let fixture = Fixture::new("repeat");
    let probe = fixture.probe();

    let first = collect_identity(&probe).expect("first run");
    let second = collect_identity(&probe).expect("second run");

    assert_eq!(first.concatenated(), second.concatenated());
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn unreadable_text_source_aborts_before_any_digest() {
    let fixture = Fixture::new("unreadable");
    std::fs::remove_file(&fixture.paths.board_serial).expect("remove serial");

    let err = collect_identity(&fixture.probe()).expect_err("serial missing");

    match &err {
        IdentityError::SourceUnavailable { path, .. } => {
            assert_eq!(path, &fixture.paths.board_serial)
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("serial-number"));
}

#[test]
fn sectioned_report_shows_rendered_firmware_values() {
    let fixture = Fixture::new("sections");
    let blob = collect_identity(&fixture.probe()).expect("collect identity");
    let out = IdentityReport::from_blob(&blob)
        .render(OutputMode::Sections)
        .expect("render");

    assert!(out.contains(
        "-------------------- Board Model: $ vcmailbox 0x10001 0x4 0x0 0x0 --------------------\na03111\n"
    ));
    assert!(out.contains(
        "-------------------- Board Serial: $ vcmailbox 0x10004 0x8 0x0 0x0 0x0 --------------------\ndeadbeef\n"
    ));
    assert!(out.ends_with("-------------------- OTP: vcgencmd otp_dump --------------------\notp\n"));
}
