use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use super::*;
use crate::errors::IdentityError;

struct StaticProbe {
    answers: HashMap<IdentitySource, Vec<u8>>,
    failing: Option<IdentitySource>,
    calls: RefCell<Vec<IdentitySource>>,
}

impl StaticProbe {
    fn new() -> Self {
        let answers = IdentitySource::ORDER
            .iter()
            .enumerate()
            .map(|(index, source)| (*source, format!("<{}>", index).into_bytes()))
            .collect();
        Self {
            answers,
            failing: None,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl IdentityProbe for StaticProbe {
    fn collect(&self, source: IdentitySource) -> IdentityResult<Vec<u8>> {
        self.calls.borrow_mut().push(source);
        if self.failing == Some(source) {
            return Err(IdentityError::SourceUnavailable {
                path: PathBuf::from("/sys/firmware/devicetree/base/model"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        Ok(self.answers.get(&source).cloned().unwrap_or_default())
    }

    fn origin(&self, source: IdentitySource) -> String {
        format!("static:{:?}", source)
    }
}

#[test]
fn sources_are_collected_in_fixed_order_without_delimiters() {
    let probe = StaticProbe::new();
    let blob = collect_identity(&probe).expect("collect");

    assert_eq!(probe.calls.borrow().as_slice(), &IdentitySource::ORDER);
    assert_eq!(blob.concatenated(), b"<0><1><2><3><4><5><6><7><8>");
    assert_eq!(blob.len(), 27);
    assert_eq!(blob.segments()[8].origin, "static:OtpDump");
}

#[test]
fn collection_is_deterministic() {
    let first = collect_identity(&StaticProbe::new()).expect("first");
    let second = collect_identity(&StaticProbe::new()).expect("second");

    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn first_failure_aborts_remaining_sources() {
    let mut probe = StaticProbe::new();
    probe.failing = Some(IdentitySource::BoardModel);

    let err = collect_identity(&probe).expect_err("board model unreadable");

    assert_eq!(err.code(), "source_unavailable");
    assert_eq!(
        probe.calls.borrow().as_slice(),
        &[IdentitySource::CpuInfo, IdentitySource::BoardModel]
    );
}

#[test]
fn empty_blob_fingerprint_has_no_hidden_prefix() {
    let blob = IdentityBlob::default();
    assert!(blob.is_empty());
    assert_eq!(
        blob.fingerprint(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn labels_follow_source_kind() {
    assert_eq!(IdentitySource::CpuInfo.label(), "CPU Info");
    assert_eq!(IdentitySource::MailboxBoardRevision.label(), "Board Revision");
    assert_eq!(IdentitySource::OtpDump.label(), "OTP");
}
