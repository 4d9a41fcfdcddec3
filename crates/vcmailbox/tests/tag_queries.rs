use std::cell::RefCell;
use std::collections::HashMap;

use vcmailbox::{
    get_board_model, get_board_revision, get_board_serial, get_mac_address, query_property,
    FirmwareProperties, MailboxChannel, MailboxError, MailboxResult, PropertyClient, PropertyFrame,
    PropertyTag, RESPONSE_PARSE_ERROR, RESPONSE_SUCCESS,
};

/// Answers property requests the way the firmware does: rewrites the
/// response code and value words in place.
struct ScriptedFirmware {
    code: u32,
    values: HashMap<u32, Vec<u32>>,
    seen: RefCell<Vec<(u32, u32)>>,
}

impl ScriptedFirmware {
    fn answering(values: Vec<(PropertyTag, Vec<u32>)>) -> Self {
        Self {
            code: RESPONSE_SUCCESS,
            values: values
                .into_iter()
                .map(|(tag, words)| (tag.id(), words))
                .collect(),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn rejecting(code: u32) -> Self {
        Self {
            code,
            ..Self::answering(Vec::new())
        }
    }
}

impl MailboxChannel for ScriptedFirmware {
    fn exchange(&self, frame: &mut PropertyFrame) -> MailboxResult<()> {
        let size = frame.word(0).unwrap_or_default();
        let tag_id = frame.word(2).unwrap_or_default();
        self.seen.borrow_mut().push((tag_id, size));

        frame.set_word(1, self.code);
        if let Some(words) = self.values.get(&tag_id) {
            frame.set_word(4, 0x8000_0000 | (words.len() as u32 * 4));
            for (offset, word) in words.iter().enumerate() {
                frame.set_word(5 + offset, *word);
            }
        }
        Ok(())
    }
}

struct BrokenChannel;

impl MailboxChannel for BrokenChannel {
    fn exchange(&self, _frame: &mut PropertyFrame) -> MailboxResult<()> {
        Err(MailboxError::IoctlFailed {
            path: "/dev/vcio".into(),
            errno: 5,
        })
    }
}

#[test]
fn each_query_sends_its_tag_with_matching_buffer_size() {
    let firmware = ScriptedFirmware::answering(vec![
        (PropertyTag::BoardModel, vec![0x00a0_3111]),
        (PropertyTag::BoardRevision, vec![0x1]),
        (PropertyTag::BoardSerial, vec![0xdead_beef, 0x0]),
        (PropertyTag::BoardMacAddress, vec![0xddcc_bbaa, 0x0000_ffee]),
    ]);

    assert_eq!(get_board_model(&firmware).expect("model"), 0x00a0_3111);
    assert_eq!(get_board_revision(&firmware).expect("revision"), 1);
    assert_eq!(get_board_serial(&firmware).expect("serial"), 0xdead_beef);
    assert_eq!(
        get_mac_address(&firmware).expect("mac").to_string(),
        "aa:bb:cc:dd:ee:ff"
    );

    assert_eq!(
        firmware.seen.borrow().as_slice(),
        &[
            (0x0001_0001, 0x1c),
            (0x0001_0002, 0x1c),
            (0x0001_0004, 0x20),
            (0x0001_0003, 0x20),
        ]
    );
}

#[test]
fn non_success_code_is_rejected_regardless_of_values() {
    let mut firmware = ScriptedFirmware::rejecting(0x0000_0000);
    firmware
        .values
        .insert(PropertyTag::BoardModel.id(), vec![0x00c0_3111]);

    let err = get_board_model(&firmware).expect_err("request code left untouched");
    assert!(matches!(
        err,
        MailboxError::FirmwareRequestFailed {
            tag: PropertyTag::BoardModel,
            code: 0
        }
    ));
    assert_eq!(err.code(), "firmware_request_failed");
}

#[test]
fn parse_error_code_names_the_tag() {
    let firmware = ScriptedFirmware::rejecting(RESPONSE_PARSE_ERROR);
    let err = query_property(&firmware, PropertyTag::BoardSerial).expect_err("parse error");

    let message = err.to_string();
    assert!(message.contains("board serial"), "{message}");
    assert!(message.contains("0x80000001"), "{message}");
}

#[test]
fn channel_failures_propagate_unchanged() {
    let client = PropertyClient::new(BrokenChannel);

    for result in [
        client.board_model().map(|_| ()),
        client.board_revision().map(|_| ()),
        client.board_serial().map(|_| ()),
        client.mac_address().map(|_| ()),
    ] {
        assert!(matches!(result, Err(MailboxError::IoctlFailed { errno: 5, .. })));
    }
}

#[test]
fn client_queries_go_through_the_wrapped_channel() {
    let firmware = ScriptedFirmware::answering(vec![(PropertyTag::BoardRevision, vec![0x00c0_3112])]);
    let client = PropertyClient::new(&firmware);

    assert_eq!(client.board_revision().expect("revision"), 0x00c0_3112);
    assert_eq!(firmware.seen.borrow().len(), 1);
}
