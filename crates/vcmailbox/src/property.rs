//! Firmware property-tag buffer layout.
//!
//! A property request is a run of 32-bit little-endian words:
//!
//! ```text
//! [0] buffer size in bytes     [1] request/response code
//! [2] tag id                   [3] value buffer size in bytes
//! [4] tag request/response     [5..5+n] value buffer
//! [5+n] end tag (0)
//! ```
//!
//! Every request travels in a 32-word [`PropertyFrame`]; the size word
//! tells the firmware how much of it is populated.

use std::fmt;

use crate::errors::{MailboxError, MailboxResult};

pub const FRAME_WORDS: usize = 32;

pub const PROCESS_REQUEST: u32 = 0x0000_0000;
pub const RESPONSE_SUCCESS: u32 = 0x8000_0000;
pub const RESPONSE_PARSE_ERROR: u32 = 0x8000_0001;
pub const TAG_REQUEST: u32 = 0x0000_0000;
pub const END_TAG: u32 = 0x0000_0000;

const HEADER_WORDS: usize = 2;
const TAG_HEADER_WORDS: usize = 3;
const END_TAG_WORDS: usize = 1;
const VALUE_OFFSET: usize = HEADER_WORDS + TAG_HEADER_WORDS;

pub const MAX_VALUE_WORDS: usize = FRAME_WORDS - VALUE_OFFSET - END_TAG_WORDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyTag {
    BoardModel,
    BoardRevision,
    BoardMacAddress,
    BoardSerial,
}

impl PropertyTag {
    pub const ALL: [PropertyTag; 4] = [
        Self::BoardModel,
        Self::BoardRevision,
        Self::BoardMacAddress,
        Self::BoardSerial,
    ];

    pub fn id(self) -> u32 {
        match self {
            Self::BoardModel => 0x0001_0001,
            Self::BoardRevision => 0x0001_0002,
            Self::BoardMacAddress => 0x0001_0003,
            Self::BoardSerial => 0x0001_0004,
        }
    }

    /// Value buffer length the firmware expects for this tag.
    pub fn value_words(self) -> usize {
        match self {
            Self::BoardModel | Self::BoardRevision => 1,
            Self::BoardMacAddress | Self::BoardSerial => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::BoardModel => "board model",
            Self::BoardRevision => "board revision",
            Self::BoardMacAddress => "board MAC address",
            Self::BoardSerial => "board serial",
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.id() == id)
    }
}

impl fmt::Display for PropertyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#010x})", self.name(), self.id())
    }
}

/// Raw frame handed to the device. Words are stored little-endian.
#[repr(C, align(16))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyFrame {
    words: [u32; FRAME_WORDS],
}

impl PropertyFrame {
    pub fn zeroed() -> Self {
        Self {
            words: [0; FRAME_WORDS],
        }
    }

    pub fn word(&self, index: usize) -> Option<u32> {
        self.words.get(index).copied().map(u32::from_le)
    }

    pub fn set_word(&mut self, index: usize, value: u32) -> bool {
        match self.words.get_mut(index) {
            Some(slot) => {
                *slot = value.to_le();
                true
            }
            None => false,
        }
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.words
            .iter()
            .flat_map(|word| u32::from_le(*word).to_le_bytes())
            .collect()
    }
}

impl Default for PropertyFrame {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Single-tag property request or response with named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRequest {
    pub buffer_size: u32,
    pub code: u32,
    pub tag_id: u32,
    pub value_size: u32,
    pub tag_code: u32,
    value: [u32; MAX_VALUE_WORDS],
    value_words: usize,
    pub end_tag: u32,
}

impl PropertyRequest {
    pub fn for_tag(tag: PropertyTag) -> Self {
        Self::zero_filled(tag.id(), tag.value_words())
    }

    pub fn encode_request(tag_id: u32, value_words: usize) -> MailboxResult<Self> {
        check_value_words(value_words)?;
        Ok(Self::zero_filled(tag_id, value_words))
    }

    fn zero_filled(tag_id: u32, value_words: usize) -> Self {
        Self {
            buffer_size: frame_size_bytes(value_words),
            code: PROCESS_REQUEST,
            tag_id,
            value_size: (value_words * 4) as u32,
            tag_code: TAG_REQUEST,
            value: [0; MAX_VALUE_WORDS],
            value_words,
            end_tag: END_TAG,
        }
    }

    pub fn tag(&self) -> Option<PropertyTag> {
        PropertyTag::from_id(self.tag_id)
    }

    pub fn value(&self) -> &[u32] {
        &self.value[..self.value_words]
    }

    pub fn value_words(&self) -> usize {
        self.value_words
    }

    pub fn is_success(&self) -> bool {
        self.code == RESPONSE_SUCCESS
    }

    pub fn to_frame(&self) -> PropertyFrame {
        let mut frame = PropertyFrame::zeroed();
        frame.set_word(0, self.buffer_size);
        frame.set_word(1, self.code);
        frame.set_word(2, self.tag_id);
        frame.set_word(3, self.value_size);
        frame.set_word(4, self.tag_code);
        for (offset, word) in self.value().iter().enumerate() {
            frame.set_word(VALUE_OFFSET + offset, *word);
        }
        frame.set_word(VALUE_OFFSET + self.value_words, self.end_tag);
        frame
    }

    /// Reads a frame back using the value length of the original request.
    pub fn from_frame(frame: &PropertyFrame, value_words: usize) -> MailboxResult<Self> {
        check_value_words(value_words)?;
        let mut value = [0u32; MAX_VALUE_WORDS];
        for (offset, slot) in value.iter_mut().take(value_words).enumerate() {
            *slot = frame.word(VALUE_OFFSET + offset).unwrap_or_default();
        }

        Ok(Self {
            buffer_size: frame.word(0).unwrap_or_default(),
            code: frame.word(1).unwrap_or_default(),
            tag_id: frame.word(2).unwrap_or_default(),
            value_size: frame.word(3).unwrap_or_default(),
            tag_code: frame.word(4).unwrap_or_default(),
            value,
            value_words,
            end_tag: frame
                .word(VALUE_OFFSET + value_words)
                .unwrap_or_default(),
        })
    }

    pub fn decode_single_word(&self) -> u32 {
        self.value[0]
    }

    pub fn decode_mac_bytes(&self) -> MacAddress {
        let mut octets = [0u8; 6];
        let bytes = self.value[..2]
            .iter()
            .flat_map(|word| word.to_le_bytes());
        for (slot, byte) in octets.iter_mut().zip(bytes) {
            *slot = byte;
        }
        MacAddress(octets)
    }
}

fn check_value_words(value_words: usize) -> MailboxResult<()> {
    if value_words == 0 || value_words > MAX_VALUE_WORDS {
        return Err(MailboxError::InvalidRequest(format!(
            "value buffer must hold 1..={} words, got {}",
            MAX_VALUE_WORDS, value_words
        )));
    }
    Ok(())
}

/// Header, one tag block and the end tag, in bytes.
pub fn frame_size_bytes(value_words: usize) -> u32 {
    ((HEADER_WORDS + TAG_HEADER_WORDS + value_words + END_TAG_WORDS) * 4) as u32
}

/// Bare lowercase hex, no zero padding.
pub fn render_hex_word(word: u32) -> String {
    format!("{:x}", word)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:x}:{:x}:{:x}:{:x}:{:x}:{:x}", a, b, c, d, e, g)
    }
}
