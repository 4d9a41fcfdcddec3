use tracing::{debug, warn};

use crate::channel::MailboxChannel;
use crate::errors::{MailboxError, MailboxResult};
use crate::property::{MacAddress, PropertyRequest, PropertyTag};

/// Encode, exchange and validate one tag query.
pub fn query_property<C: MailboxChannel + ?Sized>(
    channel: &C,
    tag: PropertyTag,
) -> MailboxResult<PropertyRequest> {
    let request = PropertyRequest::for_tag(tag);
    let mut frame = request.to_frame();

    debug!(tag = %tag, buffer_size = request.buffer_size, "sending property request");
    channel.exchange(&mut frame)?;

    let response = PropertyRequest::from_frame(&frame, request.value_words())?;
    if !response.is_success() {
        warn!(tag = %tag, code = format_args!("{:#010x}", response.code), "firmware rejected property request");
        return Err(MailboxError::FirmwareRequestFailed {
            tag,
            code: response.code,
        });
    }

    debug!(tag = %tag, tag_code = format_args!("{:#010x}", response.tag_code), "property response received");
    Ok(response)
}

pub fn get_board_model<C: MailboxChannel + ?Sized>(channel: &C) -> MailboxResult<u32> {
    query_property(channel, PropertyTag::BoardModel).map(|r| r.decode_single_word())
}

pub fn get_board_revision<C: MailboxChannel + ?Sized>(channel: &C) -> MailboxResult<u32> {
    query_property(channel, PropertyTag::BoardRevision).map(|r| r.decode_single_word())
}

/// Only the first of the two serial words is kept.
pub fn get_board_serial<C: MailboxChannel + ?Sized>(channel: &C) -> MailboxResult<u32> {
    query_property(channel, PropertyTag::BoardSerial).map(|r| r.decode_single_word())
}

pub fn get_mac_address<C: MailboxChannel + ?Sized>(channel: &C) -> MailboxResult<MacAddress> {
    query_property(channel, PropertyTag::BoardMacAddress).map(|r| r.decode_mac_bytes())
}

/// The four firmware identity queries.
pub trait FirmwareProperties {
    fn board_model(&self) -> MailboxResult<u32>;
    fn board_revision(&self) -> MailboxResult<u32>;
    fn board_serial(&self) -> MailboxResult<u32>;
    fn mac_address(&self) -> MailboxResult<MacAddress>;
}

#[derive(Debug, Clone, Default)]
pub struct PropertyClient<C> {
    channel: C,
}

impl<C: MailboxChannel> PropertyClient<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

impl<C: MailboxChannel> FirmwareProperties for PropertyClient<C> {
    fn board_model(&self) -> MailboxResult<u32> {
        get_board_model(&self.channel)
    }

    fn board_revision(&self) -> MailboxResult<u32> {
        get_board_revision(&self.channel)
    }

    fn board_serial(&self) -> MailboxResult<u32> {
        get_board_serial(&self.channel)
    }

    fn mac_address(&self) -> MailboxResult<MacAddress> {
        get_mac_address(&self.channel)
    }
}
