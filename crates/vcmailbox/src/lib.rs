//! Client for the VideoCore firmware property-tag mailbox exposed by the
//! kernel as `/dev/vcio`.

mod channel;
mod errors;
mod property;
mod tags;

pub use channel::{
    MailboxChannel, VcioChannel, VcioDevice, VcioHandle, DEFAULT_MAILBOX_DEVICE, VCIO_IOC_MAGIC,
    VCIO_IOC_PROPERTY,
};
pub use errors::{MailboxError, MailboxResult};
pub use property::{
    frame_size_bytes, render_hex_word, MacAddress, PropertyFrame, PropertyRequest, PropertyTag,
    FRAME_WORDS, MAX_VALUE_WORDS, PROCESS_REQUEST, RESPONSE_PARSE_ERROR, RESPONSE_SUCCESS,
};
pub use tags::{
    get_board_model, get_board_revision, get_board_serial, get_mac_address, query_property,
    FirmwareProperties, PropertyClient,
};
