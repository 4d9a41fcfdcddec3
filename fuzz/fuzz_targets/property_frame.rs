#![no_main]

use libfuzzer_sys::fuzz_target;
use vcmailbox::{PropertyFrame, PropertyRequest, PropertyTag, FRAME_WORDS};

fn frame_from_bytes(data: &[u8]) -> PropertyFrame {
    let mut frame = PropertyFrame::zeroed();
    for (index, chunk) in data.chunks(4).take(FRAME_WORDS).enumerate() {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        frame.set_word(index, u32::from_le_bytes(word));
    }
    frame
}

fuzz_target!(|data: &[u8]| {
    let frame = frame_from_bytes(data);
    for tag in PropertyTag::ALL {
        let Ok(response) = PropertyRequest::from_frame(&frame, tag.value_words()) else {
            continue;
        };
        let _ = response.is_success();
        let _ = response.decode_single_word();
        let _ = response.decode_mac_bytes().to_string();
        let _ = response.to_frame();
    }

    let width = data.first().copied().unwrap_or_default() as usize;
    let _ = PropertyRequest::from_frame(&frame, width);
});
