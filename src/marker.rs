//! Marker code points and their classification.
//!
//! Every marker in a JPEG stream is the byte [PREMARK] followed by a marker
//! code in `0x00..=0xFE`. The classifiers here take the code only and panic
//! when handed [PREMARK] itself, which is never a valid code.
use std::borrow::Cow;

/// Byte that precedes every marker code (markers may be preceded by any number
/// of these).
pub const PREMARK: u8 = 0xFF;
/// Escape following a [PREMARK] inside entropy-coded data, standing for a
/// literal 0xFF.
pub const STUFFING: u8 = 0x00;
/// Temporary marker.
pub const TEM: u8 = 0x01;

/// Start of frame, baseline DCT.
pub const SOF0: u8 = 0xC0;
/// Start of frame, differential lossless (arithmetic).
pub const SOF15: u8 = 0xCF;
/// Define Huffman table.
pub const DHT: u8 = 0xC4;
/// Reserved for JPEG extensions.
pub const JPG: u8 = 0xC8;
/// Define arithmetic coding conditioning.
pub const DAC: u8 = 0xCC;

/// First restart marker.
pub const RST0: u8 = 0xD0;
/// Last restart marker.
pub const RST7: u8 = 0xD7;
/// Start of image marker.
pub const SOI: u8 = 0xD8;
/// End of image marker.
pub const EOI: u8 = 0xD9;
/// Start of scan marker.
pub const SOS: u8 = 0xDA;
/// Define quantization table.
pub const DQT: u8 = 0xDB;
/// Define number of lines.
pub const DNL: u8 = 0xDC;
/// Define restart interval.
pub const DRI: u8 = 0xDD;
/// Define hierarchical progression.
pub const DHP: u8 = 0xDE;
/// Expand reference components.
pub const EXP: u8 = 0xDF;

/// First application segment.
pub const APP0: u8 = 0xE0;
/// Last application segment.
pub const APP15: u8 = 0xEF;
/// Comment.
pub const COM: u8 = 0xFE;

const SOF_NAMES: [&str; 16] = [
    "SOF0", "SOF1", "SOF2", "SOF3", "", "SOF5", "SOF6", "SOF7", "", "SOF9", "SOF10", "SOF11", "",
    "SOF13", "SOF14", "SOF15",
];

const RST_NAMES: [&str; 8] = ["RST0", "RST1", "RST2", "RST3", "RST4", "RST5", "RST6", "RST7"];

const APP_NAMES: [&str; 16] = [
    "APP0", "APP1", "APP2", "APP3", "APP4", "APP5", "APP6", "APP7", "APP8", "APP9", "APP10",
    "APP11", "APP12", "APP13", "APP14", "APP15",
];

fn check_code(marker: u8) {
    assert!(
        marker != PREMARK,
        "0x{:02X} is the marker prefix, not a marker code",
        marker
    );
}

/// Whether `marker` stands alone, carrying neither a length field nor a
/// payload.
///
/// # Panics
///
/// Panics if `marker` is [PREMARK].
pub fn is_stand_alone(marker: u8) -> bool {
    check_code(marker);
    matches!(marker, TEM | RST0..=RST7 | SOI | EOI)
}

/// Whether `marker` may appear inside entropy-coded data without ending the
/// scan. These are the restart markers and [DNL].
///
/// The [STUFFING] escape is not a marker and so is not immediate.
///
/// # Panics
///
/// Panics if `marker` is [PREMARK].
pub fn is_immediate(marker: u8) -> bool {
    check_code(marker);
    matches!(marker, RST0..=RST7 | DNL)
}

/// Symbolic name of `marker`, or its value as `0xNN` when it has none.
pub fn name(marker: u8) -> Cow<'static, str> {
    let known = match marker {
        TEM => "TEM",
        DHT => "DHT",
        DAC => "DAC",
        SOF0..=SOF15 if marker != JPG => SOF_NAMES[usize::from(marker - SOF0)],
        RST0..=RST7 => RST_NAMES[usize::from(marker - RST0)],
        SOI => "SOI",
        EOI => "EOI",
        SOS => "SOS",
        DQT => "DQT",
        DNL => "DNL",
        DRI => "DRI",
        DHP => "DHP",
        EXP => "EXP",
        APP0..=APP15 => APP_NAMES[usize::from(marker - APP0)],
        COM => "COM",
        _ => return Cow::Owned(format!("0x{:02X}", marker)),
    };

    Cow::Borrowed(known)
}
