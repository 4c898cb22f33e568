//! Frame format and selection types.

use crate::regs::{
    NATIVE_HEIGHT, NATIVE_WIDTH, PIXEL_ARRAY_HEIGHT, PIXEL_ARRAY_LEFT, PIXEL_ARRAY_TOP,
    PIXEL_ARRAY_WIDTH,
};

/// 10-bit bayer layouts the sensor can emit. The readout flips reorder the
/// bayer pattern, so the active code is a function of the flip controls,
/// never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaBusCode {
    Srggb10,
    Sgrbg10,
    Sgbrg10,
    Sbggr10,
}

/// Codes by flip combination: no flip, h, v, h+v.
pub const CODES: [MediaBusCode; 4] = [
    MediaBusCode::Srggb10,
    MediaBusCode::Sgrbg10,
    MediaBusCode::Sgbrg10,
    MediaBusCode::Sbggr10,
];

pub fn code_for_flip(hflip: bool, vflip: bool) -> MediaBusCode {
    let i = usize::from(vflip) << 1 | usize::from(hflip);
    CODES[i]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Negotiated image format on the sensor's source pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameFormat {
    pub width: u32,
    pub height: u32,
    pub code: MediaBusCode,
}

/// Whether an operation works on a session's trial state or on the
/// sensor's active configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which {
    Try,
    Active,
}

/// Selection rectangles a caller can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    /// The crop the current mode reads out.
    Crop,
    /// Full pixel array including dummy border pixels.
    NativeSize,
    /// Recommended default crop.
    CropDefault,
    /// Bounds within which a crop may sit.
    CropBounds,
}

pub(crate) const NATIVE_RECT: Rect = Rect {
    left: 0,
    top: 0,
    width: NATIVE_WIDTH,
    height: NATIVE_HEIGHT,
};

pub(crate) const PIXEL_ARRAY_RECT: Rect = Rect {
    left: PIXEL_ARRAY_LEFT,
    top: PIXEL_ARRAY_TOP,
    width: PIXEL_ARRAY_WIDTH,
    height: PIXEL_ARRAY_HEIGHT,
};

/// Per-caller trial state. Mutating it never touches the active
/// configuration or the hardware.
#[derive(Debug, Clone)]
pub struct SensorSession {
    pub(crate) fmt: FrameFormat,
    pub(crate) crop: Rect,
}
