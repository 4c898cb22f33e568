//! Mode and serial-link catalogs.
//!
//! The sensor advertises a fixed set of readout modes and, per input clock,
//! a fixed set of link frequencies. System integration narrows the link
//! frequencies further; anything it requests outside the catalog is
//! rejected at attach time rather than silently substituted.

use cam_core::error::CamError;
use cam_core::regs::RegWrite;

use crate::format::Rect;
use crate::regs::{
    PIXEL_ARRAY_HEIGHT, PIXEL_ARRAY_LEFT, PIXEL_ARRAY_TOP, PIXEL_ARRAY_WIDTH, PPL_DEFAULT,
    VTS_30FPS,
};
use crate::tables;

/// Lane configurations the receiver can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneMode {
    FourLane,
}

impl LaneMode {
    pub fn from_lane_count(lanes: u32) -> Result<Self, CamError> {
        match lanes {
            4 => Ok(Self::FourLane),
            n => Err(CamError::UnsupportedLaneCount(n)),
        }
    }

    pub const fn index(self) -> usize {
        0
    }

    pub const fn lane_count(self) -> u32 {
        match self {
            Self::FourLane => 4,
        }
    }
}

pub const LANE_CONFIGS: usize = 1;

/// Per-lane-count details of one link frequency.
pub struct LinkConfig {
    /// Multiplier from link frequency to pixel rate; depends on lane count.
    pub pix_rate_factor: u64,
    pub reg_table: &'static [RegWrite],
}

/// One entry of the link frequency catalog.
pub struct LinkFreqConfig {
    pub pixels_per_line: u32,
    pub lane_cfg: [LinkConfig; LANE_CONFIGS],
}

/// Link frequencies available from a 24 MHz input clock, in Hz. Indices
/// match [`LINK_FREQ_CONFIGS_24MHZ`].
pub static LINK_FREQ_MENU_24MHZ: &[u64] = &[500_000_000];

pub static LINK_FREQ_CONFIGS_24MHZ: &[LinkFreqConfig] = &[LinkFreqConfig {
    pixels_per_line: PPL_DEFAULT,
    lane_cfg: [LinkConfig {
        pix_rate_factor: 4,
        reg_table: tables::LINK_1000MBPS_24MHZ_4LANE,
    }],
}];

/// Pixel rate implied by a link frequency: double data rate across the
/// lanes, 10 bits per pixel, truncating division.
pub fn pixel_rate_for_link(link_freq_hz: u64, cfg: &LinkConfig) -> u64 {
    link_freq_hz * 2 * cfg.pix_rate_factor / 10
}

/// One sensor readout mode.
pub struct SensorMode {
    pub width: u32,
    pub height: u32,
    /// Default and minimum total frame length in lines.
    pub vts_def: u32,
    pub vts_min: u32,
    /// Index into the active link frequency catalog.
    pub link_freq_index: usize,
    pub reg_table: &'static [RegWrite],
    /// Analog crop this mode reads out.
    pub crop: Rect,
}

pub static SUPPORTED_MODES: &[SensorMode] = &[SensorMode {
    width: 2592,
    height: 1940,
    vts_def: VTS_30FPS,
    vts_min: VTS_30FPS,
    link_freq_index: 0,
    reg_table: tables::MODE_2592X1940_REGS,
    crop: Rect {
        left: PIXEL_ARRAY_LEFT,
        top: PIXEL_ARRAY_TOP,
        width: PIXEL_ARRAY_WIDTH,
        height: PIXEL_ARRAY_HEIGHT,
    },
}];

/// The mode closest to the requested size by squared per-axis distance.
/// Ties go to the lowest catalog index.
pub fn find_nearest_mode(width: u32, height: u32) -> &'static SensorMode {
    let mut best = &SUPPORTED_MODES[0];
    let mut best_score = u64::MAX;
    for mode in SUPPORTED_MODES {
        let dw = i64::from(mode.width) - i64::from(width);
        let dh = i64::from(mode.height) - i64::from(height);
        let score = (dw * dw + dh * dh) as u64;
        if score < best_score {
            best = mode;
            best_score = score;
        }
    }
    best
}

/// Check that every link frequency the integration advertises is in the
/// catalog for the active input clock.
pub fn validate_link_frequencies(advertised: &[u64], menu: &[u64]) -> Result<(), CamError> {
    if advertised.is_empty() {
        return Err(CamError::Config(
            "no link frequencies advertised".to_string(),
        ));
    }
    for &freq in advertised {
        if !menu.contains(&freq) {
            return Err(CamError::UnsupportedLinkFrequency(freq));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_rate_truncates() {
        let cfg = &LINK_FREQ_CONFIGS_24MHZ[0].lane_cfg[0];
        assert_eq!(pixel_rate_for_link(500_000_000, cfg), 400_000_000);
        // 3 Hz * 2 * 4 = 24, /10 truncates to 2.
        assert_eq!(pixel_rate_for_link(3, cfg), 2);
    }

    #[test]
    fn nearest_mode_exact_and_distant() {
        let mode = find_nearest_mode(2592, 1940);
        assert_eq!((mode.width, mode.height), (2592, 1940));
        // Any request maps onto the single catalog entry.
        let mode = find_nearest_mode(1, 1);
        assert_eq!((mode.width, mode.height), (2592, 1940));
        let mode = find_nearest_mode(8000, 6000);
        assert_eq!((mode.width, mode.height), (2592, 1940));
    }

    #[test]
    fn link_frequency_validation() {
        assert!(validate_link_frequencies(&[500_000_000], LINK_FREQ_MENU_24MHZ).is_ok());
        assert!(matches!(
            validate_link_frequencies(&[400_000_000], LINK_FREQ_MENU_24MHZ),
            Err(CamError::UnsupportedLinkFrequency(400_000_000))
        ));
        assert!(matches!(
            validate_link_frequencies(&[], LINK_FREQ_MENU_24MHZ),
            Err(CamError::Config(_))
        ));
    }

    #[test]
    fn unsupported_lane_count_rejected() {
        assert!(LaneMode::from_lane_count(4).is_ok());
        assert!(matches!(
            LaneMode::from_lane_count(2),
            Err(CamError::UnsupportedLaneCount(2))
        ));
    }
}
