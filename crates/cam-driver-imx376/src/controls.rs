//! Control state and the register payloads it maps to.
//!
//! Control writes go through three steps: validate against the current
//! range, translate to a register program, then commit the new value only
//! once the program has landed. While the sensor is unpowered the program
//! step is skipped and the committed value is replayed when streaming
//! starts. Range coupling (vertical blanking reshaping the exposure range)
//! lives entirely in this state and never depends on power.

use cam_core::control::ControlRange;
use cam_core::error::CamError;
use cam_core::regs::RegWrite;

use crate::catalog::SensorMode;
use crate::regs::{
    ANA_GAIN_DEFAULT, ANA_GAIN_MAX, ANA_GAIN_MIN, ANA_GAIN_STEP, DGTL_GAIN_DEFAULT, DGTL_GAIN_MAX,
    DGTL_GAIN_MIN, DGTL_GAIN_STEP, EXPOSURE_DEFAULT, EXPOSURE_MIN, EXPOSURE_OFFSET, EXPOSURE_STEP,
    HDR_OFF, HDR_ON, HDR_RATIO_DEFAULT, MIRROR_HFLIP, MIRROR_VFLIP, REG_ANALOG_GAIN,
    REG_B_DIGITAL_GAIN, REG_EXPOSURE, REG_FRM_LENGTH_LINES, REG_GB_DIGITAL_GAIN,
    REG_GR_DIGITAL_GAIN, REG_HDR, REG_HDR_RATIO, REG_MIRROR_FLIP, REG_R_DIGITAL_GAIN,
    REG_TEST_PATTERN, VTS_MAX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    LinkFreq,
    PixelRate,
    Vblank,
    Hblank,
    Exposure,
    AnalogueGain,
    DigitalGain,
    WideDynamicRange,
    TestPattern,
    HFlip,
    VFlip,
}

impl ControlId {
    pub const fn name(self) -> &'static str {
        match self {
            Self::LinkFreq => "link_freq",
            Self::PixelRate => "pixel_rate",
            Self::Vblank => "vblank",
            Self::Hblank => "hblank",
            Self::Exposure => "exposure",
            Self::AnalogueGain => "analogue_gain",
            Self::DigitalGain => "digital_gain",
            Self::WideDynamicRange => "wide_dynamic_range",
            Self::TestPattern => "test_pattern",
            Self::HFlip => "hflip",
            Self::VFlip => "vflip",
        }
    }
}

/// Menu for the test pattern control; the value written to hardware is the
/// menu index.
pub const TEST_PATTERN_MENU: &[&str] = &[
    "Disabled",
    "Solid Colour",
    "Eight Vertical Colour Bars",
    "Colour Bars With Fade to Grey",
    "Pseudorandom Sequence (PN9)",
];

/// Snapshot of one control, as reported to callers.
#[derive(Debug, Clone, Copy)]
pub struct ControlInfo {
    pub range: ControlRange,
    pub value: i64,
    pub read_only: bool,
}

#[derive(Debug, Clone, Copy)]
struct Control {
    range: ControlRange,
    value: i64,
    read_only: bool,
}

impl Control {
    fn new(range: ControlRange) -> Self {
        Self {
            range,
            value: range.default,
            read_only: false,
        }
    }

    fn read_only(range: ControlRange) -> Self {
        Self {
            range,
            value: range.default,
            read_only: true,
        }
    }
}

/// Replay order at stream start. Flips come first so the bayer order is
/// settled before anything else, then frame timing, then the image
/// controls. The single flip entry carries both flip bits.
pub(crate) const REPLAY_ORDER: &[ControlId] = &[
    ControlId::HFlip,
    ControlId::Vblank,
    ControlId::Exposure,
    ControlId::AnalogueGain,
    ControlId::DigitalGain,
    ControlId::WideDynamicRange,
    ControlId::TestPattern,
];

/// The full control state of one sensor.
#[derive(Debug, Clone)]
pub(crate) struct ControlSet {
    link_freq: Control,
    pixel_rate: Control,
    vblank: Control,
    hblank: Control,
    exposure: Control,
    analogue_gain: Control,
    digital_gain: Control,
    wide_dynamic_range: Control,
    test_pattern: Control,
    hflip: Control,
    vflip: Control,
}

impl ControlSet {
    pub(crate) fn new(mode: &SensorMode, pixel_rate: u64, pixels_per_line: u32) -> Self {
        let vblank_def = i64::from(mode.vts_def - mode.height);
        let mut set = Self {
            link_freq: Control::read_only(ControlRange::single(mode.link_freq_index as i64)),
            pixel_rate: Control::read_only(ControlRange::single(pixel_rate as i64)),
            vblank: Control::new(ControlRange::new(
                i64::from(mode.vts_min - mode.height),
                i64::from(VTS_MAX - mode.height),
                1,
                vblank_def,
            )),
            hblank: Control::read_only(ControlRange::single(i64::from(
                pixels_per_line - mode.width,
            ))),
            exposure: Control::new(ControlRange::new(
                EXPOSURE_MIN,
                0, // reshaped below
                EXPOSURE_STEP,
                EXPOSURE_DEFAULT,
            )),
            analogue_gain: Control::new(ControlRange::new(
                ANA_GAIN_MIN,
                ANA_GAIN_MAX,
                ANA_GAIN_STEP,
                ANA_GAIN_DEFAULT,
            )),
            digital_gain: Control::new(ControlRange::new(
                DGTL_GAIN_MIN,
                DGTL_GAIN_MAX,
                DGTL_GAIN_STEP,
                DGTL_GAIN_DEFAULT,
            )),
            wide_dynamic_range: Control::new(ControlRange::new(0, 1, 1, 0)),
            test_pattern: Control::new(ControlRange::new(
                0,
                TEST_PATTERN_MENU.len() as i64 - 1,
                1,
                0,
            )),
            hflip: Control::new(ControlRange::new(0, 1, 1, 1)),
            vflip: Control::new(ControlRange::new(0, 1, 1, 1)),
        };
        set.reshape_exposure(mode.height);
        set
    }

    fn control(&self, id: ControlId) -> &Control {
        match id {
            ControlId::LinkFreq => &self.link_freq,
            ControlId::PixelRate => &self.pixel_rate,
            ControlId::Vblank => &self.vblank,
            ControlId::Hblank => &self.hblank,
            ControlId::Exposure => &self.exposure,
            ControlId::AnalogueGain => &self.analogue_gain,
            ControlId::DigitalGain => &self.digital_gain,
            ControlId::WideDynamicRange => &self.wide_dynamic_range,
            ControlId::TestPattern => &self.test_pattern,
            ControlId::HFlip => &self.hflip,
            ControlId::VFlip => &self.vflip,
        }
    }

    fn control_mut(&mut self, id: ControlId) -> &mut Control {
        match id {
            ControlId::LinkFreq => &mut self.link_freq,
            ControlId::PixelRate => &mut self.pixel_rate,
            ControlId::Vblank => &mut self.vblank,
            ControlId::Hblank => &mut self.hblank,
            ControlId::Exposure => &mut self.exposure,
            ControlId::AnalogueGain => &mut self.analogue_gain,
            ControlId::DigitalGain => &mut self.digital_gain,
            ControlId::WideDynamicRange => &mut self.wide_dynamic_range,
            ControlId::TestPattern => &mut self.test_pattern,
            ControlId::HFlip => &mut self.hflip,
            ControlId::VFlip => &mut self.vflip,
        }
    }

    pub(crate) fn info(&self, id: ControlId) -> ControlInfo {
        let c = self.control(id);
        ControlInfo {
            range: c.range,
            value: c.value,
            read_only: c.read_only,
        }
    }

    pub(crate) fn value(&self, id: ControlId) -> i64 {
        self.control(id).value
    }

    pub(crate) fn flip_state(&self) -> (bool, bool) {
        (self.hflip.value != 0, self.vflip.value != 0)
    }

    /// Check a candidate value against the control's current range.
    pub(crate) fn validate(&self, id: ControlId, value: i64) -> Result<(), CamError> {
        let c = self.control(id);
        if c.read_only {
            return Err(CamError::ReadOnlyControl(id.name()));
        }
        c.range.validate(id.name(), value)
    }

    /// Register program for setting `id` to `candidate`. Other controls
    /// contribute their committed values (the flip bits share a register).
    pub(crate) fn payload(&self, id: ControlId, candidate: i64, mode_height: u32) -> Vec<RegWrite> {
        match id {
            ControlId::Exposure => vec![RegWrite::new(REG_EXPOSURE, candidate as u32)],
            ControlId::AnalogueGain => vec![RegWrite::new(REG_ANALOG_GAIN, candidate as u32)],
            ControlId::DigitalGain => {
                let v = candidate as u32;
                vec![
                    RegWrite::new(REG_GR_DIGITAL_GAIN, v),
                    RegWrite::new(REG_GB_DIGITAL_GAIN, v),
                    RegWrite::new(REG_R_DIGITAL_GAIN, v),
                    RegWrite::new(REG_B_DIGITAL_GAIN, v),
                ]
            }
            ControlId::TestPattern => vec![RegWrite::new(REG_TEST_PATTERN, candidate as u32)],
            ControlId::WideDynamicRange => {
                if candidate == 0 {
                    vec![RegWrite::new(REG_HDR, HDR_OFF)]
                } else {
                    vec![
                        RegWrite::new(REG_HDR, HDR_ON),
                        RegWrite::new(REG_HDR_RATIO, HDR_RATIO_DEFAULT),
                    ]
                }
            }
            ControlId::Vblank => vec![RegWrite::new(
                REG_FRM_LENGTH_LINES,
                mode_height + candidate as u32,
            )],
            ControlId::HFlip | ControlId::VFlip => {
                let (mut hflip, mut vflip) = self.flip_state();
                match id {
                    ControlId::HFlip => hflip = candidate != 0,
                    _ => vflip = candidate != 0,
                }
                let mut bits = 0;
                if hflip {
                    bits |= MIRROR_HFLIP;
                }
                if vflip {
                    bits |= MIRROR_VFLIP;
                }
                vec![RegWrite::new(REG_MIRROR_FLIP, bits)]
            }
            // Derived controls have no register of their own.
            ControlId::LinkFreq | ControlId::PixelRate | ControlId::Hblank => Vec::new(),
        }
    }

    /// Register program replaying the committed value of `id`.
    pub(crate) fn replay_payload(&self, id: ControlId, mode_height: u32) -> Vec<RegWrite> {
        self.payload(id, self.value(id), mode_height)
    }

    /// Commit a validated value. Committing vertical blanking reshapes the
    /// exposure range.
    pub(crate) fn commit(&mut self, id: ControlId, value: i64, mode_height: u32) {
        self.control_mut(id).value = value;
        if id == ControlId::Vblank {
            self.reshape_exposure(mode_height);
        }
    }

    /// Re-derive the read-only and range-coupled controls for a new mode.
    pub(crate) fn set_mode(&mut self, mode: &SensorMode, pixel_rate: u64, pixels_per_line: u32) {
        self.link_freq.range = ControlRange::single(mode.link_freq_index as i64);
        self.link_freq.value = mode.link_freq_index as i64;
        self.pixel_rate.range = ControlRange::single(pixel_rate as i64);
        self.pixel_rate.value = pixel_rate as i64;
        self.hblank.range = ControlRange::single(i64::from(pixels_per_line - mode.width));
        self.hblank.value = self.hblank.range.default;
        let vblank_def = i64::from(mode.vts_def - mode.height);
        self.vblank.range = ControlRange::new(
            i64::from(mode.vts_min - mode.height),
            i64::from(VTS_MAX - mode.height),
            1,
            vblank_def,
        );
        self.vblank.value = vblank_def;
        self.reshape_exposure(mode.height);
    }

    /// The exposure ceiling tracks the frame length: active lines plus
    /// blanking minus the lines that can never integrate.
    fn reshape_exposure(&mut self, mode_height: u32) {
        let max = i64::from(mode_height) + self.vblank.value - EXPOSURE_OFFSET;
        self.exposure.range.max = max;
        self.exposure.range.default = self.exposure.range.default.min(max);
        self.exposure.value = self.exposure.range.clamp(self.exposure.value);
    }
}
