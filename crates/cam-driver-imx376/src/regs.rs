//! IMX376 register map and hardware limits.

use cam_core::regs::Reg;

/// Chip identity, reads back [`CHIP_ID`] on a live sensor.
pub const REG_CHIP_ID: Reg = Reg::word(0x0016);
pub const CHIP_ID: u32 = 0x0376;

pub const REG_MODE_SELECT: Reg = Reg::byte(0x0100);
pub const MODE_STANDBY: u32 = 0x00;
pub const MODE_STREAMING: u32 = 0x01;

pub const REG_SOFT_RESET: Reg = Reg::byte(0x0103);

/// Horizontal (bit 0) and vertical (bit 1) readout inversion.
pub const REG_MIRROR_FLIP: Reg = Reg::byte(0x0101);
pub const MIRROR_HFLIP: u32 = 0x01;
pub const MIRROR_VFLIP: u32 = 0x02;

/// Total frame length in lines, i.e. active height plus vertical blanking.
pub const REG_FRM_LENGTH_LINES: Reg = Reg::word(0x0340);
pub const VTS_30FPS: u32 = 4736;
pub const VTS_MAX: u32 = 65525;

/// Fixed line length in pixel clocks for every supported mode.
pub const PPL_DEFAULT: u32 = 5624;

pub const REG_EXPOSURE: Reg = Reg::word(0x0202);
/// Lines at the bottom of a frame that can never integrate.
pub const EXPOSURE_OFFSET: i64 = 10;
pub const EXPOSURE_MIN: i64 = 4;
pub const EXPOSURE_STEP: u32 = 1;
pub const EXPOSURE_DEFAULT: i64 = 0x640;

pub const REG_ANALOG_GAIN: Reg = Reg::word(0x0204);
pub const ANA_GAIN_MIN: i64 = 0;
pub const ANA_GAIN_MAX: i64 = 480;
pub const ANA_GAIN_STEP: u32 = 1;
pub const ANA_GAIN_DEFAULT: i64 = 0;

/// Per-channel digital gain, all four channels driven to the same value.
pub const REG_GR_DIGITAL_GAIN: Reg = Reg::word(0x020e);
pub const REG_R_DIGITAL_GAIN: Reg = Reg::word(0x0210);
pub const REG_B_DIGITAL_GAIN: Reg = Reg::word(0x0212);
pub const REG_GB_DIGITAL_GAIN: Reg = Reg::word(0x0214);
pub const DGTL_GAIN_MIN: i64 = 0;
pub const DGTL_GAIN_MAX: i64 = 4096;
pub const DGTL_GAIN_STEP: u32 = 1;
pub const DGTL_GAIN_DEFAULT: i64 = 1024;

pub const REG_HDR: Reg = Reg::byte(0x0220);
pub const HDR_ON: u32 = 0x01;
pub const HDR_OFF: u32 = 0x00;
pub const REG_HDR_RATIO: Reg = Reg::byte(0x0222);
pub const HDR_RATIO_DEFAULT: u32 = 1 << 5;

pub const REG_TEST_PATTERN: Reg = Reg::word(0x0600);

// PLL and serial link setup.
pub const REG_EXCK_FREQ: Reg = Reg::word(0x0136);
pub const REG_IVTPXCK_DIV: Reg = Reg::byte(0x0301);
pub const REG_IVTSYCK_DIV: Reg = Reg::byte(0x0303);
pub const REG_PREPLLCK_VT_DIV: Reg = Reg::byte(0x0305);
pub const REG_PLL_IVT_MPY: Reg = Reg::word(0x0306);
pub const REG_IOPSYCK_DIV: Reg = Reg::byte(0x030b);
pub const REG_PREPLLCK_OP_DIV: Reg = Reg::byte(0x030d);
pub const REG_PLL_IOP_MPY: Reg = Reg::word(0x030e);
pub const REG_PLL_MULT_DRIV: Reg = Reg::byte(0x0310);
pub const REG_CSI_LANE_MODE: Reg = Reg::byte(0x0114);
pub const REG_REQ_LINK_BIT_RATE_MBPS_H: Reg = Reg::word(0x0820);
pub const REG_REQ_LINK_BIT_RATE_MBPS_L: Reg = Reg::word(0x0822);

/// Full pixel array including dummy border pixels.
pub const NATIVE_WIDTH: u32 = 5184;
pub const NATIVE_HEIGHT: u32 = 3880;

/// Recommended active area within the pixel array.
pub const PIXEL_ARRAY_LEFT: u32 = 8;
pub const PIXEL_ARRAY_TOP: u32 = 24;
pub const PIXEL_ARRAY_WIDTH: u32 = 5184;
pub const PIXEL_ARRAY_HEIGHT: u32 = 3880;
