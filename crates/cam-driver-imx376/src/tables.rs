//! Static register programs.
//!
//! Three tables are written in sequence when streaming starts: the serial
//! link setup for the negotiated link frequency and lane count, the common
//! analog and readout tuning shared by every mode, and the per-mode
//! geometry. Values come straight from the sensor vendor and are not
//! individually documented.

use cam_core::regs::RegWrite;

use crate::regs::{
    REG_CSI_LANE_MODE, REG_EXCK_FREQ, REG_IOPSYCK_DIV, REG_IVTPXCK_DIV, REG_IVTSYCK_DIV,
    REG_PLL_IOP_MPY, REG_PLL_IVT_MPY, REG_PLL_MULT_DRIV, REG_PREPLLCK_OP_DIV, REG_PREPLLCK_VT_DIV,
    REG_REQ_LINK_BIT_RATE_MBPS_H, REG_REQ_LINK_BIT_RATE_MBPS_L,
};

/// PLL and CSI-2 setup for a 1000 Mbps/lane link from a 24 MHz input clock,
/// four data lanes.
pub static LINK_1000MBPS_24MHZ_4LANE: &[RegWrite] = &[
    RegWrite::new(REG_EXCK_FREQ, 0x1800),
    RegWrite::new(REG_IVTPXCK_DIV, 5),
    RegWrite::new(REG_IVTSYCK_DIV, 2),
    RegWrite::new(REG_PREPLLCK_VT_DIV, 3),
    RegWrite::new(REG_PLL_IVT_MPY, 250),
    RegWrite::new(REG_IOPSYCK_DIV, 2),
    RegWrite::new(REG_PREPLLCK_OP_DIV, 2),
    RegWrite::new(REG_PLL_IOP_MPY, 350),
    RegWrite::new(REG_PLL_MULT_DRIV, 0),
    RegWrite::new(REG_CSI_LANE_MODE, 3),
    RegWrite::new(REG_REQ_LINK_BIT_RATE_MBPS_H, 1000 * 4),
    RegWrite::new(REG_REQ_LINK_BIT_RATE_MBPS_L, 0),
];

/// Analog and readout tuning common to every mode.
pub static MODE_COMMON_REGS: &[RegWrite] = &[
    RegWrite::u8(0x3C7D, 0x28),
    RegWrite::u8(0x3C7E, 0x04),
    RegWrite::u8(0x3C7F, 0x03),
    RegWrite::u8(0x0B06, 0x00),
    RegWrite::u8(0x3F02, 0x02),
    RegWrite::u8(0x3F22, 0x01),
    RegWrite::u8(0x3F7F, 0x01),
    RegWrite::u8(0x4421, 0x04),
    RegWrite::u8(0x4430, 0x05),
    RegWrite::u8(0x4431, 0xDC),
    RegWrite::u8(0x5222, 0x02),
    RegWrite::u8(0x56B7, 0x74),
    RegWrite::u8(0x6204, 0xC6),
    RegWrite::u8(0x620E, 0x27),
    RegWrite::u8(0x6210, 0x69),
    RegWrite::u8(0x6211, 0xD6),
    RegWrite::u8(0x6213, 0x01),
    RegWrite::u8(0x6215, 0x5A),
    RegWrite::u8(0x6216, 0x75),
    RegWrite::u8(0x6218, 0x5A),
    RegWrite::u8(0x6219, 0x75),
    RegWrite::u8(0x6220, 0x06),
    RegWrite::u8(0x6222, 0x0C),
    RegWrite::u8(0x6225, 0x19),
    RegWrite::u8(0x6228, 0x32),
    RegWrite::u8(0x6229, 0x70),
    RegWrite::u8(0x622B, 0x64),
    RegWrite::u8(0x622E, 0xB0),
    RegWrite::u8(0x6231, 0x71),
    RegWrite::u8(0x6234, 0x06),
    RegWrite::u8(0x6236, 0x46),
    RegWrite::u8(0x6237, 0x46),
    RegWrite::u8(0x6239, 0x0C),
    RegWrite::u8(0x623C, 0x19),
    RegWrite::u8(0x623F, 0x32),
    RegWrite::u8(0x6240, 0x71),
    RegWrite::u8(0x6242, 0x64),
    RegWrite::u8(0x6243, 0x44),
    RegWrite::u8(0x6245, 0xB0),
    RegWrite::u8(0x6246, 0xA8),
    RegWrite::u8(0x6248, 0x71),
    RegWrite::u8(0x624B, 0x06),
    RegWrite::u8(0x624D, 0x46),
    RegWrite::u8(0x625C, 0xC9),
    RegWrite::u8(0x625F, 0x92),
    RegWrite::u8(0x6262, 0x26),
    RegWrite::u8(0x6264, 0x46),
    RegWrite::u8(0x6265, 0x46),
    RegWrite::u8(0x6267, 0x0C),
    RegWrite::u8(0x626A, 0x19),
    RegWrite::u8(0x626D, 0x32),
    RegWrite::u8(0x626E, 0x72),
    RegWrite::u8(0x6270, 0x64),
    RegWrite::u8(0x6271, 0x68),
    RegWrite::u8(0x6273, 0xC8),
    RegWrite::u8(0x6276, 0x91),
    RegWrite::u8(0x6279, 0x27),
    RegWrite::u8(0x627B, 0x46),
    RegWrite::u8(0x627C, 0x55),
    RegWrite::u8(0x627F, 0x95),
    RegWrite::u8(0x6282, 0x84),
    RegWrite::u8(0x6283, 0x40),
    RegWrite::u8(0x6284, 0x00),
    RegWrite::u8(0x6285, 0x00),
    RegWrite::u8(0x6286, 0x08),
    RegWrite::u8(0x6287, 0xC0),
    RegWrite::u8(0x6288, 0x00),
    RegWrite::u8(0x6289, 0x00),
    RegWrite::u8(0x628A, 0x1B),
    RegWrite::u8(0x628B, 0x80),
    RegWrite::u8(0x628C, 0x20),
    RegWrite::u8(0x628E, 0x35),
    RegWrite::u8(0x628F, 0x00),
    RegWrite::u8(0x6290, 0x50),
    RegWrite::u8(0x6291, 0x00),
    RegWrite::u8(0x6292, 0x14),
    RegWrite::u8(0x6293, 0x00),
    RegWrite::u8(0x6294, 0x00),
    RegWrite::u8(0x6296, 0x54),
    RegWrite::u8(0x6297, 0x00),
    RegWrite::u8(0x6298, 0x00),
    RegWrite::u8(0x6299, 0x01),
    RegWrite::u8(0x629A, 0x10),
    RegWrite::u8(0x629B, 0x01),
    RegWrite::u8(0x629C, 0x00),
    RegWrite::u8(0x629D, 0x03),
    RegWrite::u8(0x629E, 0x50),
    RegWrite::u8(0x629F, 0x05),
    RegWrite::u8(0x62A0, 0x00),
    RegWrite::u8(0x62B1, 0x00),
    RegWrite::u8(0x62B2, 0x00),
    RegWrite::u8(0x62B3, 0x00),
    RegWrite::u8(0x62B5, 0x00),
    RegWrite::u8(0x62B6, 0x00),
    RegWrite::u8(0x62B7, 0x00),
    RegWrite::u8(0x62B8, 0x00),
    RegWrite::u8(0x62B9, 0x00),
    RegWrite::u8(0x62BA, 0x00),
    RegWrite::u8(0x62BB, 0x00),
    RegWrite::u8(0x62BC, 0x00),
    RegWrite::u8(0x62BD, 0x00),
    RegWrite::u8(0x62BE, 0x00),
    RegWrite::u8(0x62BF, 0x00),
    RegWrite::u8(0x62D0, 0x0C),
    RegWrite::u8(0x62D1, 0x00),
    RegWrite::u8(0x62D2, 0x00),
    RegWrite::u8(0x62D4, 0x40),
    RegWrite::u8(0x62D5, 0x00),
    RegWrite::u8(0x62D6, 0x00),
    RegWrite::u8(0x62D7, 0x00),
    RegWrite::u8(0x62D8, 0xD8),
    RegWrite::u8(0x62D9, 0x00),
    RegWrite::u8(0x62DA, 0x00),
    RegWrite::u8(0x62DB, 0x02),
    RegWrite::u8(0x62DC, 0xB0),
    RegWrite::u8(0x62DD, 0x03),
    RegWrite::u8(0x62DE, 0x00),
    RegWrite::u8(0x62EF, 0x14),
    RegWrite::u8(0x62F0, 0x00),
    RegWrite::u8(0x62F1, 0x00),
    RegWrite::u8(0x62F3, 0x58),
    RegWrite::u8(0x62F4, 0x00),
    RegWrite::u8(0x62F5, 0x00),
    RegWrite::u8(0x62F6, 0x01),
    RegWrite::u8(0x62F7, 0x20),
    RegWrite::u8(0x62F8, 0x00),
    RegWrite::u8(0x62F9, 0x00),
    RegWrite::u8(0x62FA, 0x03),
    RegWrite::u8(0x62FB, 0x80),
    RegWrite::u8(0x62FC, 0x00),
    RegWrite::u8(0x62FD, 0x00),
    RegWrite::u8(0x62FE, 0x04),
    RegWrite::u8(0x62FF, 0x60),
    RegWrite::u8(0x6300, 0x04),
    RegWrite::u8(0x6301, 0x00),
    RegWrite::u8(0x6302, 0x09),
    RegWrite::u8(0x6303, 0x00),
    RegWrite::u8(0x6304, 0x0C),
    RegWrite::u8(0x6305, 0x00),
    RegWrite::u8(0x6306, 0x1B),
    RegWrite::u8(0x6307, 0x80),
    RegWrite::u8(0x6308, 0x30),
    RegWrite::u8(0x630A, 0x38),
    RegWrite::u8(0x630B, 0x00),
    RegWrite::u8(0x630C, 0x60),
    RegWrite::u8(0x630E, 0x14),
    RegWrite::u8(0x630F, 0x00),
    RegWrite::u8(0x6310, 0x00),
    RegWrite::u8(0x6312, 0x58),
    RegWrite::u8(0x6313, 0x00),
    RegWrite::u8(0x6314, 0x00),
    RegWrite::u8(0x6315, 0x01),
    RegWrite::u8(0x6316, 0x18),
    RegWrite::u8(0x6317, 0x01),
    RegWrite::u8(0x6318, 0x80),
    RegWrite::u8(0x6319, 0x03),
    RegWrite::u8(0x631A, 0x60),
    RegWrite::u8(0x631B, 0x06),
    RegWrite::u8(0x631C, 0x00),
    RegWrite::u8(0x632D, 0x0E),
    RegWrite::u8(0x632E, 0x00),
    RegWrite::u8(0x632F, 0x00),
    RegWrite::u8(0x6331, 0x44),
    RegWrite::u8(0x6332, 0x00),
    RegWrite::u8(0x6333, 0x00),
    RegWrite::u8(0x6334, 0x00),
    RegWrite::u8(0x6335, 0xE8),
    RegWrite::u8(0x6336, 0x00),
    RegWrite::u8(0x6337, 0x00),
    RegWrite::u8(0x6338, 0x02),
    RegWrite::u8(0x6339, 0xF0),
    RegWrite::u8(0x633A, 0x00),
    RegWrite::u8(0x633B, 0x00),
    RegWrite::u8(0x634C, 0x0C),
    RegWrite::u8(0x634D, 0x00),
    RegWrite::u8(0x634E, 0x00),
    RegWrite::u8(0x6350, 0x40),
    RegWrite::u8(0x6351, 0x00),
    RegWrite::u8(0x6352, 0x00),
    RegWrite::u8(0x6353, 0x00),
    RegWrite::u8(0x6354, 0xD8),
    RegWrite::u8(0x6355, 0x00),
    RegWrite::u8(0x6356, 0x00),
    RegWrite::u8(0x6357, 0x02),
    RegWrite::u8(0x6358, 0xB0),
    RegWrite::u8(0x6359, 0x04),
    RegWrite::u8(0x635A, 0x00),
    RegWrite::u8(0x636B, 0x00),
    RegWrite::u8(0x636C, 0x00),
    RegWrite::u8(0x636D, 0x00),
    RegWrite::u8(0x636F, 0x00),
    RegWrite::u8(0x6370, 0x00),
    RegWrite::u8(0x6371, 0x00),
    RegWrite::u8(0x6372, 0x00),
    RegWrite::u8(0x6373, 0x00),
    RegWrite::u8(0x6374, 0x00),
    RegWrite::u8(0x6375, 0x00),
    RegWrite::u8(0x6376, 0x00),
    RegWrite::u8(0x6377, 0x00),
    RegWrite::u8(0x6378, 0x00),
    RegWrite::u8(0x6379, 0x00),
    RegWrite::u8(0x637A, 0x13),
    RegWrite::u8(0x637B, 0xD4),
    RegWrite::u8(0x6388, 0x22),
    RegWrite::u8(0x6389, 0x82),
    RegWrite::u8(0x638A, 0xC8),
    RegWrite::u8(0x639D, 0x20),
    RegWrite::u8(0x7BA0, 0x01),
    RegWrite::u8(0x7BA9, 0x00),
    RegWrite::u8(0x7BAA, 0x01),
    RegWrite::u8(0x7BAD, 0x00),
    RegWrite::u8(0x9002, 0x00),
    RegWrite::u8(0x9003, 0x00),
    RegWrite::u8(0x9004, 0x0D),
    RegWrite::u8(0x9006, 0x01),
    RegWrite::u8(0x9200, 0x93),
    RegWrite::u8(0x9201, 0x85),
    RegWrite::u8(0x9202, 0x93),
    RegWrite::u8(0x9203, 0x87),
    RegWrite::u8(0x9204, 0x93),
    RegWrite::u8(0x9205, 0x8D),
    RegWrite::u8(0x9206, 0x93),
    RegWrite::u8(0x9207, 0x8F),
    RegWrite::u8(0x9208, 0x62),
    RegWrite::u8(0x9209, 0x2C),
    RegWrite::u8(0x920A, 0x62),
    RegWrite::u8(0x920B, 0x2F),
    RegWrite::u8(0x920C, 0x6A),
    RegWrite::u8(0x920D, 0x23),
    RegWrite::u8(0x920E, 0x71),
    RegWrite::u8(0x920F, 0x08),
    RegWrite::u8(0x9210, 0x71),
    RegWrite::u8(0x9211, 0x09),
    RegWrite::u8(0x9212, 0x71),
    RegWrite::u8(0x9213, 0x0B),
    RegWrite::u8(0x9214, 0x6A),
    RegWrite::u8(0x9215, 0x0F),
    RegWrite::u8(0x9216, 0x71),
    RegWrite::u8(0x9217, 0x07),
    RegWrite::u8(0x9218, 0x71),
    RegWrite::u8(0x9219, 0x03),
    RegWrite::u8(0x935D, 0x01),
    RegWrite::u8(0x9389, 0x05),
    RegWrite::u8(0x938B, 0x05),
    RegWrite::u8(0x9391, 0x05),
    RegWrite::u8(0x9393, 0x05),
    RegWrite::u8(0x9395, 0x65),
    RegWrite::u8(0x9397, 0x5A),
    RegWrite::u8(0x9399, 0x05),
    RegWrite::u8(0x939B, 0x05),
    RegWrite::u8(0x939D, 0x05),
    RegWrite::u8(0x939F, 0x05),
    RegWrite::u8(0x93A1, 0x05),
    RegWrite::u8(0x93A3, 0x05),
    RegWrite::u8(0xB3F1, 0x80),
    RegWrite::u8(0xB3F2, 0x0E),
    RegWrite::u8(0xBC40, 0x03),
    RegWrite::u8(0xBC82, 0x07),
    RegWrite::u8(0xBC83, 0xB0),
    RegWrite::u8(0xBC84, 0x0D),
    RegWrite::u8(0xBC85, 0x08),
    RegWrite::u8(0xE0A6, 0x0A),
    RegWrite::u8(0xAA3F, 0x04),
    RegWrite::u8(0xAA41, 0x03),
    RegWrite::u8(0xAA43, 0x02),
    RegWrite::u8(0xAA5D, 0x05),
    RegWrite::u8(0xAA5F, 0x03),
    RegWrite::u8(0xAA61, 0x02),
    RegWrite::u8(0xAACF, 0x04),
    RegWrite::u8(0xAAD1, 0x03),
    RegWrite::u8(0xAAD3, 0x02),
    RegWrite::u8(0xAAED, 0x05),
    RegWrite::u8(0xAAEF, 0x03),
    RegWrite::u8(0xAAF1, 0x02),
    RegWrite::u8(0xB6D9, 0x00),
];

/// Geometry and timing for the 2592x1940 (2x2 binned) mode.
pub static MODE_2592X1940_REGS: &[RegWrite] = &[
    RegWrite::u8(0x0112, 0x0A),
    RegWrite::u8(0x0113, 0x0A),
    RegWrite::u8(0x0114, 0x03),
    RegWrite::u8(0x0342, 0x15),
    RegWrite::u8(0x0343, 0xF8),
    RegWrite::u8(0x0340, 0x12),
    RegWrite::u8(0x0341, 0x80),
    RegWrite::u8(0x3F39, 0x00),
    RegWrite::u8(0x3F3A, 0x12),
    RegWrite::u8(0x3F3B, 0x80),
    RegWrite::u8(0x0344, 0x00),
    RegWrite::u8(0x0345, 0x00),
    RegWrite::u8(0x0346, 0x00),
    RegWrite::u8(0x0347, 0x00),
    RegWrite::u8(0x0348, 0x14),
    RegWrite::u8(0x0349, 0x3F),
    RegWrite::u8(0x034A, 0x0F),
    RegWrite::u8(0x034B, 0x27),
    RegWrite::u8(0x0381, 0x01),
    RegWrite::u8(0x0383, 0x01),
    RegWrite::u8(0x0385, 0x01),
    RegWrite::u8(0x0387, 0x01),
    RegWrite::u8(0x0900, 0x01),
    RegWrite::u8(0x0901, 0x22),
    RegWrite::u8(0x0902, 0x08),
    RegWrite::u8(0x3F4D, 0x81),
    RegWrite::u8(0x3F4C, 0x81),
    RegWrite::u8(0x4254, 0x7F),
    RegWrite::u8(0x0401, 0x00),
    RegWrite::u8(0x0404, 0x00),
    RegWrite::u8(0x0405, 0x10),
    RegWrite::u8(0x0408, 0x00),
    RegWrite::u8(0x0409, 0x00),
    RegWrite::u8(0x040A, 0x00),
    RegWrite::u8(0x040B, 0x00),
    RegWrite::u8(0x040C, 0x0A),
    RegWrite::u8(0x040D, 0x20),
    RegWrite::u8(0x040E, 0x07),
    RegWrite::u8(0x040F, 0x94),
    RegWrite::u8(0x034C, 0x0A),
    RegWrite::u8(0x034D, 0x20),
    RegWrite::u8(0x034E, 0x07),
    RegWrite::u8(0x034F, 0x94),
    RegWrite::u8(0x0301, 0x05),
    RegWrite::u8(0x0303, 0x02),
    RegWrite::u8(0x0305, 0x03),
    RegWrite::u8(0x0306, 0x00),
    RegWrite::u8(0x0307, 0xFA),
    RegWrite::u8(0x030B, 0x02),
    RegWrite::u8(0x030D, 0x02),
    RegWrite::u8(0x030E, 0x01),
    RegWrite::u8(0x030F, 0x5E),
    RegWrite::u8(0x0310, 0x00),
    RegWrite::u8(0x0820, 0x0F),
    RegWrite::u8(0x0821, 0xA0),
    RegWrite::u8(0x0822, 0x00),
    RegWrite::u8(0x0823, 0x00),
    RegWrite::u8(0xBC41, 0x03),
    RegWrite::u8(0x0106, 0x00),
    RegWrite::u8(0x0B00, 0x00),
    RegWrite::u8(0x0B05, 0x01),
    RegWrite::u8(0x3230, 0x00),
    RegWrite::u8(0x3602, 0x01),
    RegWrite::u8(0x3607, 0x00),
    RegWrite::u8(0x3C00, 0x74),
    RegWrite::u8(0x3C01, 0x5F),
    RegWrite::u8(0x3C02, 0x73),
    RegWrite::u8(0x3C03, 0x64),
    RegWrite::u8(0x3C04, 0x54),
    RegWrite::u8(0x3C05, 0xA8),
    RegWrite::u8(0x3C06, 0xBE),
    RegWrite::u8(0x3C07, 0x00),
    RegWrite::u8(0x3C08, 0x00),
    RegWrite::u8(0x3C09, 0x01),
    RegWrite::u8(0x3C0A, 0x14),
    RegWrite::u8(0x3C0B, 0x01),
    RegWrite::u8(0x3C0C, 0x01),
    RegWrite::u8(0x3E20, 0x03),
    RegWrite::u8(0x3E3D, 0x00),
    RegWrite::u8(0x3F14, 0x00),
    RegWrite::u8(0x3F17, 0x00),
    RegWrite::u8(0x3F3C, 0x00),
    RegWrite::u8(0x3F78, 0x03),
    RegWrite::u8(0x3F79, 0x14),
    RegWrite::u8(0x3F7A, 0x03),
    RegWrite::u8(0x3F7B, 0xBC),
    RegWrite::u8(0x562B, 0x32),
    RegWrite::u8(0x562D, 0x34),
    RegWrite::u8(0x5617, 0x32),
    RegWrite::u8(0x7849, 0x01),
    RegWrite::u8(0x9104, 0x04),
    RegWrite::u8(0x0202, 0x12),
    RegWrite::u8(0x0203, 0x70),
    RegWrite::u8(0x0204, 0x00),
    RegWrite::u8(0x0205, 0x00),
    RegWrite::u8(0x020E, 0x01),
    RegWrite::u8(0x020F, 0x00),
];
