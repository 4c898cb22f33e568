//! Register addressing.
//!
//! Device registers are 8 or 16 bits wide behind a 16-bit address space. The
//! width is part of the register's identity, so it travels with the address
//! instead of being rediscovered at every call site.

use std::fmt;

/// Width of a device register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegWidth {
    Byte,
    Word,
}

/// A register address tagged with its access width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reg {
    pub addr: u16,
    pub width: RegWidth,
}

impl Reg {
    /// An 8-bit register.
    pub const fn byte(addr: u16) -> Self {
        Self {
            addr,
            width: RegWidth::Byte,
        }
    }

    /// A 16-bit register.
    pub const fn word(addr: u16) -> Self {
        Self {
            addr,
            width: RegWidth::Word,
        }
    }

    /// Largest value this register can hold.
    pub const fn max_value(self) -> u32 {
        match self.width {
            RegWidth::Byte => 0xff,
            RegWidth::Word => 0xffff,
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = match self.width {
            RegWidth::Byte => 8,
            RegWidth::Word => 16,
        };
        write!(f, "{:#06x}/{}", self.addr, bits)
    }
}

/// One entry of an ordered register program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegWrite {
    pub reg: Reg,
    pub value: u32,
}

impl RegWrite {
    pub const fn new(reg: Reg, value: u32) -> Self {
        Self { reg, value }
    }

    /// Write to an 8-bit register.
    pub const fn u8(addr: u16, value: u32) -> Self {
        Self {
            reg: Reg::byte(addr),
            value,
        }
    }

    /// Write to a 16-bit register.
    pub const fn u16(addr: u16, value: u32) -> Self {
        Self {
            reg: Reg::word(addr),
            value,
        }
    }
}
