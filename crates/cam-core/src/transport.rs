//! Register bus transport boundary.
//!
//! The physical transport (device enumeration, byte order, addressing quirks)
//! lives behind this trait. Every access can block on bus I/O, so callers
//! must treat each call as potentially slow and keep only bounded waits
//! between accesses.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::regs::{Reg, RegWrite};

/// Register-addressed bus access to one device.
#[async_trait]
pub trait RegisterBus: Send + Sync {
    /// Read a register.
    async fn read(&self, reg: Reg) -> Result<u32, TransportError>;

    /// Write a register.
    async fn write(&self, reg: Reg, value: u32) -> Result<(), TransportError>;

    /// Apply an ordered register program, stopping at the first failure.
    ///
    /// Writes already issued before the failure stay applied; the error names
    /// the access that failed.
    async fn write_all(&self, program: &[RegWrite]) -> Result<(), TransportError> {
        for entry in program {
            self.write(entry.reg, entry.value).await?;
        }
        Ok(())
    }
}
