//! In-memory register bus.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use cam_core::error::TransportError;
use cam_core::regs::{Reg, RegWrite};
use cam_core::transport::RegisterBus;

/// Scripted failure behaviour for a [`MockBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusFailure {
    /// Every access succeeds.
    #[default]
    None,
    /// Writes to this address fail; everything else succeeds.
    OnWriteTo(u16),
    /// Reads from this address fail.
    OnReadFrom(u16),
    /// The next `n` writes succeed, then every write fails.
    AfterWrites(u32),
    /// Every access fails (communication loss).
    All,
}

#[derive(Default)]
struct BusState {
    regs: HashMap<u16, u32>,
    writes: Vec<RegWrite>,
    writes_seen: u32,
    failure: BusFailure,
}

/// Mock register bus: a register file plus an ordered write log.
#[derive(Default)]
pub struct MockBus {
    state: Mutex<BusState>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a register value (e.g. the chip identity register).
    pub fn with_register(self, reg: Reg, value: u32) -> Self {
        self.state.lock().unwrap().regs.insert(reg.addr, value);
        self
    }

    /// Script the failure behaviour. Replaces any previous script.
    pub fn set_failure(&self, failure: BusFailure) {
        let mut state = self.state.lock().unwrap();
        state.failure = failure;
        state.writes_seen = 0;
    }

    /// The full ordered write log since the last [`clear_log`](Self::clear_log).
    pub fn writes(&self) -> Vec<RegWrite> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Values written to one address, in order.
    pub fn writes_to(&self, addr: u16) -> Vec<u32> {
        self.state
            .lock()
            .unwrap()
            .writes
            .iter()
            .filter(|w| w.reg.addr == addr)
            .map(|w| w.value)
            .collect()
    }

    /// Current value of a register, if ever written or seeded.
    pub fn register(&self, addr: u16) -> Option<u32> {
        self.state.lock().unwrap().regs.get(&addr).copied()
    }

    pub fn clear_log(&self) {
        self.state.lock().unwrap().writes.clear();
    }
}

#[async_trait]
impl RegisterBus for MockBus {
    async fn read(&self, reg: Reg) -> Result<u32, TransportError> {
        let state = self.state.lock().unwrap();
        let fail = matches!(state.failure, BusFailure::All)
            || matches!(state.failure, BusFailure::OnReadFrom(addr) if addr == reg.addr);
        if fail {
            return Err(TransportError::Read {
                reg,
                message: "injected read failure".into(),
            });
        }
        Ok(state.regs.get(&reg.addr).copied().unwrap_or(0))
    }

    async fn write(&self, reg: Reg, value: u32) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        let fail = match state.failure {
            BusFailure::All => true,
            BusFailure::OnWriteTo(addr) => addr == reg.addr,
            BusFailure::AfterWrites(n) => state.writes_seen >= n,
            _ => false,
        };
        state.writes_seen += 1;
        if fail {
            return Err(TransportError::Write {
                reg,
                value,
                message: "injected write failure".into(),
            });
        }
        state.regs.insert(reg.addr, value);
        state.writes.push(RegWrite { reg, value });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_log_preserves_order() {
        let bus = MockBus::new();
        bus.write(Reg::byte(0x10), 1).await.unwrap();
        bus.write(Reg::word(0x20), 2).await.unwrap();
        let log = bus.writes();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].reg.addr, 0x10);
        assert_eq!(log[1].value, 2);
    }

    #[tokio::test]
    async fn bulk_write_stops_at_first_failure() {
        let bus = MockBus::new();
        bus.set_failure(BusFailure::OnWriteTo(0x20));
        let program = [
            RegWrite::u8(0x10, 1),
            RegWrite::u8(0x20, 2),
            RegWrite::u8(0x30, 3),
        ];
        let err = bus.write_all(&program).await.unwrap_err();
        assert_eq!(err.reg().addr, 0x20);
        // The third entry was never attempted.
        assert_eq!(bus.writes().len(), 1);
        assert_eq!(bus.register(0x30), None);
    }

    #[tokio::test]
    async fn fail_after_n_writes() {
        let bus = MockBus::new();
        bus.set_failure(BusFailure::AfterWrites(2));
        assert!(bus.write(Reg::byte(1), 0).await.is_ok());
        assert!(bus.write(Reg::byte(2), 0).await.is_ok());
        assert!(bus.write(Reg::byte(3), 0).await.is_err());
    }

    #[tokio::test]
    async fn seeded_register_readable() {
        let bus = MockBus::new().with_register(Reg::word(0x0016), 0x0376);
        assert_eq!(bus.read(Reg::word(0x0016)).await.unwrap(), 0x0376);
    }
}
