//! Mock supply group, clock and reset line with a shared event log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cam_core::error::PowerError;
use cam_core::power::{ResetLine, SensorClock, SupplyGroup};

/// One recorded power-sequencing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEvent {
    SuppliesEnabled,
    SuppliesDisabled,
    ClockRateSet(u32),
    ClockEnabled,
    ClockDisabled,
    ResetAsserted,
    ResetDeasserted,
}

/// Event log shared by the three power primitives so tests can assert
/// cross-primitive ordering.
#[derive(Clone, Default)]
pub struct PowerLog {
    events: Arc<Mutex<Vec<PowerEvent>>>,
}

impl PowerLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: PowerEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<PowerEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

/// Mock supply group. `fail_next_enable` scripts an enable failure; per the
/// all-or-nothing contract no rail is reported enabled in that case.
pub struct MockSupplies {
    log: PowerLog,
    fail_next_enable: AtomicBool,
}

impl MockSupplies {
    pub fn new(log: PowerLog) -> Self {
        Self {
            log,
            fail_next_enable: AtomicBool::new(false),
        }
    }

    pub fn fail_next_enable(&self) {
        self.fail_next_enable.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SupplyGroup for MockSupplies {
    async fn enable(&self) -> Result<(), PowerError> {
        if self.fail_next_enable.swap(false, Ordering::SeqCst) {
            return Err(PowerError::new("supplies", "injected enable failure"));
        }
        self.log.push(PowerEvent::SuppliesEnabled);
        Ok(())
    }

    async fn disable(&self) -> Result<(), PowerError> {
        self.log.push(PowerEvent::SuppliesDisabled);
        Ok(())
    }
}

/// Mock sensor clock.
pub struct MockClock {
    log: PowerLog,
    fail_next_enable: AtomicBool,
}

impl MockClock {
    pub fn new(log: PowerLog) -> Self {
        Self {
            log,
            fail_next_enable: AtomicBool::new(false),
        }
    }

    pub fn fail_next_enable(&self) {
        self.fail_next_enable.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SensorClock for MockClock {
    async fn set_rate(&self, hz: u32) -> Result<(), PowerError> {
        self.log.push(PowerEvent::ClockRateSet(hz));
        Ok(())
    }

    async fn enable(&self) -> Result<(), PowerError> {
        if self.fail_next_enable.swap(false, Ordering::SeqCst) {
            return Err(PowerError::new("clock", "injected enable failure"));
        }
        self.log.push(PowerEvent::ClockEnabled);
        Ok(())
    }

    async fn disable(&self) -> Result<(), PowerError> {
        self.log.push(PowerEvent::ClockDisabled);
        Ok(())
    }
}

/// Mock reset line.
pub struct MockReset {
    log: PowerLog,
}

impl MockReset {
    pub fn new(log: PowerLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl ResetLine for MockReset {
    async fn assert(&self) {
        self.log.push(PowerEvent::ResetAsserted);
    }

    async fn deassert(&self) {
        self.log.push(PowerEvent::ResetDeasserted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shared_log_orders_events_across_primitives() {
        let log = PowerLog::new();
        let supplies = MockSupplies::new(log.clone());
        let reset = MockReset::new(log.clone());
        let clock = MockClock::new(log.clone());

        supplies.enable().await.unwrap();
        reset.deassert().await;
        clock.enable().await.unwrap();

        assert_eq!(
            log.events(),
            vec![
                PowerEvent::SuppliesEnabled,
                PowerEvent::ResetDeasserted,
                PowerEvent::ClockEnabled,
            ]
        );
    }

    #[tokio::test]
    async fn injected_enable_failure_is_one_shot() {
        let log = PowerLog::new();
        let supplies = MockSupplies::new(log.clone());
        supplies.fail_next_enable();
        assert!(supplies.enable().await.is_err());
        assert!(supplies.enable().await.is_ok());
    }
}
