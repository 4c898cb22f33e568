//! Driver core for the LC898217XC voice coil motor, the focus actuator
//! paired with the sensor on the same camera module.
//!
//! The actuator is a single 12-bit DAC behind a register interface and one
//! supply rail. Like the sensor, it is powered only while in use: a focus
//! position set while suspended is recorded and restored on resume.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use cam_core::control::ControlRange;
use cam_core::error::{CamError, CamResult};
use cam_core::power::SupplyGroup;
use cam_core::regs::Reg;
use cam_core::transport::RegisterBus;

/// The DAC position register, most significant byte first.
pub const REG_FOCUS_POSITION: Reg = Reg::word(132);

pub const FOCUS_RANGE: ControlRange = ControlRange::new(0, 2048 - 1, 1, 0);

/// Supply rails, a single rail for this part.
pub const SUPPLY_NAMES: &[&str] = &["vcc"];

/// Settle time after power-on before the DAC accepts positions.
const POWER_ON_SETTLE: Duration = Duration::from_millis(9);

struct State {
    position: i64,
    powered: bool,
}

/// One attached focus actuator.
pub struct Lc898217 {
    bus: Arc<dyn RegisterBus>,
    supplies: Arc<dyn SupplyGroup>,
    state: Mutex<State>,
}

impl Lc898217 {
    pub fn attach(bus: Arc<dyn RegisterBus>, supplies: Arc<dyn SupplyGroup>) -> Self {
        Self {
            bus,
            supplies,
            state: Mutex::new(State {
                position: FOCUS_RANGE.default,
                powered: false,
            }),
        }
    }

    /// Power up and restore the recorded focus position.
    pub async fn resume(&self) -> CamResult<()> {
        let mut state = self.state.lock().await;
        if state.powered {
            return Ok(());
        }
        self.supplies.enable().await?;
        sleep(POWER_ON_SETTLE).await;
        if let Err(e) = self
            .bus
            .write(REG_FOCUS_POSITION, state.position as u32)
            .await
        {
            if let Err(e) = self.supplies.disable().await {
                warn!(stage = e.stage, "supply disable failed during rollback");
            }
            return Err(e.into());
        }
        state.powered = true;
        debug!(position = state.position, "actuator resumed");
        Ok(())
    }

    /// Power down. The lens relaxes; the position is kept for resume.
    pub async fn suspend(&self) {
        let mut state = self.state.lock().await;
        if !state.powered {
            return;
        }
        if let Err(e) = self.supplies.disable().await {
            warn!(stage = e.stage, "supply disable failed");
        }
        state.powered = false;
        debug!("actuator suspended");
    }

    pub async fn is_powered(&self) -> bool {
        self.state.lock().await.powered
    }

    pub async fn focus_position(&self) -> i64 {
        self.state.lock().await.position
    }

    pub fn focus_range(&self) -> ControlRange {
        FOCUS_RANGE
    }

    /// Move the lens. While suspended the position is only recorded; a
    /// transport failure while powered keeps the previous position.
    pub async fn set_focus_position(&self, position: i64) -> CamResult<()> {
        let mut state = self.state.lock().await;
        FOCUS_RANGE.validate("focus_position", position)?;
        if state.powered {
            self.bus
                .write(REG_FOCUS_POSITION, position as u32)
                .await
                .map_err(CamError::from)?;
        } else {
            debug!(position, "recorded for resume");
        }
        state.position = position;
        Ok(())
    }
}
