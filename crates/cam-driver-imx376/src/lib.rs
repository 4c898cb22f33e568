//! Driver core for the Sony IMX376, a 10-bit bayer CSI-2 image sensor.
//!
//! The driver owns four hardware seams, all injected at [`Imx376::attach`]:
//! a [`RegisterBus`] for the control interface, a [`SupplyGroup`] for the
//! three power rails, a [`SensorClock`] for the input clock and a
//! [`ResetLine`]. All state lives behind one async mutex; every public
//! operation takes it for its full duration, so operations are serialized
//! and each one observes and leaves a consistent state.
//!
//! The sensor is powered only while it needs to be: `attach` powers it up
//! to probe the identity register and powers it back down, and streaming
//! powers it up for the duration of the stream. Control writes made while
//! unpowered are recorded and replayed when streaming starts.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use cam_core::error::{CamError, CamResult};
use cam_core::power::{ResetLine, SensorClock, SupplyGroup};
use cam_core::transport::RegisterBus;

pub mod catalog;
pub mod controls;
pub mod format;
pub mod regs;
pub mod tables;

pub use catalog::{SensorMode, SUPPORTED_MODES};
pub use controls::{ControlId, ControlInfo, TEST_PATTERN_MENU};
pub use format::{FrameFormat, MediaBusCode, Rect, SelectionTarget, SensorSession, Which};

use catalog::{LaneMode, LinkFreqConfig};
use controls::ControlSet;
use format::{code_for_flip, NATIVE_RECT, PIXEL_ARRAY_RECT};

/// Supply rails, in power-on order: analog, digital core, digital I/O.
pub const SUPPLY_NAMES: &[&str] = &["vana", "vcore", "vio"];

/// Settle time after the supplies come up, before reset deasserts.
const SUPPLY_SETTLE: Duration = Duration::from_micros(500);
/// Settle time after the clock starts, before the first register access.
const CLOCK_SETTLE: Duration = Duration::from_micros(1100);
/// Wait after soft reset before programming the mode tables.
const RESET_SETTLE: Duration = Duration::from_millis(12);

/// System-integration parameters, typically deserialized from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct Imx376Config {
    pub clock_frequency_hz: u32,
    pub num_data_lanes: u32,
    pub link_frequencies: Vec<u64>,
}

impl Imx376Config {
    pub fn from_toml(text: &str) -> CamResult<Self> {
        toml::from_str(text).map_err(|e| CamError::Config(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PowerState {
    Unpowered,
    Powered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Off,
    Streaming,
}

struct State {
    cur_mode: &'static SensorMode,
    controls: ControlSet,
    power: PowerState,
    stream: StreamState,
}

/// One attached IMX376 sensor.
pub struct Imx376 {
    bus: Arc<dyn RegisterBus>,
    supplies: Arc<dyn SupplyGroup>,
    clock: Arc<dyn SensorClock>,
    reset: Arc<dyn ResetLine>,
    lane_mode: LaneMode,
    link_freq_menu: &'static [u64],
    link_freq_configs: &'static [LinkFreqConfig],
    state: Mutex<State>,
}

impl std::fmt::Debug for Imx376 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Imx376")
            .field("lane_mode", &self.lane_mode)
            .finish_non_exhaustive()
    }
}

impl Imx376 {
    /// Validate the integration parameters, probe the sensor identity and
    /// return the attached driver, powered down.
    pub async fn attach(
        bus: Arc<dyn RegisterBus>,
        supplies: Arc<dyn SupplyGroup>,
        clock: Arc<dyn SensorClock>,
        reset: Arc<dyn ResetLine>,
        config: &Imx376Config,
    ) -> CamResult<Self> {
        let (menu, configs) = match config.clock_frequency_hz {
            24_000_000 => (catalog::LINK_FREQ_MENU_24MHZ, catalog::LINK_FREQ_CONFIGS_24MHZ),
            hz => return Err(CamError::UnsupportedClockFrequency(hz)),
        };
        catalog::validate_link_frequencies(&config.link_frequencies, menu)?;
        let lane_mode = LaneMode::from_lane_count(config.num_data_lanes)?;
        clock.set_rate(config.clock_frequency_hz).await?;

        let cur_mode = &SUPPORTED_MODES[0];
        let lane_cfg = &configs[cur_mode.link_freq_index].lane_cfg[lane_mode.index()];
        let pixel_rate =
            catalog::pixel_rate_for_link(menu[cur_mode.link_freq_index], lane_cfg);
        let controls = ControlSet::new(
            cur_mode,
            pixel_rate,
            configs[cur_mode.link_freq_index].pixels_per_line,
        );

        let sensor = Self {
            bus,
            supplies,
            clock,
            reset,
            lane_mode,
            link_freq_menu: menu,
            link_freq_configs: configs,
            state: Mutex::new(State {
                cur_mode,
                controls,
                power: PowerState::Unpowered,
                stream: StreamState::Off,
            }),
        };

        {
            let mut state = sensor.state.lock().await;
            sensor.power_up(&mut state).await?;
            let identity = sensor.read_identity().await;
            sensor.power_down(&mut state).await;
            identity?;
        }

        info!(
            lanes = sensor.lane_mode.lane_count(),
            clock_hz = config.clock_frequency_hz,
            "sensor attached"
        );
        Ok(sensor)
    }

    /// Release the sensor. Streaming stops and power is forced off.
    pub async fn detach(&self) {
        let mut state = self.state.lock().await;
        if state.stream == StreamState::Streaming {
            self.write_standby().await;
            state.stream = StreamState::Off;
        }
        self.power_down(&mut state).await;
        info!("sensor detached");
    }

    async fn read_identity(&self) -> CamResult<()> {
        let found = self.bus.read(regs::REG_CHIP_ID).await?;
        if found != regs::CHIP_ID {
            return Err(CamError::IdentityMismatch {
                expected: regs::CHIP_ID,
                found,
            });
        }
        Ok(())
    }

    /// Power sequence: supplies, settle, reset release, clock, settle.
    /// A failure rolls back to the unpowered state before returning.
    async fn power_up(&self, state: &mut State) -> CamResult<()> {
        if state.power == PowerState::Powered {
            return Ok(());
        }
        self.supplies.enable().await?;
        sleep(SUPPLY_SETTLE).await;
        self.reset.deassert().await;
        if let Err(e) = self.clock.enable().await {
            self.reset.assert().await;
            if let Err(e) = self.supplies.disable().await {
                warn!(stage = e.stage, "supply disable failed during rollback");
            }
            return Err(e.into());
        }
        sleep(CLOCK_SETTLE).await;
        state.power = PowerState::Powered;
        debug!("sensor powered up");
        Ok(())
    }

    /// Reverse of [`power_up`](Self::power_up). Teardown is best effort:
    /// failures are logged and the state still becomes unpowered.
    async fn power_down(&self, state: &mut State) {
        if state.power == PowerState::Unpowered {
            return;
        }
        if let Err(e) = self.clock.disable().await {
            warn!(stage = e.stage, "clock disable failed");
        }
        self.reset.assert().await;
        if let Err(e) = self.supplies.disable().await {
            warn!(stage = e.stage, "supply disable failed");
        }
        state.power = PowerState::Unpowered;
        debug!("sensor powered down");
    }

    /// Power the sensor up outside of streaming, e.g. to let subsequent
    /// control writes reach the hardware immediately.
    pub async fn resume(&self) -> CamResult<()> {
        let mut state = self.state.lock().await;
        self.power_up(&mut state).await
    }

    /// Power the sensor down. An active stream is stopped first.
    pub async fn suspend(&self) {
        let mut state = self.state.lock().await;
        if state.stream == StreamState::Streaming {
            self.write_standby().await;
            state.stream = StreamState::Off;
        }
        self.power_down(&mut state).await;
    }

    pub async fn is_streaming(&self) -> bool {
        self.state.lock().await.stream == StreamState::Streaming
    }

    pub async fn is_powered(&self) -> bool {
        self.state.lock().await.power == PowerState::Powered
    }

    /// Current snapshot of one control.
    pub async fn control(&self, id: ControlId) -> ControlInfo {
        self.state.lock().await.controls.info(id)
    }

    /// Set a control. The value is validated first; if the sensor is
    /// powered the register program is written before the value commits,
    /// so a transport failure leaves the previous value visible. While
    /// unpowered the commit is recorded for replay at stream start.
    pub async fn set_control(&self, id: ControlId, value: i64) -> CamResult<()> {
        let mut state = self.state.lock().await;
        state.controls.validate(id, value)?;
        if matches!(id, ControlId::HFlip | ControlId::VFlip)
            && state.stream == StreamState::Streaming
        {
            // Flips change the bayer order mid-frame.
            return Err(CamError::Busy);
        }
        let height = state.cur_mode.height;
        if state.power == PowerState::Powered {
            let program = state.controls.payload(id, value, height);
            self.bus.write_all(&program).await?;
        } else {
            debug!(control = id.name(), value, "recorded for replay");
        }
        state.controls.commit(id, value, height);
        Ok(())
    }

    /// New trial state seeded from the default mode and the current flip
    /// configuration.
    pub async fn open_session(&self) -> SensorSession {
        let state = self.state.lock().await;
        let (hflip, vflip) = state.controls.flip_state();
        let mode = &SUPPORTED_MODES[0];
        SensorSession {
            fmt: FrameFormat {
                width: mode.width,
                height: mode.height,
                code: code_for_flip(hflip, vflip),
            },
            crop: mode.crop,
        }
    }

    /// Negotiate the frame format. The request is mapped to the nearest
    /// catalog mode; the bayer code always follows the flip controls.
    /// `Which::Active` switches the sensor mode and re-derives the
    /// mode-dependent controls, and is refused while streaming.
    pub async fn set_format(
        &self,
        session: &mut SensorSession,
        which: Which,
        width: u32,
        height: u32,
    ) -> CamResult<FrameFormat> {
        let mut state = self.state.lock().await;
        let (hflip, vflip) = state.controls.flip_state();
        let mode = catalog::find_nearest_mode(width, height);
        let fmt = FrameFormat {
            width: mode.width,
            height: mode.height,
            code: code_for_flip(hflip, vflip),
        };
        match which {
            Which::Try => {
                session.fmt = fmt;
                session.crop = mode.crop;
            }
            Which::Active => {
                if state.stream == StreamState::Streaming {
                    return Err(CamError::Busy);
                }
                state.cur_mode = mode;
                let pixel_rate = self.pixel_rate_for_mode(mode);
                let ppl = self.link_freq_configs[mode.link_freq_index].pixels_per_line;
                state.controls.set_mode(mode, pixel_rate, ppl);
                debug!(width = mode.width, height = mode.height, "mode selected");
            }
        }
        Ok(fmt)
    }

    /// The negotiated format: the session's trial state or the active
    /// configuration.
    pub async fn format(&self, session: &SensorSession, which: Which) -> FrameFormat {
        let state = self.state.lock().await;
        match which {
            Which::Try => session.fmt,
            Which::Active => {
                let (hflip, vflip) = state.controls.flip_state();
                FrameFormat {
                    width: state.cur_mode.width,
                    height: state.cur_mode.height,
                    code: code_for_flip(hflip, vflip),
                }
            }
        }
    }

    /// Selection rectangles. Only the crop differs between trial and
    /// active state; the other targets are properties of the silicon.
    pub async fn selection(
        &self,
        session: &SensorSession,
        which: Which,
        target: SelectionTarget,
    ) -> Rect {
        match target {
            SelectionTarget::Crop => match which {
                Which::Try => session.crop,
                Which::Active => self.state.lock().await.cur_mode.crop,
            },
            SelectionTarget::NativeSize => NATIVE_RECT,
            SelectionTarget::CropDefault | SelectionTarget::CropBounds => PIXEL_ARRAY_RECT,
        }
    }

    /// The bayer code the sensor currently emits.
    pub async fn current_code(&self) -> MediaBusCode {
        let state = self.state.lock().await;
        let (hflip, vflip) = state.controls.flip_state();
        code_for_flip(hflip, vflip)
    }

    /// Frame sizes available for enumeration.
    pub fn frame_sizes() -> impl Iterator<Item = (u32, u32)> {
        SUPPORTED_MODES.iter().map(|m| (m.width, m.height))
    }

    /// Power up and start streaming the active mode. On a configuration
    /// failure the sensor stays powered but idle; on a power failure
    /// everything is rolled back. Starting an active stream is a no-op.
    pub async fn start_streaming(&self) -> CamResult<()> {
        let mut state = self.state.lock().await;
        if state.stream == StreamState::Streaming {
            debug!("stream already running");
            return Ok(());
        }
        self.power_up(&mut state).await?;
        match self.configure_and_stream(&state).await {
            Ok(()) => {
                state.stream = StreamState::Streaming;
                info!(
                    width = state.cur_mode.width,
                    height = state.cur_mode.height,
                    "streaming started"
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "stream start failed");
                Err(e)
            }
        }
    }

    async fn configure_and_stream(&self, state: &State) -> CamResult<()> {
        let stage = |stage| move |source| CamError::Sequence { stage, source };

        self.bus
            .write(regs::REG_SOFT_RESET, 0x01)
            .await
            .map_err(stage("soft-reset"))?;
        sleep(RESET_SETTLE).await;

        let mode = state.cur_mode;
        let lane_cfg = &self.link_freq_configs[mode.link_freq_index].lane_cfg[self.lane_mode.index()];
        self.bus
            .write_all(lane_cfg.reg_table)
            .await
            .map_err(stage("link-setup"))?;
        self.bus
            .write_all(tables::MODE_COMMON_REGS)
            .await
            .map_err(stage("common-tuning"))?;
        self.bus
            .write_all(mode.reg_table)
            .await
            .map_err(stage("mode-geometry"))?;

        // The mode tables carry power-on defaults; bring the hardware back
        // in line with the committed control values.
        for &id in controls::REPLAY_ORDER {
            let program = state.controls.replay_payload(id, mode.height);
            self.bus
                .write_all(&program)
                .await
                .map_err(stage("control-replay"))?;
        }

        self.bus
            .write(regs::REG_MODE_SELECT, regs::MODE_STREAMING)
            .await
            .map_err(stage("stream-enable"))?;
        Ok(())
    }

    async fn write_standby(&self) {
        if let Err(e) = self
            .bus
            .write(regs::REG_MODE_SELECT, regs::MODE_STANDBY)
            .await
        {
            // Best effort. The sensor loses power right after anyway.
            warn!(error = %e, "standby write failed");
        }
    }

    /// Stop streaming and power down. Always succeeds: a sensor that no
    /// longer answers still ends up off.
    pub async fn stop_streaming(&self) {
        let mut state = self.state.lock().await;
        if state.stream == StreamState::Off {
            return;
        }
        self.write_standby().await;
        state.stream = StreamState::Off;
        self.power_down(&mut state).await;
        info!("streaming stopped");
    }

    fn pixel_rate_for_mode(&self, mode: &SensorMode) -> u64 {
        let lane_cfg = &self.link_freq_configs[mode.link_freq_index].lane_cfg[self.lane_mode.index()];
        catalog::pixel_rate_for_link(self.link_freq_menu[mode.link_freq_index], lane_cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_from_toml() {
        let config = Imx376Config::from_toml(
            r#"
            clock_frequency_hz = 24000000
            num_data_lanes = 4
            link_frequencies = [500000000]
            "#,
        )
        .unwrap();
        assert_eq!(config.clock_frequency_hz, 24_000_000);
        assert_eq!(config.num_data_lanes, 4);
        assert_eq!(config.link_frequencies, vec![500_000_000]);
    }

    #[test]
    fn config_rejects_missing_fields() {
        assert!(matches!(
            Imx376Config::from_toml("clock_frequency_hz = 24000000"),
            Err(CamError::Config(_))
        ));
    }
}
