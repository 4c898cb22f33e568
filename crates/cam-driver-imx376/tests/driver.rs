//! End-to-end driver behaviour against mock hardware.

use std::sync::Arc;
use std::sync::Once;

use cam_core::error::CamError;
use cam_core::regs::Reg;
use cam_driver_imx376::{
    ControlId, Imx376, Imx376Config, MediaBusCode, SelectionTarget, Which,
};
use cam_mock::{BusFailure, MockBus, MockClock, MockReset, MockSupplies, PowerEvent, PowerLog};

const CHIP_ID_REG: u16 = 0x0016;
const MODE_SELECT: u16 = 0x0100;
const MIRROR_FLIP: u16 = 0x0101;
const SOFT_RESET: u16 = 0x0103;
const EXPOSURE: u16 = 0x0202;
const ANALOG_GAIN: u16 = 0x0204;
const FRM_LENGTH_LINES: u16 = 0x0340;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

struct Rig {
    bus: Arc<MockBus>,
    supplies: Arc<MockSupplies>,
    clock: Arc<MockClock>,
    log: PowerLog,
}

impl Rig {
    fn new() -> Self {
        init_tracing();
        let log = PowerLog::new();
        Self {
            bus: Arc::new(MockBus::new().with_register(Reg::word(CHIP_ID_REG), 0x0376)),
            supplies: Arc::new(MockSupplies::new(log.clone())),
            clock: Arc::new(MockClock::new(log.clone())),
            log,
        }
    }

    async fn attach(&self) -> Result<Imx376, CamError> {
        let config = Imx376Config {
            clock_frequency_hz: 24_000_000,
            num_data_lanes: 4,
            link_frequencies: vec![500_000_000],
        };
        Imx376::attach(
            self.bus.clone(),
            self.supplies.clone(),
            self.clock.clone(),
            Arc::new(MockReset::new(self.log.clone())),
            &config,
        )
        .await
    }

    async fn attached(&self) -> Imx376 {
        let sensor = self.attach().await.expect("attach");
        self.log.clear();
        self.bus.clear_log();
        sensor
    }
}

#[tokio::test]
async fn attach_probes_identity_and_powers_back_down() {
    let rig = Rig::new();
    let sensor = rig.attach().await.unwrap();

    assert_eq!(
        rig.log.events(),
        vec![
            PowerEvent::ClockRateSet(24_000_000),
            PowerEvent::SuppliesEnabled,
            PowerEvent::ResetDeasserted,
            PowerEvent::ClockEnabled,
            PowerEvent::ClockDisabled,
            PowerEvent::ResetAsserted,
            PowerEvent::SuppliesDisabled,
        ]
    );
    assert!(!sensor.is_powered().await);
    // The identity probe is the only bus traffic.
    assert!(rig.bus.writes().is_empty());
}

#[tokio::test]
async fn attach_rejects_wrong_identity() {
    let rig = Rig::new();
    let bad = Rig {
        bus: Arc::new(MockBus::new().with_register(Reg::word(CHIP_ID_REG), 0x0371)),
        ..rig
    };
    let err = bad.attach().await.unwrap_err();
    assert!(matches!(
        err,
        CamError::IdentityMismatch {
            expected: 0x0376,
            found: 0x0371,
        }
    ));
    // Power was sequenced back off despite the failure.
    assert_eq!(bad.log.events().last(), Some(&PowerEvent::SuppliesDisabled));
}

#[tokio::test]
async fn attach_rejects_bad_integration_parameters() {
    let rig = Rig::new();
    let base = Imx376Config {
        clock_frequency_hz: 24_000_000,
        num_data_lanes: 4,
        link_frequencies: vec![500_000_000],
    };

    let mut config = base.clone();
    config.clock_frequency_hz = 19_200_000;
    let err = Imx376::attach(
        rig.bus.clone(),
        rig.supplies.clone(),
        rig.clock.clone(),
        Arc::new(MockReset::new(rig.log.clone())),
        &config,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CamError::UnsupportedClockFrequency(19_200_000)));

    let mut config = base.clone();
    config.num_data_lanes = 2;
    let err = Imx376::attach(
        rig.bus.clone(),
        rig.supplies.clone(),
        rig.clock.clone(),
        Arc::new(MockReset::new(rig.log.clone())),
        &config,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CamError::UnsupportedLaneCount(2)));

    let mut config = base;
    config.link_frequencies = vec![400_000_000];
    let err = Imx376::attach(
        rig.bus.clone(),
        rig.supplies.clone(),
        rig.clock.clone(),
        Arc::new(MockReset::new(rig.log.clone())),
        &config,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CamError::UnsupportedLinkFrequency(400_000_000)));
    // Rejected before any power sequencing.
    assert!(rig.log.events().is_empty());
}

#[tokio::test]
async fn clock_failure_rolls_power_back() {
    let rig = Rig::new();
    rig.clock.fail_next_enable();
    let err = rig.attach().await.unwrap_err();
    assert!(matches!(err, CamError::Power(_)));
    assert_eq!(
        rig.log.events(),
        vec![
            PowerEvent::ClockRateSet(24_000_000),
            PowerEvent::SuppliesEnabled,
            PowerEvent::ResetDeasserted,
            PowerEvent::ResetAsserted,
            PowerEvent::SuppliesDisabled,
        ]
    );
}

#[tokio::test]
async fn supply_failure_leaves_everything_untouched() {
    let rig = Rig::new();
    rig.supplies.fail_next_enable();
    let err = rig.attach().await.unwrap_err();
    assert!(matches!(err, CamError::Power(_)));
    assert_eq!(rig.log.events(), vec![PowerEvent::ClockRateSet(24_000_000)]);
}

#[tokio::test]
async fn unpowered_control_writes_are_deferred_and_replayed_once() {
    let rig = Rig::new();
    let sensor = rig.attached().await;

    sensor.set_control(ControlId::Exposure, 2000).await.unwrap();
    sensor
        .set_control(ControlId::AnalogueGain, 200)
        .await
        .unwrap();
    assert!(rig.bus.writes().is_empty());
    assert_eq!(sensor.control(ControlId::Exposure).await.value, 2000);

    sensor.start_streaming().await.unwrap();
    // The mode table touches these addresses with byte writes; the replay
    // itself is the single word-width write per control.
    let replayed = |addr| -> Vec<u32> {
        rig.bus
            .writes()
            .iter()
            .filter(|w| w.reg == Reg::word(addr))
            .map(|w| w.value)
            .collect()
    };
    assert_eq!(replayed(EXPOSURE), vec![2000]);
    assert_eq!(replayed(ANALOG_GAIN), vec![200]);
    assert_eq!(rig.bus.register(EXPOSURE), Some(2000));
}

#[tokio::test]
async fn stream_start_sequence_order() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.start_streaming().await.unwrap();
    assert!(sensor.is_streaming().await);

    let writes = rig.bus.writes();
    // Soft reset opens the sequence, stream enable closes it.
    assert_eq!(writes[0].reg.addr, SOFT_RESET);
    assert_eq!(writes[0].value, 1);
    let last = writes.last().unwrap();
    assert_eq!((last.reg.addr, last.value), (MODE_SELECT, 1));

    // Link setup precedes the common tuning table.
    let pos = |addr| writes.iter().position(|w| w.reg.addr == addr).unwrap();
    assert!(pos(0x0136) < pos(0x3C7D));

    // Replayed defaults: both flips on, default frame length.
    assert_eq!(rig.bus.writes_to(MIRROR_FLIP), vec![0x03]);
    assert_eq!(rig.bus.register(FRM_LENGTH_LINES), Some(4736));

    // A second start is a no-op.
    rig.bus.clear_log();
    sensor.start_streaming().await.unwrap();
    assert!(rig.bus.writes().is_empty());
}

#[tokio::test]
async fn configure_failure_leaves_sensor_powered_but_idle() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    rig.bus.set_failure(BusFailure::OnWriteTo(SOFT_RESET));
    let err = sensor.start_streaming().await.unwrap_err();
    assert!(matches!(
        err,
        CamError::Sequence {
            stage: "soft-reset",
            ..
        }
    ));
    assert!(!sensor.is_streaming().await);
    assert!(sensor.is_powered().await);
}

#[tokio::test]
async fn stop_streaming_is_best_effort() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.start_streaming().await.unwrap();

    // The sensor stops answering entirely.
    rig.bus.set_failure(BusFailure::All);
    sensor.stop_streaming().await;
    assert!(!sensor.is_streaming().await);
    assert!(!sensor.is_powered().await);
    assert_eq!(rig.log.events().last(), Some(&PowerEvent::SuppliesDisabled));
}

#[tokio::test]
async fn stop_writes_standby_before_power_down() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.start_streaming().await.unwrap();
    rig.bus.clear_log();
    sensor.stop_streaming().await;
    assert_eq!(rig.bus.writes_to(MODE_SELECT), vec![0]);
}

#[tokio::test]
async fn powered_control_write_failure_keeps_previous_value() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.resume().await.unwrap();

    sensor.set_control(ControlId::Exposure, 1500).await.unwrap();
    assert_eq!(rig.bus.writes_to(EXPOSURE), vec![1500]);

    rig.bus.set_failure(BusFailure::OnWriteTo(EXPOSURE));
    let err = sensor.set_control(ControlId::Exposure, 1600).await.unwrap_err();
    assert!(matches!(err, CamError::Transport(_)));
    assert_eq!(sensor.control(ControlId::Exposure).await.value, 1500);
}

#[tokio::test]
async fn digital_gain_failure_reports_first_and_stops() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.resume().await.unwrap();

    // Fail the second channel of the four-register program.
    rig.bus.set_failure(BusFailure::OnWriteTo(0x0214));
    assert!(sensor
        .set_control(ControlId::DigitalGain, 2048)
        .await
        .is_err());
    assert_eq!(rig.bus.writes_to(0x020e), vec![2048]);
    assert!(rig.bus.writes_to(0x0210).is_empty());
    assert!(rig.bus.writes_to(0x0212).is_empty());
}

#[tokio::test]
async fn vblank_reshapes_exposure_range() {
    let rig = Rig::new();
    let sensor = rig.attached().await;

    sensor.set_control(ControlId::Exposure, 4000).await.unwrap();
    sensor.set_control(ControlId::Vblank, 100).await.unwrap();
    let exposure = sensor.control(ControlId::Exposure).await;
    // 1940 active lines + 100 blanking - 10 offset.
    assert_eq!(exposure.range.max, 2030);
    assert_eq!(exposure.value, 2030);

    assert!(matches!(
        sensor.set_control(ControlId::Exposure, 4000).await,
        Err(CamError::OutOfRange { .. })
    ));
}

#[tokio::test]
async fn read_only_controls_are_rejected() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    for id in [ControlId::LinkFreq, ControlId::PixelRate, ControlId::Hblank] {
        assert!(matches!(
            sensor.set_control(id, 0).await,
            Err(CamError::ReadOnlyControl(_))
        ));
    }
    assert_eq!(
        sensor.control(ControlId::PixelRate).await.value,
        400_000_000
    );
}

#[tokio::test]
async fn flips_select_the_bayer_code() {
    let rig = Rig::new();
    let sensor = rig.attached().await;

    sensor.set_control(ControlId::HFlip, 0).await.unwrap();
    sensor.set_control(ControlId::VFlip, 0).await.unwrap();
    assert_eq!(sensor.current_code().await, MediaBusCode::Srggb10);

    sensor.set_control(ControlId::HFlip, 1).await.unwrap();
    assert_eq!(sensor.current_code().await, MediaBusCode::Sgrbg10);

    sensor.set_control(ControlId::VFlip, 1).await.unwrap();
    assert_eq!(sensor.current_code().await, MediaBusCode::Sbggr10);
}

#[tokio::test]
async fn flips_are_refused_while_streaming() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.start_streaming().await.unwrap();
    assert!(matches!(
        sensor.set_control(ControlId::HFlip, 0).await,
        Err(CamError::Busy)
    ));
    // Exposure is still writable mid-stream.
    sensor.set_control(ControlId::Exposure, 1000).await.unwrap();
}

#[tokio::test]
async fn try_format_does_not_touch_active_state() -> anyhow::Result<()> {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    let mut session = sensor.open_session().await;

    let fmt = sensor.set_format(&mut session, Which::Try, 640, 480).await?;
    // Snapped to the nearest catalog mode.
    assert_eq!((fmt.width, fmt.height), (2592, 1940));
    assert_eq!(sensor.format(&session, Which::Try).await, fmt);
    assert!(rig.bus.writes().is_empty());

    let active = sensor
        .set_format(&mut session, Which::Active, 2592, 1940)
        .await?;
    assert_eq!(sensor.format(&session, Which::Active).await, active);

    // Pixel rate is re-derived for the new mode and stays single-valued.
    let pixel_rate = sensor.control(ControlId::PixelRate).await;
    assert_eq!(pixel_rate.value, 400_000_000);
    assert_eq!(pixel_rate.range.min, pixel_rate.range.max);
    Ok(())
}

#[tokio::test]
async fn stop_when_already_stopped_is_a_no_op() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.start_streaming().await.unwrap();
    sensor.stop_streaming().await;
    rig.bus.clear_log();
    rig.log.clear();
    sensor.stop_streaming().await;
    assert!(rig.bus.writes().is_empty());
    assert!(rig.log.events().is_empty());
}

#[tokio::test]
async fn active_format_is_refused_while_streaming() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    let mut session = sensor.open_session().await;
    sensor.start_streaming().await.unwrap();
    assert!(matches!(
        sensor.set_format(&mut session, Which::Active, 2592, 1940).await,
        Err(CamError::Busy)
    ));
    // Trial state stays available mid-stream.
    sensor
        .set_format(&mut session, Which::Try, 2592, 1940)
        .await
        .unwrap();
}

#[tokio::test]
async fn selection_targets() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    let session = sensor.open_session().await;

    let native = sensor
        .selection(&session, Which::Active, SelectionTarget::NativeSize)
        .await;
    assert_eq!((native.width, native.height), (5184, 3880));
    assert_eq!((native.left, native.top), (0, 0));

    let default = sensor
        .selection(&session, Which::Active, SelectionTarget::CropDefault)
        .await;
    assert_eq!((default.left, default.top), (8, 24));
    assert_eq!((default.width, default.height), (5184, 3880));

    let crop = sensor
        .selection(&session, Which::Active, SelectionTarget::Crop)
        .await;
    assert_eq!(crop, default);
}

#[tokio::test]
async fn suspend_stops_an_active_stream() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.start_streaming().await.unwrap();
    rig.bus.clear_log();
    sensor.suspend().await;
    assert!(!sensor.is_streaming().await);
    assert!(!sensor.is_powered().await);
    assert_eq!(rig.bus.writes_to(MODE_SELECT), vec![0]);
}

#[tokio::test]
async fn detach_forces_power_off() {
    let rig = Rig::new();
    let sensor = rig.attached().await;
    sensor.start_streaming().await.unwrap();
    sensor.detach().await;
    assert!(!sensor.is_powered().await);
    assert_eq!(rig.log.events().last(), Some(&PowerEvent::SuppliesDisabled));
}
