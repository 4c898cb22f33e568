//! Error taxonomy shared by the driver crates.
//!
//! Four families, matching how callers must react:
//!
//! - validation errors ([`CamError::OutOfRange`] and friends) are rejected
//!   before any hardware access and are never retried automatically;
//! - [`TransportError`] surfaces a bus access failure verbatim, the caller
//!   decides whether to retry the whole operation;
//! - [`CamError::Sequence`] marks a multi-step register program that aborted
//!   partway; visible state reflects the last completed step;
//! - [`PowerError`] marks a supply/clock/reset sequencing failure after the
//!   partially-enabled resources have been rolled back.

use thiserror::Error;

use crate::regs::Reg;

/// A register bus access failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("bus read of {reg} failed: {message}")]
    Read { reg: Reg, message: String },

    #[error("bus write of {value:#x} to {reg} failed: {message}")]
    Write {
        reg: Reg,
        value: u32,
        message: String,
    },
}

impl TransportError {
    /// The register the failed access targeted.
    pub fn reg(&self) -> Reg {
        match self {
            Self::Read { reg, .. } | Self::Write { reg, .. } => *reg,
        }
    }
}

/// A supply/clock/reset sequencing step failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("power sequencing failed at {stage}: {message}")]
pub struct PowerError {
    pub stage: &'static str,
    pub message: String,
}

impl PowerError {
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Convenience alias for driver results.
pub type CamResult<T> = std::result::Result<T, CamError>;

/// Primary error type for the camera module drivers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CamError {
    /// Control value outside its current legal range.
    #[error("control '{control}': value {value} outside [{min}, {max}] (step {step})")]
    OutOfRange {
        control: &'static str,
        value: i64,
        min: i64,
        max: i64,
        step: u32,
    },

    /// Write attempted on a read-only control.
    #[error("control '{0}' is read-only")]
    ReadOnlyControl(&'static str),

    /// Requested link frequency is not in the advertised catalog.
    #[error("link frequency {0} Hz is not supported by this sensor")]
    UnsupportedLinkFrequency(u64),

    /// Bus topology negotiated a lane count the sensor cannot drive.
    #[error("unsupported number of data lanes: {0}")]
    UnsupportedLaneCount(u32),

    /// No catalog exists for the supplied input clock.
    #[error("input clock frequency {0} Hz is not supported")]
    UnsupportedClockFrequency(u32),

    /// The operation conflicts with an active stream.
    #[error("device is busy streaming")]
    Busy,

    /// A single bus access failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An ordered register program aborted partway through.
    #[error("register program '{stage}' aborted: {source}")]
    Sequence {
        stage: &'static str,
        source: TransportError,
    },

    /// Power-up/down sequencing failed (resources already rolled back).
    #[error(transparent)]
    Power(#[from] PowerError),

    /// Wrong or unreadable device identity. Fatal at attach time only.
    #[error("chip id mismatch: expected {expected:#06x}, read {found:#x}")]
    IdentityMismatch { expected: u32, found: u32 },

    /// Semantically invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
