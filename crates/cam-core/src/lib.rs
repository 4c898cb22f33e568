//! Core types and traits for the camera module driver crates.
//!
//! This crate is the leaf of the workspace: it defines register addressing
//! ([`regs`]), the register-bus transport boundary ([`transport`]), the
//! power/clock/reset primitives ([`power`]), control range arithmetic
//! ([`control`]) and the shared error taxonomy ([`error`]).
//!
//! Driver crates (`cam-driver-imx376`, `cam-driver-lc898217`) depend only on
//! these seams; `cam-mock` provides in-memory implementations for tests.

pub mod control;
pub mod error;
pub mod power;
pub mod regs;
pub mod transport;

pub use control::ControlRange;
pub use error::{CamError, CamResult, PowerError, TransportError};
pub use regs::{Reg, RegWidth, RegWrite};
pub use transport::RegisterBus;
