//! Mock hardware for the camera driver crates.
//!
//! [`MockBus`] is an in-memory register file with an ordered write log and
//! scriptable failures; [`MockSupplies`], [`MockClock`] and [`MockReset`]
//! record power-sequencing events into a shared [`PowerLog`] so tests can
//! assert ordering across the three primitives. All failure injection is
//! deterministic: tests script exactly which access fails.

mod bus;
mod power;

pub use bus::{BusFailure, MockBus};
pub use power::{MockClock, MockReset, MockSupplies, PowerEvent, PowerLog};
