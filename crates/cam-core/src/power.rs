//! Supply, clock and reset-line primitives.
//!
//! These mirror the collaborators the drivers consume: a named group of
//! supplies with bulk all-or-nothing semantics, a sensor input clock, and an
//! active-low reset line. The drivers sequence them; they never enumerate or
//! own the underlying resources.

use async_trait::async_trait;

use crate::error::PowerError;

/// A named group of power supplies enabled and disabled as a unit.
#[async_trait]
pub trait SupplyGroup: Send + Sync {
    /// Enable every rail in the group. All-or-nothing: on failure no rail is
    /// left enabled.
    async fn enable(&self) -> Result<(), PowerError>;

    /// Disable every rail in the group.
    async fn disable(&self) -> Result<(), PowerError>;
}

/// The sensor's input clock.
#[async_trait]
pub trait SensorClock: Send + Sync {
    async fn set_rate(&self, hz: u32) -> Result<(), PowerError>;

    async fn enable(&self) -> Result<(), PowerError>;

    async fn disable(&self) -> Result<(), PowerError>;
}

/// The sensor's reset line. Asserted holds the device in reset.
#[async_trait]
pub trait ResetLine: Send + Sync {
    async fn assert(&self);

    async fn deassert(&self);
}
