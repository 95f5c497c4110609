//! Marker types.

/// Marker type describing an entity activation.
#[derive(Clone, Copy, Debug)]
pub struct Activation;

/// Marker type describing an event placement in time.
#[derive(Clone, Copy, Debug)]
pub struct Placement;
