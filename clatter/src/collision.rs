//! Per-tick collision events handed to the multiplexer by the host.

#[cfg(test)]
mod tests;

use crate::object::ObjectDescriptor;

/// What kind of contact a collision event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Impact,
    Scrape,
    Roll,
    None,
}

/// A 3-component spatial position, opaque to the synthesis core beyond
/// being passed through to listener callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Setup-time error constructing a [`CollisionEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionError {
    /// `primary.speed < secondary.speed`: the caller must establish
    /// `primary` as the faster object so that `pair_id` uniquely
    /// identifies the physical contact.
    PrimaryNotFaster,
}

impl std::fmt::Display for CollisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionError::PrimaryNotFaster => {
                write!(f, "primary.speed must be >= secondary.speed")
            }
        }
    }
}

impl std::error::Error for CollisionError {}

/// One collision reported by the host for a single simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub pair_id: u64,
    pub primary: ObjectDescriptor,
    pub secondary: ObjectDescriptor,
    pub kind: CollisionKind,
    pub speed: f64,
    pub position: Position,
}

/// Composite key `(primary.id << 32) | secondary.id` identifying an
/// ordered object pair.
#[must_use]
pub fn pair_id(primary_id: u32, secondary_id: u32) -> u64 {
    (u64::from(primary_id) << 32) | u64::from(secondary_id)
}

impl CollisionEvent {
    /// Constructs a collision event, enforcing `primary.speed >=
    /// secondary.speed`.
    ///
    /// # Errors
    ///
    /// Returns [`CollisionError::PrimaryNotFaster`] if the precondition is
    /// violated; two different pair keys could otherwise describe the same
    /// physical contact.
    pub fn new(
        primary: ObjectDescriptor,
        secondary: ObjectDescriptor,
        kind: CollisionKind,
        speed: f64,
        position: Position,
    ) -> Result<Self, CollisionError> {
        if primary.speed < secondary.speed {
            return Err(CollisionError::PrimaryNotFaster);
        }
        Ok(Self {
            pair_id: pair_id(primary.id, secondary.id),
            primary,
            secondary,
            kind,
            speed,
            position,
        })
    }
}
