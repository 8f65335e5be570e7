//! Explicit rounding direction for integer division.

/// Rounding direction for every division on the pricing path.
///
/// There is no implicit rounding anywhere in the engine: each division
/// names the direction, and the trading engine always rounds against the
/// trader (outputs down, reserves the pool keeps up).
///
/// # Examples
///
/// ```
/// use bonding_launchpad::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
