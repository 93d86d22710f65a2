//! Error type shared by command handling and frame decoding.

use thiserror::Error;

/// Failures reported back to the host transport.
///
/// None of these are fatal: a rejected command leaves every existing slot untouched.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterError {
    /// Every slot is already allocated; only a full reset frees them.
    #[error("counter table full ({capacity} slots)")]
    TableFull { capacity: usize },

    /// The command code does not belong to this feature.
    #[error("unknown counter command 0x{0:02x}")]
    UnknownCommand(u8),

    /// A configuration payload shorter than its fixed layout.
    #[error("malformed config payload: expected {expected} bytes, got {actual}")]
    MalformedConfig { expected: usize, actual: usize },

    /// A report payload whose length does not match its mask.
    #[error("malformed report payload: expected {expected} bytes, got {actual}")]
    MalformedReport { expected: usize, actual: usize },

    /// A report mask naming slots this table cannot hold.
    #[error("report mask 0b{0:08b} exceeds table capacity")]
    MaskOutOfRange(u8),
}

impl CounterError {
    /// True when another feature handler may still claim the command.
    #[inline]
    pub fn is_unclaimed(&self) -> bool {
        matches!(self, CounterError::UnknownCommand(_))
    }
}

pub type Result<T> = core::result::Result<T, CounterError>;
