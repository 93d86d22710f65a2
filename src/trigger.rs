//! Trigger-mode byte decoding.
//!
//! The configuration byte selects one of six combinations of edge kind and input pull:
//!
//! | byte | edge    | input   |
//! |------|---------|---------|
//! | 0x00 | change  | plain   |
//! | 0x01 | rising  | plain   |
//! | 0x02 | falling | plain   |
//! | 0x03 | change  | pull-up |
//! | 0x04 | rising  | pull-up |
//! | 0x05 | falling | pull-up |
//!
//! Any other value is unrecognized and leaves the line unarmed.

/// Which transitions raise the line's interrupt.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeKind {
    /// Either rising or falling edges.
    Change,
    /// Low to high.
    Rising,
    /// High to low.
    Falling,
}

/// Electrical input configuration applied before arming.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    Floating,
    PullUp,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerMode {
    pub edge: EdgeKind,
    pub input: InputMode,
}

impl TriggerMode {
    pub const fn new(edge: EdgeKind, input: InputMode) -> Self {
        Self { edge, input }
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        let input = if byte < 0x03 {
            InputMode::Floating
        } else {
            InputMode::PullUp
        };
        let edge = match byte {
            0x00 | 0x03 => EdgeKind::Change,
            0x01 | 0x04 => EdgeKind::Rising,
            0x02 | 0x05 => EdgeKind::Falling,
            _ => return None,
        };
        Some(Self { edge, input })
    }

    pub const fn to_byte(self) -> u8 {
        let base = match self.edge {
            EdgeKind::Change => 0x00,
            EdgeKind::Rising => 0x01,
            EdgeKind::Falling => 0x02,
        };
        match self.input {
            InputMode::Floating => base,
            InputMode::PullUp => base + 0x03,
        }
    }
}
