//! Wire encoding for configuration commands and report frames.
//!
//! # Configuration payload
//! `[line][trigger-mode][interval-hi][interval-lo]`, consumed positionally. The transport
//! delivers exactly the declared argument count; trailing bytes are ignored.
//!
//! # Report frame
//! `[start][response-tag][mask]([u32 BE] per set mask bit, ascending slot order)[end]`
//!
//! Bit `j` of the mask is set iff slot `j` is reported in this frame.

use heapless::Vec;

use crate::config::ProtocolConfig;
use crate::error::{CounterError, Result};
use crate::slot::Capacity;
use crate::trigger::TriggerMode;

/// Output byte stream provided by the host transport.
pub trait ByteSink {
    fn write(&mut self, byte: u8);

    fn write_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write(b);
        }
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn write(&mut self, byte: u8) {
        (**self).write(byte);
    }
}

/// A decoded configuration command.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigRequest {
    pub line: u8,
    /// Raw trigger byte; see [`TriggerMode::from_byte`].
    pub mode: u8,
    pub interval_ms: u16,
}

impl ConfigRequest {
    pub const LEN: usize = 4;

    pub fn decode(argv: &[u8]) -> Result<Self> {
        let &[line, mode, hi, lo, ..] = argv else {
            return Err(CounterError::MalformedConfig {
                expected: Self::LEN,
                actual: argv.len(),
            });
        };
        Ok(Self {
            line,
            mode,
            interval_ms: u16::from_be_bytes([hi, lo]),
        })
    }

    pub fn encode(&self) -> [u8; Self::LEN] {
        let [hi, lo] = self.interval_ms.to_be_bytes();
        [self.line, self.mode, hi, lo]
    }

    #[inline]
    pub fn trigger(&self) -> Option<TriggerMode> {
        TriggerMode::from_byte(self.mode)
    }
}

/// Values drained in one poll tick.
///
/// ```compile_fail
/// let _frame = edge_counter::ReportFrame::<9>::new();
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportFrame<const N: usize> {
    mask: u8,
    values: Vec<u32, N>,
}

impl<const N: usize> ReportFrame<N> {
    pub const fn new() -> Self {
        let () = Capacity::<N>::FITS_MASK;
        Self {
            mask: 0,
            values: Vec::new(),
        }
    }

    /// Append `slot`'s value. Slots must be pushed in ascending order.
    pub fn push(&mut self, slot: usize, value: u32) {
        debug_assert!(slot < N);
        debug_assert!(self.mask >> slot == 0, "slots pushed out of order");
        if self.values.push(value).is_ok() {
            self.mask |= 1 << slot;
        }
    }

    #[inline]
    pub fn mask(&self) -> u8 {
        self.mask
    }

    #[inline]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// `(slot, value)` pairs in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        (0..8)
            .filter(move |bit| self.mask & (1 << bit) != 0)
            .zip(self.values.iter().copied())
    }

    /// Mask byte followed by the big-endian values, without frame markers.
    pub fn encode_payload(&self, sink: &mut impl ByteSink) {
        sink.write(self.mask);
        for value in self.values.iter() {
            sink.write_all(&value.to_be_bytes());
        }
    }

    pub fn write_frame(&self, config: &ProtocolConfig, sink: &mut impl ByteSink) {
        sink.write(config.start_marker);
        sink.write(config.response_tag);
        self.encode_payload(sink);
        sink.write(config.end_marker);
    }

    pub fn decode_payload(bytes: &[u8]) -> Result<Self> {
        let Some((&mask, rest)) = bytes.split_first() else {
            return Err(CounterError::MalformedReport {
                expected: 1,
                actual: 0,
            });
        };
        if mask.checked_shr(N as u32).unwrap_or(0) != 0 {
            return Err(CounterError::MaskOutOfRange(mask));
        }

        let expected = 1 + 4 * mask.count_ones() as usize;
        if bytes.len() != expected {
            return Err(CounterError::MalformedReport {
                expected,
                actual: bytes.len(),
            });
        }

        let mut frame = Self::new();
        for (slot, chunk) in (0..8)
            .filter(|bit| mask & (1 << bit) != 0)
            .zip(rest.chunks_exact(4))
        {
            frame.push(slot, u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        Ok(frame)
    }
}

impl<const N: usize> Default for ReportFrame<N> {
    fn default() -> Self {
        Self::new()
    }
}
