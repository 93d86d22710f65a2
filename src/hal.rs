//! Collaborator interfaces supplied by the host firmware.
//!
//! The counter core never touches registers directly. A board support layer implements
//! these traits on top of its GPIO and timer drivers.

use crate::latch::EdgeHandler;
use crate::trigger::{EdgeKind, InputMode};

/// Free-running millisecond clock. Wraps at `2^32`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    #[inline]
    fn now_ms(&self) -> u32 {
        self()
    }
}

/// Per-line interrupt suppression.
///
/// Masking one line must not delay interrupts of any other line.
pub trait LineMask {
    fn mask_line(&self, line: u8);
    fn unmask_line(&self, line: u8);
}

/// GPIO edge-interrupt control for counter lines.
pub trait EdgeHardware<'a>: LineMask {
    /// Whether `line` can raise an edge interrupt at all.
    fn supports_edge_interrupt(&self, line: u8) -> bool;

    fn set_input_mode(&mut self, line: u8, mode: InputMode);

    /// Arm `line` so every `edge` calls `handler.fire()`.
    fn attach(&mut self, line: u8, edge: EdgeKind, handler: EdgeHandler<'a>);

    fn detach(&mut self, line: u8);
}

/// Keeps one line masked until dropped.
pub struct LineMaskGuard<'h, H: LineMask + ?Sized> {
    hardware: &'h H,
    line: u8,
}

impl<'h, H: LineMask + ?Sized> LineMaskGuard<'h, H> {
    #[inline]
    pub fn new(hardware: &'h H, line: u8) -> Self {
        hardware.mask_line(line);
        Self { hardware, line }
    }
}

impl<H: LineMask + ?Sized> Drop for LineMaskGuard<'_, H> {
    #[inline]
    fn drop(&mut self) {
        self.hardware.unmask_line(self.line);
    }
}
