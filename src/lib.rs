//! Interrupt-latched edge counters for no-std embedded targets.
//!
//! # Highlights
//! - One latch per counter slot, incremented only by the interrupt bound to its line.
//! - Poll-loop scheduler drains due slots and emits one compact report frame per tick.
//! - No allocation, no dynamic dispatch, no global interrupt lock.
//!
//! # Quick start
//! ```
//! use edge_counter::{ByteSink, CounterFeature, EdgeHandler, EdgeHardware, EdgeKind, InputMode, LatchBank, LineMask};
//!
//! #[derive(Default)]
//! struct Board<'a> {
//!     attached: Option<EdgeHandler<'a>>,
//! }
//!
//! impl LineMask for Board<'_> {
//!     fn mask_line(&self, _line: u8) {}
//!     fn unmask_line(&self, _line: u8) {}
//! }
//!
//! impl<'a> EdgeHardware<'a> for Board<'a> {
//!     fn supports_edge_interrupt(&self, line: u8) -> bool { line == 2 }
//!     fn set_input_mode(&mut self, _line: u8, _mode: InputMode) {}
//!     fn attach(&mut self, _line: u8, _edge: EdgeKind, handler: EdgeHandler<'a>) {
//!         self.attached = Some(handler);
//!     }
//!     fn detach(&mut self, _line: u8) { self.attached = None; }
//! }
//!
//! struct Out(Vec<u8>);
//! impl ByteSink for Out {
//!     fn write(&mut self, byte: u8) { self.0.push(byte); }
//! }
//!
//! static LATCHES: LatchBank<8> = LatchBank::new();
//!
//! let now = core::cell::Cell::new(0u32);
//! let mut counters = CounterFeature::new(&LATCHES, Board::default(), || now.get());
//!
//! // line 2, rising edge, report every 100 ms
//! counters.handle_sysex(0x30, &[2, 0x01, 0x00, 100]).unwrap();
//!
//! // three edges arrive in interrupt context
//! let isr = counters.hardware().attached.unwrap();
//! isr.fire();
//! isr.fire();
//! isr.fire();
//!
//! now.set(150);
//! let mut out = Out(Vec::new());
//! counters.update(&mut out);
//! assert_eq!(out.0, [0xF0, 0x32, 0b1, 0, 0, 0, 3, 0xF7]);
//! ```
//!
//! # No-std
//! The crate is `#![no_std]` by default. Tests require `std`.
//!
//! # Safety and concurrency
//! Each latch has one producer (the `EdgeHandler` bound at configuration time) and one
//! consumer (the report scheduler). Draining is an atomic swap taken while only that slot's
//! line is masked; other lines keep their interrupt latency.
//!
//! On targets without native atomic swap (e.g. `thumbv6m`), enable `portable-atomic` together
//! with `portable-atomic-unsafe-assume-single-core` or `portable-atomic-critical-section`.
//!
//! # Semantics
//! - A slot is due once strictly more than its interval has elapsed; elapsed time uses
//!   wrapping `u32` arithmetic.
//! - Draining advances a slot's window by exactly its interval, never to "now".
//! - Configuring a new slot restarts every window at the current time.
//! - Only a full `reset` releases slots.
//!
//! # Logging
//! Enable `log` or `defmt` to get diagnostics for rejected commands and slot lifecycle.
#![no_std]

// MUST be the first module
mod fmt;

pub mod codec;
pub mod config;
pub mod error;
pub mod feature;
pub mod hal;
pub mod latch;
pub mod scheduler;
pub mod slot;
pub mod trigger;

pub use codec::{ByteSink, ConfigRequest, ReportFrame};
pub use config::ProtocolConfig;
pub use error::{CounterError, Result};
pub use feature::{CounterFeature, MAX_SLOTS};
pub use hal::{Clock, EdgeHardware, LineMask, LineMaskGuard};
pub use latch::{EdgeHandler, EdgeLatch, LatchBank};
pub use slot::{CounterSlot, SlotTable};
pub use trigger::{EdgeKind, InputMode, TriggerMode};

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test_support;
