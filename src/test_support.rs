use core::cell::RefCell;
use std::vec::Vec;

use crate::codec::ByteSink;
use crate::hal::{EdgeHardware, LineMask};
use crate::latch::EdgeHandler;
use crate::trigger::{EdgeKind, InputMode};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Call {
    SetInput(u8, InputMode),
    Attach { line: u8, edge: EdgeKind, slot: u8 },
    Detach(u8),
    Mask(u8),
    Unmask(u8),
}

/// Records every hardware call and routes simulated edges to attached handlers.
pub struct MockHardware<'a> {
    interrupt_lines: Vec<u8>,
    calls: RefCell<Vec<Call>>,
    attached: Vec<(u8, EdgeHandler<'a>)>,
}

impl<'a> MockHardware<'a> {
    pub fn new(interrupt_lines: &[u8]) -> Self {
        Self {
            interrupt_lines: interrupt_lines.to_vec(),
            calls: RefCell::new(Vec::new()),
            attached: Vec::new(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn is_armed(&self, line: u8) -> bool {
        self.attached.iter().any(|(l, _)| *l == line)
    }

    /// Simulate `count` qualifying edges on `line`.
    pub fn pulse(&self, line: u8, count: u32) {
        for (_, handler) in self.attached.iter().filter(|(l, _)| *l == line) {
            for _ in 0..count {
                handler.fire();
            }
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl LineMask for MockHardware<'_> {
    fn mask_line(&self, line: u8) {
        self.record(Call::Mask(line));
    }

    fn unmask_line(&self, line: u8) {
        self.record(Call::Unmask(line));
    }
}

impl<'a> EdgeHardware<'a> for MockHardware<'a> {
    fn supports_edge_interrupt(&self, line: u8) -> bool {
        self.interrupt_lines.contains(&line)
    }

    fn set_input_mode(&mut self, line: u8, mode: InputMode) {
        self.record(Call::SetInput(line, mode));
    }

    fn attach(&mut self, line: u8, edge: EdgeKind, handler: EdgeHandler<'a>) {
        self.record(Call::Attach {
            line,
            edge,
            slot: handler.slot(),
        });
        self.attached.retain(|(l, _)| *l != line);
        self.attached.push((line, handler));
    }

    fn detach(&mut self, line: u8) {
        self.record(Call::Detach(line));
        self.attached.retain(|(l, _)| *l != line);
    }
}

#[derive(Default)]
pub struct SinkVec(pub Vec<u8>);

impl ByteSink for SinkVec {
    fn write(&mut self, byte: u8) {
        self.0.push(byte);
    }
}
