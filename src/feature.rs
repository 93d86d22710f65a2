//! Host-facing counter feature: command handling, per-tick reporting and reset.

use crate::codec::{ByteSink, ConfigRequest, ReportFrame};
use crate::config::ProtocolConfig;
use crate::error::{CounterError, Result};
use crate::hal::{Clock, EdgeHardware};
use crate::latch::LatchBank;
use crate::scheduler;
use crate::slot::SlotTable;
use crate::trigger::InputMode;

/// Default slot capacity; one bit per slot in the report mask.
pub const MAX_SLOTS: usize = 8;

/// Edge counters bound to hardware lines, reported in fixed windows.
///
/// The latch bank is borrowed so it can live in a `static` shared with interrupt vectors.
/// Everything else is owned here and touched only from the poll loop.
pub struct CounterFeature<'a, H, C, const N: usize = MAX_SLOTS> {
    latches: &'a LatchBank<N>,
    slots: SlotTable<N>,
    hardware: H,
    clock: C,
    config: ProtocolConfig,
}

impl<'a, H, C, const N: usize> CounterFeature<'a, H, C, N>
where
    H: EdgeHardware<'a>,
    C: Clock,
{
    pub fn new(latches: &'a LatchBank<N>, hardware: H, clock: C) -> Self {
        Self {
            latches,
            slots: SlotTable::new(),
            hardware,
            clock,
            config: ProtocolConfig::default(),
        }
    }

    pub fn with_config(self, config: ProtocolConfig) -> Self {
        Self { config, ..self }
    }

    #[inline]
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    #[inline]
    pub fn slots(&self) -> &SlotTable<N> {
        &self.slots
    }

    #[inline]
    pub fn active(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    #[inline]
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Put `line` into counting mode.
    ///
    /// Only leaves the line as a plain input; the trigger is armed by the config command.
    pub fn handle_pin_mode(&mut self, line: u8, mode: u8) -> bool {
        if mode != self.config.pin_mode || !self.hardware.supports_edge_interrupt(line) {
            return false;
        }
        self.hardware.set_input_mode(line, InputMode::Floating);
        true
    }

    /// Advertise `[pin_mode][capacity]` for lines that can count.
    pub fn handle_capability(&self, line: u8, sink: &mut impl ByteSink) {
        if self.hardware.supports_edge_interrupt(line) {
            sink.write(self.config.pin_mode);
            sink.write(N as u8);
        }
    }

    /// Dispatch one extended command addressed to this feature.
    ///
    /// `Err(UnknownCommand)` means the command was not ours; see
    /// [`CounterError::is_unclaimed`].
    pub fn handle_sysex(&mut self, command: u8, argv: &[u8]) -> Result<()> {
        if command == self.config.config_command {
            self.configure(argv).map(|_| ())
        } else if command == self.config.query_command {
            trace!("counter query ignored ({} bytes)", argv.len());
            Ok(())
        } else {
            warn!("counter: unknown command 0x{:x}", command);
            Err(CounterError::UnknownCommand(command))
        }
    }

    /// Allocate the next slot from a config payload. Returns the slot index.
    pub fn configure(&mut self, argv: &[u8]) -> Result<usize> {
        if self.slots.is_full() {
            warn!("counter table full ({} slots)", N);
            return Err(CounterError::TableFull { capacity: N });
        }
        let request = ConfigRequest::decode(argv).inspect_err(|_| {
            warn!("counter config payload too short ({} bytes)", argv.len());
        })?;

        let now = self.clock.now_ms();
        let trigger = request.trigger();
        let index = self
            .slots
            .allocate(request.line, trigger, request.interval_ms, now)?;

        if let Some(latch) = self.latches.get(index) {
            latch.clear();
        }

        match (trigger, self.latches.handler(index)) {
            (Some(trigger), Some(handler)) => {
                self.hardware.set_input_mode(request.line, trigger.input);
                self.hardware.attach(request.line, trigger.edge, handler);
            }
            _ => {
                warn!(
                    "counter slot {} on line {}: unrecognized trigger mode 0x{:x}, left unarmed",
                    index,
                    request.line,
                    request.mode
                );
            }
        }

        self.slots.resync(now);
        debug!(
            "counter slot {} bound to line {}, interval {} ms",
            index,
            request.line,
            request.interval_ms
        );
        Ok(index)
    }

    /// Poll-loop entry point: report every due slot at the current clock reading.
    pub fn update(&mut self, sink: &mut impl ByteSink) -> Option<ReportFrame<N>> {
        let now = self.clock.now_ms();
        self.report(now, sink)
    }

    /// Drain due slots at `now_ms` and write one report frame if any were due.
    pub fn report(&mut self, now_ms: u32, sink: &mut impl ByteSink) -> Option<ReportFrame<N>> {
        if self.slots.is_empty() {
            return None;
        }
        let frame = scheduler::drain_due(&mut self.slots, self.latches, &self.hardware, now_ms)?;
        frame.write_frame(&self.config, sink);
        trace!("counter report mask 0b{:b}", frame.mask());
        Some(frame)
    }

    /// Detach every armed line and forget all slots.
    pub fn reset(&mut self) {
        for slot in self.slots.iter() {
            if slot.trigger.is_some() {
                self.hardware.detach(slot.line);
            }
        }
        debug!("counter reset, {} slots released", self.slots.len());
        self.slots.clear();
    }
}
