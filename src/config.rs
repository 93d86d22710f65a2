//! Protocol constants used by the command handler and report encoder.

/// Wire-level codes for one counter feature instance.
///
/// The defaults match a Firmata-style host: `0xF0`/`0xF7` frame markers with counter
/// commands in the extended-command range.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolConfig {
    pub start_marker: u8,
    pub end_marker: u8,
    pub config_command: u8,
    pub query_command: u8,
    pub response_tag: u8,
    /// Pin-mode code advertised in capability responses.
    pub pin_mode: u8,
}

impl ProtocolConfig {
    pub const START_SYSEX: u8 = 0xF0;
    pub const END_SYSEX: u8 = 0xF7;
    pub const COUNTER_CONFIG: u8 = 0x30;
    pub const COUNTER_QUERY: u8 = 0x31;
    pub const COUNTER_RESPONSE: u8 = 0x32;
    pub const PIN_MODE_COUNTER: u8 = 0x10;

    pub const fn new() -> Self {
        Self {
            start_marker: Self::START_SYSEX,
            end_marker: Self::END_SYSEX,
            config_command: Self::COUNTER_CONFIG,
            query_command: Self::COUNTER_QUERY,
            response_tag: Self::COUNTER_RESPONSE,
            pin_mode: Self::PIN_MODE_COUNTER,
        }
    }

    pub const fn with_markers(self, start: u8, end: u8) -> Self {
        Self {
            start_marker: start,
            end_marker: end,
            ..self
        }
    }

    pub const fn with_commands(self, config: u8, query: u8) -> Self {
        Self {
            config_command: config,
            query_command: query,
            ..self
        }
    }

    pub const fn with_response_tag(self, tag: u8) -> Self {
        Self {
            response_tag: tag,
            ..self
        }
    }

    pub const fn with_pin_mode(self, mode: u8) -> Self {
        Self {
            pin_mode: mode,
            ..self
        }
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::new()
    }
}
