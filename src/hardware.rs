//! Peripheral address map and reference board constants
//!
//! The lowering core treats device registers like any other memory: it
//! only needs a base address for each peripheral. The map is injected at
//! construction and never consulted for anything but address lookup, so
//! retargeting another board layout is a data change, not a code change.
//! Driver-level behavior (pin modes, baud rates, timer programming) stays
//! in the source program; the constants below are plain values for it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reference board peripheral base addresses (compile-time constants)
pub mod board_layout {
    /// GPIO controller block
    pub const GPIO_BASE: u32 = 0x10000000;
    /// UART block
    pub const UART_BASE: u32 = 0x10001000;
    /// Timer block
    pub const TIMER_BASE: u32 = 0x10002000;
}

/// GPIO configuration values
pub mod gpio {
    /// Pin direction: input
    pub const INPUT: u32 = 0;
    /// Pin direction: output
    pub const OUTPUT: u32 = 1;
    /// Pull resistor: pull-up
    pub const PULLUP: u32 = 0;
    /// Pull resistor: pull-down
    pub const PULLDOWN: u32 = 1;
    /// Pull resistor: none
    pub const NONE: u32 = 2;
    /// Output level high
    pub const HIGH: u32 = 1;
    /// Output level low
    pub const LOW: u32 = 0;
}

/// UART status bits and baud rates
pub mod uart {
    /// Transmitter ready for the next byte
    pub const STATUS_TX_READY: u32 = 1;
    /// Receiver holds an unread byte
    pub const STATUS_RX_READY: u32 = 2;
    /// 9600 baud
    pub const BAUD_9600: u32 = 9600;
    /// 115200 baud
    pub const BAUD_115200: u32 = 115200;
}

/// Timer operating modes
pub mod timer {
    /// Fire once, then stop
    pub const ONESHOT: u32 = 0;
    /// Fire and reload
    pub const PERIODIC: u32 = 1;
    /// Free-running counter
    pub const CONTINUOUS: u32 = 2;
}

/// Peripheral name to physical base address map
///
/// Read-only during lowering. Symbols with device storage name a
/// peripheral here; an unmapped name is a lowering error, never a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeripheralMap {
    peripherals: HashMap<String, u32>,
}

impl PeripheralMap {
    /// Create an empty map
    pub fn new() -> Self {
        PeripheralMap {
            peripherals: HashMap::new(),
        }
    }

    /// Map with the reference board's stock peripherals
    pub fn default_layout() -> Self {
        let mut map = Self::new();
        map.insert("gpio", board_layout::GPIO_BASE);
        map.insert("uart", board_layout::UART_BASE);
        map.insert("timer", board_layout::TIMER_BASE);
        map
    }

    /// Add or replace a peripheral's base address
    pub fn insert(&mut self, name: impl Into<String>, base: u32) {
        self.peripherals.insert(name.into(), base);
    }

    /// Physical base address of the named peripheral
    pub fn base_address(&self, name: &str) -> Option<u32> {
        self.peripherals.get(name).copied()
    }

    /// Number of mapped peripherals
    pub fn len(&self) -> usize {
        self.peripherals.len()
    }

    /// True when no peripheral is mapped
    pub fn is_empty(&self) -> bool {
        self.peripherals.is_empty()
    }

    /// Parse a map from a JSON object of name to base address
    ///
    /// ```
    /// use emberc::PeripheralMap;
    ///
    /// let map = PeripheralMap::from_json_str(r#"{"gpio": 268435456}"#).unwrap();
    /// assert_eq!(map.base_address("gpio"), Some(0x10000000));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: PeripheralMap =
            serde_json::from_str(json).map_err(|e| Error::InvalidPeripheralMap(e.to_string()))?;
        tracing::debug!("Loaded peripheral map with {} entries", map.len());
        Ok(map)
    }
}

impl Default for PeripheralMap {
    fn default() -> Self {
        Self::new()
    }
}
