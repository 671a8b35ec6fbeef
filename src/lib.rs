#![no_std]

pub mod debounce;
pub mod drivers;
pub mod tasks;

pub use tasks::*;

use embassy_time::Duration;

/// Quiet window pushed after every button edge, accepted or not
pub const DEBOUNCE_PERIOD: Duration = Duration::from_millis(2_000);

/// 8.3 name of the marker file in the card's root directory
pub const MARKER_FILE: &str = "MARKER.TXT";

/// Fixed payload written on every accepted press
pub const MARKER_PAYLOAD: &[u8] = b"Hello World!!!";

/// How many marker writes may be in flight at once
pub const MAX_INFLIGHT_WRITES: usize = 2;
