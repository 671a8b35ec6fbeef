//! Deferred marker write, one task instance per accepted press.

use defmt::{error, info, warn};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};

use crate::{MARKER_FILE, MARKER_PAYLOAD, MAX_INFLIGHT_WRITES, drivers::sdcard::SdStorage};

/// The mounted card, installed once by startup before the button
/// interrupt is enabled. The mutex serializes task instances that manage
/// to overlap; each one opens its own handles.
pub static STORAGE: Mutex<CriticalSectionRawMutex, Option<SdStorage>> = Mutex::new(None);

/// One write-and-exit cycle: lock the card, rewrite the marker file,
/// report, return. Returning releases the pool slot for the next press.
///
/// A failed write is this invocation's problem only. The next accepted
/// press gets a fresh task and fresh file handles.
#[embassy_executor::task(pool_size = MAX_INFLIGHT_WRITES)]
pub async fn log_press() {
    let mut storage = STORAGE.lock().await;
    let Some(storage) = storage.as_mut() else {
        warn!("LOGGER: storage not mounted, press dropped");
        return;
    };
    match storage.write_marker(MARKER_FILE, MARKER_PAYLOAD) {
        Ok(()) => info!("LOGGER: wrote marker to {}", MARKER_FILE),
        Err(e) => error!("LOGGER: marker write failed: {}", e),
    }
}
