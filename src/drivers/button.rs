//! Button input and the rising-edge interrupt that feeds the gate.

use core::cell::RefCell;

use critical_section::Mutex;
use defmt::warn;
use embassy_executor::SendSpawner;
use embassy_time::Instant;
use esp_hal::{
    gpio::{Event, Input, InputConfig, Io, Pull},
    handler,
    peripherals::{GPIO3, IO_MUX},
    ram,
};

use crate::{DEBOUNCE_PERIOD, debounce::DebounceGate, tasks::logger::log_press};

/// Interrupt-owned state: the listening input, the gate, and the spawner
/// handle used to hand accepted presses off to the executor.
static BUTTON: Mutex<RefCell<Option<Input<'static>>>> = Mutex::new(RefCell::new(None));
static GATE: Mutex<RefCell<DebounceGate>> =
    Mutex::new(RefCell::new(DebounceGate::new(DEBOUNCE_PERIOD.as_ticks())));
static SPAWNER: Mutex<RefCell<Option<SendSpawner>>> = Mutex::new(RefCell::new(None));

/// Configure the button pin with its internal pull-up and route rising
/// edges into [`press_handler`]. Must run before any press can matter,
/// i.e. during startup.
pub fn install(io_mux: IO_MUX<'static>, pin: GPIO3<'static>, spawner: SendSpawner) {
    let mut io = Io::new(io_mux);
    io.set_interrupt_handler(press_handler);

    let mut button = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
    critical_section::with(|cs| {
        button.listen(Event::RisingEdge);
        BUTTON.borrow_ref_mut(cs).replace(button);
        SPAWNER.borrow_ref_mut(cs).replace(spawner);
    });
}

#[handler]
#[ram]
fn press_handler() {
    critical_section::with(|cs| {
        let mut button = BUTTON.borrow_ref_mut(cs);
        let Some(button) = button.as_mut() else {
            return;
        };
        button.clear_interrupt();

        let now = Instant::now().as_ticks();
        if GATE.borrow_ref_mut(cs).accept(now) {
            let spawner = SPAWNER.borrow_ref(cs);
            let Some(spawner) = spawner.as_ref() else {
                return;
            };
            if spawner.spawn(log_press()).is_err() {
                warn!("BUTTON: logger pool exhausted, press dropped");
            }
        }
    });
}
