// Taster - GPIO-Interrupt auf beiden Flanken
//
// Kein Embassy Task: der Handler läuft direkt im Interrupt-Kontext und
// schreibt nur den DesiredState im Arbiter (atomar). Den Pin schaltet
// ausschließlich der Relais-Task.

use core::cell::RefCell;

use critical_section::Mutex;
use defmt::info;
use embassy_time::Instant;
use esp_hal::gpio::{Event, Input, InputConfig, InputPin, Io, Pull};
use esp_hal::handler;

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::{ButtonDebouncer, PinLevel, RELAY_ARBITER};

/// Taster-Eingang plus Flankenfilter, geteilt mit dem Interrupt-Handler
struct Button {
    input: Input<'static>,
    debouncer: ButtonDebouncer,
}

static BUTTON: Mutex<RefCell<Option<Button>>> = Mutex::new(RefCell::new(None));

/// Registriert den Taster-Interrupt
///
/// Konfiguriert den Pin als Eingang mit internem Pull-up, hängt
/// `button_interrupt` als GPIO-Handler ein und aktiviert den Interrupt
/// auf beiden Flanken.
///
/// # Parameter
/// - `io`: IO_MUX Treiber (setzt den GPIO-Interrupt-Handler)
/// - `pin`: GPIO Peripheral des Tasters
pub fn setup_button(io: &mut Io<'_>, pin: impl InputPin + 'static) {
    io.set_interrupt_handler(button_interrupt);

    let mut input = Input::new(pin, InputConfig::default().with_pull(Pull::Up));

    critical_section::with(|cs| {
        input.listen(Event::AnyEdge);
        BUTTON.borrow_ref_mut(cs).replace(Button {
            input,
            debouncer: ButtonDebouncer::new(BUTTON_DEBOUNCE_MS),
        });
    });

    info!("Button: Interrupt armed (any edge)");
}

#[handler]
fn button_interrupt() {
    critical_section::with(|cs| {
        let mut button = BUTTON.borrow_ref_mut(cs);
        let Some(button) = button.as_mut() else {
            return;
        };

        if !button.input.is_interrupt_set() {
            return;
        }
        button.input.clear_interrupt();

        let level = PinLevel::from(button.input.is_high());
        // u32-Millisekunden seit Boot, ButtonDebouncer rechnet mit wrapping_sub
        let now_ms = Instant::now().as_millis() as u32;

        if button.debouncer.register_edge(level, now_ms) {
            RELAY_ARBITER.on_button_edge(level);
        }
    });
}
