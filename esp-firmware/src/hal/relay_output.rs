// Relais-Ausgang: esp-hal GPIO hinter dem RelayDriver-Trait
//
// Einziger Schreibzugriff auf den Relais-Pin. Der Pin wird beim Erzeugen
// auf LOW gesetzt, bevor irgendeine Logik läuft.

use esp_core::RelayDriver;
use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin};

/// Real Hardware Relay Driver
///
/// Nutzt einen GPIO-Ausgang (Push-Pull) um das Relais zu schalten.
pub struct GpioRelay<'d> {
    pin: Output<'d>,
}

impl<'d> GpioRelay<'d> {
    /// Erstellt einen neuen GpioRelay, Relais ist initial aus (LOW)
    ///
    /// # Parameter
    /// - `pin`: GPIO Peripheral für die Relais-Ansteuerung
    pub fn new(pin: impl OutputPin + 'd) -> Self {
        let pin = Output::new(pin, Level::Low, OutputConfig::default());
        Self { pin }
    }
}

impl RelayDriver for GpioRelay<'_> {
    fn drive(&mut self, on: bool) {
        self.pin.set_level(Level::from(on));
    }
}
