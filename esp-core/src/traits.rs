//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::types::RelayStatus;

/// Trait für den Relais-Ausgang
///
/// Einziger Schreibzugriff auf den Relais-Pin. Nur `RelayArbiter::reconcile()`
/// ruft `drive()` auf.
///
/// # Implementierungen
/// - **Production:** GpioRelay (esp-hal Output)
/// - **Testing:** MockRelayDriver (in-memory Mock)
pub trait RelayDriver: Send {
    /// Setzt den Relais-Pin: `true` = HIGH (an), `false` = LOW (aus)
    fn drive(&mut self, on: bool);
}

/// Trait für Status-Benachrichtigungen
///
/// Wird einmal pro Zustandswechsel des Relais aufgerufen.
/// Zustellung ist best-effort: ohne Broker-Verbindung darf die Meldung
/// verworfen werden, `notify()` darf aber nie blockieren.
pub trait StatusNotifier {
    fn notify(&mut self, status: RelayStatus);
}
