//! Pure Business Logic: Relais-Arbiter
//!
//! Hält den gewünschten (DesiredState) und den tatsächlichen Zustand
//! (ActualState) des Relais und gleicht beide in `reconcile()` ab.
//!
//! Beide Zustände sind `AtomicBool`s: der Arbiter liegt in einem `static`
//! und wird gleichzeitig vom Taster-Interrupt, vom MQTT-Task und vom
//! Relais-Task benutzt. Kein Mutex nötig, jede Operation ist ein einzelnes
//! Load, Store oder atomares Read-Modify-Write.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::button::BUTTON_PRESSED_LEVEL;
use crate::traits::{RelayDriver, StatusNotifier};
use crate::types::{PinLevel, RelayCommand, RelayStatus};

/// Relais-Arbiter: einziger Besitzer von DesiredState und ActualState
///
/// Zwei Quellen (MQTT und Taster) schreiben denselben DesiredState ohne
/// Priorität: der letzte Schreibzugriff gewinnt.
///
/// # Beispiele
///
/// ```
/// # use esp_core::{RelayArbiter, RelayCommand};
/// static ARBITER: RelayArbiter = RelayArbiter::new();
///
/// ARBITER.apply_command(RelayCommand::Toggle);
/// assert!(ARBITER.desired());
/// assert!(!ARBITER.actual()); // Pin erst nach reconcile()
/// ```
#[derive(Debug)]
pub struct RelayArbiter {
    desired: AtomicBool,
    actual: AtomicBool,
}

impl RelayArbiter {
    /// Startzustand: aus/aus (Relais-Pin ist beim Boot LOW)
    pub const fn new() -> Self {
        Self {
            desired: AtomicBool::new(false),
            actual: AtomicBool::new(false),
        }
    }

    /// Setzt den gewünschten Zustand, der Pin wird hier nicht berührt
    ///
    /// Aufrufbar aus Task- und Interrupt-Kontext.
    pub fn apply_command(&self, command: RelayCommand) {
        match command {
            RelayCommand::On => self.desired.store(true, Ordering::Release),
            RelayCommand::Off => self.desired.store(false, Ordering::Release),
            RelayCommand::Toggle => {
                self.desired.fetch_xor(true, Ordering::AcqRel);
            }
        }
    }

    /// Gleicht ActualState an DesiredState an
    ///
    /// Bei Abweichung: Pin schreiben, ActualState übernehmen, genau eine
    /// Status-Meldung senden. Sonst no-op. DesiredState wird einmal gelesen;
    /// ein Tastendruck während des Aufrufs wird im nächsten Durchlauf
    /// übernommen.
    ///
    /// Darf nur aus einem einzigen Task aufgerufen werden.
    pub fn reconcile<D, N>(&self, relay: &mut D, notifier: &mut N) -> Option<RelayStatus>
    where
        D: RelayDriver,
        N: StatusNotifier,
    {
        let desired = self.desired.load(Ordering::Acquire);
        if desired == self.actual.load(Ordering::Acquire) {
            return None;
        }

        relay.drive(desired);
        self.actual.store(desired, Ordering::Release);

        let status = RelayStatus::from(desired);
        notifier.notify(status);
        Some(status)
    }

    /// Taster-Flanke aus dem Interrupt: toggelt nur bei gedrücktem Pegel
    pub fn on_button_edge(&self, level: PinLevel) {
        if level == BUTTON_PRESSED_LEVEL {
            self.apply_command(RelayCommand::Toggle);
        }
    }

    /// Zuletzt angeforderter Zustand
    pub fn desired(&self) -> bool {
        self.desired.load(Ordering::Acquire)
    }

    /// Zustand des Relais-Pins
    pub fn actual(&self) -> bool {
        self.actual.load(Ordering::Acquire)
    }
}

impl Default for RelayArbiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PinRecorder {
        level: bool,
        writes: usize,
    }

    impl RelayDriver for PinRecorder {
        fn drive(&mut self, on: bool) {
            self.level = on;
            self.writes += 1;
        }
    }

    struct LastStatus(Option<RelayStatus>, usize);

    impl StatusNotifier for LastStatus {
        fn notify(&mut self, status: RelayStatus) {
            self.0 = Some(status);
            self.1 += 1;
        }
    }

    #[test]
    fn test_initial_state_off() {
        let arbiter = RelayArbiter::new();
        assert!(!arbiter.desired());
        assert!(!arbiter.actual());
    }

    #[test]
    fn test_apply_command_sets_desired_only() {
        let arbiter = RelayArbiter::new();
        arbiter.apply_command(RelayCommand::On);
        assert!(arbiter.desired());
        assert!(!arbiter.actual());

        arbiter.apply_command(RelayCommand::Off);
        assert!(!arbiter.desired());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let arbiter = RelayArbiter::new();
        arbiter.apply_command(RelayCommand::Toggle);
        arbiter.apply_command(RelayCommand::Toggle);
        assert!(!arbiter.desired());
    }

    #[test]
    fn test_reconcile_drives_pin_and_notifies_once() {
        let arbiter = RelayArbiter::new();
        let mut pin = PinRecorder {
            level: false,
            writes: 0,
        };
        let mut status = LastStatus(None, 0);

        arbiter.apply_command(RelayCommand::On);
        assert_eq!(
            arbiter.reconcile(&mut pin, &mut status),
            Some(RelayStatus::On)
        );
        assert_eq!(arbiter.reconcile(&mut pin, &mut status), None);

        assert!(pin.level);
        assert_eq!(pin.writes, 1);
        assert_eq!(status.0, Some(RelayStatus::On));
        assert_eq!(status.1, 1);
        assert!(arbiter.actual());
    }

    #[test]
    fn test_button_edge_only_on_pressed_level() {
        let arbiter = RelayArbiter::new();
        arbiter.on_button_edge(PinLevel::Low);
        assert!(!arbiter.desired());

        arbiter.on_button_edge(PinLevel::High);
        assert!(arbiter.desired());
    }
}
