//! Entprellung des Tasters
//!
//! Der Taster-Interrupt feuert auf beiden Flanken. `ButtonDebouncer`
//! lässt pro physischem Tastendruck genau eine Flanke durch:
//! Pegel = gedrückt, seit dem letzten akzeptierten Druck wurde ein
//! Loslassen gesehen, und seit der letzten Flanke (egal welcher Pegel)
//! ist die Sperrzeit abgelaufen. Prellen beim Drücken und beim Loslassen
//! fällt damit gleichermaßen weg.

use crate::types::PinLevel;

/// Pegel, der "gedrückt" bedeutet (Verdrahtung: HIGH = gedrückt)
pub const BUTTON_PRESSED_LEVEL: PinLevel = PinLevel::High;

/// Flankenfilter für den Taster-Interrupt
///
/// Läuft im Interrupt-Kontext, daher nur `Copy`-Felder und keine Allokation.
/// Zeitstempel in Millisekunden seit Boot, auf `u32` gekürzt
/// (Differenzen mit `wrapping_sub`).
#[derive(Debug, Clone, Copy)]
pub struct ButtonDebouncer {
    debounce_ms: u32,
    last_edge_ms: Option<u32>,
    released: bool,
}

impl ButtonDebouncer {
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            last_edge_ms: None,
            released: true,
        }
    }

    /// Registriert eine Flanke und liefert `true` für einen neuen Tastendruck
    ///
    /// Jede Flanke startet die Sperrzeit neu, auch verworfene.
    pub fn register_edge(&mut self, level: PinLevel, now_ms: u32) -> bool {
        let settled = match self.last_edge_ms {
            Some(last) => now_ms.wrapping_sub(last) >= self.debounce_ms,
            None => true,
        };
        self.last_edge_ms = Some(now_ms);

        if level != BUTTON_PRESSED_LEVEL {
            self.released = true;
            return false;
        }

        if !self.released || !settled {
            return false;
        }

        self.released = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE_MS: u32 = 50;

    #[test]
    fn test_first_press_accepted() {
        let mut debouncer = ButtonDebouncer::new(DEBOUNCE_MS);
        assert!(debouncer.register_edge(PinLevel::High, 1000));
    }

    #[test]
    fn test_release_edge_ignored() {
        let mut debouncer = ButtonDebouncer::new(DEBOUNCE_MS);
        assert!(!debouncer.register_edge(PinLevel::Low, 1000));
    }

    #[test]
    fn test_double_high_without_release_ignored() {
        let mut debouncer = ButtonDebouncer::new(DEBOUNCE_MS);
        assert!(debouncer.register_edge(PinLevel::High, 1000));
        // Beide Flanken lesen HIGH (Timing), zweite darf nicht toggeln
        assert!(!debouncer.register_edge(PinLevel::High, 1500));
    }

    #[test]
    fn test_bounce_within_window_ignored() {
        let mut debouncer = ButtonDebouncer::new(DEBOUNCE_MS);
        assert!(debouncer.register_edge(PinLevel::High, 1000));
        assert!(!debouncer.register_edge(PinLevel::Low, 1005));
        assert!(!debouncer.register_edge(PinLevel::High, 1010));
        assert!(!debouncer.register_edge(PinLevel::Low, 1020));
    }

    #[test]
    fn test_bounce_on_release_ignored() {
        let mut debouncer = ButtonDebouncer::new(DEBOUNCE_MS);
        // Gedrückt gehalten, dann prellt das Loslassen
        assert!(debouncer.register_edge(PinLevel::High, 1000));
        assert!(!debouncer.register_edge(PinLevel::Low, 1200));
        assert!(!debouncer.register_edge(PinLevel::High, 1202));
        assert!(!debouncer.register_edge(PinLevel::Low, 1204));
        assert!(!debouncer.register_edge(PinLevel::High, 1230));
        assert!(!debouncer.register_edge(PinLevel::Low, 1240));
        // Nächster echter Druck
        assert!(debouncer.register_edge(PinLevel::High, 1600));
    }

    #[test]
    fn test_short_tap_then_next_press_accepted() {
        let mut debouncer = ButtonDebouncer::new(DEBOUNCE_MS);
        assert!(debouncer.register_edge(PinLevel::High, 1000));
        // Loslassen innerhalb der Sperrzeit zählt trotzdem als Loslassen
        assert!(!debouncer.register_edge(PinLevel::Low, 1020));
        assert!(debouncer.register_edge(PinLevel::High, 1300));
    }

    #[test]
    fn test_second_press_after_window_accepted() {
        let mut debouncer = ButtonDebouncer::new(DEBOUNCE_MS);
        assert!(debouncer.register_edge(PinLevel::High, 1000));
        assert!(!debouncer.register_edge(PinLevel::Low, 1200));
        assert!(debouncer.register_edge(PinLevel::High, 1400));
    }

    #[test]
    fn test_timer_wraparound() {
        let mut debouncer = ButtonDebouncer::new(DEBOUNCE_MS);
        assert!(debouncer.register_edge(PinLevel::High, u32::MAX - 10));
        assert!(!debouncer.register_edge(PinLevel::Low, u32::MAX - 5));
        // 15 ms nach der letzten Flanke, über den Überlauf hinweg: gesperrt
        assert!(!debouncer.register_edge(PinLevel::High, 9));
        assert!(!debouncer.register_edge(PinLevel::Low, 20));
        assert!(debouncer.register_edge(PinLevel::High, 80));
    }
}
