//! Core Types für Relais-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Relais-Kommando aus MQTT-Payload oder Taster
///
/// Wird vom MQTT-Task (Command-Topics) und vom Taster-Interrupt erzeugt
/// und auf den gewünschten Zustand (DesiredState) angewendet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCommand {
    /// Relais einschalten
    On,
    /// Relais ausschalten
    Off,
    /// Gewünschten Zustand invertieren
    Toggle,
}

/// Gemeldeter Relais-Zustand für das Status-Topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStatus {
    On,
    Off,
}

impl RelayStatus {
    /// Payload für das Status-Topic: `"ON"` oder `"OFF"`
    pub fn as_str(self) -> &'static str {
        match self {
            RelayStatus::On => "ON",
            RelayStatus::Off => "OFF",
        }
    }

    pub fn is_on(self) -> bool {
        matches!(self, RelayStatus::On)
    }
}

impl From<bool> for RelayStatus {
    fn from(on: bool) -> Self {
        if on { RelayStatus::On } else { RelayStatus::Off }
    }
}

/// Elektrischer Pegel eines digitalen Eingangs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high { PinLevel::High } else { PinLevel::Low }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for RelayCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RelayCommand::On => defmt::write!(fmt, "On"),
            RelayCommand::Off => defmt::write!(fmt, "Off"),
            RelayCommand::Toggle => defmt::write!(fmt, "Toggle"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RelayStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PinLevel::Low => defmt::write!(fmt, "Low"),
            PinLevel::High => defmt::write!(fmt, "High"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_status_payload() {
        assert_eq!(RelayStatus::On.as_str(), "ON");
        assert_eq!(RelayStatus::Off.as_str(), "OFF");
    }

    #[test]
    fn test_relay_status_from_bool() {
        assert_eq!(RelayStatus::from(true), RelayStatus::On);
        assert_eq!(RelayStatus::from(false), RelayStatus::Off);
        assert!(RelayStatus::On.is_on());
        assert!(!RelayStatus::Off.is_on());
    }

    #[test]
    fn test_pin_level_from_bool() {
        assert_eq!(PinLevel::from(true), PinLevel::High);
        assert_eq!(PinLevel::from(false), PinLevel::Low);
    }
}
