//! Kommando-Parser und Topic-Routing
//!
//! Klassifiziert eingehende MQTT-Payloads als `RelayCommand`.
//! Die Priorität der Regeln steht explizit in `COMMAND_RULES`:
//! die erste passende Regel gewinnt.

use crate::types::RelayCommand;

/// Prädikat über die rohe Payload
pub type Predicate = fn(&[u8]) -> bool;

/// Geordnete Regel-Tabelle (Prädikat, Ergebnis)
///
/// Reihenfolge = Priorität: ON vor OFF vor TOGGLE.
pub const COMMAND_RULES: [(Predicate, RelayCommand); 5] = [
    (starts_with_one, RelayCommand::On),
    (is_on, RelayCommand::On),
    (starts_with_zero, RelayCommand::Off),
    (is_off, RelayCommand::Off),
    (is_toggle, RelayCommand::Toggle),
];

fn starts_with_one(payload: &[u8]) -> bool {
    payload.first() == Some(&b'1')
}

fn starts_with_zero(payload: &[u8]) -> bool {
    payload.first() == Some(&b'0')
}

fn is_on(payload: &[u8]) -> bool {
    payload.eq_ignore_ascii_case(b"ON")
}

fn is_off(payload: &[u8]) -> bool {
    payload.eq_ignore_ascii_case(b"OFF")
}

fn is_toggle(payload: &[u8]) -> bool {
    payload.eq_ignore_ascii_case(b"toggle")
}

/// Klassifiziert eine Payload als ON, OFF, TOGGLE oder `None`
///
/// Die Länge steckt im Slice. Unbekannte oder leere Payloads ergeben
/// `None` und werden vom Aufrufer stillschweigend ignoriert.
///
/// # Beispiele
///
/// ```
/// # use esp_core::{RelayCommand, parse_command};
/// assert_eq!(parse_command(b"on"), Some(RelayCommand::On));
/// assert_eq!(parse_command(b"0"), Some(RelayCommand::Off));
/// assert_eq!(parse_command(b"TOGGLE"), Some(RelayCommand::Toggle));
/// assert_eq!(parse_command(b"dim"), None);
/// ```
pub fn parse_command(payload: &[u8]) -> Option<RelayCommand> {
    COMMAND_RULES
        .iter()
        .find(|(matches, _)| matches(payload))
        .map(|(_, command)| *command)
}

/// Filtert Nachrichten nach den beiden Command-Topics
///
/// - `command_topic`: gerätespezifisch, z.B. `house/office/lampe/set`
/// - `group_topic`: gemeinsam für alle Geräte, z.B. `house/group/power`
#[derive(Debug, Clone, Copy)]
pub struct CommandRouter {
    command_topic: &'static str,
    group_topic: &'static str,
}

impl CommandRouter {
    pub const fn new(command_topic: &'static str, group_topic: &'static str) -> Self {
        Self {
            command_topic,
            group_topic,
        }
    }

    /// Topics, die beim Broker abonniert werden müssen
    pub fn topics(&self) -> [&'static str; 2] {
        [self.command_topic, self.group_topic]
    }

    pub fn is_command_topic(&self, topic: &str) -> bool {
        topic == self.command_topic || topic == self.group_topic
    }

    /// Liefert das Kommando für eine Nachricht auf einem der Command-Topics
    pub fn route(&self, topic: &str, payload: &[u8]) -> Option<RelayCommand> {
        if !self.is_command_topic(topic) {
            return None;
        }
        parse_command(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_prefix() {
        assert_eq!(parse_command(b"1"), Some(RelayCommand::On));
        assert_eq!(parse_command(b"1xyz"), Some(RelayCommand::On));
        assert_eq!(parse_command(b"0"), Some(RelayCommand::Off));
        assert_eq!(parse_command(b"0toggle"), Some(RelayCommand::Off));
    }

    #[test]
    fn test_parse_words_case_insensitive() {
        assert_eq!(parse_command(b"ON"), Some(RelayCommand::On));
        assert_eq!(parse_command(b"oN"), Some(RelayCommand::On));
        assert_eq!(parse_command(b"off"), Some(RelayCommand::Off));
        assert_eq!(parse_command(b"Off"), Some(RelayCommand::Off));
        assert_eq!(parse_command(b"toggle"), Some(RelayCommand::Toggle));
        assert_eq!(parse_command(b"ToGgLe"), Some(RelayCommand::Toggle));
    }

    #[test]
    fn test_parse_rejects_partial_and_empty() {
        assert_eq!(parse_command(b""), None);
        assert_eq!(parse_command(b"O"), None);
        assert_eq!(parse_command(b"ONN"), None);
        assert_eq!(parse_command(b"toggled"), None);
        assert_eq!(parse_command(b" on"), None);
        assert_eq!(parse_command(b"2"), None);
    }

    #[test]
    fn test_rule_order_is_priority() {
        // '1' gewinnt vor allen anderen Regeln
        assert_eq!(parse_command(b"10"), Some(RelayCommand::On));
        assert_eq!(parse_command(b"01"), Some(RelayCommand::Off));
        assert_eq!(COMMAND_RULES[0].1, RelayCommand::On);
        assert_eq!(COMMAND_RULES[4].1, RelayCommand::Toggle);
    }

    #[test]
    fn test_router_filters_topics() {
        let router = CommandRouter::new("house/office/lampe/set", "house/group/power");

        assert_eq!(
            router.route("house/office/lampe/set", b"ON"),
            Some(RelayCommand::On)
        );
        assert_eq!(
            router.route("house/group/power", b"0"),
            Some(RelayCommand::Off)
        );
        assert_eq!(router.route("house/office/lampe/status", b"ON"), None);
        assert_eq!(router.route("house/office/lampe/set", b"blink"), None);
        assert_eq!(
            router.topics(),
            ["house/office/lampe/set", "house/group/power"]
        );
    }
}
