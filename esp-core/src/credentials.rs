//! Zugangsdaten für den MQTT-Broker
//!
//! Die Werte kommen zur Build-Zeit aus `.env` (`option_env!`). Eine leer
//! gelassene Zeile liefert `Some("")`; das zählt hier als "nicht gesetzt",
//! damit der CONNECT ohne Username/Passwort-Flag (anonym) rausgeht.

/// Optionaler Benutzername und Passwort für den Broker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokerCredentials<'a> {
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

impl<'a> BrokerCredentials<'a> {
    /// Übernimmt Build-Zeit-Werte, leere Strings werden zu `None`
    pub const fn from_env(username: Option<&'a str>, password: Option<&'a str>) -> Self {
        Self {
            username: non_empty(username),
            password: non_empty(password),
        }
    }

    pub const fn is_anonymous(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

const fn non_empty(value: Option<&str>) -> Option<&str> {
    match value {
        Some(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_are_anonymous() {
        let credentials = BrokerCredentials::from_env(None, None);
        assert!(credentials.is_anonymous());
    }

    #[test]
    fn test_empty_values_are_anonymous() {
        // MQTT_USERNAME= / MQTT_PASSWORD= in .env
        let credentials = BrokerCredentials::from_env(Some(""), Some(""));
        assert_eq!(credentials.username, None);
        assert_eq!(credentials.password, None);
        assert!(credentials.is_anonymous());
    }

    #[test]
    fn test_set_values_are_kept() {
        let credentials = BrokerCredentials::from_env(Some("lampe"), Some("geheim"));
        assert_eq!(credentials.username, Some("lampe"));
        assert_eq!(credentials.password, Some("geheim"));
        assert!(!credentials.is_anonymous());
    }

    #[test]
    fn test_usable_in_const_context() {
        const CREDENTIALS: BrokerCredentials<'static> =
            BrokerCredentials::from_env(Some("lampe"), Some(""));
        assert_eq!(CREDENTIALS.username, Some("lampe"));
        assert_eq!(CREDENTIALS.password, None);
    }
}
