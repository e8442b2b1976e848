// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
use esp_core::BrokerCredentials;

// ============================================================================
// Geräte-Identität
// ============================================================================

/// Raum, in dem das Gerät hängt (Teil der Topic-Namen)
/// Wird zur Build-Zeit aus der Environment Variable DEVICE_ROOM geladen
pub const DEVICE_ROOM: &str = env!(
    "DEVICE_ROOM",
    "Device Room nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Gerätename (Teil der Topic-Namen und MQTT Client ID)
/// Wird zur Build-Zeit aus der Environment Variable DEVICE_NAME geladen
pub const DEVICE_NAME: &str = env!(
    "DEVICE_NAME",
    "Device Name nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

// ============================================================================
// Taster und Relais
// ============================================================================
//
// Pins werden in main.rs als Peripherals übergeben:
// GPIO9 = Taster, GPIO2 = Relais, GPIO15 = Status-LED

/// Sperrzeit nach jeder Taster-Flanke in Millisekunden
pub const BUTTON_DEBOUNCE_MS: u32 = 50;

/// Intervall der Polling-Loop für den Relais-Abgleich in Millisekunden
pub const RECONCILE_INTERVAL_MS: u64 = 10;

/// Kapazität der Status-Queue (Relais-Task → MQTT-Task)
pub const STATUS_QUEUE_SIZE: usize = 4;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem WiFi-Verbindungsversuch in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
/// Wird zur Build-Zeit aus der Environment Variable MQTT_BROKER geladen
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port
/// Standard: 1883 (unverschlüsselt)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Benutzername und Passwort (optional, fehlt oder leer = anonym)
/// Werden zur Build-Zeit aus MQTT_USERNAME / MQTT_PASSWORD geladen
pub const MQTT_CREDENTIALS: BrokerCredentials<'static> = BrokerCredentials::from_env(
    option_env!("MQTT_USERNAME"),
    option_env!("MQTT_PASSWORD"),
);

/// Gerätespezifisches Command-Topic: house/<raum>/<name>/set
pub const MQTT_TOPIC_COMMAND: &str = concat!(
    "house/",
    env!("DEVICE_ROOM"),
    "/",
    env!("DEVICE_NAME"),
    "/set"
);

/// Gemeinsames Topic für alle Geräte (Gruppen-Schaltung)
pub const MQTT_TOPIC_GROUP_POWER: &str = "house/group/power";

/// Status-Topic: house/<raum>/<name>/status, Payload "ON"/"OFF"
pub const MQTT_TOPIC_STATUS: &str = concat!(
    "house/",
    env!("DEVICE_ROOM"),
    "/",
    env!("DEVICE_NAME"),
    "/status"
);

/// MQTT Keep-Alive in Sekunden
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// Nach dieser Ruhezeit ohne eingehende Nachricht wird ein PINGREQ gesendet
/// Muss deutlich unter MQTT_KEEP_ALIVE_SECS liegen
pub const MQTT_PING_INTERVAL_SECS: u64 = 15;

/// MQTT Reconnect Delay in Sekunden
/// Wartezeit nach Verbindungsfehler vor erneutem Versuch
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Buffer-Größe in Bytes
/// Muss groß genug für MQTT-Pakete sein
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// TCP Socket-Buffer für die Broker-Verbindung in Bytes
pub const MQTT_SOCKET_BUFFER_SIZE: usize = 4096;

/// TCP Timeout der Broker-Verbindung in Sekunden
pub const MQTT_SOCKET_TIMEOUT_SECS: u64 = 60;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;
