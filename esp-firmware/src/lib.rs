// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{
    ButtonDebouncer, CommandRouter, PinLevel, RelayArbiter, RelayCommand, RelayDriver,
    RelayStatus, StatusNotifier,
};

use defmt::warn;

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::signal::Signal;

// Konfigurationswerte
use crate::config::{MQTT_TOPIC_COMMAND, MQTT_TOPIC_GROUP_POWER, STATUS_QUEUE_SIZE};

// ============================================================================
// Geteilter Zustand
// ============================================================================

/// Der Relais-Arbiter des Geräts
///
/// Geschrieben vom Taster-Interrupt und vom MQTT-Task, abgeglichen vom
/// Relais-Task. Nur Atomics, daher als `static` ohne Mutex nutzbar.
pub static RELAY_ARBITER: RelayArbiter = RelayArbiter::new();

/// Router für die beiden abonnierten Command-Topics
pub const COMMAND_ROUTER: CommandRouter =
    CommandRouter::new(MQTT_TOPIC_COMMAND, MQTT_TOPIC_GROUP_POWER);

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================

/// Channel für Status-Meldungen (Relais-Task → MQTT-Task)
pub type RelayStatusChannel = Channel<NoopRawMutex, RelayStatus, STATUS_QUEUE_SIZE>;

/// Sender für Status-Meldungen
pub type RelayStatusSender = Sender<'static, NoopRawMutex, RelayStatus, STATUS_QUEUE_SIZE>;

/// Receiver für Status-Meldungen (MQTT-Task)
pub type RelayStatusReceiver = Receiver<'static, NoopRawMutex, RelayStatus, STATUS_QUEUE_SIZE>;

/// Verbindungsstatus zum Broker (MQTT-Task → Status-LED-Task)
pub type ConnectionSignal = Signal<NoopRawMutex, bool>;

// ============================================================================
// StatusNotifier über Channel
// ============================================================================

/// Reicht Status-Meldungen an den MQTT-Task weiter
///
/// Best-effort: ist die Queue voll (Broker offline), wird die Meldung
/// verworfen. Das Relais schaltet trotzdem.
pub struct ChannelStatusNotifier {
    sender: RelayStatusSender,
}

impl ChannelStatusNotifier {
    pub fn new(sender: RelayStatusSender) -> Self {
        Self { sender }
    }
}

impl StatusNotifier for ChannelStatusNotifier {
    fn notify(&mut self, status: RelayStatus) {
        if self.sender.try_send(status).is_err() {
            warn!("Relay: Status queue full, dropping '{}'", status);
        }
    }
}
