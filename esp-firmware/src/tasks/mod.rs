// Task-Modul: Enthält alle Embassy Tasks und den Taster-Interrupt
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels (Relais → MQTT, MQTT → Status-LED)
// und über den geteilten RELAY_ARBITER (MQTT/Taster → Relais).

pub mod button;
pub mod mqtt;
pub mod relay;
pub mod status_led;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use button::setup_button;
pub use mqtt::mqtt_task;
pub use relay::relay_task;
pub use status_led::status_led_task;
pub use wifi::{connection_task, dhcp_task, net_task};
