// Status-LED Task - zeigt die Broker-Verbindung an
use defmt::info;
use esp_hal::gpio::{Level, Output, OutputConfig};

use crate::ConnectionSignal;

/// Status-LED Task
///
/// LED an (HIGH) solange die MQTT-Session steht, sonst aus.
/// Der MQTT-Task meldet jeden Wechsel über `connection_signal`.
///
/// # Parameter
/// - `pin`: GPIO Peripheral der Status-LED
/// - `connection_signal`: Verbindungsstatus vom MQTT-Task
#[embassy_executor::task]
pub async fn status_led_task(
    pin: esp_hal::peripherals::GPIO15<'static>,
    connection_signal: &'static ConnectionSignal,
) {
    let mut led = Output::new(pin, Level::Low, OutputConfig::default());

    loop {
        let connected = connection_signal.wait().await;
        info!(
            "StatusLED: Broker {}",
            if connected { "connected" } else { "disconnected" }
        );
        led.set_level(Level::from(connected));
    }
}

