// Relais Task - Polling-Loop für den Abgleich DesiredState → Relais-Pin
use defmt::info;
use embassy_time::{Duration, Timer};

use crate::config::RECONCILE_INTERVAL_MS;
use crate::hal::GpioRelay;
use crate::{ChannelStatusNotifier, RELAY_ARBITER, RelayArbiter, RelayDriver, StatusNotifier};

/// Relais Logic - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// Ruft in jedem Durchlauf `reconcile()` auf und gibt danach die CPU an
/// die anderen Tasks (WiFi, MQTT) zurück. Läuft unabhängig von der
/// Netzwerk-Verbindung: das Relais schaltet auch offline.
///
/// # Parameter
/// - `arbiter`: geteilter Relais-Arbiter
/// - `relay`: Relais-Ausgang (Hardware oder Mock)
/// - `notifier`: Ziel der Status-Meldungen
pub async fn relay_logic<D: RelayDriver, N: StatusNotifier>(
    arbiter: &RelayArbiter,
    mut relay: D,
    mut notifier: N,
) -> ! {
    loop {
        if let Some(status) = arbiter.reconcile(&mut relay, &mut notifier) {
            info!("Relay: Switched {}", status);
        }

        // Async Delay: gibt CPU an andere Tasks zurück
        Timer::after(Duration::from_millis(RECONCILE_INTERVAL_MS)).await;
    }
}

/// Relais Task - Embassy Task für parallele Ausführung
///
/// # Parameter
/// - `relay`: Relais-Ausgang (bereits LOW initialisiert)
/// - `notifier`: leitet Status-Meldungen an den MQTT-Task weiter
#[embassy_executor::task]
pub async fn relay_task(relay: GpioRelay<'static>, notifier: ChannelStatusNotifier) {
    info!("Relay: Task started");
    relay_logic(&RELAY_ARBITER, relay, notifier).await
}
