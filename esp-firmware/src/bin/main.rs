// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::Io;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_relais_steuerung::config::{
    EXTRA_HEAP_SIZE, MQTT_TOPIC_COMMAND, MQTT_TOPIC_STATUS, WIFI_HEAP_SIZE,
};
use esp_relais_steuerung::hal::GpioRelay;
use esp_relais_steuerung::tasks::{
    connection_task, dhcp_task, mqtt_task, net_task, relay_task, setup_button, status_led_task,
};
use esp_relais_steuerung::{ChannelStatusNotifier, ConnectionSignal, RelayStatusChannel};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks und im Taster-Interrupt.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Relais-Pin (GPIO2) zuerst auf LOW, bevor irgendeine Logik läuft
    let relay = GpioRelay::new(peripherals.GPIO2);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Taster (GPIO9): Interrupt auf beiden Flanken registrieren
    let mut io = Io::new(peripherals.IO_MUX);
    setup_button(&mut io, peripherals.GPIO9);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net
    // 4 Sockets: MQTT (1) + DNS (1) + DHCP (1) + Reserve
    static RESOURCES: static_cell::StaticCell<StackResources<4>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Status-Channel (Relais-Task → MQTT-Task)
    static STATUS_CHANNEL: static_cell::StaticCell<RelayStatusChannel> =
        static_cell::StaticCell::new();
    let status_channel = &*STATUS_CHANNEL.init(RelayStatusChannel::new());

    // Verbindungs-Signal (MQTT-Task → Status-LED)
    static CONNECTION_SIGNAL: static_cell::StaticCell<ConnectionSignal> =
        static_cell::StaticCell::new();
    let connection_signal = &*CONNECTION_SIGNAL.init(ConnectionSignal::new());

    defmt::info!(
        "Relay: command topic '{}', status topic '{}'",
        MQTT_TOPIC_COMMAND,
        MQTT_TOPIC_STATUS
    );

    // Spawn Relais Task (Polling-Loop für den Abgleich)
    let notifier = ChannelStatusNotifier::new(status_channel.sender());
    spawner.spawn(relay_task(relay, notifier)).unwrap();

    // Spawn Status-LED Task (GPIO15)
    spawner
        .spawn(status_led_task(peripherals.GPIO15, connection_signal))
        .unwrap();

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // Spawn MQTT Task (Kommandos rein, Status raus)
    spawner
        .spawn(mqtt_task(
            stack,
            status_channel.receiver(),
            connection_signal,
        ))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
