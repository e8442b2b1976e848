// MQTT Task - Empfängt Relais-Kommandos und published den Relais-Status
use defmt::{Debug2Format, error, info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, TimeoutError, Timer, with_timeout};

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::packet::v5::reason_codes::ReasonCode;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use crate::config::*;
use crate::{
    COMMAND_ROUTER, ConnectionSignal, RELAY_ARBITER, RelayCommand, RelayStatus,
    RelayStatusReceiver,
};

/// Maximale Anzahl Properties pro MQTT v5 Paket
const MQTT_MAX_PROPERTIES: usize = 5;

/// MQTT Client über eine embassy-net TCP-Verbindung
type BrokerClient<'a, 's> = MqttClient<'a, TcpSocket<'s>, MQTT_MAX_PROPERTIES, CountingRng>;

/// MQTT Task - läuft parallel zu anderen Tasks
///
/// Dieser Task übernimmt die komplette Broker-Kommunikation:
/// - Wartet auf Netzwerk-Verbindung
/// - Verbindet sich mit MQTT Broker und abonniert die Command-Topics
/// - Wendet empfangene Kommandos auf den Relais-Arbiter an
/// - Published Status-Änderungen ("ON"/"OFF") **sofort** (event-basiert)
/// - Automatisches Reconnect bei Fehlern
///
/// # Parameter
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `status_receiver`: Status-Meldungen vom Relais-Task
/// - `connection_signal`: Verbindungsstatus für die Status-LED
#[embassy_executor::task]
pub async fn mqtt_task(
    stack: &'static Stack<'static>,
    status_receiver: RelayStatusReceiver,
    connection_signal: &'static ConnectionSignal,
) {
    info!("MQTT: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("MQTT: Network ready");

    loop {
        match mqtt_session(stack, &status_receiver, connection_signal).await {
            Ok(_) => warn!("MQTT: Connection closed normally"),
            Err(e) => error!("MQTT: Error: {}", e),
        }
        connection_signal.signal(false);

        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
        wait_for_network(stack).await;
    }
}

/// Wartet bis Netzwerk-Verbindung verfügbar ist
///
/// Prüft kontinuierlich Link-Status und DHCP-Konfiguration.
async fn wait_for_network(stack: &'static Stack<'static>) {
    loop {
        if stack.is_link_up() && stack.config_v4().is_some() {
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}

/// Eine MQTT-Session vom Verbindungsaufbau bis zum ersten Fehler
///
/// 1. DNS-Auflösung des Broker-Hostnames
/// 2. TCP-Verbindung aufbauen
/// 3. MQTT CONNECT senden, Command-Topics abonnieren
/// 4. Kommandos empfangen, Status-Änderungen publishen, Keep-Alive
///
/// Nach dem Subscribe wird der aktuelle ActualState einmal published.
/// Das ist ein Resync nach dem (Re-)Connect, keine Meldung aus `reconcile()`.
///
/// Kommt eine Status-Änderung, während `receive_message` noch ein Paket
/// liest, wird der Empfang abgebrochen. Ist das Paket dann nur halb
/// gelesen, scheitert der nächste Empfang und die Session endet; der
/// Haupt-Loop verbindet neu. Das Relais selbst ist davon nicht betroffen.
///
/// Bei jedem Fehler wird die Funktion beendet und der Haupt-Loop
/// startet automatisch einen Reconnect-Versuch.
async fn mqtt_session(
    stack: &'static Stack<'static>,
    status_receiver: &RelayStatusReceiver,
    connection_signal: &'static ConnectionSignal,
) -> Result<(), MqttError> {
    // DNS Lookup
    info!("MQTT: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = resolve_hostname(stack, MQTT_BROKER).await?;
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    // TCP Connect
    let mut rx_buffer = [0u8; MQTT_SOCKET_BUFFER_SIZE];
    let mut tx_buffer = [0u8; MQTT_SOCKET_BUFFER_SIZE];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(MQTT_SOCKET_TIMEOUT_SECS)));

    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected");

    // MQTT Client Configuration (Client ID = Gerätename)
    let rng = CountingRng(20000);
    let mut config = ClientConfig::<MQTT_MAX_PROPERTIES, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: DEVICE_NAME,
        len: DEVICE_NAME.len() as u16,
    };
    if let Some(username) = MQTT_CREDENTIALS.username {
        config.add_username(username);
    }
    if let Some(password) = MQTT_CREDENTIALS.password {
        config.add_password(password);
    }
    if MQTT_CREDENTIALS.is_anonymous() {
        info!("MQTT: Connecting anonymously");
    }
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    // MQTT Buffer
    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];

    let mut client = MqttClient::<_, MQTT_MAX_PROPERTIES, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    // MQTT CONNECT
    client
        .connect_to_broker()
        .await
        .map_err(MqttError::ProtocolError)?;
    info!("MQTT: Connected to broker as '{}'", DEVICE_NAME);

    for topic in COMMAND_ROUTER.topics() {
        client
            .subscribe_to_topic(topic)
            .await
            .map_err(MqttError::SubscribeFailed)?;
        info!("MQTT: Subscribed to '{}'", topic);
    }
    connection_signal.signal(true);

    // Resync: veraltete Meldungen aus der Offline-Zeit verwerfen und den
    // aktuellen Zustand einmal melden
    while status_receiver.try_receive().is_ok() {}
    let current = RelayStatus::from(RELAY_ARBITER.actual());
    publish_status(&mut client, current).await?;

    // Event-Loop: Status-Änderung, eingehende Nachricht oder Ping-Intervall
    loop {
        let event = select(
            status_receiver.receive(),
            with_timeout(
                Duration::from_secs(MQTT_PING_INTERVAL_SECS),
                receive_command(&mut client),
            ),
        )
        .await;

        match event {
            Either::First(status) => publish_status(&mut client, status).await?,
            Either::Second(Ok(Ok(Some(command)))) => {
                info!("MQTT: Command {}", command);
                RELAY_ARBITER.apply_command(command);
            }
            Either::Second(Ok(Ok(None))) => {}
            Either::Second(Ok(Err(e))) => return Err(e),
            Either::Second(Err(TimeoutError)) => {
                client.send_ping().await.map_err(MqttError::PingFailed)?;
            }
        }
    }
}

/// Wartet auf die nächste PUBLISH-Nachricht und klassifiziert sie
///
/// Nachrichten auf fremden Topics und unbekannte Payloads ergeben `None`
/// und werden stillschweigend ignoriert.
async fn receive_command(
    client: &mut BrokerClient<'_, '_>,
) -> Result<Option<RelayCommand>, MqttError> {
    let (topic, payload) = client
        .receive_message()
        .await
        .map_err(MqttError::ReceiveFailed)?;
    info!("MQTT: Message arrived [{}]", topic);

    Ok(COMMAND_ROUTER.route(topic, payload))
}

/// Published den Relais-Status als "ON"/"OFF" auf das Status-Topic
async fn publish_status(
    client: &mut BrokerClient<'_, '_>,
    status: RelayStatus,
) -> Result<(), MqttError> {
    client
        .send_message(
            MQTT_TOPIC_STATUS,
            status.as_str().as_bytes(),
            QualityOfService::QoS0,
            false,
        )
        .await
        .map_err(MqttError::PublishFailed)?;

    info!("MQTT: Published {} to '{}'", status, MQTT_TOPIC_STATUS);
    Ok(())
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(ipv4) => Some(*ipv4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(MqttError::DnsResolutionFailed),
        Ok(Err(_)) => Err(MqttError::DnsResolutionFailed),
        Err(_) => Err(MqttError::DnsTimeout),
    }
}

/// MQTT Fehler-Typen
///
/// Alle möglichen Fehler die während einer MQTT-Session auftreten können.
/// Broker-Fehler tragen den `ReasonCode` von rust-mqtt.
#[derive(Debug)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError(ReasonCode),
    SubscribeFailed(ReasonCode),
    ReceiveFailed(ReasonCode),
    PublishFailed(ReasonCode),
    PingFailed(ReasonCode),
}

impl defmt::Format for MqttError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MqttError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            MqttError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            MqttError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            MqttError::ProtocolError(code) => {
                defmt::write!(fmt, "Protocol error ({})", Debug2Format(code))
            }
            MqttError::SubscribeFailed(code) => {
                defmt::write!(fmt, "Subscribe failed ({})", Debug2Format(code))
            }
            MqttError::ReceiveFailed(code) => {
                defmt::write!(fmt, "Receive failed ({})", Debug2Format(code))
            }
            MqttError::PublishFailed(code) => {
                defmt::write!(fmt, "Publish failed ({})", Debug2Format(code))
            }
            MqttError::PingFailed(code) => {
                defmt::write!(fmt, "Ping failed ({})", Debug2Format(code))
            }
        }
    }
}
