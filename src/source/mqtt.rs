//! MQTT subscription source.
//!
//! Subscribes to `{base_topic}/{event}` after every (re)connect and forwards
//! each decoded payload. Connection errors are retried with exponential
//! backoff while `auto_reconnect` is on.

use crate::config::{MqttConfig, ServiceConfig};
use crate::error::{Result, SourceError};
use crate::meter::MeterEvent;
use crate::source::{LinkState, ReadingSource, deliver, payload};
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Requests buffered between client handle and event loop
const REQUEST_CAPACITY: usize = 10;

pub struct MqttSource {
    mqtt: MqttConfig,
    service: ServiceConfig,
}

impl MqttSource {
    pub fn new(mqtt: MqttConfig, service: ServiceConfig) -> Self {
        Self { mqtt, service }
    }

    fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.mqtt.client_id, &self.mqtt.host, self.mqtt.port);
        options.set_keep_alive(Duration::from_secs(self.mqtt.keep_alive_secs));
        options.set_clean_session(self.mqtt.clean_session);
        if let (Some(username), Some(password)) = (&self.mqtt.username, &self.mqtt.password) {
            options.set_credentials(username, password);
        }
        options
    }
}

/// Map the configured QoS level; validated to 0..=2 at load time
fn qos(level: i32) -> QoS {
    match level {
        2 => QoS::ExactlyOnce,
        1 => QoS::AtLeastOnce,
        _ => QoS::AtMostOnce,
    }
}

/// Double the retry delay, capped at `max`
fn next_backoff(current: Duration, max: Duration) -> Duration {
    current.saturating_mul(2).min(max)
}

#[async_trait]
impl ReadingSource for MqttSource {
    fn describe(&self) -> String {
        format!("mqtt://{}:{}/{}", self.mqtt.host, self.mqtt.port, self.mqtt.topic())
    }

    async fn run(
        self: Box<Self>,
        events: mpsc::Sender<MeterEvent>,
        link: LinkState,
        cancel: CancellationToken,
    ) -> Result<()> {
        let (client, mut eventloop) = AsyncClient::new(self.options(), REQUEST_CAPACITY);
        let topic = self.mqtt.topic();
        let base_delay = Duration::from_millis(self.service.reconnect_delay_ms);
        let max_delay = Duration::from_millis(self.service.max_reconnect_delay_ms);
        let mut delay = base_delay;
        let mut failures = 0u32;

        loop {
            let polled = tokio::select! {
                _ = cancel.cancelled() => break,
                polled = eventloop.poll() => polled,
            };

            match polled {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    link.set(true);
                    failures = 0;
                    delay = base_delay;
                    tracing::info!(host = %self.mqtt.host, port = self.mqtt.port, "connected to MQTT broker");

                    client
                        .try_subscribe(topic.as_str(), qos(self.mqtt.qos))
                        .map_err(|e| SourceError::SubscriptionError(e.to_string()))?;
                }
                Ok(Event::Incoming(Packet::SubAck(_))) => {
                    tracing::info!(topic = %topic, "subscribed");
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    match payload::decode_reading(&publish.payload) {
                        Ok(Some(reading)) => {
                            if !deliver(&events, reading).await {
                                tracing::debug!("event queue closed, stopping");
                                break;
                            }
                        }
                        Ok(None) => tracing::debug!(topic = ?publish.topic, "ignoring foreign event"),
                        Err(e) => {
                            tracing::warn!(topic = ?publish.topic, error = %e, "dropping malformed reading")
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    link.set(false);
                    if !self.service.auto_reconnect {
                        return Err(SourceError::ConnectionError(e.to_string()).into());
                    }

                    failures += 1;
                    let limit = self.service.max_reconnect_attempts;
                    if limit > 0 && failures >= limit {
                        return Err(SourceError::ReconnectExhausted(failures).into());
                    }

                    tracing::warn!(
                        error = %e,
                        attempt = failures,
                        retry_in_ms = delay.as_millis() as u64,
                        "MQTT connection lost, reconnecting"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                    delay = next_backoff(delay, max_delay);
                }
            }
        }

        let _ = client.try_disconnect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let max = Duration::from_millis(5000);
        let mut delay = Duration::from_millis(1000);
        delay = next_backoff(delay, max);
        assert_eq!(delay, Duration::from_millis(2000));
        delay = next_backoff(delay, max);
        delay = next_backoff(delay, max);
        assert_eq!(delay, max);
    }

    #[test]
    fn test_qos_mapping() {
        assert_eq!(qos(0), QoS::AtMostOnce);
        assert_eq!(qos(1), QoS::AtLeastOnce);
        assert_eq!(qos(2), QoS::ExactlyOnce);
    }

    #[test]
    fn test_describe_names_topic() {
        let source = MqttSource::new(MqttConfig::default(), ServiceConfig::default());
        assert_eq!(source.describe(), "mqtt://localhost:1883/noise-meter/db_update");
    }

    #[tokio::test]
    async fn test_cancel_stops_unreachable_broker() {
        let mqtt = MqttConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..Default::default()
        };
        let service = ServiceConfig {
            reconnect_delay_ms: 10,
            max_reconnect_delay_ms: 20,
            ..Default::default()
        };
        let (tx, _rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let link = LinkState::default();

        let task = tokio::spawn(Box::new(MqttSource::new(mqtt, service)).run(tx, link.clone(), cancel.clone()));
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();

        assert!(task.await.unwrap().is_ok());
        assert!(!link.is_connected());
    }
}
