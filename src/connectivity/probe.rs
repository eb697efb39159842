use crate::app_config::AppConfig;
use crate::connectivity::{Connectivity, ConnectivityMonitor};
use reqwest::Client;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
pub struct Config {
    pub url: String,
    pub poll_interval: Duration,
    pub retry_ms: u64,
    pub retry_max_delay: Duration,
}

impl Config {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Config {
            url: format!("{}{}", config.api().url().trim_end_matches('/'), config.connectivity().probe_path()),
            poll_interval: config.connectivity().poll_interval(),
            retry_ms: config.connectivity().retry_ms(),
            retry_max_delay: config.connectivity().retry_max_delay_ms(),
        }
    }
}

/// Derives connectivity from periodic requests to the attendance service.
///
/// While online the service is probed every poll interval. Once a probe fails the monitor reports
/// offline and re-probes with exponential backoff until the service answers again. The probe
/// task stops when the monitor and all its subscribers are dropped.
#[derive(Debug)]
pub struct ProbeConnectivityMonitor {
    rx: watch::Receiver<Connectivity>,
}

impl ProbeConnectivityMonitor {
    pub fn spawn(client: Client, config: Config) -> (Self, JoinHandle<()>) {
        let (tx, rx) = watch::channel(Connectivity::Online);
        let handle = tokio::spawn(async move {
            probe_loop(tx, client, config).await;
        });

        (ProbeConnectivityMonitor { rx }, handle)
    }
}

impl ConnectivityMonitor for ProbeConnectivityMonitor {
    fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.rx.clone()
    }
}

#[instrument(skip_all, fields(url = %config.url))]
async fn probe_loop(tx: watch::Sender<Connectivity>, client: Client, config: Config) {
    info!("🔌 Monitoring connectivity...");
    while !tx.is_closed() {
        if probe(&client, &config.url).await.is_ok() {
            publish(&tx, Connectivity::Online);
            tokio::select! {
                _ = sleep(config.poll_interval) => continue,
                _ = tx.closed() => break,
            }
        }

        warn!("🔴 Attendance service unreachable, waiting for connectivity...");
        publish(&tx, Connectivity::Offline);

        let strategy = ExponentialBackoff::from_millis(config.retry_ms)
            .factor(2)
            .max_delay(config.retry_max_delay)
            .map(jitter);

        tokio::select! {
            _ = Retry::spawn(strategy, || probe(&client, &config.url)) => {
                info!("🟢 Attendance service reachable again");
                publish(&tx, Connectivity::Online);
            }
            _ = tx.closed() => break,
        }
    }

    debug!("🔌 Monitoring connectivity... stopped");
}

async fn probe(client: &Client, url: &str) -> Result<(), reqwest::Error> {
    client.get(url).send().await?.error_for_status()?;
    Ok(())
}

fn publish(tx: &watch::Sender<Connectivity>, connectivity: Connectivity) {
    tx.send_if_modified(|current| {
        let changed = *current != connectivity;
        *current = connectivity;
        changed
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use test_log::test;
    use tokio::time::timeout;

    fn config(url: String) -> Config {
        Config::from_app_config(&AppConfigBuilder::new().api_url(url).probe_path("/health").build())
    }

    #[test(tokio::test)]
    async fn reports_offline_then_online_when_the_service_recovers() {
        let mut server = mockito::Server::new_async().await;
        let unavailable = server.mock("GET", "/health").with_status(503).expect_at_least(1).create_async().await;

        let (monitor, handle) = ProbeConnectivityMonitor::spawn(Client::new(), config(server.url()));
        let mut rx = monitor.subscribe();

        timeout(Duration::from_secs(5), rx.wait_for(|c| *c == Connectivity::Offline))
            .await
            .expect("never went offline")
            .unwrap();

        unavailable.remove_async().await;
        let _available = server.mock("GET", "/health").with_status(200).create_async().await;

        timeout(Duration::from_secs(5), rx.wait_for(|c| *c == Connectivity::Online))
            .await
            .expect("never came back online")
            .unwrap();

        drop(rx);
        drop(monitor);
        timeout(Duration::from_secs(5), handle).await.expect("probe loop kept running").unwrap();
    }

    #[test]
    fn config_joins_the_api_url_and_probe_path() {
        let config = config("http://attendance.local/".to_string());

        assert_eq!(config.url, "http://attendance.local/health");
    }
}
