use order_stream_client::{Notice, OrderStreamClient, StreamConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Per-session identity and an active retry policy, for deployments where
    // the default fixed client id or wait-for-user reconnect behavior does
    // not fit.
    let config = StreamConfig::builder()
        .base_url("http://localhost:8080")
        .client_id(order_stream_client::utils::random_client_id())
        .retry_policy(true, Duration::from_secs(5))
        .heartbeat_timeout(Duration::from_secs(45))
        .heartbeat_check_interval(Duration::from_secs(10))
        .build();

    let client = OrderStreamClient::new(config);
    let controller = client.controller();
    let mut notices = client.subscribe();
    let log = client.notifications();

    tokio::spawn(client.run());
    controller.connect().await?;

    // Once the stream is up, ask the backend for a test event.
    while let Ok(notice) = notices.recv().await {
        if notice == Notice::Connected {
            break;
        }
    }
    controller.simulate_order().await?;

    while let Ok(notice) = notices.recv().await {
        if let Notice::OrderReceived { order_id, status } = notice {
            println!("Received {order_id} -> {status}");
            break;
        }
    }

    println!("Log now holds {} event(s)", log.len());
    controller.disconnect().await?;
    Ok(())
}
