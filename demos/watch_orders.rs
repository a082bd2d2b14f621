use order_stream_client::{ConnectionState, Notice, OrderStreamClient, StreamConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = StreamConfig::from_env();
    let client = OrderStreamClient::new(config);
    println!("Streaming as {}", client.client_id());

    let controller = client.controller();
    let mut notices = client.subscribe();
    let mut state = client.state();
    let log = client.notifications();

    tokio::spawn(client.run());
    controller.connect().await?;

    tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let current = *state.borrow();
            println!(
                "[STATE] {:?}{}",
                current,
                if current == ConnectionState::Connecting {
                    " (spinner)"
                } else {
                    ""
                }
            );
        }
    });

    while let Ok(notice) = notices.recv().await {
        match notice {
            Notice::Connected => println!("[INFO] Connected to order notification service"),
            Notice::Disconnected => println!("[INFO] Disconnected from order notification service"),
            Notice::Reconnecting => println!("[WARN] Connection looks dead, reconnecting..."),
            Notice::OrderReceived { order_id, status } => {
                println!("[ORDER] {order_id} -> {status} ({} total)", log.len());
            }
        }
    }

    Ok(())
}
