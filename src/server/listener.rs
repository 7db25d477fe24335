use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionOptions};
use crate::routing::Dispatcher;

pub async fn run(cfg: &Config, dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    let options = ConnectionOptions {
        limits: cfg.server.limits(),
        read_timeout: cfg.server.read_timeout(),
        write_timeout: cfg.server.write_timeout(),
    };

    serve(listener, dispatcher, options).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    options: ConnectionOptions,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, dispatcher, options);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
