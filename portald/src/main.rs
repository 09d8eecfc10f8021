use portald::{config::PortalConfig, proto, router, services};

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::net::SocketAddr;
use tokio::{io::AsyncWriteExt, net::TcpListener};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PortalConfig::from_env();
    info!(
        "[portald] configuration loaded\n  addr: {}\n  default limit: {}\n  catalog: {}",
        config.addr,
        config.search.default_limit,
        config
            .catalog_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".to_string())
    );
    let addr = config.addr.clone();
    services::init(config);
    info!("[portald] search facade: {}", services::consumer().consumer_name());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("portald listening on http://{}", addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            if let Err(err) = handle_conn(stream, peer).await {
                warn!("[portald] connection {peer} error: {err:?}");
            }
        });
    }
}

async fn handle_conn(mut tcp: tokio::net::TcpStream, peer: SocketAddr) -> Result<()> {
    // one request per connection
    let req = match proto::http_like::read_request(&mut tcp).await {
        Ok(r) => r,
        Err(code) => {
            let resp = proto::http_like::make_empty_response(code);
            tcp.write_all(resp.as_bytes()).await?;
            return Ok(());
        }
    };

    let response = match router::handle(req) {
        Ok(r) => r,
        Err(err) => {
            error!("[portald] handler error for {peer}: {err:?}");
            proto::http_like::Response::empty(portal_api::status::StatusCode::InternalServerError)
        }
    };
    tcp.write_all(&response.into_bytes()).await?;
    tcp.shutdown().await?;
    Ok(())
}
