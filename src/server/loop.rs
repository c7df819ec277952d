// Server loop module
// Accepts connections until a shutdown signal arrives

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::spawn_connection;
use crate::app::AppState;
use crate::logger;

/// Accept connections and hand each one to its own task
///
/// Accept errors (e.g. too many open files) are logged and the loop keeps
/// going. Returns once `shutdown` resolves; connections already being
/// served are not waited for.
pub async fn run<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                logger::log_shutdown();
                break;
            }

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => spawn_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Asset, AssetTree};
    use crate::config::Config;
    use crate::server::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn state() -> Arc<AppState> {
        let config = Config::load_from("does-not-exist/config").unwrap();
        let tree = AssetTree::from_entries([("index.html", Asset::new("<p>shell</p>", None))]);
        Arc::new(AppState::new(config, Arc::new(tree)))
    }

    #[tokio::test]
    async fn test_serves_over_tcp_until_shutdown() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap(), 16).unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(run(listener, state(), async move {
            let _ = stop_rx.await;
        }));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /some/route HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8_lossy(&raw).to_ascii_lowercase();

        assert!(text.starts_with("http/1.1 200 ok"));
        assert!(text.contains("cache-control: no-store"));
        assert!(text.contains("x-content-type-options: nosniff"));
        assert!(text.ends_with("<p>shell</p>"));

        stop_tx.send(()).unwrap();
        server.await.unwrap();
    }
}
