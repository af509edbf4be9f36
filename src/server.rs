use std::{net::SocketAddr, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

use crate::{
    Error, Result,
    api::{self, CallbackOutcome, CallbackState},
    warning,
};

/// A running callback listener and the receiving end of its one-shot
/// channel.
pub struct CallbackServer {
    addr: SocketAddr,
    outcome: oneshot::Receiver<CallbackOutcome>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

/// Binds `127.0.0.1:<port>` and serves the callback routes on a background
/// task. Port 0 lets the OS pick a free port.
pub async fn start_callback_server(port: u16, expected_state: &str) -> Result<CallbackServer> {
    let (outcome_tx, outcome_rx) = oneshot::channel();
    let state = CallbackState::new(expected_state, outcome_tx);

    let app = Router::new()
        .route("/callback", get(api::callback).layer(Extension(state)))
        .fallback(api::unexpected);

    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .map_err(|source| Error::Bind { port, source })?;
    let addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = serve.await {
            warning!("Callback listener stopped: {}", e);
        }
    });

    Ok(CallbackServer {
        addr,
        outcome: outcome_rx,
        shutdown: Some(shutdown_tx),
        handle,
    })
}

impl CallbackServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Blocks until the first callback arrives or `timeout` elapses, then
    /// stops the listener.
    pub async fn wait_for_code(mut self, timeout: Duration) -> Result<String> {
        let received = tokio::time::timeout(timeout, &mut self.outcome).await;
        self.stop().await;

        match received {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(Error::CallbackAborted),
            Err(_) => Err(Error::CallbackTimeout(timeout)),
        }
    }

    async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        // Graceful shutdown waits for open connections; a browser holding a
        // keep-alive socket must not stall the command.
        if tokio::time::timeout(Duration::from_secs(2), &mut self.handle)
            .await
            .is_err()
        {
            self.handle.abort();
        }
    }
}
