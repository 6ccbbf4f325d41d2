pub mod api;

use crate::relay::BackendClient;
use api::AppState;
use log::{ info, error };
use std::error::Error;
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub struct Server {
    addr: String,
    backend: BackendClient,
}

impl Server {
    pub fn new(addr: String, backend: BackendClient) -> Self {
        Self { addr, backend }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind relay to {}: {}. Try a different port.", addr, e);
                return Err(e.into());
            }
        };

        let app = api::router(AppState { backend: self.backend.clone() });
        info!("Relay server is running on http://{}", listener.local_addr()?);
        axum::serve(listener, app.into_make_service()).await?;

        Ok(())
    }
}
