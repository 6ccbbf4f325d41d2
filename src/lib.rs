pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod relay;
pub mod server;

use cli::{ Args, Command };
use log::info;
use relay::BackendClient;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    match args.command {
        Command::Serve(serve) => {
            info!("--- Core Configuration ---");
            info!("Relay Listen Address: {}", serve.listen_addr);
            info!("Backend Chat URL: {}", serve.backend_url);
            info!("-------------------------");

            let backend = BackendClient::new(serve.backend_url);
            let server = Server::new(serve.listen_addr, backend);
            server.run().await?;
        }
        Command::Chat(chat) => {
            info!("--- Core Configuration ---");
            info!("Relay Chat URL: {}", chat.relay_url);
            info!("Discard Stale Replies: {}", chat.discard_stale_replies);
            info!("-------------------------");

            client::repl::run(chat).await?;
        }
    }

    Ok(())
}
