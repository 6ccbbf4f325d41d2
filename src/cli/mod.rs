use clap::{ Parser, Subcommand };
use url::Url;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP relay in front of the inference backend.
    Serve(ServeArgs),
    /// Run the interactive terminal chat against a relay.
    Chat(ChatArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host address and port for the relay to listen on.
    #[arg(long, env = "RELAY_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Full chat address of the inference backend (host, port and path).
    #[arg(long, env = "BACKEND_CHAT_URL", default_value = "http://backend-python:5000/chat")]
    pub backend_url: Url,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ChatArgs {
    /// Chat endpoint exposed by the relay.
    #[arg(long, env = "RELAY_CHAT_URL", default_value = "http://localhost:8080/api/chat")]
    pub relay_url: Url,

    /// Drop replies that arrive after the conversation was reset instead of
    /// appending them to the new conversation.
    #[arg(long, env = "DISCARD_STALE_REPLIES", default_value = "false")]
    pub discard_stale_replies: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults_point_at_the_python_backend() {
        let args = Args::try_parse_from(["vytal-chat", "serve"]).unwrap();
        match args.command {
            Command::Serve(serve) => {
                assert_eq!(serve.listen_addr, "0.0.0.0:8080");
                assert_eq!(serve.backend_url.as_str(), "http://backend-python:5000/chat");
            }
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn chat_accepts_overrides() {
        let args = Args::try_parse_from([
            "vytal-chat",
            "chat",
            "--relay-url",
            "http://127.0.0.1:9000/api/chat",
            "--discard-stale-replies",
        ]).unwrap();
        match args.command {
            Command::Chat(chat) => {
                assert_eq!(chat.relay_url.port(), Some(9000));
                assert!(chat.discard_stale_replies);
            }
            other => panic!("expected chat, got {:?}", other),
        }
    }

    #[test]
    fn invalid_backend_url_is_rejected_at_parse_time() {
        let parsed = Args::try_parse_from(["vytal-chat", "serve", "--backend-url", "not a url"]);
        assert!(parsed.is_err());
    }
}
