//! Interactive terminal chat. Input stays live while a reply is pending:
//! further messages bounce off the single-flight guard and `/new` still
//! resets straight away.

use super::controller::{ ChatController, PendingSubmission };
use super::render::{ render_header, render_pending, render_transcript, render_turn };
use super::{ HttpRelayClient, RelayClient, SubmissionError };
use crate::cli::ChatArgs;
use crate::models::chat::ChatResponse;
use log::info;
use std::error::Error;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{ AsyncBufReadExt, BufReader };

type ReplyFuture = Pin<Box<dyn Future<Output = Result<ChatResponse, SubmissionError>> + Send>>;

struct InFlight {
    pending: PendingSubmission,
    reply: ReplyFuture,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    NewChat,
    Quit,
    Message(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "/new" => Input::NewChat,
            "/quit" | "/exit" => Input::Quit,
            _ => Input::Message(line.to_string()),
        }
    }
}

async fn next_reply(in_flight: &mut Option<InFlight>) -> Result<ChatResponse, SubmissionError> {
    match in_flight {
        Some(flight) => flight.reply.as_mut().await,
        None => std::future::pending().await,
    }
}

pub async fn run(args: ChatArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let client: Arc<dyn RelayClient> = Arc::new(HttpRelayClient::new(args.relay_url.clone()));
    let mut controller = ChatController::new(client).discard_stale_replies(
        args.discard_stale_replies
    );

    info!("Chatting through relay at {}", args.relay_url);
    println!("{}\n", render_header());
    println!("{}", render_transcript(controller.transcript(), false));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<InFlight> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::NewChat => {
                        controller.reset_conversation();
                        println!("\n{}", render_header());
                        println!("{}", render_transcript(controller.transcript(), controller.is_loading()));
                    }
                    Input::Message(text) => {
                        match controller.begin_submit(&text) {
                            Some(pending) => {
                                let client = controller.client();
                                let request = pending.request().clone();
                                let reply: ReplyFuture = Box::pin(async move { client.send(request).await });
                                in_flight = Some(InFlight { pending, reply });
                                println!("{}", render_pending());
                            }
                            None if controller.is_loading() => {
                                println!("(still waiting for the previous reply)");
                            }
                            None => {}
                        }
                    }
                }
            }
            outcome = next_reply(&mut in_flight) => {
                if let Some(flight) = in_flight.take() {
                    if let Some(turn) = controller.finish_submit(flight.pending, outcome) {
                        println!("{}", render_turn(turn));
                    }
                }
            }
        }
    }

    Ok(())
}
