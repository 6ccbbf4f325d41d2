//! Terminal rendering of a conversation.
//!
//! Turn text is treated as markdown and formatted with ANSI styles. Raw
//! HTML and any other markup from the backend is passed through untouched;
//! nothing here sanitises it.

use super::transcript::Transcript;
use crate::models::chat::{ ChatTurn, Sender };
use pulldown_cmark::{ Event, Options, Parser, Tag, TagEnd };

/// Text of the transient bot turn shown while a reply is outstanding.
pub const PENDING_TEXT: &str = "Thinking...";

pub const SIDEBAR_TITLE: &str = "VytalChat";
pub const CURRENT_CONVERSATION: &str = "Current Conversation";

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const RESET: &str = "\x1b[0m";

fn end_block(out: &mut String, lists: &[Option<u64>]) {
    while out.ends_with('\n') {
        out.pop();
    }
    out.push_str(if lists.is_empty() { "\n\n" } else { "\n" });
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Formats markdown for a terminal: bold/italic become ANSI styles, list
/// items get bullets or numbers, links keep their target in parentheses.
pub fn format_markdown(text: &str) -> String {
    let mut out = String::new();
    // One entry per open list: the next number for ordered lists.
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut links: Vec<String> = Vec::new();

    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Strong) | Event::Start(Tag::Heading { .. }) => out.push_str(BOLD),
            Event::End(TagEnd::Strong) => out.push_str(RESET),
            Event::End(TagEnd::Heading(_)) => {
                out.push_str(RESET);
                end_block(&mut out, &lists);
            }
            Event::Start(Tag::Emphasis) => out.push_str(ITALIC),
            Event::End(TagEnd::Emphasis) => out.push_str(RESET),
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::CodeBlock) => {
                end_block(&mut out, &lists);
            }
            Event::Start(Tag::List(start)) => {
                ensure_newline(&mut out);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                end_block(&mut out, &lists);
            }
            Event::Start(Tag::Item) => {
                out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => out.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => ensure_newline(&mut out),
            Event::Start(Tag::Link { dest_url, .. }) => links.push(dest_url.to_string()),
            Event::End(TagEnd::Link) => {
                if let Some(url) = links.pop() {
                    out.push_str(&format!(" ({})", url));
                }
            }
            Event::Text(t) | Event::Code(t) | Event::Html(t) | Event::InlineHtml(t) => {
                out.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => {
                out.push_str("---");
                end_block(&mut out, &lists);
            }
            _ => {}
        }
    }

    out.trim_end().to_string()
}

pub fn avatar(sender: Sender) -> char {
    match sender {
        Sender::Bot => 'V',
        Sender::User => 'U',
    }
}

fn render_lines(sender: Sender, text: &str) -> String {
    let mut out = String::new();
    let mut lines = text.lines();
    out.push_str(&format!("{} | {}", avatar(sender), lines.next().unwrap_or("")));
    for line in lines {
        out.push_str(&format!("\n  | {}", line));
    }
    out
}

pub fn render_turn(turn: &ChatTurn) -> String {
    render_lines(turn.sender(), &format_markdown(turn.text()))
}

pub fn render_pending() -> String {
    render_lines(Sender::Bot, PENDING_TEXT)
}

/// Whole conversation, followed by the pending indicator when `loading`.
pub fn render_transcript(transcript: &Transcript, loading: bool) -> String {
    let mut blocks: Vec<String> = transcript.turns().iter().map(render_turn).collect();
    if loading {
        blocks.push(render_pending());
    }
    blocks.join("\n")
}

pub fn render_header() -> String {
    format!("== {} ==\n[{}]  (/new starts a new chat, /quit exits)", SIDEBAR_TITLE, CURRENT_CONVERSATION)
}
