use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use skiff_client::cache::{JsonFileStore, MemoryStore, MessageStore};
use skiff_client::client::{ChatClient, MessageSink};
use skiff_client::config::ClientConfig;
use skiff_client::push;
use skiff_client::remote::{ChatBackend, ReqwestChatBackend};
use skiff_client::session::SessionContext;
use skiff_client::telemetry;
use skiff_core::message::{Message, MessageId, MessageReceipt, MessageStatus};
use time::format_description::well_known::Rfc3339;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Parser)]
#[command(name = "skiff", about = "Offline-tolerant chat client with an optimistic outbox")]
struct Cli {
    /// Base url of the chat server.
    #[arg(long, env = "SKIFF_SERVER")]
    server: Option<String>,

    /// User id to chat as.
    #[arg(long, env = "SKIFF_USER")]
    user: Option<String>,

    /// Path to the config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the message cache in memory only.
    #[arg(long)]
    ephemeral: bool,

    /// Push endpoint to register after startup.
    #[arg(long, env = "SKIFF_PUSH_ENDPOINT")]
    push_endpoint: Option<String>,

    /// Legacy push subscription id, appended to the endpoint when the
    /// platform still reports one separately.
    #[arg(long, requires = "push_endpoint")]
    push_subscription_id: Option<String>,
}

/// Renders the timeline as plain stdout lines.
struct StdoutSink;

impl StdoutSink {
    fn print_line(message: &Message) {
        let stamp = message
            .date
            .format(&Rfc3339)
            .unwrap_or_else(|_| message.date.unix_timestamp().to_string());
        let marker = match message.status {
            MessageStatus::Pending => " [sending]",
            MessageStatus::Failed => " [failed]",
            MessageStatus::Confirmed => "",
        };
        let author = if message.from_current_user {
            "you"
        } else {
            message.user_id.0.as_str()
        };
        println!("{stamp} <{author}> {}{marker}", message.text);
    }
}

impl MessageSink for StdoutSink {
    fn add_message(&self, message: &Message) {
        Self::print_line(message);
    }

    fn add_messages(&self, messages: &[Message]) {
        for message in messages {
            Self::print_line(message);
        }
    }

    fn merge_messages(&self, messages: &[Message]) {
        println!("--- timeline refreshed ({} messages) ---", messages.len());
        for message in messages {
            Self::print_line(message);
        }
    }

    fn mark_sent(&self, _local_id: &MessageId, receipt: &MessageReceipt) {
        println!("    delivered as #{}", receipt.id);
    }

    fn mark_failed(&self, _local_id: &MessageId) {
        println!("    delivery failed; message was not sent");
    }

    fn warn(&self, text: &str) {
        eprintln!("warning: {text}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init("info").map_err(|err| anyhow!(err))?;
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => ClientConfig::default_path()?,
    };
    let config = ClientConfig::load(&config_path)?;

    let server = cli
        .server
        .or_else(|| config.server.clone())
        .context("server base url required (--server, SKIFF_SERVER, or config file)")?;
    let user = cli
        .user
        .or_else(|| config.user.clone())
        .context("user id required (--user, SKIFF_USER, or config file)")?;

    let backend: Arc<dyn ChatBackend> = Arc::new(
        ReqwestChatBackend::new(&server)?.with_bearer_token(config.bearer_token.clone()),
    );
    let store: Arc<dyn MessageStore> = if cli.ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(JsonFileStore::open(config.resolved_cache_path()?).await?)
    };
    let sink: Arc<dyn MessageSink> = Arc::new(StdoutSink);

    let client = Arc::new(ChatClient::new(
        SessionContext::new(user),
        store,
        Arc::clone(&backend),
        sink,
    ));
    tracing::debug!(
        target: "skiff",
        client_id = %client.session().client_id(),
        server = %server,
        "client composed"
    );

    client.load_timeline().await;

    if let Some(endpoint) = cli.push_endpoint {
        let endpoint =
            push::normalized_endpoint(&endpoint, cli.push_subscription_id.as_deref());
        let backend = Arc::clone(&backend);
        tokio::spawn(async move { push::register(backend, &endpoint).await });
    }

    // Input arrives over an explicit channel; each stdin line becomes one
    // submission, and slow sends never block the reader.
    let (lines_tx, mut lines_rx) = mpsc::channel::<String>(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let text = line.trim().to_string();
            if text.is_empty() {
                continue;
            }
            if lines_tx.send(text).await.is_err() {
                break;
            }
        }
    });

    while let Some(text) = lines_rx.recv().await {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            client.submit(&text).await;
        });
    }

    Ok(())
}
