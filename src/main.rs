use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lastword::consts::{
    API_KEY_ENV, DEFAULT_BIND, DEFAULT_LOG_PATH, DEFAULT_TIMEOUT_SECS, MAX_QUESTION_CHARS,
};
use lastword::journal::Journal;
use lastword::journal::file::FileJournal;
use lastword::journal::memory::MemoryJournal;
use lastword::responder::Responder;
use lastword::responder::anthropic::AnthropicResponder;
use lastword::responder::echo::EchoResponder;
use lastword::server::{self, AppState};
use lastword::store::{LatestMessageStore, StoreConfig};

#[derive(Debug, Clone, ValueEnum)]
enum Provider {
    Anthropic,
    Echo,
}

#[derive(Parser)]
#[command(name = "lastword", version, about = "Ask once, poll for the answer.")]
struct Cli {
    /// Address to listen on
    #[arg(short, long, env = "LASTWORD_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Append-only audit log of every question and answer
    #[arg(short, long, env = "LASTWORD_LOG", default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Keep the audit log in memory instead of writing a file
    #[arg(long, default_value_t = false)]
    no_log: bool,

    /// Answer service
    #[arg(short, long, value_enum, default_value_t = Provider::Anthropic)]
    provider: Provider,

    /// Model name (ignored for echo)
    #[arg(long, env = "LASTWORD_MODEL")]
    model: Option<String>,

    /// Messages API endpoint, e.g. a proxy (ignored for echo)
    #[arg(long, env = "LASTWORD_API_URL")]
    api_url: Option<String>,

    /// Answer service timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Longest accepted question, in characters
    #[arg(long, default_value_t = MAX_QUESTION_CHARS)]
    max_chars: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lastword=debug")),
        )
        .init();

    let cli = Cli::parse();

    let responder: Arc<dyn Responder> = match cli.provider {
        Provider::Anthropic => {
            if std::env::var(API_KEY_ENV)
                .map(|k| k.trim().is_empty())
                .unwrap_or(true)
            {
                warn!(
                    var = API_KEY_ENV,
                    "credential not set, submissions will answer with a configuration error"
                );
            }
            let mut responder = AnthropicResponder::new(cli.model);
            if let Some(url) = cli.api_url {
                info!(url = %url, "using custom api url");
                responder = responder.with_api_url(url);
            }
            info!(model = responder.model(), "using anthropic");
            Arc::new(responder)
        }
        Provider::Echo => {
            if cli.model.is_some() || cli.api_url.is_some() {
                warn!("--model and --api-url are ignored for the echo provider");
            }
            info!("using echo");
            Arc::new(EchoResponder)
        }
    };

    let journal: Arc<dyn Journal> = if cli.no_log {
        info!("audit log kept in memory");
        Arc::new(MemoryJournal::new())
    } else {
        let journal = FileJournal::new(cli.log_file);
        info!(path = %journal.path().display(), "audit log");
        Arc::new(journal)
    };

    let store = Arc::new(LatestMessageStore::new(
        responder,
        journal,
        StoreConfig {
            timeout: Duration::from_secs(cli.timeout),
            max_question_chars: cli.max_chars,
        },
    ));

    let state = AppState::new(store)?;
    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    server::serve(listener, state).await
}
