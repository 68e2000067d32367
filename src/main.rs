mod config;
mod groq;
mod http;
mod mode;
mod relay;
mod replies;
mod router;

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::prelude::*;

use config::Config;
use groq::GroqClient;
use mode::ModeTracker;
use relay::Relay;
use router::{BotState, Command, handle_command, handle_text};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let _guard = init_tracing(&config);

    info!("🤖 Starting SmartChatTLDR bot (model: {})...", config.groq_model);

    let bot = Bot::new(&config.telegram_bot_token);

    let backend = Arc::new(GroqClient::new(
        config.groq_api_key.clone(),
        config.groq_model.clone(),
    ));
    let relay = Relay::new(backend);

    let state = Arc::new(BotState {
        relay: relay.clone(),
        modes: ModeTracker::new(config.summarize_ttl),
    });

    tokio::spawn(http::serve(relay, config.http_port));

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(dptree::endpoint(handle_text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn init_tracing(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            ),
    );

    if let Some(ref dir) = config.log_dir {
        std::fs::create_dir_all(dir).ok();
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("tldrbot.log"))
        {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                registry
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(non_blocking)
                            .with_ansi(false)
                            .with_filter(
                                tracing_subscriber::EnvFilter::from_default_env()
                                    .add_directive(tracing::Level::INFO.into()),
                            ),
                    )
                    .init();
                return Some(guard);
            }
            Err(e) => {
                eprintln!("Failed to open log file: {e}");
            }
        }
    }

    registry.init();
    None
}
