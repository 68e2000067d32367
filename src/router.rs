//! Message routing: commands, the per-user mode state machine, and the
//! thinking-placeholder lifecycle around every text interaction.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::mode::ModeTracker;
use crate::relay::Relay;
use crate::replies;

pub struct BotState {
    pub relay: Relay,
    pub modes: ModeTracker,
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "SmartChatTLDR AI commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show usage help")]
    Help,
    #[command(description = "Learn about this bot")]
    About,
    #[command(description = "Know who created the bot")]
    Founder,
    #[command(description = "Paste long text to summarize")]
    Summarize,
    #[command(description = "Send a link to summarize")]
    SummarizeUrl,
    #[command(description = "Upload a PDF to summarize")]
    SummarizePdf,
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    let reply = match cmd {
        Command::Start => replies::WELCOME,
        Command::Help => replies::HELP,
        Command::About => replies::ABOUT,
        Command::Founder => replies::FOUNDER,
        Command::Summarize => {
            if let Some(user) = msg.from.as_ref() {
                info!("User {} entered summarize mode", user.id);
                state.modes.enter(user.id).await;
            }
            replies::SUMMARIZE_PROMPT
        }
        Command::SummarizeUrl => replies::SUMMARIZE_URL_STUB,
        Command::SummarizePdf => replies::SUMMARIZE_PDF_STUB,
    };

    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/// The final reply for one text message. Canned replies carry Markdown
/// formatting; model output is sent as plain text.
#[derive(Debug, PartialEq)]
pub enum RoutedReply {
    Canned(&'static str),
    Model(String),
}

/// Evaluate the three branches in strict order: summarize-pending, then
/// custom-reply match, then default relay. Infallible: the relay absorbs
/// provider failure into fixed reply strings.
pub async fn route_message(user: UserId, text: &str, state: &BotState) -> RoutedReply {
    if state.modes.consume_if_pending(user).await {
        let prompt = format!("{}{}", replies::SUMMARIZE_PREFIX, text);
        return RoutedReply::Model(state.relay.complete(&prompt).await);
    }

    if let Some(canned) = replies::check_custom_reply(text) {
        return RoutedReply::Canned(canned);
    }

    RoutedReply::Model(state.relay.complete(text).await)
}

pub async fn handle_text(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }

    let username = user.username.as_deref().unwrap_or(&user.first_name);
    let preview: String = text.chars().take(100).collect();
    info!("Message from {username} ({}): \"{preview}\"", user.id);

    // Transient status message; removed exactly once, on every path.
    let placeholder = match bot.send_message(msg.chat.id, replies::THINKING).await {
        Ok(m) => Some(m.id),
        Err(e) => {
            warn!("Failed to send thinking message: {e}");
            None
        }
    };

    let routed = route_message(user.id, text, &state).await;

    if let Some(id) = placeholder {
        if let Err(e) = bot.delete_message(msg.chat.id, id).await {
            warn!("Failed to delete thinking message: {e}");
        }
    }

    let sent = match &routed {
        RoutedReply::Canned(canned) => {
            bot.send_message(msg.chat.id, *canned)
                .parse_mode(ParseMode::Markdown)
                .await
        }
        RoutedReply::Model(reply) => bot.send_message(msg.chat.id, reply.as_str()).await,
    };

    // Last-resort safety net: never leave the user without a reply.
    if let Err(e) = sent {
        warn!("Failed to send reply: {e}");
        bot.send_message(msg.chat.id, replies::GENERIC_ERROR).await.ok();
    }

    Ok(())
}
