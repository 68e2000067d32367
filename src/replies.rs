//! Canned reply text and the custom-reply matcher.

pub const WELCOME: &str = "👋 Welcome to *SmartChatTLDR AI*! I’m your smart assistant for summarizing long messages, articles, and videos.";

pub const HELP: &str = "🛠 *How to use SmartChatTLDR AI*\n\n\
Just type your question or request, and I'll try my best to help!\n\n\
Available commands:\n\
/about - Learn about this bot\n\
/founder - Know who created me\n\
/summarize - Paste long text to summarize\n\
/summarize_url - Send a link to summarize\n\
/summarize_pdf - Upload a PDF to summarize";

pub const ABOUT: &str = "🤖 I'm *SmartChatTLDR AI*, built by *Ranjan Kumar Prajapati*. I'm an AI-powered chat assistant designed to instantly summarize long messages, articles, and videos.";

pub const FOUNDER: &str = "👨‍💻 The founder is *Ranjan Kumar Prajapati*.";

pub const SUMMARIZE_PROMPT: &str = "📩 Send me the message you want me to summarize.";

pub const SUMMARIZE_URL_STUB: &str = "🔗 Please send a link (starting with http/https) and I’ll summarize the article.";

pub const SUMMARIZE_PDF_STUB: &str = "📄 Upload a PDF file and I’ll summarize its content. (Coming soon!)";

pub const THINKING: &str = "💬 Thinking...";

pub const GENERIC_ERROR: &str = "❌ Something went wrong.";

/// Instruction prepended to text sent while the user is in summarize mode.
pub const SUMMARIZE_PREFIX: &str = "Summarize the following text:\n\n";

const FOUNDER_KEYWORDS: [&str; 4] = [
    "founder name",
    "who is the founder",
    "creator",
    "developed by",
];

const IDENTITY_KEYWORDS: [&str; 4] = [
    "about you",
    "who are you",
    "your name",
    "what is your name",
];

/// Case-insensitive substring match against the fixed keyword sets.
/// The founder set is checked first and wins when both sets match.
pub fn check_custom_reply(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();

    if FOUNDER_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(FOUNDER);
    }

    if IDENTITY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(ABOUT);
    }

    None
}
