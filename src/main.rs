mod config;
mod conversation;
mod format;
mod spoonacular;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup};
use tracing::{debug, info};
use tracing_subscriber::prelude::*;

use config::Config;
use conversation::{Action, Category, Session, DONE_LABEL};
use format::{format_pairing, format_recipes};
use spoonacular::SpoonacularClient;

struct BotState {
    spoonacular: SpoonacularClient,
    /// Live conversations, one per chat. Dropped on "Done".
    sessions: Mutex<HashMap<ChatId, Session>>,
}

impl BotState {
    fn new(config: &Config) -> Self {
        Self {
            spoonacular: SpoonacularClient::new(config.spoonacular_api_key.clone()),
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fridgechef.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let bot = Bot::new(&config.telegram_bot_token);

    // Setup logging
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("fridgechef.log"))
        .expect("Failed to open log file");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
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

    info!("🚀 Starting fridgechef...");
    info!("Loaded config from {config_path}");

    let state = Arc::new(BotState::new(&config));

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// Reply keyboard with the two search categories and the exit option.
fn menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(Category::RecipeSearch.label()),
            KeyboardButton::new(Category::WinePairing.label()),
        ],
        vec![KeyboardButton::new(DONE_LABEL)],
    ])
    .one_time_keyboard()
}

async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let text = match msg.text() {
        Some(t) => t,
        None => return Ok(()),
    };

    if text == "/start" {
        info!("Starting conversation in chat {}", msg.chat.id);
        state.sessions.lock().await.insert(msg.chat.id, Session::new());
        bot.send_message(
            msg.chat.id,
            "Hi! This is FridgeChef and I help you to find a perfect recipe \
             based on ingredients you have in your fridge. Or maybe you want to \
             choose a wine for your meal, just let me know and I'll help you!",
        )
        .reply_markup(menu_keyboard())
        .await?;
        return Ok(());
    }

    // Advance the session under the lock, then perform the action outside it
    // so a slow lookup never blocks other chats.
    let action = {
        let mut sessions = state.sessions.lock().await;
        let Some(session) = sessions.get_mut(&msg.chat.id) else {
            // No conversation started; nothing to do.
            return Ok(());
        };
        let action = session.advance(text);
        if matches!(action, Action::End) {
            sessions.remove(&msg.chat.id);
        }
        action
    };

    match action {
        Action::Prompt(prompt) => {
            bot.send_message(msg.chat.id, prompt).await?;
        }
        Action::Lookup { category, query } => {
            info!("Lookup {:?} in chat {}: \"{query}\"", category, msg.chat.id);
            let response = match category {
                Category::RecipeSearch => {
                    format_recipes(&state.spoonacular.search_by_ingredients(&query).await)
                }
                Category::WinePairing => {
                    format_pairing(&state.spoonacular.wine_pairing(&query).await)
                }
            };
            bot.send_message(msg.chat.id, response)
                .reply_markup(menu_keyboard())
                .await?;
        }
        Action::End => {
            info!("Conversation ended in chat {}", msg.chat.id);
        }
        Action::Ignore => {
            debug!("Ignoring unrecognized input in chat {}", msg.chat.id);
        }
    }

    Ok(())
}
