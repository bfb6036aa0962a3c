use std::time::Duration;

use tokio::time;
use tracing::{debug, error, info, warn};

use crate::{
    app::Publish,
    config::ChatId,
    content::{today_in_history, PostType},
    shutdown::Shutdown,
    telegram::{Message, ParseMode, TelegramClient, TelegramError},
};

/// Pause before polling again after a failed `getUpdates`.
const ERROR_PAUSE: Duration = Duration::from_secs(5);

const DENIED: &str = "❌ Siz admin emassiz!";
const POSTED: &str = "✅ Post yuborildi!";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    /// Optional post type as typed by the user, e.g. `/post_now joke`.
    PostNow { post_type: Option<String> },
    Today,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
}

pub struct CommandHandler<'a, P: ?Sized> {
    admin: u64,
    channel: &'a ChatId,
    publisher: &'a P,
}

/// Long-polls updates and answers commands until shutdown.
pub struct CommandPoller<'a, P: ?Sized> {
    client: &'a TelegramClient,
    handler: CommandHandler<'a, P>,
    bot_name: Option<String>,
    poll_timeout: Duration,
}

impl Command {
    /// Parses `/name[@bot] [args]`. Commands addressed to another bot are ignored.
    pub fn parse(text: &str, bot_name: Option<&str>) -> Option<Self> {
        let mut words = text.split_whitespace();
        let head = words.next()?.strip_prefix('/')?;
        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (head, None),
        };
        if let (Some(target), Some(bot_name)) = (target, bot_name) {
            if !target.eq_ignore_ascii_case(bot_name) {
                return None;
            }
        }

        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "post_now" => Some(Self::PostNow {
                post_type: words.next().map(str::to_owned),
            }),
            "today" => Some(Self::Today),
            _ => None,
        }
    }
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
        }
    }

    fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: Some(ParseMode::Markdown),
        }
    }
}

impl<'a, P: Publish + ?Sized> CommandHandler<'a, P> {
    pub fn new(admin: u64, channel: &'a ChatId, publisher: &'a P) -> Self {
        Self {
            admin,
            channel,
            publisher,
        }
    }

    pub async fn handle(&self, command: &Command, sender: Option<u64>) -> Reply {
        match command {
            Command::Start => Reply::plain(format!(
                "👋 Assalomu alaykum! IT Dasturlash boni ishga tushdi.\n\
                 Har soatda IT va dasturlash haqida qiziqarli postlar kanalga joylanadi!\n\n\
                 Kanal: {}",
                self.channel
            )),
            Command::Today => {
                Reply::markdown(format!("📅 *IT tarixida bugun*\n\n{}", today_in_history()))
            }
            Command::PostNow { post_type } => {
                if sender != Some(self.admin) {
                    info!(?sender, "Rejected manual post from non-admin");
                    return Reply::plain(DENIED);
                }

                let requested = post_type.as_deref().map(str::parse::<PostType>);
                let post_type = match requested.transpose() {
                    Ok(t) => t,
                    Err(e) => {
                        let known: Vec<_> = PostType::ALL.iter().map(PostType::as_str).collect();
                        return Reply::plain(format!("❓ {e}. Mavjud: {}", known.join(", ")));
                    }
                };

                info!(?post_type, "Manual post requested");
                self.publisher.publish(post_type).await;
                Reply::plain(POSTED)
            }
        }
    }
}

impl<'a, P: Publish + ?Sized> CommandPoller<'a, P> {
    pub fn new(
        client: &'a TelegramClient,
        handler: CommandHandler<'a, P>,
        bot_name: Option<String>,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            client,
            handler,
            bot_name,
            poll_timeout,
        }
    }

    pub async fn run(&self, mut shutdown: Shutdown) {
        let mut offset = self.skip_backlog().await;
        info!("Listening for commands");

        loop {
            let res = tokio::select! {
                _ = shutdown.wait() => {
                    info!("Command poller stopped");
                    return;
                }
                res = self
                    .client
                    .get_updates()
                    .offset(offset)
                    .timeout(self.poll_timeout)
                    .send() => res,
            };

            match res {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        if let Some(message) = update.message {
                            self.on_message(message).await;
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to fetch updates");
                    let pause = match e {
                        TelegramError::RateLimited { timeout } => timeout,
                        _ => ERROR_PAUSE,
                    };
                    tokio::select! {
                        _ = shutdown.wait() => return,
                        _ = time::sleep(pause) => {}
                    }
                }
            }
        }
    }

    /// Drops updates that piled up while the bot was offline.
    async fn skip_backlog(&self) -> Option<i64> {
        match self.client.get_updates().offset(Some(-1)).send().await {
            Ok(updates) => updates.last().map(|u| u.update_id + 1),
            Err(e) => {
                warn!(error = %e, "Failed to skip pending updates");
                None
            }
        }
    }

    async fn on_message(&self, message: Message) {
        let Some(text) = message.text.as_deref() else {
            return;
        };
        let Some(command) = Command::parse(text, self.bot_name.as_deref()) else {
            return;
        };
        let sender = message.from.as_ref().map(|u| u.id);
        debug!(?command, ?sender, "Handling command");

        let reply = self.handler.handle(&command, sender).await;
        let chat = ChatId::Id(message.chat.id);
        let mut req = self
            .client
            .send_message(&chat, &reply.text)
            .reply_to(message.message_id);
        if let Some(mode) = reply.parse_mode {
            req = req.parse_mode(mode);
        }

        if let Err(e) = req.send().await {
            error!(error = %e, "Failed to reply to command");
        }
    }
}
