use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    commands::{CommandHandler, CommandPoller},
    config::{ChatId, Settings},
    content::{tables::IMAGE_ENDPOINT, ContentGenerator, Post, PostType},
    dispatch::{ChannelTransport, Dispatcher, Transport},
    image::{ImageFetcher, ImageSource},
    scheduler::{LocalClock, Scheduler},
    telegram::TelegramClient,
};

const STARTUP_MESSAGE: &str =
    "🤖 *Bot ishga tushdi!*\nEndi har soatda IT va dasturlash haqida postlar joylanadi.";

/// One generate + dispatch cycle.
#[async_trait]
pub trait Publish: Send + Sync {
    async fn publish(&self, post_type: Option<PostType>);
}

pub struct Pipeline<R, I, T> {
    generator: ContentGenerator<R, I>,
    dispatcher: Dispatcher<T>,
}

/// Everything the running bot shares: settings and live handles.
pub struct App {
    pub settings: Settings,
    pub channel: ChatId,
    pub admin: u64,
    pub telegram: TelegramClient,
    pub pipeline: Pipeline<StdRng, ImageFetcher, ChannelTransport>,
}

impl<R, I, T> Pipeline<R, I, T> {
    pub fn new(generator: ContentGenerator<R, I>, dispatcher: Dispatcher<T>) -> Self {
        Self {
            generator,
            dispatcher,
        }
    }
}

#[async_trait]
impl<R, I, T> Publish for Pipeline<R, I, T>
where
    R: Rng + Send,
    I: ImageSource,
    T: Transport,
{
    async fn publish(&self, post_type: Option<PostType>) {
        let post = self.generator.generate_post(post_type).await;
        self.dispatcher.send_post(&post).await;
    }
}

impl App {
    pub fn new(
        token: String,
        channel: ChatId,
        admin: u64,
        settings: Settings,
    ) -> Result<Self, reqwest::Error> {
        let telegram = TelegramClient::new(token);
        let images = ImageFetcher::new(IMAGE_ENDPOINT, settings.image_timeout())?;
        let pipeline = Pipeline::new(
            ContentGenerator::new(StdRng::from_entropy(), images),
            Dispatcher::new(ChannelTransport::new(telegram.clone(), channel.clone())),
        );

        Ok(Self {
            settings,
            channel,
            admin,
            telegram,
            pipeline,
        })
    }

    pub async fn announce_startup(&self) {
        let post = Post {
            text: STARTUP_MESSAGE.to_owned(),
            image: None,
        };
        self.pipeline.dispatcher.send_post(&post).await;
    }

    pub fn scheduler(&self) -> Scheduler<LocalClock> {
        Scheduler::new(self.settings.window, LocalClock)
    }

    pub fn command_poller(
        &self,
        bot_name: Option<String>,
    ) -> CommandPoller<'_, Pipeline<StdRng, ImageFetcher, ChannelTransport>> {
        CommandPoller::new(
            &self.telegram,
            CommandHandler::new(self.admin, &self.channel, &self.pipeline),
            bot_name,
            self.settings.poll_timeout(),
        )
    }
}
