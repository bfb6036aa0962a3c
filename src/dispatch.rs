use async_trait::async_trait;
use reqwest::Url;
use tracing::{error, info};

use crate::{
    config::ChatId,
    content::Post,
    telegram::{ParseMode, TelegramClient, TelegramError},
};

/// Outbound side of the output channel.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<(), TelegramError>;
    async fn send_photo(&self, photo: &Url, caption: &str) -> Result<(), TelegramError>;
}

/// [`TelegramClient`] bound to the configured channel.
pub struct ChannelTransport {
    client: TelegramClient,
    channel: ChatId,
}

/// Sends posts to the channel. Failures are logged and dropped.
pub struct Dispatcher<T> {
    transport: T,
}

impl ChannelTransport {
    pub fn new(client: TelegramClient, channel: ChatId) -> Self {
        Self { client, channel }
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send_text(&self, text: &str) -> Result<(), TelegramError> {
        self.client
            .send_message(&self.channel, text)
            .parse_mode(ParseMode::Markdown)
            .send()
            .await
            .map(drop)
    }

    async fn send_photo(&self, photo: &Url, caption: &str) -> Result<(), TelegramError> {
        self.client
            .send_photo(&self.channel, photo.as_str())
            .caption(caption)
            .parse_mode(ParseMode::Markdown)
            .send()
            .await
            .map(drop)
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn send_post(&self, post: &Post) {
        let res = match &post.image {
            Some(image) => self.transport.send_photo(image, &post.text).await,
            None => self.transport.send_text(&post.text).await,
        };

        match res {
            Ok(()) => info!(with_image = post.image.is_some(), "Post sent"),
            Err(e) => error!(error = %e, "Failed to post to telegram"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Sent {
        Text(String),
        Photo { photo: Url, caption: String },
    }

    /// Records every call; fails all of them when `fail` is set.
    #[derive(Default)]
    pub struct RecordingTransport {
        pub sent: Mutex<Vec<Sent>>,
        pub fail: bool,
    }

    impl RecordingTransport {
        pub fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }

        fn record(&self, sent: Sent) -> Result<(), TelegramError> {
            self.sent.lock().unwrap().push(sent);
            if self.fail {
                return Err(TelegramError::Server {
                    error_code: 400,
                    description: "Bad Request: can't parse entities".to_owned(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send_text(&self, text: &str) -> Result<(), TelegramError> {
            self.record(Sent::Text(text.to_owned()))
        }

        async fn send_photo(&self, photo: &Url, caption: &str) -> Result<(), TelegramError> {
            self.record(Sent::Photo {
                photo: photo.clone(),
                caption: caption.to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn test_post_with_image_sends_photo() {
        let dispatcher = Dispatcher::new(RecordingTransport::default());
        let photo = Url::parse("https://images.example.com/1.jpg").unwrap();
        let post = Post {
            text: "📊 *IT Fact*\n\nfact".to_owned(),
            image: Some(photo.clone()),
        };

        dispatcher.send_post(&post).await;

        assert_eq!(
            dispatcher.transport.sent(),
            vec![Sent::Photo {
                photo,
                caption: post.text.clone()
            }]
        );
    }

    #[tokio::test]
    async fn test_post_without_image_sends_text() {
        let dispatcher = Dispatcher::new(RecordingTransport::default());
        let post = Post {
            text: "💡 *Dasturchi Maslahati*\n\ntip".to_owned(),
            image: None,
        };

        dispatcher.send_post(&post).await;

        assert_eq!(dispatcher.transport.sent(), vec![Sent::Text(post.text.clone())]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_swallowed() {
        let dispatcher = Dispatcher::new(RecordingTransport {
            fail: true,
            ..Default::default()
        });
        let post = Post {
            text: "text".to_owned(),
            image: None,
        };

        dispatcher.send_post(&post).await;
        dispatcher.send_post(&post).await;

        assert_eq!(dispatcher.transport.sent().len(), 2);
    }
}
