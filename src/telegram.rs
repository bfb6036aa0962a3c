use std::{fmt::Display, time::Duration};

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::ChatId;

const API_URL: &str = "https://api.telegram.org";

/// Thin client for the Telegram Bot HTTP API.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    api_url: String,
    token: String,
}
#[derive(Debug)]
pub enum TelegramError {
    Http(reqwest::Error),
    Scheme(serde_json::Error),
    Server {
        error_code: u32,
        description: String,
    },
    RateLimited {
        timeout: Duration,
    },
}

impl Display for TelegramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => e.fmt(f),
            Self::Scheme(e) => e.fmt(f),
            Self::Server {
                error_code,
                description,
            } => write!(f, "API returned error {error_code}: {description}"),
            Self::RateLimited { timeout } => {
                write!(f, "ratelimited for {} seconds", timeout.as_secs())
            }
        }
    }
}
impl std::error::Error for TelegramError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
}

pub struct SendMessage<'a> {
    client: &'a TelegramClient,
    body: SendMessageBody<'a>,
}
#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<i64>,
}

pub struct SendPhoto<'a> {
    client: &'a TelegramClient,
    body: SendPhotoBody<'a>,
}
#[derive(Serialize)]
struct SendPhotoBody<'a> {
    chat_id: &'a ChatId,
    /// URL of the photo; Telegram downloads it itself.
    photo: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
}

pub struct GetUpdates<'a> {
    client: &'a TelegramClient,
    body: GetUpdatesBody,
}
#[derive(Serialize)]
struct GetUpdatesBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TelegramResponse<T> {
    Ok {
        result: T,
    },
    Err {
        error_code: u32,
        description: String,
        #[serde(default)]
        parameters: Option<TelegramRateLimitError>,
    },
}
#[derive(Deserialize)]
struct TelegramRateLimitError {
    retry_after: u64,
}

#[derive(Debug, Deserialize)]
#[non_exhaustive]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}
#[derive(Debug, Deserialize)]
#[non_exhaustive]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}
#[derive(Debug, Deserialize)]
#[non_exhaustive]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
}
#[derive(Debug, Deserialize)]
#[non_exhaustive]
pub struct Chat {
    pub id: i64,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self::with_client(Client::new(), API_URL, token)
    }

    pub fn with_client(http: Client, api_url: impl Into<String>, token: String) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token,
        }
    }

    pub fn send_message<'a>(&'a self, chat_id: &'a ChatId, text: &'a str) -> SendMessage<'a> {
        SendMessage {
            client: self,
            body: SendMessageBody {
                chat_id,
                text,
                parse_mode: None,
                reply_to_message_id: None,
            },
        }
    }

    pub fn send_photo<'a>(&'a self, chat_id: &'a ChatId, photo: &'a str) -> SendPhoto<'a> {
        SendPhoto {
            client: self,
            body: SendPhotoBody {
                chat_id,
                photo,
                caption: None,
                parse_mode: None,
            },
        }
    }

    pub fn get_updates(&self) -> GetUpdates<'_> {
        GetUpdates {
            client: self,
            body: GetUpdatesBody {
                offset: None,
                timeout: 0,
                allowed_updates: ["message"],
            },
        }
    }

    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::Map::new()).await
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, TelegramError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // strip the URL from errors, it carries the bot token
        let res = self
            .http
            .post(format!("{}/bot{}/{method}", self.api_url, self.token))
            .json(params)
            .send()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?
            .text()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        decode(&res)
    }
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, TelegramError> {
    let res: TelegramResponse<T> = serde_json::from_str(raw).map_err(TelegramError::Scheme)?;

    match res {
        TelegramResponse::Ok { result } => Ok(result),

        TelegramResponse::Err {
            error_code: 429,
            parameters: Some(TelegramRateLimitError { retry_after }),
            ..
        } => Err(TelegramError::RateLimited {
            timeout: Duration::from_secs(retry_after),
        }),

        TelegramResponse::Err {
            error_code,
            description,
            ..
        } => Err(TelegramError::Server {
            error_code,
            description,
        }),
    }
}

impl<'a> SendMessage<'a> {
    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.body.parse_mode = Some(mode);
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.body.reply_to_message_id = Some(message_id);
        self
    }

    pub async fn send(self) -> Result<Message, TelegramError> {
        self.client.call("sendMessage", &self.body).await
    }
}

impl<'a> SendPhoto<'a> {
    pub fn caption(mut self, caption: &'a str) -> Self {
        self.body.caption = Some(caption);
        self
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.body.parse_mode = Some(mode);
        self
    }

    pub async fn send(self) -> Result<Message, TelegramError> {
        self.client.call("sendPhoto", &self.body).await
    }
}

impl<'a> GetUpdates<'a> {
    pub fn offset(mut self, offset: Option<i64>) -> Self {
        self.body.offset = offset;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.body.timeout = timeout.as_secs();
        self
    }

    pub async fn send(self) -> Result<Vec<Update>, TelegramError> {
        self.client.call("getUpdates", &self.body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ok() {
        let msg: Message = decode(
            r#"{"ok":true,"result":{"message_id":7,"date":0,"chat":{"id":-1001,"type":"channel"},"text":"hi"}}"#,
        )
        .unwrap();
        assert_eq!(msg.message_id, 7);
        assert_eq!(msg.chat.id, -1001);
        assert_eq!(msg.text.as_deref(), Some("hi"));
        assert!(msg.from.is_none());
    }

    #[test]
    fn test_decode_updates() {
        let updates: Vec<Update> = decode(
            r#"{"ok":true,"result":[
                {"update_id":10,"message":{"message_id":1,"date":0,"chat":{"id":5},"from":{"id":42,"is_bot":false,"first_name":"A"},"text":"/start"}},
                {"update_id":11,"edited_message":{}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(updates.len(), 2);
        let from = updates[0].message.as_ref().and_then(|m| m.from.as_ref()).unwrap();
        assert_eq!(from.id, 42);
        assert!(updates[1].message.is_none());
    }

    #[test]
    fn test_decode_server_error() {
        let err = decode::<Message>(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: can't parse entities"}"#,
        )
        .unwrap_err();
        match err {
            TelegramError::Server {
                error_code,
                description,
            } => {
                assert_eq!(error_code, 400);
                assert!(description.contains("can't parse entities"));
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_decode_rate_limited() {
        let err = decode::<Message>(
            r#"{"ok":false,"error_code":429,"description":"Too Many Requests","parameters":{"retry_after":7}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TelegramError::RateLimited { timeout } if timeout == Duration::from_secs(7)
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode::<Message>("<html>bad gateway</html>"),
            Err(TelegramError::Scheme(_))
        ));
    }

    #[test]
    fn test_send_photo_body() {
        let chat = ChatId::Username("@chan".to_owned());
        let body = SendPhotoBody {
            chat_id: &chat,
            photo: "https://example.com/a.jpg",
            caption: Some("*hi*"),
            parse_mode: Some(ParseMode::Markdown),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"chat_id":"@chan","photo":"https://example.com/a.jpg","caption":"*hi*","parse_mode":"Markdown"}"#
        );
    }
}
