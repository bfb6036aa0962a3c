use std::{fmt::Display, str::FromStr};

use rand::Rng;
use reqwest::Url;
use tokio::sync::Mutex;
use tracing::debug;

use crate::image::ImageSource;

pub use history::today_in_history;

mod history;
pub mod tables;

use tables::{FACTS, JOKES, LANGUAGES, LANGUAGE_INFO, QUOTES, TIPS, TOPICS, TOPIC_INFO};

/// Appended to every post.
pub const HASHTAGS: &str = "\n\n#IT #Dasturlash #Programmer #Coding #Developer #Tech #Uzbekistan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostType {
    Fact,
    Tip,
    Language,
    Topic,
    Joke,
    Quote,
}

/// Ready-to-send post. `text` is Telegram markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub text: String,
    pub image: Option<Url>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownPostType(pub String);

impl Display for UnknownPostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown post type `{}`", self.0)
    }
}
impl std::error::Error for UnknownPostType {}

/// Builds posts from the static tables and attaches an image from `I`.
pub struct ContentGenerator<R, I> {
    rng: Mutex<R>,
    images: I,
}

impl PostType {
    pub const ALL: [PostType; 6] = [
        Self::Fact,
        Self::Tip,
        Self::Language,
        Self::Topic,
        Self::Joke,
        Self::Quote,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fact => "fact",
            Self::Tip => "tip",
            Self::Language => "language",
            Self::Topic => "topic",
            Self::Joke => "joke",
            Self::Quote => "quote",
        }
    }
}
impl FromStr for PostType {
    type Err = UnknownPostType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPostType(s.to_owned()))
    }
}
impl Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<R: Rng + Send, I: ImageSource> ContentGenerator<R, I> {
    pub fn new(rng: R, images: I) -> Self {
        Self {
            rng: Mutex::new(rng),
            images,
        }
    }

    /// Picks content (a random type when `post_type` is `None`) and looks up an image.
    /// A failed image lookup leaves the post without one.
    pub async fn generate_post(&self, post_type: Option<PostType>) -> Post {
        let (post_type, text) = {
            let mut rng = self.rng.lock().await;
            compose(&mut *rng, post_type)
        };
        let image = self.images.get_random_image().await;
        debug!(%post_type, has_image = image.is_some(), "Generated post");

        Post { text, image }
    }
}

/// Assembles the post text: header, content, hashtags.
pub fn compose<R: Rng>(rng: &mut R, post_type: Option<PostType>) -> (PostType, String) {
    let post_type = match post_type {
        Some(t) => t,
        None => PostType::random(rng),
    };

    let content = match post_type {
        PostType::Fact => format!("📊 *IT Fact*\n\n{}", pick(rng, &FACTS)),
        PostType::Tip => format!("💡 *Dasturchi Maslahati*\n\n{}", pick(rng, &TIPS)),
        PostType::Language => {
            let lang = pick(rng, &LANGUAGES);
            format!("🔷 *{lang} dasturlash tili*\n\n{}", language_info(lang))
        }
        PostType::Topic => {
            let topic = pick(rng, &TOPICS);
            format!("🔬 *{topic}*\n\n{}", topic_info(topic))
        }
        PostType::Joke => format!("😄 *Dasturchi Hazili*\n\n{}", pick(rng, &JOKES)),
        PostType::Quote => format!("📝 *Dasturchi Iqtibosi*\n\n{}", pick(rng, &QUOTES)),
    };

    (post_type, content + HASHTAGS)
}

pub fn language_info(language: &str) -> String {
    lookup(&LANGUAGE_INFO, language)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{language} - zamonaviy dasturlash tili"))
}

pub fn topic_info(topic: &str) -> String {
    lookup(&TOPIC_INFO, topic)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{topic} - muhim IT yo'nalishi"))
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn pick<R: Rng>(rng: &mut R, table: &[&'static str]) -> &'static str {
    table[rng.gen_range(0..table.len())]
}
