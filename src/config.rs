use std::{
    fmt::Display,
    fs::File,
    io::{self, BufReader},
    path::Path,
    str::FromStr,
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Tunables read from the optional YAML settings file.
/// Every field falls back to its default when omitted.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: ActiveWindow,
    /// Seconds between two scheduler ticks.
    pub interval_secs: u64,
    /// Long-poll timeout for `getUpdates`.
    pub poll_timeout_secs: u64,
    /// Upper bound for a single image lookup.
    pub image_timeout_secs: u64,
    /// Send the "bot started" message to the channel on startup.
    pub announce_startup: bool,
}

/// Daily range of local hours (both ends inclusive) in which scheduled posts go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct ActiveWindow {
    start_hour: u32,
    end_hour: u32,
}
#[derive(Deserialize)]
struct WindowBounds {
    start_hour: u32,
    end_hour: u32,
}

/// Telegram chat identifier: a numeric id or a public `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Yaml(serde_yaml::Error),
    Window { start_hour: u32, end_hour: u32 },
    /// Name of a duration setting that was set to zero.
    ZeroDuration(&'static str),
    ChatId(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Yaml(e) => e.fmt(f),
            Self::Window {
                start_hour,
                end_hour,
            } => write!(
                f,
                "invalid active window {start_hour}..={end_hour}: hours must be 0-23 and start <= end"
            ),
            Self::ZeroDuration(name) => write!(f, "{name} must be greater than zero"),
            Self::ChatId(s) => write!(f, "`{s}` is neither a numeric chat id nor an @username"),
        }
    }
}
impl std::error::Error for ConfigError {}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: ActiveWindow::default(),
            interval_secs: 60 * 60,
            poll_timeout_secs: 30,
            image_timeout_secs: 15,
            announce_startup: true,
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings: Self = match path {
            Some(path) => {
                let file = BufReader::new(File::open(path).map_err(ConfigError::Io)?);
                serde_yaml::from_reader(file).map_err(ConfigError::Yaml)?
            }
            None => Self::default(),
        };

        settings.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let durations = [
            ("interval_secs", self.interval_secs),
            ("poll_timeout_secs", self.poll_timeout_secs),
            ("image_timeout_secs", self.image_timeout_secs),
        ];
        if let Some((name, _)) = durations.into_iter().find(|&(_, secs)| secs == 0) {
            return Err(ConfigError::ZeroDuration(name));
        }

        Ok(self)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

impl ActiveWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ConfigError> {
        if start_hour > 23 || end_hour > 23 || start_hour > end_hour {
            return Err(ConfigError::Window {
                start_hour,
                end_hour,
            });
        }

        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }
}
impl Default for ActiveWindow {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 23,
        }
    }
}
impl TryFrom<WindowBounds> for ActiveWindow {
    type Error = ConfigError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start_hour, bounds.end_hour)
    }
}
impl Display for ActiveWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00-{:02}:59", self.start_hour, self.end_hour)
    }
}

impl FromStr for ChatId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse() {
            return Ok(Self::Id(id));
        }

        let valid_name = |name: &str| {
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        };
        match s.strip_prefix('@') {
            Some(name) if valid_name(name) => Ok(Self::Username(s.to_owned())),
            _ => Err(ConfigError::ChatId(s.to_owned())),
        }
    }
}
impl Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(v) => v.fmt(f),
            Self::Username(s) => f.write_str(s),
        }
    }
}
