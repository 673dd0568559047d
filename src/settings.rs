use crate::error::{Result as AppResult, SettingsError};
use crate::quiz::{Config as QuizConfig, ConfigBuilder, Difficulty, build_config};
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const DEFAULT_TICK_MILLIS: u64 = 1000;
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Where the quiz comes from, plus overrides applied on top of the file.
#[derive(Debug, Deserialize)]
pub struct QuizSource {
    pub path: String,
    #[serde(default, deserialize_with = "deserialize_optional_difficulty")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub shuffle_questions: Option<bool>,
    #[serde(default)]
    pub shuffle_answers: Option<bool>,
    #[serde(default)]
    pub max_questions: Option<i64>,
}

impl QuizSource {
    pub fn apply_overrides(&self, builder: ConfigBuilder) -> ConfigBuilder {
        let mut builder = builder;
        if let Some(difficulty) = self.difficulty {
            builder = builder.with_difficulty(difficulty);
        }
        if let Some(shuffle) = self.shuffle_questions {
            builder = builder.with_shuffle_questions(shuffle);
        }
        if let Some(shuffle) = self.shuffle_answers {
            builder = builder.with_shuffle_answers(shuffle);
        }
        if let Some(max) = self.max_questions {
            builder = builder.with_max_questions(max);
        }
        builder
    }

    /// Reads the quiz file and applies overrides. An unreadable or malformed
    /// file yields the fallback quiz.
    #[tracing::instrument(skip(self), fields(quiz.path = %self.path))]
    pub async fn load(&self) -> QuizConfig {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                tracing::error!(error = %err, "Quiz file is not valid JSON");
                serde_json::Value::Null
            }),
            Err(err) => {
                tracing::error!(error = %err, "Failed to read quiz file");
                serde_json::Value::Null
            }
        };
        self.apply_overrides(build_config(&raw)).build()
    }
}

#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    pub tick_millis: u64,
    pub buffer_size: usize,
}

impl SessionSettings {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_millis: DEFAULT_TICK_MILLIS,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppSettings {
    pub quiz: QuizSource,
    pub session: SessionSettings,
}

pub fn load_settings() -> AppResult<AppSettings> {
    let builder = Config::builder()
        .add_source(File::with_name("quiz_settings").required(false))
        .add_source(
            Environment::with_prefix("QUIZ")
                .separator("__")
                .try_parsing(true),
        )
        .set_default("quiz.path", "quiz.json")
        .and_then(|b| b.set_default("session.tick_millis", DEFAULT_TICK_MILLIS))
        .and_then(|b| b.set_default("session.buffer_size", DEFAULT_BUFFER_SIZE as u64))
        .map_err(|e| SettingsError::Load(e.to_string()))?;

    let settings: AppSettings = builder
        .build()
        .map_err(|e| SettingsError::Load(e.to_string()))?
        .try_deserialize()?;

    validate(settings)
}

fn validate(settings: AppSettings) -> AppResult<AppSettings> {
    if settings.session.tick_millis == 0 {
        return Err(SettingsError::InvalidValue("session.tick_millis must be positive".to_string()).into());
    }
    if settings.session.buffer_size == 0 {
        return Err(SettingsError::InvalidValue("session.buffer_size must be positive".to_string()).into());
    }
    Ok(settings)
}

fn deserialize_optional_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().map(Difficulty::from_label))
}
