use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ConfigError;
use crate::quiz::difficulty::Difficulty;

pub const DEFAULT_MAX_QUESTIONS: usize = 10;
pub const DEFAULT_TITLE: &str = "Rust Quiz!";

const ANSWER_TYPE_CORRECT: &str = "correct";

const FALLBACK_PROMPT: &str = "This quiz was not configured correctly. \
    Check that every question has a \"question\" text and an \"answers\" list.";
const FALLBACK_ANSWER: &str = "Understood";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Answer {
    Correct(String),
    Invalid(String),
}

impl Answer {
    pub fn text(&self) -> &str {
        match self {
            Answer::Correct(text) | Answer::Invalid(text) => text,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Answer::Correct(_))
    }
}

/// Extra material shown alongside a question prompt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum QuestionContent {
    Code(String),
    Image(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub answers: Vec<Answer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<QuestionContent>,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            prompt: prompt.into(),
            answers,
            content: None,
        }
    }

    pub fn with_content(mut self, content: QuestionContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn correct_answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter().filter(|answer| answer.is_correct())
    }
}

// External record shape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuiz {
    provided_questions: Vec<RawQuestion>,
    #[serde(default)]
    shuffle_questions: Option<bool>,
    #[serde(default)]
    shuffle_answers: Option<bool>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    max_questions: Option<i64>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    question: String,
    answers: Vec<RawTypedValue>,
    #[serde(default)]
    additional_content: Option<RawTypedValue>,
}

#[derive(Debug, Deserialize)]
struct RawTypedValue {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

impl RawTypedValue {
    fn into_answer(self) -> Answer {
        if self.kind == ANSWER_TYPE_CORRECT {
            Answer::Correct(self.value)
        } else {
            Answer::Invalid(self.value)
        }
    }

    fn into_content(self) -> Result<QuestionContent, ConfigError> {
        match self.kind.as_str() {
            "code" => Ok(QuestionContent::Code(self.value)),
            "image" => Ok(QuestionContent::Image(self.value)),
            _ => Err(ConfigError::UnsupportedContent(self.kind)),
        }
    }
}

impl RawQuestion {
    fn into_question(self) -> Result<Question, ConfigError> {
        let content = self
            .additional_content
            .map(RawTypedValue::into_content)
            .transpose()?;
        Ok(Question {
            prompt: self.question,
            answers: self
                .answers
                .into_iter()
                .map(RawTypedValue::into_answer)
                .collect(),
            content,
        })
    }
}

fn clamp_max_questions(requested: i64) -> usize {
    if requested < 1 {
        tracing::warn!(
            max_questions = requested,
            "maxQuestions must be at least 1, clamping"
        );
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

/// Immutable description of one quiz.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    questions: Vec<Question>,
    shuffle_questions: bool,
    shuffle_answers: bool,
    difficulty: Difficulty,
    max_questions: usize,
    title: String,
}

impl Default for Config {
    /// The single self-describing question used when the input is unusable.
    fn default() -> Self {
        Config::new(vec![Question::new(
            FALLBACK_PROMPT,
            vec![Answer::Correct(FALLBACK_ANSWER.to_string())],
        )])
    }
}

impl Config {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            shuffle_questions: false,
            shuffle_answers: false,
            difficulty: Difficulty::Normal,
            max_questions: DEFAULT_MAX_QUESTIONS,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Strict decode of the external record.
    #[tracing::instrument(skip(raw))]
    pub fn decode(raw: &JsonValue) -> Result<Self, ConfigError> {
        let raw_quiz = RawQuiz::deserialize(raw)?;

        let questions = raw_quiz
            .provided_questions
            .into_iter()
            .map(RawQuestion::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        let config = Config {
            questions,
            shuffle_questions: raw_quiz.shuffle_questions.unwrap_or(false),
            shuffle_answers: raw_quiz.shuffle_answers.unwrap_or(false),
            difficulty: raw_quiz
                .difficulty
                .as_deref()
                .map(Difficulty::from_label)
                .unwrap_or_default(),
            max_questions: raw_quiz
                .max_questions
                .map(clamp_max_questions)
                .unwrap_or(DEFAULT_MAX_QUESTIONS),
            title: raw_quiz.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        };

        tracing::debug!(
            questions.count = config.questions.len(),
            difficulty = config.difficulty.label(),
            max_questions = config.max_questions,
            "Decoded quiz configuration"
        );
        Ok(config)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }

    pub fn shuffle_answers(&self) -> bool {
        self.shuffle_answers
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Decodes the external record, falling back to [`Config::default`] on any error.
pub fn create_config(raw: &JsonValue) -> Config {
    Config::decode(raw).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Invalid quiz configuration, using fallback quiz");
        Config::default()
    })
}

pub fn build_config(raw: &JsonValue) -> ConfigBuilder {
    ConfigBuilder::new(create_config(raw))
}

/// Overrides applied to a decoded [`Config`] before a game is created.
///
/// Every `with_*` call consumes the builder and returns a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self {
            config: Config {
                difficulty,
                ..self.config
            },
        }
    }

    pub fn with_shuffle_questions(self, shuffle_questions: bool) -> Self {
        Self {
            config: Config {
                shuffle_questions,
                ..self.config
            },
        }
    }

    pub fn with_shuffle_answers(self, shuffle_answers: bool) -> Self {
        Self {
            config: Config {
                shuffle_answers,
                ..self.config
            },
        }
    }

    pub fn with_max_questions(self, max_questions: i64) -> Self {
        Self {
            config: Config {
                max_questions: clamp_max_questions(max_questions),
                ..self.config
            },
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            config: Config {
                title: title.into(),
                ..self.config
            },
        }
    }

    pub fn build(self) -> Config {
        self.config
    }
}
