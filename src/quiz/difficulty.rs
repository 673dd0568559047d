use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Speedy,
    Impossible,
}

/// How answers are presented while a question is being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerPolicy {
    /// Answers carry a visible correct/invalid marking.
    pub marks_answers: bool,
    /// Correct answers cannot be chosen.
    pub disables_correct: bool,
}

impl Difficulty {
    pub fn all() -> Vec<Self> {
        vec![
            Difficulty::Easy,
            Difficulty::Normal,
            Difficulty::Hard,
            Difficulty::Speedy,
            Difficulty::Impossible,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Speedy => "speedy",
            Difficulty::Impossible => "impossible",
        }
    }

    /// Decodes a difficulty literal. Unknown input falls back to `Normal`.
    pub fn from_label(label: &str) -> Self {
        let wanted = label.trim().to_lowercase();
        match Self::all().into_iter().find(|d| d.label() == wanted) {
            Some(difficulty) => difficulty,
            None => {
                tracing::warn!(difficulty = %label, "Unknown difficulty, using normal");
                Difficulty::Normal
            }
        }
    }

    /// Seconds allowed per question, if the question is timed at all.
    pub fn countdown(&self) -> Option<u32> {
        match self {
            Difficulty::Easy | Difficulty::Normal => None,
            Difficulty::Hard => Some(10),
            Difficulty::Speedy => Some(2),
            Difficulty::Impossible => Some(5),
        }
    }

    pub fn answer_policy(&self) -> AnswerPolicy {
        match self {
            Difficulty::Easy => AnswerPolicy {
                marks_answers: true,
                disables_correct: false,
            },
            Difficulty::Normal | Difficulty::Hard | Difficulty::Speedy => AnswerPolicy {
                marks_answers: false,
                disables_correct: false,
            },
            Difficulty::Impossible => AnswerPolicy {
                marks_answers: false,
                disables_correct: true,
            },
        }
    }
}
