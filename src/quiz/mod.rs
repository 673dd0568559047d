use serde::Serialize;
use std::sync::Arc;

pub mod config;
pub mod difficulty;
pub mod game;
pub mod presentation;
pub mod summary;

pub use config::{
    Answer, Config, ConfigBuilder, Question, QuestionContent, build_config, create_config,
};
pub use difficulty::{AnswerPolicy, Difficulty};
pub use game::{
    AnsweredQuestion, ChosenAnswer, CountdownSeconds, Effect, Event, Game, GameState, start_game,
};
pub use summary::{Review, Summary, Verdict, review, summarize};

/// The embeddable widget: either dormant or running a game.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "status", content = "game")]
pub enum Quiz {
    #[default]
    Inactive,
    Active(Game),
}

impl Quiz {
    pub fn start(config: Arc<Config>) -> (Quiz, Option<Effect>) {
        let (game, effect) = start_game(config);
        (Quiz::Active(game), effect)
    }

    /// `Stop` tears the game down; an inactive quiz ignores every event.
    pub fn reduce(self, event: Event) -> (Quiz, Option<Effect>) {
        match (self, event) {
            (Quiz::Active(_), Event::Stop) => {
                tracing::debug!("Quiz stopped");
                (Quiz::Inactive, None)
            }
            (Quiz::Active(game), event) => {
                let (game, effect) = game.reduce(event);
                (Quiz::Active(game), effect)
            }
            (Quiz::Inactive, event) => {
                tracing::trace!(event = ?event, "Ignoring event for inactive quiz");
                (Quiz::Inactive, None)
            }
        }
    }

    pub fn game(&self) -> Option<&Game> {
        match self {
            Quiz::Active(game) => Some(game),
            Quiz::Inactive => None,
        }
    }

    pub fn active_countdown(&self) -> Option<CountdownSeconds> {
        self.game().and_then(Game::active_countdown)
    }
}
