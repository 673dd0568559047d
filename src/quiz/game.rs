use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::quiz::config::{Answer, Config, Question};

pub type CountdownSeconds = u32;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "answer")]
pub enum ChosenAnswer {
    Answered(Answer),
    Skipped,
    TimedOut,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub chosen_answer: ChosenAnswer,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum GameState {
    ShufflingQuestions,
    ShufflingAnswers(Question),
    AskingQuestion {
        question: Question,
        countdown: Option<CountdownSeconds>,
    },
    ReviewingAnswer {
        question: Question,
        chosen: ChosenAnswer,
    },
    Concluded,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::ShufflingQuestions => "ShufflingQuestions",
            GameState::ShufflingAnswers(_) => "ShufflingAnswers",
            GameState::AskingQuestion { .. } => "AskingQuestion",
            GameState::ReviewingAnswer { .. } => "ReviewingAnswer",
            GameState::Concluded => "Concluded",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum Event {
    QuestionsShuffled(Vec<Question>),
    AnswersShuffled(Vec<Answer>),
    Tick,
    ChooseAnswer(ChosenAnswer),
    Continue,
    Restart,
    /// Handled by [`crate::quiz::Quiz`]; a running game ignores it.
    Stop,
}

/// Asynchronous work requested by a transition. The driver performs it and
/// feeds the resulting [`Event`] back into the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShuffleQuestions(Vec<Question>),
    ShuffleAnswers(Vec<Answer>),
}

impl Effect {
    /// Uniformly permutes the payload and wraps it in the completion event.
    pub fn run<R: Rng + ?Sized>(self, rng: &mut R) -> Event {
        match self {
            Effect::ShuffleQuestions(mut questions) => {
                questions.shuffle(rng);
                Event::QuestionsShuffled(questions)
            }
            Effect::ShuffleAnswers(mut answers) => {
                answers.shuffle(rng);
                Event::AnswersShuffled(answers)
            }
        }
    }
}

/// One run through a quiz.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Game {
    #[serde(skip_serializing)]
    config: Arc<Config>,
    state: GameState,
    queue: VecDeque<Question>,
    /// Most recent first.
    history: Vec<AnsweredQuestion>,
}

pub fn start_game(config: Arc<Config>) -> (Game, Option<Effect>) {
    let mut game = Game {
        config,
        state: GameState::Concluded,
        queue: VecDeque::new(),
        history: Vec::new(),
    };

    if game.config.questions().is_empty() {
        tracing::debug!("Quiz has no questions, concluding immediately");
        return (game, None);
    }

    if game.config.shuffle_questions() {
        game.state = GameState::ShufflingQuestions;
        let effect = Effect::ShuffleQuestions(game.config.questions().to_vec());
        return (game, Some(effect));
    }

    let mut questions = game.config.questions().to_vec().into_iter();
    match questions.next() {
        Some(first) => {
            game.queue = capped_queue(&game.config, questions);
            game.ask(first)
        }
        None => (game, None),
    }
}

fn capped_queue(config: &Config, rest: impl Iterator<Item = Question>) -> VecDeque<Question> {
    rest.take(config.max_questions().saturating_sub(1)).collect()
}

impl Game {
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn queue(&self) -> &VecDeque<Question> {
        &self.queue
    }

    pub fn history(&self) -> &[AnsweredQuestion] {
        &self.history
    }

    /// Present while a question is being asked against the clock; the driver
    /// should deliver [`Event::Tick`] once per second exactly while this is `Some`.
    pub fn active_countdown(&self) -> Option<CountdownSeconds> {
        match &self.state {
            GameState::AskingQuestion { countdown, .. } => *countdown,
            _ => None,
        }
    }

    /// Moves `question` into the asking phase, shuffling its answers first if configured.
    fn ask(mut self, question: Question) -> (Game, Option<Effect>) {
        if self.config.shuffle_answers() {
            let effect = Effect::ShuffleAnswers(question.answers.clone());
            self.state = GameState::ShufflingAnswers(question);
            (self, Some(effect))
        } else {
            self.state = GameState::AskingQuestion {
                question,
                countdown: self.config.difficulty().countdown(),
            };
            (self, None)
        }
    }

    fn resolve(mut self, question: Question, chosen: ChosenAnswer) -> (Game, Option<Effect>) {
        tracing::debug!(
            question.prompt = %question.prompt,
            chosen = ?chosen,
            "Question resolved"
        );
        self.history.insert(
            0,
            AnsweredQuestion {
                question: question.clone(),
                chosen_answer: chosen.clone(),
            },
        );
        self.state = GameState::ReviewingAnswer { question, chosen };
        (self, None)
    }

    /// Applies one event. Events that do not pair with the current state leave
    /// the game untouched.
    pub fn reduce(mut self, event: Event) -> (Game, Option<Effect>) {
        let state = std::mem::replace(&mut self.state, GameState::Concluded);
        let from = state.name();

        let (game, effect) = match (state, event) {
            (GameState::ShufflingQuestions, Event::QuestionsShuffled(questions)) => {
                let mut questions = questions.into_iter();
                match questions.next() {
                    Some(first) => {
                        self.queue = capped_queue(&self.config, questions);
                        self.ask(first)
                    }
                    None => {
                        self.queue.clear();
                        (self, None)
                    }
                }
            }
            (GameState::ShufflingAnswers(question), Event::AnswersShuffled(answers)) => {
                self.state = GameState::AskingQuestion {
                    question: Question {
                        answers,
                        ..question
                    },
                    countdown: self.config.difficulty().countdown(),
                };
                (self, None)
            }
            (
                GameState::AskingQuestion {
                    question,
                    countdown: Some(remaining),
                },
                Event::Tick,
            ) => {
                if remaining <= 1 {
                    self.resolve(question, ChosenAnswer::TimedOut)
                } else {
                    self.state = GameState::AskingQuestion {
                        question,
                        countdown: Some(remaining - 1),
                    };
                    (self, None)
                }
            }
            (GameState::AskingQuestion { question, .. }, Event::ChooseAnswer(chosen)) => {
                self.resolve(question, chosen)
            }
            (GameState::ReviewingAnswer { .. }, Event::Continue) => match self.queue.pop_front() {
                Some(next) => self.ask(next),
                None => (self, None),
            },
            (_, Event::Restart) => start_game(self.config),
            (state, event) => {
                tracing::trace!(state = from, event = ?event, "Ignoring event");
                self.state = state;
                return (self, None);
            }
        };

        if game.state.name() != from {
            tracing::debug!(from, to = game.state.name(), "Game state changed");
        }
        (game, effect)
    }
}
