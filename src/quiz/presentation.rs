use serde::Serialize;

use crate::quiz::Quiz;
use crate::quiz::config::{Answer, Question};
use crate::quiz::difficulty::Difficulty;
use crate::quiz::game::{ChosenAnswer, Event, GameState};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marking {
    Correct,
    Invalid,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub answer: Answer,
    pub marking: Option<Marking>,
    pub disabled: bool,
}

/// Applies the difficulty's answer policy to a question's answers, in order.
pub fn answer_options(difficulty: Difficulty, question: &Question) -> Vec<AnswerOption> {
    let policy = difficulty.answer_policy();
    question
        .answers
        .iter()
        .map(|answer| AnswerOption {
            answer: answer.clone(),
            marking: policy.marks_answers.then(|| {
                if answer.is_correct() {
                    Marking::Correct
                } else {
                    Marking::Invalid
                }
            }),
            disabled: policy.disables_correct && answer.is_correct(),
        })
        .collect()
}

/// Something the user can do right now.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Choose(Answer),
    Skip,
    Continue,
    Restart,
    Stop,
}

impl Action {
    pub fn into_event(self) -> Event {
        match self {
            Action::Choose(answer) => Event::ChooseAnswer(ChosenAnswer::Answered(answer)),
            Action::Skip => Event::ChooseAnswer(ChosenAnswer::Skipped),
            Action::Continue => Event::Continue,
            Action::Restart => Event::Restart,
            Action::Stop => Event::Stop,
        }
    }
}

/// Disabled answers are never offered, so an Impossible quiz cannot record a
/// correct answer through this list.
pub fn available_actions(quiz: &Quiz) -> Vec<Action> {
    let Some(game) = quiz.game() else {
        return Vec::new();
    };

    let mut actions = match game.state() {
        GameState::AskingQuestion { question, .. } => {
            let mut actions: Vec<Action> =
                answer_options(game.config().difficulty(), question)
                    .into_iter()
                    .filter(|option| !option.disabled)
                    .map(|option| Action::Choose(option.answer))
                    .collect();
            actions.push(Action::Skip);
            actions
        }
        GameState::ReviewingAnswer { .. } => vec![Action::Continue],
        GameState::ShufflingQuestions
        | GameState::ShufflingAnswers(_)
        | GameState::Concluded => Vec::new(),
    };
    actions.push(Action::Restart);
    actions.push(Action::Stop);
    actions
}
