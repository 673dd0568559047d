use serde::{Deserialize, Serialize};

use crate::quiz::config::{Answer, Question};
use crate::quiz::game::{AnsweredQuestion, ChosenAnswer};

/// End-of-quiz tallies. Every history entry lands in exactly one bucket.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub correct: usize,
    pub invalid: usize,
    pub skipped: usize,
    pub timed_out: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.correct + self.invalid + self.skipped + self.timed_out
    }
}

pub fn summarize(history: &[AnsweredQuestion]) -> Summary {
    history
        .iter()
        .fold(Summary::default(), |mut summary, entry| {
            match &entry.chosen_answer {
                ChosenAnswer::Answered(Answer::Correct(_)) => summary.correct += 1,
                ChosenAnswer::Answered(Answer::Invalid(_)) => summary.invalid += 1,
                ChosenAnswer::Skipped => summary.skipped += 1,
                ChosenAnswer::TimedOut => summary.timed_out += 1,
            }
            summary
        })
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Invalid,
    Skipped,
    TimedOut,
}

/// What the review screen tells the user about one resolved question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub verdict: Verdict,
    /// Every acceptable answer of the question, not just the chosen one.
    pub correct_answers: Vec<String>,
}

impl Review {
    pub fn message(&self) -> String {
        let headline = match self.verdict {
            Verdict::Correct => "Correct!",
            Verdict::Invalid => "Wrong answer.",
            Verdict::Skipped => "Skipped.",
            Verdict::TimedOut => "Time is up!",
        };
        match self.correct_answers.as_slice() {
            [] => format!("{} This question had no correct answer.", headline),
            [only] => format!("{} The correct answer is: {}", headline, only),
            many => format!("{} Correct answers: {}", headline, many.join(", ")),
        }
    }
}

pub fn review(question: &Question, chosen: &ChosenAnswer) -> Review {
    let verdict = match chosen {
        ChosenAnswer::Answered(answer) if answer.is_correct() => Verdict::Correct,
        ChosenAnswer::Answered(_) => Verdict::Invalid,
        ChosenAnswer::Skipped => Verdict::Skipped,
        ChosenAnswer::TimedOut => Verdict::TimedOut,
    };
    Review {
        verdict,
        correct_answers: question
            .correct_answers()
            .map(|answer| answer.text().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(chosen_answer: ChosenAnswer) -> AnsweredQuestion {
        AnsweredQuestion {
            question: Question::new("q", Vec::new()),
            chosen_answer,
        }
    }

    #[test]
    fn test_summarize_empty_history() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_summarize_buckets_every_entry_once() {
        let history = vec![
            entry(ChosenAnswer::Answered(Answer::Correct("a".to_string()))),
            entry(ChosenAnswer::Answered(Answer::Correct("b".to_string()))),
            entry(ChosenAnswer::Answered(Answer::Invalid("c".to_string()))),
            entry(ChosenAnswer::Skipped),
            entry(ChosenAnswer::TimedOut),
            entry(ChosenAnswer::TimedOut),
            entry(ChosenAnswer::TimedOut),
        ];
        let summary = summarize(&history);
        assert_eq!(
            summary,
            Summary {
                correct: 2,
                invalid: 1,
                skipped: 1,
                timed_out: 3
            }
        );
        assert_eq!(summary.total(), history.len());
    }

    #[test]
    fn test_review_lists_all_correct_answers() {
        let question = Question::new(
            "Pick a prime",
            vec![
                Answer::Correct("2".to_string()),
                Answer::Invalid("4".to_string()),
                Answer::Correct("3".to_string()),
            ],
        );
        let result = review(
            &question,
            &ChosenAnswer::Answered(Answer::Correct("3".to_string())),
        );
        assert_eq!(result.verdict, Verdict::Correct);
        assert_eq!(result.correct_answers, vec!["2", "3"]);
        assert_eq!(result.message(), "Correct! Correct answers: 2, 3");

        let result = review(&question, &ChosenAnswer::TimedOut);
        assert_eq!(result.verdict, Verdict::TimedOut);
    }

    #[test]
    fn test_review_of_answerless_question() {
        let question = Question::new("Just skip", Vec::new());
        let result = review(&question, &ChosenAnswer::Skipped);
        assert_eq!(result.verdict, Verdict::Skipped);
        assert!(result.correct_answers.is_empty());
        assert_eq!(
            result.message(),
            "Skipped. This question had no correct answer."
        );
    }

    #[test]
    fn test_review_invalid_single_answer_message() {
        let question = Question::new(
            "2+2?",
            vec![
                Answer::Correct("4".to_string()),
                Answer::Invalid("5".to_string()),
            ],
        );
        let result = review(
            &question,
            &ChosenAnswer::Answered(Answer::Invalid("5".to_string())),
        );
        assert_eq!(result.message(), "Wrong answer. The correct answer is: 4");
    }
}
