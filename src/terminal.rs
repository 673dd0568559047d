use std::fmt;

use crate::quiz::presentation::{Action, Marking, answer_options, available_actions};
use crate::quiz::{GameState, Question, QuestionContent, Quiz, review, summarize};

/// Plain-text rendering of the quiz for a line-oriented terminal.
pub fn render(quiz: &Quiz) -> String {
    Screen(quiz).to_string()
}

struct Screen<'a>(&'a Quiz);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(game) = self.0.game() else {
            return writeln!(f, "Quiz stopped. Type 'start' to begin again.");
        };
        let config = game.config();
        writeln!(f, "== {} ==", config.title())?;

        match game.state() {
            GameState::ShufflingQuestions | GameState::ShufflingAnswers(_) => {
                writeln!(f, "Shuffling...")
            }
            GameState::AskingQuestion {
                question,
                countdown,
            } => {
                write_question(f, question)?;
                if let Some(seconds) = countdown {
                    writeln!(f, "[{}s left]", seconds)?;
                }
                let mut number = 0;
                for option in answer_options(config.difficulty(), question) {
                    if option.disabled {
                        writeln!(f, "   -  {} (disabled)", option.answer.text())?;
                        continue;
                    }
                    number += 1;
                    let marking = match option.marking {
                        Some(Marking::Correct) => " (correct)",
                        Some(Marking::Invalid) => " (invalid)",
                        None => "",
                    };
                    writeln!(f, "  {:>2}) {}{}", number, option.answer.text(), marking)?;
                }
                writeln!(f, "   s) Skip")
            }
            GameState::ReviewingAnswer { question, chosen } => {
                writeln!(f, "{}", question.prompt)?;
                writeln!(f, "{}", review(question, chosen).message())?;
                writeln!(f, "Press enter to continue.")
            }
            GameState::Concluded => {
                let summary = summarize(game.history());
                writeln!(
                    f,
                    "Finished! Correct: {}  Invalid: {}  Skipped: {}  Timed out: {}",
                    summary.correct, summary.invalid, summary.skipped, summary.timed_out
                )?;
                writeln!(f, "Type 'r' to restart or 'q' to stop.")
            }
        }
    }
}

fn write_question(f: &mut fmt::Formatter<'_>, question: &Question) -> fmt::Result {
    writeln!(f, "{}", question.prompt)?;
    match &question.content {
        Some(QuestionContent::Code(code)) => {
            for line in code.lines() {
                writeln!(f, "    {}", line)?;
            }
            Ok(())
        }
        Some(QuestionContent::Image(src)) => writeln!(f, "[image: {}]", src),
        None => Ok(()),
    }
}

/// Maps a typed line onto one of the actions currently on offer.
pub fn parse_command(line: &str, quiz: &Quiz) -> Option<Action> {
    let actions = available_actions(quiz);
    let wanted = match line.trim().to_lowercase().as_str() {
        "s" | "skip" => Action::Skip,
        "" | "c" | "continue" => Action::Continue,
        "r" | "restart" => Action::Restart,
        "q" | "quit" | "stop" => Action::Stop,
        other => {
            let index: usize = other.parse().ok()?;
            return actions
                .into_iter()
                .filter(|action| matches!(action, Action::Choose(_)))
                .nth(index.checked_sub(1)?);
        }
    };
    actions.into_iter().find(|action| *action == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Answer, Config, ConfigBuilder, Difficulty, Event};
    use std::sync::Arc;

    fn quiz_with(difficulty: Difficulty) -> Quiz {
        let question = Question::new(
            "2+2?",
            vec![
                Answer::Correct("4".to_string()),
                Answer::Invalid("5".to_string()),
            ],
        )
        .with_content(QuestionContent::Code("2 + 2".to_string()));
        let config = ConfigBuilder::new(Config::new(vec![question]))
            .with_difficulty(difficulty)
            .build();
        Quiz::start(Arc::new(config)).0
    }

    #[test]
    fn test_render_asking_question() {
        let text = render(&quiz_with(Difficulty::Hard));
        assert!(text.contains("== Rust Quiz! =="));
        assert!(text.contains("2+2?"));
        assert!(text.contains("    2 + 2"));
        assert!(text.contains("[10s left]"));
        assert!(text.contains("   1) 4"));
        assert!(text.contains("   2) 5"));
        assert!(text.contains("s) Skip"));
    }

    #[test]
    fn test_render_easy_marks_answers() {
        let text = render(&quiz_with(Difficulty::Easy));
        assert!(text.contains("1) 4 (correct)"));
        assert!(text.contains("2) 5 (invalid)"));
    }

    #[test]
    fn test_numbers_skip_disabled_answers() {
        let quiz = quiz_with(Difficulty::Impossible);
        let text = render(&quiz);
        assert!(text.contains("4 (disabled)"));
        assert!(text.contains("   1) 5"));
        assert_eq!(
            parse_command("1", &quiz),
            Some(Action::Choose(Answer::Invalid("5".to_string())))
        );
        assert_eq!(parse_command("2", &quiz), None);
    }

    #[test]
    fn test_parse_command_respects_current_state() {
        let quiz = quiz_with(Difficulty::Normal);
        assert_eq!(parse_command("", &quiz), None);
        assert_eq!(parse_command("0", &quiz), None);
        assert_eq!(parse_command("banana", &quiz), None);
        assert_eq!(parse_command(" S ", &quiz), Some(Action::Skip));

        let (quiz, _) = quiz.reduce(Event::ChooseAnswer(crate::quiz::ChosenAnswer::Skipped));
        assert_eq!(parse_command("", &quiz), Some(Action::Continue));
        assert_eq!(parse_command("1", &quiz), None);
        let text = render(&quiz);
        assert!(text.contains("Skipped. The correct answer is: 4"));
    }

    #[test]
    fn test_render_shows_whole_question_screen() {
        let text = render(&quiz_with(Difficulty::Normal));
        assert_eq!(
            text,
            "== Rust Quiz! ==\n2+2?\n    2 + 2\n   1) 4\n   2) 5\n   s) Skip\n"
        );
    }

    #[test]
    fn test_render_summary_and_inactive() {
        let quiz = quiz_with(Difficulty::Normal);
        let (quiz, _) = quiz.reduce(Action::Choose(Answer::Correct("4".to_string())).into_event());
        let (quiz, _) = quiz.reduce(Event::Continue);
        let text = render(&quiz);
        assert!(text.contains("Correct: 1  Invalid: 0  Skipped: 0  Timed out: 0"));

        let (quiz, _) = quiz.reduce(Event::Stop);
        assert!(render(&quiz).starts_with("Quiz stopped."));
        assert_eq!(parse_command("q", &quiz), None);
    }
}
