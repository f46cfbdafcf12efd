//! Quiz sessions over a built bank.
//!
//! A [`QuizState`] is owned by the caller and holds everything one run of a
//! quiz needs: the selected questions with their options already shuffled,
//! the position, the score, and the wrong answers for the final summary.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Bank, Question};
use crate::random::{shuffle, RandomSource};

/// Categories that always run through every question.
pub const FULL_LENGTH_CATEGORIES: &[&str] = &["quiz1"];

/// What happened when an option was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct: String,
}

/// A missed question, kept for the end-of-quiz summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub question: String,
    pub selected: String,
    pub correct: String,
}

/// Final result of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub category: String,
    pub score: usize,
    pub total: usize,
    pub wrong: Vec<WrongAnswer>,
}

impl QuizSummary {
    /// Fraction of questions answered correctly.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64
    }

    /// Human-readable end screen text.
    pub fn render(&self) -> String {
        let mut out = format!("Tu puntaje final: {} / {}\n", self.score, self.total);
        if self.wrong.is_empty() {
            out.push_str("¡Felicidades! No tuviste errores.\n");
            return out;
        }
        out.push_str("Resumen de preguntas erradas:\n");
        for (i, item) in self.wrong.iter().enumerate() {
            out.push_str(&format!(
                "{}. Pregunta: {}\n   Respuesta correcta: {}\n",
                i + 1,
                item.question,
                item.correct
            ));
        }
        out
    }
}

/// State of one quiz run.
#[derive(Debug, Clone)]
pub struct QuizState {
    category: String,
    questions: Vec<Question>,
    index: usize,
    score: usize,
    answered: bool,
    wrong: Vec<WrongAnswer>,
}

impl QuizState {
    /// Select and shuffle questions for `category`.
    ///
    /// Full-length categories ignore `limit`; the others take `limit`
    /// questions (all when `None`), clamped to what the category holds.
    pub fn start(
        bank: &Bank,
        category: &str,
        limit: Option<usize>,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, QuizError> {
        let pool = bank
            .category(category)
            .ok_or_else(|| QuizError::UnknownCategory(category.to_string()))?;
        if pool.is_empty() {
            return Err(QuizError::EmptyCategory(category.to_string()));
        }
        let full_length = FULL_LENGTH_CATEGORIES.contains(&category);
        if !full_length && limit == Some(0) {
            return Err(QuizError::InvalidLimit);
        }

        let mut questions = pool.to_vec();
        shuffle(&mut questions, rng);
        if !full_length {
            let take = limit.unwrap_or(questions.len()).min(questions.len());
            questions.truncate(take);
        }
        for q in &mut questions {
            shuffle(&mut q.options, rng);
        }

        tracing::debug!("starting '{category}' with {} questions", questions.len());
        Ok(Self {
            category: category.to_string(),
            questions,
            index: 0,
            score: 0,
            answered: false,
            wrong: Vec::new(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based position of the current question.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// The question on screen, `None` once the quiz is over.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Whether the current question already has an answer.
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Record an answer for the current question.
    pub fn answer(&mut self, selected: &str) -> Result<AnswerOutcome, QuizError> {
        let question = self.questions.get(self.index).ok_or(QuizError::Finished)?;
        if self.answered {
            return Err(QuizError::AlreadyAnswered);
        }
        if !question.options.iter().any(|o| o == selected) {
            return Err(QuizError::InvalidOption(selected.to_string()));
        }

        let is_correct = question.is_correct(selected);
        if is_correct {
            self.score += 1;
        } else {
            self.wrong.push(WrongAnswer {
                question: question.prompt.clone(),
                selected: selected.to_string(),
                correct: question.correct.clone(),
            });
        }
        self.answered = true;

        Ok(AnswerOutcome {
            is_correct,
            correct: question.correct.clone(),
        })
    }

    /// Answer by zero-based option index.
    pub fn answer_index(&mut self, index: usize) -> Result<AnswerOutcome, QuizError> {
        let selected = self
            .current()
            .ok_or(QuizError::Finished)?
            .options
            .get(index)
            .cloned()
            .ok_or_else(|| QuizError::InvalidOption(format!("#{}", index + 1)))?;
        self.answer(&selected)
    }

    /// Move past an answered question. Returns `true` while questions remain.
    pub fn advance(&mut self) -> Result<bool, QuizError> {
        if self.is_finished() {
            return Err(QuizError::Finished);
        }
        if !self.answered {
            return Err(QuizError::NotAnswered);
        }
        self.index += 1;
        self.answered = false;
        Ok(!self.is_finished())
    }

    /// Fraction of the quiz already passed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 1.0;
        }
        self.index.min(self.questions.len()) as f64 / self.questions.len() as f64
    }

    pub fn score_line(&self) -> String {
        format!("Puntaje: {} / {}", self.score, self.questions.len())
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            category: self.category.clone(),
            score: self.score,
            total: self.questions.len(),
            wrong: self.wrong.clone(),
        }
    }
}
