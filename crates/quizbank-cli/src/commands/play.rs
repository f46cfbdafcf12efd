//! The `quizbank play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::session::{QuizState, QuizSummary};

pub async fn execute(
    category: String,
    count: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, bank, mut rng) = super::load(config_path, seed).await?;

    if let Some(n) = count {
        if category == quizbank_core::model::SIGNALS_CATEGORY && n > bank.signal_count {
            eprintln!(
                "Only {} sign questions available, playing all of them.",
                bank.signal_count
            );
        }
    }

    let quiz = QuizState::start(&bank, &category, count, rng.as_mut())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = run(quiz, stdin.lock(), stdout.lock())?;
    tracing::info!(
        "finished '{}' with {} / {} ({:.0}%)",
        summary.category,
        summary.score,
        summary.total,
        summary.ratio() * 100.0
    );
    Ok(())
}

enum Input {
    Option(usize),
    Quit,
    Invalid,
}

fn parse_input(line: &str, option_count: usize) -> Input {
    match line.trim() {
        "q" | "Q" => Input::Quit,
        s => match s.parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => Input::Option(n - 1),
            _ => Input::Invalid,
        },
    }
}

/// Drive a quiz over line-based input. End of input counts as quitting.
fn run<R: BufRead, W: Write>(mut quiz: QuizState, mut input: R, mut out: W) -> Result<QuizSummary> {
    let total = quiz.len();

    'questions: while let Some(question) = quiz.current().cloned() {
        writeln!(out, "\n{}/{}. {}", quiz.position() + 1, total, question.prompt)?;
        if let Some(image) = &question.image {
            writeln!(out, "   [imagen: {image}]")?;
        }
        if let Some(desc) = &question.image_desc {
            writeln!(out, "   {desc}")?;
        }
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}) {option}", i + 1)?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break 'questions;
            }
            match parse_input(&line, question.options.len()) {
                Input::Quit => break 'questions,
                Input::Invalid => {
                    writeln!(out, "Elija un número entre 1 y {} (q para salir).", question.options.len())?;
                }
                Input::Option(idx) => {
                    let outcome = quiz.answer_index(idx)?;
                    if outcome.is_correct {
                        writeln!(out, "¡Correcto!")?;
                    } else {
                        writeln!(out, "Incorrecto. Respuesta correcta: {}", outcome.correct)?;
                    }
                    writeln!(out, "{}", quiz.score_line())?;
                    break;
                }
            }
        }

        if !quiz.advance()? {
            break;
        }
    }

    let summary = quiz.summary();
    writeln!(out, "\n{}", summary.render())?;
    Ok(summary)
}
