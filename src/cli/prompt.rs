//! Interactive prompts for the no-argument run.
//!
//! Kept apart from clap parsing: clap handles flags, this handles the
//! "run `friends-map` and answer three questions" flow.

use std::io::{self, BufRead, Write};

use crate::data::{DEFAULT_COUNT, DEFAULT_SCREEN_NAME};
use crate::error::AppError;

/// Answers collected from the prompts, before default substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAnswers {
    pub bearer: String,
    pub screen_name: String,
    pub count: String,
}

/// Ask for bearer token, screen name and count on stdin/stdout.
pub fn prompt_for_query() -> Result<PromptAnswers, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    ask_all(&mut stdin.lock(), &mut stdout.lock())
}

/// Prompt flow over arbitrary reader/writer.
///
/// Screen name and count are kept as typed (only the line ending is removed);
/// empty answers pick up their defaults when the query is built. A blank
/// bearer token is asked again.
pub fn ask_all<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PromptAnswers, AppError> {
    let bearer = loop {
        let answer = ask(input, output, "Enter your bearer token: ")?;
        let answer = answer.trim();
        if !answer.is_empty() {
            break answer.to_string();
        }
        writeln!(output, "A bearer token is required.")
            .map_err(|e| AppError::io(format!("Failed to write prompt: {e}")))?;
    };
    let screen_name = ask(
        input,
        output,
        &format!("Enter screen name (press Enter for default value \"{DEFAULT_SCREEN_NAME}\"): "),
    )?;
    let count = ask(
        input,
        output,
        &format!("Enter count (press Enter for default value \"{DEFAULT_COUNT}\"): "),
    )?;

    Ok(PromptAnswers {
        bearer,
        screen_name,
        count,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String, AppError> {
    write!(output, "{question}").map_err(|e| AppError::io(format!("Failed to write prompt: {e}")))?;
    output
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write prompt: {e}")))?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::io(format!("Failed to read input: {e}")))?;
    if bytes == 0 {
        return Err(AppError::new(
            crate::error::ErrorKind::MissingInput,
            "No input received. Use `friends-map build --bearer <TOKEN>` for non-interactive runs.",
        ));
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
