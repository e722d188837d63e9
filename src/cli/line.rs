//! Splitting of command lines into words.

use thiserror::Error;

/// A command line ended inside a quoted word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unterminated {0} quote")]
pub struct UnterminatedQuote(pub char);

/// Split a line into words.
///
/// Words are separated by whitespace. Single quotes keep their content
/// verbatim; double quotes allow `\"` and `\\` escapes. Quotes may join
/// with unquoted text, as in `--title="Buy milk"`.
///
/// # Errors
///
/// Returns an error if a quote is not closed.
pub fn split_line(line: &str) -> Result<Vec<String>, UnterminatedQuote> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => word.push(inner),
                        None => return Err(UnterminatedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => word.push(escaped),
                            Some(other) => {
                                word.push('\\');
                                word.push(other);
                            }
                            None => return Err(UnterminatedQuote('"')),
                        },
                        Some(inner) => word.push(inner),
                        None => return Err(UnterminatedQuote('"')),
                    }
                }
            }
            other => {
                in_word = true;
                word.push(other);
            }
        }
    }

    if in_word {
        words.push(word);
    }
    Ok(words)
}
