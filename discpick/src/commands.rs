use discpick_core::{Command, CoordinatorHandle};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// One line typed by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Command(Command),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("candidates are numbered from 1")]
    ZeroIndex,
    #[error("unrecognized command '{0}'")]
    Unknown(String),
}

/// Parses a line of operator input. Blank lines yield `None`.
///
/// Candidate numbers are 1-based as displayed.
pub fn parse_line(line: &str) -> Result<Option<Line>, LineError> {
    let word = line.trim().to_ascii_lowercase();
    let parsed = match word.as_str() {
        "" => return Ok(None),
        "c" | "confirm" => Line::Command(Command::Confirm),
        "s" | "skip" => Line::Command(Command::Skip),
        "r" | "retry" => Line::Command(Command::Retry),
        "q" | "quit" | "exit" => Line::Quit,
        other => match other.parse::<usize>() {
            Ok(0) => return Err(LineError::ZeroIndex),
            Ok(number) => Line::Command(Command::Highlight(number - 1)),
            Err(_) => return Err(LineError::Unknown(word)),
        },
    };
    Ok(Some(parsed))
}

/// Forwards operator commands until EOF, `quit`, or the coordinator stops.
pub async fn forward_commands<R>(input: R, handle: CoordinatorHandle) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Line::Quit)) => {
                debug!("operator quit");
                break;
            }
            Ok(Some(Line::Command(command))) => {
                if handle.send(command).is_err() {
                    break;
                }
            }
            Err(err) => warn!(input = %line.trim(), error = %err, "ignoring input"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_one_based_numbers() {
        assert_eq!(parse_line("  2 "), Ok(Some(Line::Command(Command::Highlight(1)))));
        assert_eq!(parse_line("C"), Ok(Some(Line::Command(Command::Confirm))));
        assert_eq!(parse_line("skip"), Ok(Some(Line::Command(Command::Skip))));
        assert_eq!(parse_line("r"), Ok(Some(Line::Command(Command::Retry))));
        assert_eq!(parse_line("q"), Ok(Some(Line::Quit)));
        assert_eq!(parse_line(""), Ok(None));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert_eq!(parse_line("0"), Err(LineError::ZeroIndex));
        assert_eq!(parse_line("pick"), Err(LineError::Unknown("pick".into())));
        assert_eq!(parse_line("-1"), Err(LineError::Unknown("-1".into())));
    }
}
