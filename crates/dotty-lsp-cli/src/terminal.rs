//! Terminal implementation of the host window and dialog contract.
//!
//! Status messages and dialogs are written to the diagnostic stream so
//! standard output stays free for command results. Confirmation answers are
//! read line by line from the supplied input.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use dotty_lsp_bootstrap::{HostDialogs, HostWindow};

const HOST_TARGET: &str = "dotty_lsp_cli::terminal";

pub(crate) struct TerminalHost<'a, R, E> {
    input: RefCell<&'a mut R>,
    output: RefCell<&'a mut E>,
    folders: Vec<PathBuf>,
    assume_yes: bool,
}

impl<'a, R, E> TerminalHost<'a, R, E>
where
    R: BufRead,
    E: Write,
{
    pub(crate) fn new(input: &'a mut R, output: &'a mut E, folders: Vec<PathBuf>) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
            folders,
            assume_yes: false,
        }
    }

    pub(crate) fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    fn write_line(&self, message: &str) {
        let mut output = self.output.borrow_mut();
        if let Err(error) = writeln!(output, "{message}") {
            tracing::warn!(target: HOST_TARGET, %error, "failed to write host message");
        }
    }

    fn read_answer(&self) -> bool {
        let mut line = String::new();
        match self.input.borrow_mut().read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => is_affirmative(&line),
            Err(error) => {
                tracing::warn!(target: HOST_TARGET, %error, "failed to read confirmation");
                false
            }
        }
    }
}

impl<R, E> HostWindow for TerminalHost<'_, R, E>
where
    R: BufRead,
    E: Write,
{
    fn folders(&self) -> Vec<PathBuf> {
        self.folders.clone()
    }

    fn status_message(&self, message: &str) {
        self.write_line(message);
    }
}

impl<R, E> HostDialogs for TerminalHost<'_, R, E>
where
    R: BufRead,
    E: Write,
{
    fn message_dialog(&self, message: &str) {
        self.write_line(message);
    }

    fn ok_cancel_dialog(&self, message: &str) -> bool {
        if self.assume_yes {
            self.write_line(message);
            return true;
        }

        {
            let mut output = self.output.borrow_mut();
            if let Err(error) = write!(output, "{message} [y/N] ").and_then(|()| output.flush()) {
                tracing::warn!(target: HOST_TARGET, %error, "failed to write prompt");
                return false;
            }
        }
        self.read_answer()
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("y\n", true)]
    #[case("YES\n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    fn reads_confirmation_from_input(#[case] input: &str, #[case] expected: bool) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let answer = TerminalHost::new(&mut input, &mut output, Vec::new())
            .ok_cancel_dialog("Install now?");

        assert_eq!(answer, expected);
        assert_eq!(String::from_utf8_lossy(&output), "Install now? [y/N] ");
    }

    #[rstest]
    fn assume_yes_skips_reading() {
        let mut input = Cursor::new(b"n\n".to_vec());
        let mut output = Vec::new();
        let answer = TerminalHost::new(&mut input, &mut output, Vec::new())
            .assume_yes(true)
            .ok_cancel_dialog("Install now?");

        assert!(answer);
        assert_eq!(input.position(), 0);
    }

    #[rstest]
    fn exposes_folders_and_messages() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        {
            let host = TerminalHost::new(&mut input, &mut output, vec![PathBuf::from("/work")]);
            assert_eq!(host.folders(), vec![PathBuf::from("/work")]);
            host.status_message("SBT must be installed to run dotty-language-server");
            host.message_dialog("Please install SBT before running setup");
        }

        assert_eq!(
            String::from_utf8_lossy(&output),
            "SBT must be installed to run dotty-language-server\n\
             Please install SBT before running setup\n"
        );
    }
}
