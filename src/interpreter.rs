use crate::error::{EvalError, InputError};
use crate::io_adapters::Console;
use crate::operator::Calculation;
use crate::round::Round;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

pub const CONTINUE_PROMPT: &str = "Do you want to calculate again? (y/n): ";
pub const CLEAR_SCREEN_PROMPT: &str =
    "Do you want to clear the screen from previous calculations? (y/n): ";
pub const INVALID_CHOICE: &str = "Invalid choice. Please enter 'y' or 'n'.";
pub const GOODBYE: &str = "Thank you for using the calculator. Goodbye!";

/// Clear the whole screen and move the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

const INTRO: &str = "\
Hello! Welcome to the basic calculator program.
This program supports the following operations:
  Addition (+)
  Subtraction (-)
  Multiplication (*)
  Division (/)

Please follow the prompts to enter numbers and choose an operation.
You can use either the number keypad or the numbers above the letter keys for entering numbers.
To perform a calculation, follow these steps:
1. Enter an equation (e.g., 6+3) or the first number when prompted.
2. If you entered a number, enter an operator followed by the second number (e.g., +3) or just an operator when prompted.
The program will then display the result of the calculation.
";

/// Session settings collected from the command line.
#[derive(Debug, Clone)]
pub struct Options {
    /// Print the introduction at start-up and after each "calculate again".
    pub show_intro: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { show_intro: true }
    }
}

/// How a round ended.
enum Outcome {
    Finished(Calculation),
    Failed(EvalError),
    /// The console ran out of input.
    Closed,
}

/// Interactive session driver: runs rounds until the user chooses to stop.
///
/// Example
/// ```
/// use calculator::io_adapters::{MemWriter, ScriptedConsole};
/// use calculator::{Interpreter, Options};
///
/// let out = MemWriter::new();
/// let console = ScriptedConsole::new(["6+3", "n"], out.clone());
/// let options = Options { show_intro: false };
/// Interpreter::new(console, out.clone(), options).run().unwrap();
/// assert!(out.contents().contains("6 + 3 = 9\nTotal: 9\n"));
/// ```
pub struct Interpreter<C, W> {
    console: C,
    out: W,
    options: Options,
}

impl<C: Console, W: Write> Interpreter<C, W> {
    pub fn new(console: C, out: W, options: Options) -> Self {
        Self {
            console,
            out,
            options,
        }
    }

    /// Run rounds until the user answers "n" or closes the input.
    pub fn run(&mut self) -> Result<()> {
        self.intro()?;

        loop {
            let calculation = match self.play_round()? {
                Outcome::Finished(calculation) => calculation,
                Outcome::Failed(err) => {
                    writeln!(self.out, "ERROR! {}\n", err)?;
                    continue;
                }
                Outcome::Closed => return self.farewell_on_close(),
            };

            writeln!(self.out, "{}", calculation)?;
            writeln!(self.out, "Total: {}\n", calculation.result)?;

            match self.ask_yes_no(CONTINUE_PROMPT)? {
                Some(true) => {}
                Some(false) => {
                    writeln!(self.out, "{}", GOODBYE)?;
                    return Ok(());
                }
                None => return self.farewell_on_close(),
            }

            match self.ask_yes_no(CLEAR_SCREEN_PROMPT)? {
                Some(true) => {
                    write!(self.out, "{}", CLEAR_SCREEN)?;
                }
                Some(false) => {}
                None => return self.farewell_on_close(),
            }

            self.intro()?;
        }
    }

    /// Drive one round from the first prompt to an evaluated result.
    fn play_round(&mut self) -> Result<Outcome> {
        let mut round = Round::new();

        while let Some(prompt) = round.prompt() {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(Outcome::Closed);
            };
            if let Err(err) = round.feed(&line) {
                debug!(input = %line, error = ?err, "input rejected");
                self.reject(&err)?;
            }
        }

        match round.resolve() {
            Ok(calculation) => {
                info!(%calculation, "round complete");
                Ok(Outcome::Finished(calculation))
            }
            Err(err) => {
                info!(error = ?err, "round abandoned");
                Ok(Outcome::Failed(err))
            }
        }
    }

    fn reject(&mut self, err: &InputError) -> Result<()> {
        writeln!(self.out, "{}", err)?;
        // A bad second number is reported without the blank separator line.
        if *err != InputError::InvalidNumber {
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Ask until the answer is `y`/`Y` or `n`/`N`. `None` when input closed.
    fn ask_yes_no(&mut self, prompt: &str) -> Result<Option<bool>> {
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match answer.as_str() {
                "y" | "Y" => return Ok(Some(true)),
                "n" | "N" => return Ok(Some(false)),
                _ => writeln!(self.out, "{}", INVALID_CHOICE)?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out.flush().context("failed to flush output")?;
        self.console
            .read_line(prompt)
            .context("failed to read from the console")
    }

    fn intro(&mut self) -> Result<()> {
        if self.options.show_intro {
            writeln!(self.out, "{}", INTRO)?;
        }
        Ok(())
    }

    fn farewell_on_close(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", GOODBYE)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_adapters::{MemWriter, ScriptedConsole};
    use crate::round::{FIRST_INPUT_PROMPT, OPERATOR_PROMPT, SECOND_OPERAND_PROMPT};

    fn session(lines: &[&str]) -> String {
        let (out, handle) = MemWriter::with_handle();
        let console = ScriptedConsole::new(lines.iter().copied(), out.clone());
        let options = Options { show_intro: false };
        Interpreter::new(console, out, options).run().unwrap();
        let bytes = handle.borrow().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_equation_then_quit() {
        let s = session(&["6+3", "n"]);
        let expected = format!(
            "{FIRST_INPUT_PROMPT}6+3\n6 + 3 = 9\nTotal: 9\n\n{CONTINUE_PROMPT}n\n{GOODBYE}\n"
        );
        assert_eq!(s, expected);
    }

    #[test]
    fn test_staged_entry_with_operator_only() {
        let s = session(&["12", "*", "4", "n"]);
        let expected = format!(
            "{FIRST_INPUT_PROMPT}12\n{OPERATOR_PROMPT}*\n{SECOND_OPERAND_PROMPT}4\n\
             12 * 4 = 48\nTotal: 48\n\n{CONTINUE_PROMPT}n\n{GOODBYE}\n"
        );
        assert_eq!(s, expected);
    }

    #[test]
    fn test_invalid_inputs_are_reported_and_retried() {
        let s = session(&["abc", "5", "", "^", "+2", "n"]);
        assert!(s.contains(&format!("{}\n\n", InputError::InvalidFirstInput)));
        assert!(s.contains(&format!("{}\n\n", InputError::MissingOperator)));
        assert!(s.contains(&format!("{}\n\n", InputError::InvalidOperatorInput)));
        assert!(s.contains("5 + 2 = 7\nTotal: 7\n"));
    }

    #[test]
    fn test_bad_second_number_reprompts() {
        let s = session(&["5", "-", "x", "-1", "n"]);
        assert!(s.contains(&format!(
            "{SECOND_OPERAND_PROMPT}x\nInvalid input. Please enter a number.\n{SECOND_OPERAND_PROMPT}-1\n"
        )));
        assert!(s.contains("5 - -1 = 6\n"));
    }

    #[test]
    fn test_division_by_zero_restarts_without_asking() {
        let s = session(&["5/0", "10/2", "n"]);
        let expected = format!(
            "{FIRST_INPUT_PROMPT}5/0\nERROR! Division by zero is not allowed!\n\n\
             {FIRST_INPUT_PROMPT}10/2\n10 / 2 = 5\nTotal: 5\n\n{CONTINUE_PROMPT}n\n{GOODBYE}\n"
        );
        assert_eq!(s, expected);
    }

    #[test]
    fn test_continue_and_clear_screen() {
        let s = session(&["1+1", "maybe", "y", "x", "Y", "2*3", "N"]);
        assert!(s.contains(&format!("{CONTINUE_PROMPT}maybe\n{INVALID_CHOICE}\n")));
        assert!(s.contains(&format!(
            "{CLEAR_SCREEN_PROMPT}x\n{INVALID_CHOICE}\n{CLEAR_SCREEN_PROMPT}Y\n{CLEAR_SCREEN}{FIRST_INPUT_PROMPT}"
        )));
        assert!(s.contains("2 * 3 = 6\nTotal: 6\n"));
        assert!(s.ends_with(&format!("{GOODBYE}\n")));
    }

    #[test]
    fn test_no_clear_keeps_screen() {
        let s = session(&["1+1", "y", "n", "n"]);
        assert!(!s.contains(CLEAR_SCREEN));
        assert_eq!(s.matches(FIRST_INPUT_PROMPT).count(), 2);
    }

    #[test]
    fn test_closed_input_ends_session() {
        let s = session(&["7"]);
        assert!(s.ends_with(&format!("{OPERATOR_PROMPT}\n{GOODBYE}\n")));
    }

    #[test]
    fn test_intro_shown_again_after_continue() {
        let (out, handle) = MemWriter::with_handle();
        let console = ScriptedConsole::new(["1+1", "y", "n", "2+2", "n"], out.clone());
        Interpreter::new(console, out, Options::default()).run().unwrap();
        let s = String::from_utf8(handle.borrow().clone()).unwrap();
        assert_eq!(s.matches("Welcome to the basic calculator program.").count(), 2);
    }
}
