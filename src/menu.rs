use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

use rand::Rng;

use crate::{
    config::{Config, INPUT_PREFIX, INPUT_SUFFIX},
    process_file,
    selectors::file_selector::{FileSelector, SelectionMode},
};

const INCORRECT_CHOICE: &str = "You entered an incorrect choice. Try again.";

#[derive(Debug)]
enum Choice {
    Number(i64),
    Invalid(String),
    EndOfInput,
}

/// Interactive loop: top-level prompt, then the largest/smallest/named
/// prompt, then one full processing run per selection.
pub struct Menu<R, W, G> {
    config: Config,
    input: R,
    output: W,
    rng: G,
    pending_tokens: VecDeque<String>,
}

impl<R: BufRead, W: Write, G: Rng> Menu<R, W, G> {
    pub fn new(config: Config, input: R, output: W, rng: G) -> Self {
        Menu {
            config,
            input,
            output,
            rng,
            pending_tokens: VecDeque::new(),
        }
    }

    /// Runs until the user picks exit or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(
                self.output,
                "1. Select file to process\n2. Exit the program\n\nEnter a choice 1 or 2: "
            )?;
            self.output.flush()?;

            match self.read_choice()? {
                Choice::Number(1) => {
                    if !self.choose_file()? {
                        break;
                    }
                }
                Choice::Number(2) | Choice::EndOfInput => break,
                choice => self.reject(choice)?,
            }
            writeln!(self.output)?;
        }

        Ok(())
    }

    /// Returns `false` when input ended before a file was processed.
    fn choose_file(&mut self) -> io::Result<bool> {
        loop {
            write!(
                self.output,
                "\nWhich file you want to process?\n\
                 Enter 1 to pick the largest file\n\
                 Enter 2 to pick the smallest file\n\
                 Enter 3 to specify the name of a file\n\n\
                 Enter a choice from 1 to 3: "
            )?;
            self.output.flush()?;

            let mode = match self.read_choice()? {
                Choice::Number(1) => SelectionMode::Largest,
                Choice::Number(2) => SelectionMode::Smallest,
                Choice::Number(3) => {
                    write!(self.output, "Enter the complete file name: ")?;
                    self.output.flush()?;
                    match self.next_token()? {
                        Some(name) => SelectionMode::Named(name),
                        None => return Ok(false),
                    }
                }
                Choice::EndOfInput => return Ok(false),
                choice => {
                    self.reject(choice)?;
                    continue;
                }
            };

            let selector = FileSelector::new(&self.config.input_dir, INPUT_PREFIX, INPUT_SUFFIX);
            match (selector.select(&mode), mode) {
                (Some(file_name), _) => {
                    self.process(&file_name)?;
                    return Ok(true);
                }
                // A missing named file goes back to the three-way choice.
                (None, SelectionMode::Named(name)) => {
                    writeln!(self.output, "The file {} was not found. Try again", name)?;
                }
                (None, _) => {
                    writeln!(
                        self.output,
                        "No file matching {}*{} was found in {}",
                        INPUT_PREFIX,
                        INPUT_SUFFIX,
                        self.config.input_dir.display()
                    )?;
                    return Ok(true);
                }
            }
        }
    }

    fn process(&mut self, file_name: &str) -> io::Result<()> {
        writeln!(self.output, "Now processing the chosen file named {}", file_name)?;

        match process_file(&self.config, file_name, &mut self.rng) {
            Ok(summary) => {
                writeln!(self.output, "Created directory with name {}", summary.directory)?;
                if summary.failed > 0 {
                    writeln!(
                        self.output,
                        "{} of {} titles could not be written",
                        summary.failed,
                        summary.failed + summary.written
                    )?;
                }
            }
            Err(e) => {
                log::error!("Processing {} failed: {}", file_name, e);
                writeln!(self.output, "Error: {}", e)?;
            }
        }

        Ok(())
    }

    fn reject(&mut self, choice: Choice) -> io::Result<()> {
        match choice {
            Choice::Number(number) => log::debug!("Rejected out of range choice {}", number),
            Choice::Invalid(token) => log::debug!("Rejected non-numeric choice {:?}", token),
            Choice::EndOfInput => {}
        }
        writeln!(self.output, "{}", INCORRECT_CHOICE)
    }

    fn read_choice(&mut self) -> io::Result<Choice> {
        Ok(match self.next_token()? {
            None => Choice::EndOfInput,
            Some(token) => match token.parse::<i64>() {
                Ok(number) => Choice::Number(number),
                Err(_) => Choice::Invalid(token),
            },
        })
    }

    /// Next whitespace-delimited token, reading more lines as needed.
    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending_tokens.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending_tokens
                .extend(line.split_whitespace().map(|token| token.to_string()));
        }

        Ok(self.pending_tokens.pop_front())
    }
}
