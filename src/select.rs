use crate::error::SelectError;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// Answer to a prompt that also accepts free-form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Index(usize),
    Custom(String),
}

/// Blocking "pick one of N" prompt
pub trait Selector {
    /// Return the index of the chosen option
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<usize, SelectError>;

    /// Like `select`, but a non-numeric answer is returned verbatim
    fn select_or_custom(&mut self, prompt: &str, options: &[String])
    -> Result<Choice, SelectError>;

    /// Yes/no question defaulting to yes
    fn confirm(&mut self, message: &str) -> Result<bool, SelectError>;
}

/// Selector reading answers line by line from `input` and printing prompts to `output`
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl PromptSelector<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Result<String, SelectError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SelectError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    fn print_options(&mut self, prompt: &str, options: &[String]) -> Result<(), SelectError> {
        writeln!(self.output, "\n{prompt}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, " [{}] {option}", i + 1)?;
        }
        Ok(())
    }

    fn prompt_answer(&mut self) -> Result<String, SelectError> {
        write!(self.output, " Select an option: ")?;
        self.output.flush()?;
        self.read_answer()
    }

    fn ask_index(&mut self, options: &[String]) -> Result<usize, SelectError> {
        loop {
            let answer = self.prompt_answer()?;
            match parse_index(&answer, options.len()) {
                Some(i) => return Ok(i),
                None => writeln!(self.output, "Invalid option")?,
            }
        }
    }

    fn ask_or_custom(&mut self, options: &[String]) -> Result<Choice, SelectError> {
        loop {
            let answer = self.prompt_answer()?;
            if let Some(i) = parse_index(&answer, options.len()) {
                return Ok(Choice::Index(i));
            }
            // Out-of-range numbers are mistakes, not names
            if !answer.is_empty() && answer.parse::<usize>().is_err() {
                return Ok(Choice::Custom(answer));
            }
            writeln!(self.output, "Invalid option")?;
        }
    }
}

/// 1-based answer to a 0-based index within `len` options
fn parse_index(answer: &str, len: usize) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

impl<R: BufRead, W: Write> Selector for PromptSelector<R, W> {
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<usize, SelectError> {
        if options.len() == 1 {
            return Ok(0);
        }
        self.print_options(prompt, options)?;
        self.ask_index(options)
    }

    fn select_or_custom(
        &mut self,
        prompt: &str,
        options: &[String],
    ) -> Result<Choice, SelectError> {
        if options.len() == 1 {
            return Ok(Choice::Index(0));
        }
        self.print_options(prompt, options)?;
        self.ask_or_custom(options)
    }

    fn confirm(&mut self, message: &str) -> Result<bool, SelectError> {
        write!(self.output, "\n{message} [Y/n] ")?;
        self.output.flush()?;
        let answer = self.read_answer()?;
        Ok(matches!(answer.to_lowercase().as_str(), "" | "y" | "yes"))
    }
}

/// Prompt shown to a `FixedSelector`, with the options it was offered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
    pub options: Vec<String>,
}

/// Non-interactive selector that always gives the same answer and records what it was asked
#[derive(Debug, Clone)]
pub struct FixedSelector {
    answer: Option<Choice>,
    confirm: bool,
    prompts: Rc<RefCell<Vec<Prompt>>>,
}

impl FixedSelector {
    /// Always pick the option at `index`
    pub fn index(index: usize) -> Self {
        Self {
            answer: Some(Choice::Index(index)),
            confirm: true,
            prompts: Rc::default(),
        }
    }

    /// Answer free-form prompts with `text`
    pub fn custom(text: &str) -> Self {
        Self {
            answer: Some(Choice::Custom(text.to_string())),
            confirm: true,
            prompts: Rc::default(),
        }
    }

    /// Fail every prompt as if input had run out
    pub fn exhausted() -> Self {
        Self {
            answer: None,
            confirm: false,
            prompts: Rc::default(),
        }
    }

    pub fn declining(mut self) -> Self {
        self.confirm = false;
        self
    }

    /// Shared view of every prompt shown so far, still readable after the selector is moved
    pub fn prompts(&self) -> Rc<RefCell<Vec<Prompt>>> {
        Rc::clone(&self.prompts)
    }

    fn record(&self, message: &str, options: &[String]) {
        self.prompts.borrow_mut().push(Prompt {
            message: message.to_string(),
            options: options.to_vec(),
        });
    }
}

impl Selector for FixedSelector {
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<usize, SelectError> {
        self.record(prompt, options);
        match &self.answer {
            Some(Choice::Index(i)) if *i < options.len() => Ok(*i),
            _ => Err(SelectError::EndOfInput),
        }
    }

    fn select_or_custom(
        &mut self,
        prompt: &str,
        options: &[String],
    ) -> Result<Choice, SelectError> {
        self.record(prompt, options);
        match &self.answer {
            Some(Choice::Index(i)) if *i < options.len() => Ok(Choice::Index(*i)),
            Some(Choice::Custom(text)) => Ok(Choice::Custom(text.clone())),
            _ => Err(SelectError::EndOfInput),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool, SelectError> {
        self.record(message, &[]);
        if self.answer.is_none() {
            return Err(SelectError::EndOfInput);
        }
        Ok(self.confirm)
    }
}
