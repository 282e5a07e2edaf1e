//! Console collaborator for side-effecting tools.
//!
//! Demo capabilities interact with the person at the keyboard (confirmation
//! prompts, feedback collection). Routing that through a trait keeps the tools
//! testable with scripted input.

use std::io::{self, BufRead, Write};

pub trait Console: Send + Sync {
    /// Print a line to the user.
    fn say(&self, line: &str);

    /// Print a prompt and read one line of input, trimmed.
    fn ask(&self, prompt: &str) -> String;
}

/// Console backed by stdin/stdout.
pub struct StdioConsole;

impl Console for StdioConsole {
    fn say(&self, line: &str) {
        println!("{}", line);
    }

    fn ask(&self, prompt: &str) -> String {
        print!("{}", prompt);
        if io::stdout().flush().is_err() {
            return String::new();
        }
        let mut buf = String::new();
        match io::stdin().lock().read_line(&mut buf) {
            Ok(_) => buf.trim().to_string(),
            Err(e) => {
                log::warn!("[CONSOLE] Failed to read input: {}", e);
                String::new()
            }
        }
    }
}

/// Console with canned answers, recording everything said to the user.
#[cfg(test)]
pub struct ScriptedConsole {
    answers: std::sync::Mutex<std::collections::VecDeque<String>>,
    transcript: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(answers: Vec<&str>) -> Self {
        ScriptedConsole {
            answers: std::sync::Mutex::new(answers.into_iter().map(String::from).collect()),
            transcript: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn transcript(&self) -> Vec<String> {
        self.transcript.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn say(&self, line: &str) {
        self.transcript.lock().unwrap().push(line.to_string());
    }

    fn ask(&self, prompt: &str) -> String {
        self.transcript.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or_default()
    }
}
