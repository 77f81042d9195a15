// Test doubles for the gateway transport and the terminal.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use indicatif::ProgressBar;

use crate::api::{HttpRequest, HttpResponse, Transport};
use crate::ui::Console;

#[derive(Default)]
struct FakeState {
    requests: Vec<HttpRequest>,
    responses: VecDeque<Result<HttpResponse, String>>,
}

/// Records every request and replays queued responses in order. Clones
/// share state, so a test can keep a handle after moving one into a client.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Rc<RefCell<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.state.borrow_mut().responses.push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.state
            .borrow_mut()
            .responses
            .push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.borrow().requests.clone()
    }
}

impl Transport for FakeTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, String> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_string()))
    }
}

/// Answers prompts from a fixed script and captures everything printed.
/// Running out of answers reports end-of-input, like a closed stdin.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            answers: answers.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// All printed output joined into one string.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    fn next(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn text(&mut self, prompt: &str) -> io::Result<String> {
        self.next(prompt)
    }

    fn optional_text(&mut self, prompt: &str) -> io::Result<String> {
        self.next(prompt)
    }

    fn secret(&mut self, prompt: &str) -> io::Result<String> {
        self.next(prompt)
    }

    fn integer(&mut self, prompt: &str) -> io::Result<i64> {
        let answer = self.next(prompt)?;
        Ok(answer
            .parse()
            .unwrap_or_else(|_| panic!("scripted answer {answer:?} for {prompt:?} is not an integer")))
    }

    fn decimal(&mut self, prompt: &str) -> io::Result<f64> {
        let answer = self.next(prompt)?;
        Ok(answer
            .parse()
            .unwrap_or_else(|_| panic!("scripted answer {answer:?} for {prompt:?} is not a number")))
    }

    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.next(prompt)?;
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    fn spinner(&self, _message: &str) -> ProgressBar {
        ProgressBar::hidden()
    }
}
