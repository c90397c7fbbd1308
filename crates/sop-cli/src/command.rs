//! REPL command parsing

/// One line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Free-text procedure search
    Search(String),
    /// Proceed to the next step
    Next,
    /// Show visited procedures
    History,
    /// Re-open a history entry, 1-based as displayed
    Replay(usize),
    /// Question for the assistant
    Ask(String),
    /// Show known procedures
    List,
    Help,
    Quit,
    /// Blank line
    Empty,
    /// Recognised command with bad arguments
    Invalid(String),
}

impl ReplCommand {
    /// Parse one input line
    ///
    /// Anything that is not a command word is a search. `search <text>`
    /// forces a search for text that collides with a command word.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match (word.to_lowercase().as_str(), rest) {
            ("next" | "n", "") => Self::Next,
            ("history" | "h", "") => Self::History,
            ("list" | "ls", "") => Self::List,
            ("help" | "?", "") => Self::Help,
            ("quit" | "exit" | "q", "") => Self::Quit,
            ("replay" | "r", arg) => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Self::Replay(n),
                _ => Self::Invalid(format!("usage: replay <n>, got '{arg}'")),
            },
            ("ask", question) => Self::Ask(question.to_string()),
            ("search" | "s", query) => Self::Search(query.to_string()),
            _ => Self::Search(line.to_string()),
        }
    }
}

/// REPL help text
pub const HELP: &str = "\
Commands:
  <text> | search <text>   find a procedure by name or keyword
  next | n                 proceed to the next step
  history | h              list procedures consulted this session
  replay <n> | r <n>       restart history entry <n>
  ask <question>           ask the AI assistant
  list | ls                list known procedures
  help | ?                 show this help
  quit | exit | q          leave";
