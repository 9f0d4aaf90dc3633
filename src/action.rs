#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Filter(String),
    Terminate(u32),
    RefreshWeather,
    ShowHistory,
    ShowStats,
    Help,
    Invalid(String),
    None,
}

/// (command, description) pairs printed by `help`.
pub const HELP_ENTRIES: [(&str, &str); 7] = [
    ("filter <text>", "List processes whose name or PID contains <text>"),
    ("kill <pid>", "Send SIGTERM to <pid>"),
    ("weather", "Request a weather refresh"),
    ("history", "Show the CPU load sparkline"),
    ("stats", "Show the latest hardware snapshot"),
    ("help", "Show this help"),
    ("quit", "Exit"),
];

impl Action {
    /// Parses one line of driver input. Single-letter aliases are accepted.
    pub fn parse(line: &str) -> Action {
        let line = line.trim();
        if line.is_empty() {
            return Action::None;
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "q" | "quit" | "exit" => Action::Quit,
            "f" | "filter" | "ps" => Action::Filter(rest.to_string()),
            "k" | "kill" => match rest.parse::<u32>() {
                Ok(pid) => Action::Terminate(pid),
                Err(_) => Action::Invalid(format!("kill expects a numeric PID, got `{rest}`")),
            },
            "w" | "weather" => Action::RefreshWeather,
            "h" | "history" => Action::ShowHistory,
            "s" | "stats" => Action::ShowStats,
            "?" | "help" => Action::Help,
            other => Action::Invalid(format!("unknown command `{other}`, try `help`")),
        }
    }
}
