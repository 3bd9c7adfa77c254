//! Ordered rule table for command classification.
//!
//! Matching is literal substring containment over the normalized command,
//! which reproduces the assistant's long-standing behavior exactly, quirks
//! included (`in` matches inside `berlin`, `bye` matches inside longer
//! words). The boundary cases are pinned by tests.

/// Rule categories in evaluation order; first predicate match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Greeting,
    Time,
    Date,
    Weather,
    Informational,
    Website,
    Application,
    Joke,
    Farewell,
}

pub const RULE_ORDER: [RuleCategory; 9] = [
    RuleCategory::Greeting,
    RuleCategory::Time,
    RuleCategory::Date,
    RuleCategory::Weather,
    RuleCategory::Informational,
    RuleCategory::Website,
    RuleCategory::Application,
    RuleCategory::Joke,
    RuleCategory::Farewell,
];

pub const GREETINGS: &[&str] = &["hello", "hi", "hey"];

pub const FAREWELLS: &[&str] = &["goodbye", "bye", "exit", "quit"];

/// Fixed site-name set for the website-open rule; first match wins.
pub const SITES: &[(&str, &str)] = &[
    ("google", "https://google.com"),
    ("youtube", "https://youtube.com"),
    ("github", "https://github.com"),
    ("stackoverflow", "https://stackoverflow.com"),
    ("wikipedia", "https://wikipedia.org"),
];

impl RuleCategory {
    /// Predicate over the normalized (lower-cased, trimmed) command.
    pub fn matches(self, command: &str) -> bool {
        match self {
            Self::Greeting => GREETINGS.iter().any(|word| command.contains(word)),
            Self::Time => command.contains("time"),
            Self::Date => command.contains("date"),
            Self::Weather => command.contains("weather"),
            Self::Informational => {
                command.starts_with("search") || command.starts_with("what is")
            }
            Self::Website => {
                command.starts_with("open")
                    && SITES.iter().any(|(site, _)| command.contains(site))
            }
            Self::Application => command.starts_with("open"),
            Self::Joke => command.contains("joke"),
            Self::Farewell => contains_farewell(command),
        }
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

pub fn contains_farewell(text: &str) -> bool {
    FAREWELLS.iter().any(|word| text.contains(word))
}

/// City clause after the last occurrence of the substring `in`, or `None`
/// when the command contains no `in` at all.
pub fn weather_city(command: &str) -> Option<String> {
    let idx = command.rfind("in")?;
    Some(command[idx + 2..].trim().to_string())
}

/// Query remainder after stripping every occurrence of the trigger words.
pub fn informational_query(command: &str) -> String {
    command
        .replace("search", "")
        .replace("what is", "")
        .trim()
        .to_string()
}

/// Application name after stripping every occurrence of `open`.
pub fn application_name(command: &str) -> String {
    command.replace("open", "").trim().to_string()
}
