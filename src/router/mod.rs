//! Command Router
//!
//! Maps free-form command text to a response string via ordered rule
//! evaluation. Routing holds no mutable session state (the joke rotation
//! counter aside) and is safe to call concurrently; skill failures come back
//! as user-facing strings, never as errors.

pub mod rules;

use crate::skills::{AppLauncher, KnowledgeProvider, WeatherProvider};
use chrono::Local;
use rules::RuleCategory;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const GREETING_REPLY: &str = "Hello! How can I assist you today?";

const FAREWELL_REPLY: &str = "Goodbye! Have a great day!";

const FALLBACK_REPLY: &str = "I'm sorry, I didn't understand that command. Try asking about \
                              time, weather, or say 'open' followed by an application name.";

const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "I told my wife she was drawing her eyebrows too high. She looked surprised.",
    "Why don't programmers like nature? It has too many bugs!",
];

pub struct CommandRouter {
    weather: Arc<dyn WeatherProvider>,
    knowledge: Arc<dyn KnowledgeProvider>,
    launcher: Arc<dyn AppLauncher>,
    default_city: String,
    joke_cursor: AtomicUsize,
}

impl CommandRouter {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        knowledge: Arc<dyn KnowledgeProvider>,
        launcher: Arc<dyn AppLauncher>,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            weather,
            knowledge,
            launcher,
            default_city: default_city.into(),
            joke_cursor: AtomicUsize::new(0),
        }
    }

    /// Routes one command to its reply. First matching rule wins; unknown
    /// commands get the fixed help message.
    pub async fn route(&self, text: &str) -> String {
        let command = rules::normalize(text);

        for category in rules::RULE_ORDER {
            if category.matches(&command) {
                return self.dispatch(category, &command).await;
            }
        }

        FALLBACK_REPLY.to_string()
    }

    async fn dispatch(&self, category: RuleCategory, command: &str) -> String {
        match category {
            RuleCategory::Greeting => GREETING_REPLY.to_string(),
            RuleCategory::Time => Local::now().format("The current time is %I:%M %p.").to_string(),
            RuleCategory::Date => Local::now().format("Today is %A, %B %d, %Y.").to_string(),
            RuleCategory::Weather => {
                let city = rules::weather_city(command)
                    .unwrap_or_else(|| self.default_city.clone());
                self.weather.current_weather(&city).await
            }
            RuleCategory::Informational => {
                self.knowledge
                    .summary(&rules::informational_query(command))
                    .await
            }
            RuleCategory::Website => {
                match rules::SITES.iter().find(|(site, _)| command.contains(site)) {
                    Some((site, url)) => self.launcher.open_website(site, url),
                    // Unreachable in practice: the predicate required a site name.
                    None => self.launcher.open_application(&rules::application_name(command)),
                }
            }
            RuleCategory::Application => {
                self.launcher
                    .open_application(&rules::application_name(command))
            }
            RuleCategory::Joke => {
                let index = self.joke_cursor.fetch_add(1, Ordering::Relaxed) % JOKES.len();
                JOKES[index].to_string()
            }
            RuleCategory::Farewell => FAREWELL_REPLY.to_string(),
        }
    }
}
