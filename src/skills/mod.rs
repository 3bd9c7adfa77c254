//! Skill integrations
//!
//! Plain request/response lookups and launchers the router dispatches to.
//! Every skill converts its own failures into a user-facing reply string;
//! nothing here ever returns an error to the coordinator.

mod launcher;
mod weather;
mod wiki;

pub use launcher::SystemLauncher;
pub use weather::OpenWeatherMap;
pub use wiki::WikipediaClient;

use async_trait::async_trait;

/// Current-conditions lookup by city.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, city: &str) -> String;
}

/// Encyclopedia summary lookup.
#[async_trait]
pub trait KnowledgeProvider: Send + Sync {
    async fn summary(&self, query: &str) -> String;
}

/// Website and application launching on the host system.
pub trait AppLauncher: Send + Sync {
    /// Opens `url` in the default browser; `site` is the spoken name.
    fn open_website(&self, site: &str, url: &str) -> String;

    /// Launches the named application.
    fn open_application(&self, name: &str) -> String;
}
