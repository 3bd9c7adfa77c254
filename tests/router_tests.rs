// Router determinism tests
//
// These pin the ordered rule table: which rule each command hits, which
// arguments reach the skills, and the literal substring-matching behavior
// (including its boundary cases) the assistant has always had.

use async_trait::async_trait;
use deskvoice::skills::{AppLauncher, KnowledgeProvider, WeatherProvider};
use deskvoice::CommandRouter;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingWeather {
    cities: Mutex<Vec<String>>,
}

#[async_trait]
impl WeatherProvider for RecordingWeather {
    async fn current_weather(&self, city: &str) -> String {
        self.cities.lock().unwrap().push(city.to_string());
        format!("weather for {}", city)
    }
}

#[derive(Default)]
struct RecordingKnowledge {
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl KnowledgeProvider for RecordingKnowledge {
    async fn summary(&self, query: &str) -> String {
        self.queries.lock().unwrap().push(query.to_string());
        format!("summary of {}", query)
    }
}

#[derive(Default)]
struct RecordingLauncher {
    websites: Mutex<Vec<(String, String)>>,
    applications: Mutex<Vec<String>>,
}

impl AppLauncher for RecordingLauncher {
    fn open_website(&self, site: &str, url: &str) -> String {
        self.websites
            .lock()
            .unwrap()
            .push((site.to_string(), url.to_string()));
        format!("Opening {}.", site)
    }

    fn open_application(&self, name: &str) -> String {
        self.applications.lock().unwrap().push(name.to_string());
        format!("Opening {}.", name)
    }
}

struct Fixture {
    router: CommandRouter,
    weather: Arc<RecordingWeather>,
    knowledge: Arc<RecordingKnowledge>,
    launcher: Arc<RecordingLauncher>,
}

fn fixture() -> Fixture {
    let weather = Arc::new(RecordingWeather::default());
    let knowledge = Arc::new(RecordingKnowledge::default());
    let launcher = Arc::new(RecordingLauncher::default());

    let router = CommandRouter::new(
        Arc::clone(&weather) as Arc<dyn WeatherProvider>,
        Arc::clone(&knowledge) as Arc<dyn KnowledgeProvider>,
        Arc::clone(&launcher) as Arc<dyn AppLauncher>,
        "London",
    );

    Fixture {
        router,
        weather,
        knowledge,
        launcher,
    }
}

#[tokio::test]
async fn hello_gets_the_greeting() {
    let f = fixture();
    assert_eq!(
        f.router.route("hello").await,
        "Hello! How can I assist you today?"
    );
}

#[tokio::test]
async fn normalization_handles_case_and_whitespace() {
    let f = fixture();
    assert_eq!(
        f.router.route("  HELLO there  ").await,
        "Hello! How can I assist you today?"
    );
}

#[tokio::test]
async fn time_query_reports_current_time() {
    let f = fixture();
    let reply = f.router.route("what time is it").await;
    assert!(reply.starts_with("The current time is"), "got: {}", reply);
    // Ordered before the informational rule, so no lookup happened.
    assert!(f.knowledge.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn date_query_reports_current_date() {
    let f = fixture();
    let reply = f.router.route("what's the date today").await;
    assert!(reply.starts_with("Today is"), "got: {}", reply);
}

#[tokio::test]
async fn weather_query_extracts_the_city() {
    let f = fixture();
    let reply = f.router.route("weather in paris").await;
    assert_eq!(reply, "weather for paris");
    assert_eq!(*f.weather.cities.lock().unwrap(), vec!["paris".to_string()]);
}

#[tokio::test]
async fn weather_without_city_uses_the_default() {
    let f = fixture();
    f.router.route("weather").await;
    assert_eq!(*f.weather.cities.lock().unwrap(), vec!["London".to_string()]);
}

#[tokio::test]
async fn weather_in_berlin_splits_inside_the_city_name() {
    // "berlin" contains "in"; the split happens after its last occurrence,
    // leaving an empty city. Pinned source behavior.
    let f = fixture();
    f.router.route("weather in berlin").await;
    assert_eq!(*f.weather.cities.lock().unwrap(), vec![String::new()]);
}

#[tokio::test]
async fn search_strips_the_trigger_word() {
    let f = fixture();
    let reply = f.router.route("search large language models").await;
    assert_eq!(reply, "summary of large language models");
    assert_eq!(
        *f.knowledge.queries.lock().unwrap(),
        vec!["large language models".to_string()]
    );
}

#[tokio::test]
async fn what_is_strips_the_trigger_phrase() {
    let f = fixture();
    f.router.route("what is rust").await;
    assert_eq!(*f.knowledge.queries.lock().unwrap(), vec!["rust".to_string()]);
}

#[tokio::test]
async fn open_youtube_takes_the_website_branch() {
    let f = fixture();
    let reply = f.router.route("open youtube").await;
    assert_eq!(reply, "Opening youtube.");

    let websites = f.launcher.websites.lock().unwrap();
    assert_eq!(websites.len(), 1);
    assert_eq!(websites[0].0, "youtube");
    assert_eq!(websites[0].1, "https://youtube.com");
    assert!(f.launcher.applications.lock().unwrap().is_empty());
}

#[tokio::test]
async fn open_unknown_name_takes_the_application_branch() {
    let f = fixture();
    let reply = f.router.route("open spotify").await;
    assert_eq!(reply, "Opening spotify.");
    assert_eq!(
        *f.launcher.applications.lock().unwrap(),
        vec!["spotify".to_string()]
    );
    assert!(f.launcher.websites.lock().unwrap().is_empty());
}

#[tokio::test]
async fn jokes_rotate_through_the_list() {
    let f = fixture();
    let first = f.router.route("tell me a joke").await;
    let second = f.router.route("another joke").await;
    assert_ne!(first, second);
    assert!(first.contains('!') || first.contains('.'));
}

#[tokio::test]
async fn farewell_gets_the_goodbye_reply() {
    let f = fixture();
    assert_eq!(f.router.route("goodbye").await, "Goodbye! Have a great day!");
}

#[tokio::test]
async fn farewell_matches_inside_longer_words() {
    // Literal substring containment, pinned source behavior.
    let f = fixture();
    assert_eq!(
        f.router.route("good-bye-bye-now").await,
        "Goodbye! Have a great day!"
    );
}

#[tokio::test]
async fn unknown_text_gets_the_fixed_fallback() {
    let f = fixture();
    let reply = f.router.route("flurble the wobbles").await;
    assert!(reply.starts_with("I'm sorry, I didn't understand"), "got: {}", reply);

    // No skill was touched.
    assert!(f.weather.cities.lock().unwrap().is_empty());
    assert!(f.knowledge.queries.lock().unwrap().is_empty());
    assert!(f.launcher.websites.lock().unwrap().is_empty());
    assert!(f.launcher.applications.lock().unwrap().is_empty());
}
