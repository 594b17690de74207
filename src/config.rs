#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) num_stories_to_present: usize,
    pub(crate) show_nsfw: bool,
    pub(crate) log_to_console: bool,
}

static CONFIG: std::sync::LazyLock<Config> = std::sync::LazyLock::new(|| {
    dotenvy::dotenv().expect("Failed to load .env file");

    Config {
        num_stories_to_present: std::env::var("NUM_STORIES_TO_PRESENT")
            .expect("NUM_STORIES_TO_PRESENT not set")
            .parse()
            .unwrap(),

        show_nsfw: std::env::var("SHOW_NSFW")
            .expect("SHOW_NSFW not set")
            .parse()
            .unwrap(),

        log_to_console: std::env::var("LOG_TO_CONSOLE")
            .expect("LOG_TO_CONSOLE not set")
            .parse()
            .unwrap(),
    }
});

pub(crate) fn config() -> &'static Config {
    &CONFIG
}
