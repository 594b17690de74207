use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod db;
pub(crate) mod present;
pub(crate) mod reddit_api;

pub(crate) static CLIENT: std::sync::LazyLock<reqwest::Client> =
    std::sync::LazyLock::new(reqwest::Client::new);

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "false")]
    #[arg(help = "Export the presented stories to json in the export directory")]
    export: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Reset the seen-stories database")]
    reset: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console")]
    log_to_console: bool,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
struct Story {
    id: String,
    title: String,
    subreddit: String,
    author: String,
    score: i64,
    num_comments: i64,
    permalink: String,

    // Reddit's unique fullname, e.g. "t3_1g2h3j". Older payloads may omit it.
    name: Option<String>,
    url: Option<String>,

    #[serde(default)]
    stickied: bool,
    #[serde(default)]
    over_18: bool,

    // Not included in the json payload. Our own enrichment.
    #[serde(default)]
    is_new: bool,
}

impl Story {
    fn seen_key(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("t3_{}", self.id))
    }
}

impl Default for Story {
    fn default() -> Self {
        Self {
            id: "".to_string(),
            title: "".to_string(),
            subreddit: "".to_string(),
            author: "".to_string(),
            score: 0,
            num_comments: 0,
            permalink: "".to_string(),
            name: None,
            url: None,
            stickied: false,
            over_18: false,
            is_new: false,
        }
    }
}

/// Children arrive as opaque json. A child that does not decode as a link
/// post (promoted slots, non-t3 kinds) is logged and skipped, never fatal.
fn stories_from_children(children: Vec<serde_json::Value>) -> Vec<Story> {
    let mut stories = Vec::with_capacity(children.len());

    for child in children {
        let data = child.get("data").cloned().unwrap_or(child);

        match serde_json::from_value::<Story>(data) {
            Ok(story) => stories.push(story),
            Err(e) => tracing::warn!(error =? e, "Skipping child that is not a link post"),
        }
    }

    stories
}

fn remove_stickied(stories: Vec<Story>) -> Vec<Story> {
    stories.into_iter().filter(|s| !s.stickied).collect()
}

fn remove_nsfw(stories: Vec<Story>) -> Vec<Story> {
    stories.into_iter().filter(|s| !s.over_18).collect()
}

fn sort_stories(stories: &mut [Story]) {
    stories.sort_by(|a, b| {
        if a.score == b.score {
            b.num_comments.cmp(&a.num_comments)
        } else {
            b.score.cmp(&a.score)
        }
    })
}

fn mark_new_stories(stories: &mut [Story], seen_stories: &[String]) {
    for story in stories {
        story.is_new = !seen_stories.contains(&story.seen_key());
    }
}

async fn present_top_stories(args: Args) -> anyhow::Result<()> {
    let db = db::open_db(args.reset)?;

    tracing::info!("Database opened");
    let seen_stories = db::get_seen_stories(&db)?;

    tracing::info!(
        num_seen_stories = seen_stories.len(),
        "Got already seen stories"
    );

    let children = reddit_api::get_top_stories().await?;

    tracing::info!(num_children = children.len(), "Got top listing");

    let stories = stories_from_children(children);
    tracing::info!(num_stories = stories.len(), "Decoded link posts");

    let num_stories = stories.len();
    let stories = remove_stickied(stories);
    tracing::info!(
        num_stickied_removed = num_stories - stories.len(),
        "Removed stickied posts"
    );

    let mut stories = if config::config().show_nsfw {
        stories
    } else {
        let num_stories = stories.len();
        let stories = remove_nsfw(stories);
        tracing::info!(
            num_nsfw_removed = num_stories - stories.len(),
            "Removed nsfw posts"
        );
        stories
    };

    sort_stories(&mut stories);

    let mut stories = stories[..config::config()
        .num_stories_to_present
        .min(stories.len())]
        .to_vec();

    mark_new_stories(&mut stories, &seen_stories);

    if stories.is_empty() {
        tracing::info!("No stories to present");
        return Ok(());
    }

    let listing = present::create_listing(&stories);
    println!("{listing}");

    if args.export {
        present::export_stories(&stories)?;
    }

    db::insert_stories(&db, &stories)?;
    tracing::info!(
        num = stories.len(),
        ids =? stories.iter().map(|s: &Story| s.seen_key()).collect::<Vec<_>>(),
        "Recorded presented stories as seen"
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    use clap::Parser;
    let args = Args::parse();

    let file_appender = tracing_appender::rolling::daily("./log", "reddit_top.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer();
    let file_layer = file_layer
        .with_writer(non_blocking)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stdout)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let registry = tracing_subscriber::registry().with(file_layer);

    if config::config().log_to_console || args.log_to_console {
        registry.with(pretty_layer).init();
    } else {
        registry.init();
    };

    tracing::info!(
        config =? config::config(),
        args =? args,
        "Starting sequence"
    );

    // Timeout after five minutes
    const TIMEOUT: u64 = 60 * 5;
    tokio::select! {
        res = present_top_stories(args) => match res {
            Ok(_) => tracing::info!("Top stories presented"),
            Err(e) => tracing::error!(error =? e, "Error presenting top stories"),
        },
        _ = tokio::time::sleep(std::time::Duration::from_secs(TIMEOUT)) => {
            tracing::error!(timeout = TIMEOUT, "Timeout presenting top stories");
        }
    }
}
