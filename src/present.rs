pub(crate) fn create_listing(stories: &[crate::Story]) -> String {
    let mut listing = String::new();

    for (rank, story) in stories.iter().enumerate() {
        let marker = if story.is_new {
            format!("{} ", console::style("[NEW]").green().bold())
        } else {
            String::new()
        };

        listing.push_str(&format!(
            "{:>2}. {}{}\n    {} points, {} comments, r/{}, by u/{}\n    https://www.reddit.com{}\n",
            rank + 1,
            marker,
            sanitize_title(&story.title),
            story.score,
            story.num_comments,
            story.subreddit,
            story.author,
            story.permalink,
        ));
    }

    listing
}

pub(crate) fn export_stories(stories: &[crate::Story]) -> anyhow::Result<()> {
    let json_listing = serde_json::to_string_pretty(stories)?;
    std::fs::create_dir_all("export")?;
    std::fs::write("export/top_stories.json", json_listing)?;
    tracing::info!("Exported stories to export/top_stories.json");

    Ok(())
}

// Titles are untrusted wire text. Strip ANSI escape sequences and control
// characters and cap the length so a hostile title cannot drive the terminal.
fn sanitize_title(title: &str) -> String {
    let ansi_re = regex::Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]").unwrap();
    let no_ansi = ansi_re.replace_all(title, "");

    let spaced = no_ansi.replace(['\n', '\r', '\t'], " ");
    let cleaned: String = spaced.chars().filter(|c| *c >= ' ' && *c != '\x7f').collect();

    cleaned.trim().chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_listing() {
        let stories = vec![
            crate::Story {
                id: "1g2h3j".to_string(),
                title: "Rust 2.0 announced".to_string(),
                subreddit: "programming".to_string(),
                author: "steve".to_string(),
                score: 4200,
                num_comments: 371,
                permalink: "/r/programming/comments/1g2h3j/rust_20_announced/".to_string(),
                is_new: true,
                ..Default::default()
            },
            crate::Story {
                id: "9k8l7m".to_string(),
                title: "A pipe organ built from scratch".to_string(),
                subreddit: "DIY".to_string(),
                author: "organist".to_string(),
                score: 2100,
                num_comments: 95,
                permalink: "/r/DIY/comments/9k8l7m/a_pipe_organ_built_from_scratch/".to_string(),
                is_new: false,
                ..Default::default()
            },
        ];

        let listing = create_listing(&stories);
        assert!(!listing.is_empty());
        println!("{}", listing);

        assert!(listing.contains(" 1. "));
        assert!(listing.contains("Rust 2.0 announced"));
        assert!(listing.contains("[NEW]"));
        assert!(listing.contains("4200 points, 371 comments, r/programming, by u/steve"));
        assert!(listing
            .contains("https://www.reddit.com/r/DIY/comments/9k8l7m/a_pipe_organ_built_from_scratch/"));

        // Only the first story is unseen.
        assert_eq!(listing.matches("[NEW]").count(), 1);
    }

    #[test]
    fn test_sanitize_title_strips_ansi_and_controls() {
        let title = "\x1B[31mred\x1B[0m alert\x07 over\ntwo lines";

        assert_eq!(sanitize_title(title), "red alert over two lines");
    }

    #[test]
    fn test_sanitize_title_truncates() {
        let title = "a".repeat(300);

        assert_eq!(sanitize_title(&title).chars().count(), 200);
    }
}
