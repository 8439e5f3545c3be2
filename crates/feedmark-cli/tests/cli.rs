use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the binary inside `dir` with an isolated home so no user config is read
fn feedmark(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_feedmark"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run feedmark")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn list_with_missing_explicit_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = feedmark(dir.path(), &["--file", "missing.md", "--list"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Feeds ("));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.md"));
}

#[test]
fn read_with_missing_explicit_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = feedmark(dir.path(), &["--file", "missing.md"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("==="));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.md"));
}

#[test]
fn zero_max_entries_in_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join(".config").join("feedmark");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[general]\nmax_entries = 0\n").unwrap();
    fs::write(dir.path().join("feeds.md"), "- [A](http://127.0.0.1:9/rss)\n").unwrap();

    let output = feedmark(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("max_entries"));
}

#[test]
fn missing_default_file_prints_hint() {
    let dir = TempDir::new().unwrap();
    let output = feedmark(dir.path(), &["--list"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("feedmark --add"));
}

#[test]
fn add_without_name_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("feeds.md");
    fs::write(&file, "# RSS Feeds\n").unwrap();

    let output = feedmark(dir.path(), &["--file", "feeds.md", "--add", "https://example.com/rss"]);

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(fs::read_to_string(&file).unwrap(), "# RSS Feeds\n");
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();

    let output = feedmark(
        dir.path(),
        &["--add", "https://news.ycombinator.com/rss", "--name", "HN", "--category", "Tech"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("Added HN"));

    let content = fs::read_to_string(dir.path().join("feeds.md")).unwrap();
    assert!(content.contains("## Tech\n- [HN](https://news.ycombinator.com/rss)\n"));

    let output = feedmark(dir.path(), &["--list"]);
    assert!(output.status.success());
    let listed = stdout(&output);
    assert!(listed.contains("Tech"));
    assert!(listed.contains("HN <https://news.ycombinator.com/rss>"));
}

#[test]
fn add_invalid_url_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("feeds.md");
    fs::write(&file, "## Tech\n- [HN](https://news.ycombinator.com/rss)\n").unwrap();

    let output = feedmark(dir.path(), &["--add", "not a url", "--name", "Bad"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "## Tech\n- [HN](https://news.ycombinator.com/rss)\n"
    );
}

#[test]
fn zero_max_entries_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = feedmark(dir.path(), &["--max-entries", "0"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unreachable_feed_does_not_fail_the_run() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("feeds.md"),
        "## Local\n- [Nowhere](http://127.0.0.1:9/rss)\n- [Also Nowhere](http://127.0.0.1:9/atom)\n",
    )
    .unwrap();

    let output = feedmark(dir.path(), &[]);

    assert!(output.status.success());
    let printed = stdout(&output);
    assert!(printed.contains("could not load Nowhere"));
    assert!(printed.contains("could not load Also Nowhere"));
}

fn rss(count: usize) -> String {
    let items: String = (1..=count)
        .map(|i| format!("<item><title>Post {i}</title><link>https://example.com/{i}</link></item>"))
        .collect();
    format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Mock</title><link>https://example.com</link><description>d</description>{}</channel></rss>"#,
        items
    )
}

#[tokio::test]
async fn failed_feed_is_followed_by_working_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/up"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(rss(10))
                .insert_header("Content-Type", "application/rss+xml"),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("feeds.md"),
        format!(
            "## Mixed\n- [Down]({uri}/down)\n- [Up]({uri}/up)\n",
            uri = server.uri()
        ),
    )
    .unwrap();

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_feedmark"))
        .args(["--max-entries", "3"])
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    let printed = stdout(&output);
    let failure = printed.find("could not load Down").unwrap();
    let header = printed.find("=== Up ===").unwrap();
    assert!(failure < header);
    assert!(printed.contains("- Post 3"));
    assert!(!printed.contains("- Post 4"));

    // The inline line is the only report of the failure
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Down"));
}
