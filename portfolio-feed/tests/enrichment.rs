mod common;

use base64::Engine;
use common::{repo_json, StubServer};
use portfolio_feed::{GithubConfig, Repo, RepoCatalog, RepoEnricher, ResponseCache};
use serde_json::json;
use std::time::Duration;

const README: &str = "# Site\n\
![badge](https://img.shields.io/x.svg)\n\
![cover](./assets/hero.png)\n\
\n\
- Server-rendered pages\n\
- MDX content\n\
- Third bullet\n";

fn config(api: &StubServer, raw: &StubServer, readme_extras: bool) -> GithubConfig {
    let mut config = GithubConfig::new("gn");
    config.api_base_url = api.url();
    config.raw_base_url = raw.url();
    config.readme_extras = readme_extras;
    config.timeout = Duration::from_millis(300);
    config.readme_timeout = Duration::from_millis(300);
    config
}

async fn site(api: &StubServer, config: &GithubConfig) -> Repo {
    let mut payload = repo_json("gn", "site", "2024-01-01T00:00:00Z");
    payload["language"] = json!("TypeScript");
    api.route("/repos/gn/site", 200, payload.to_string());
    let catalog = RepoCatalog::new(config.clone(), ResponseCache::new()).unwrap();
    catalog.fetch_repo_by_name("site").await.unwrap()
}

fn readme_envelope() -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(README);
    json!({ "content": encoded, "encoding": "base64" }).to_string()
}

#[tokio::test]
async fn card_extras_from_languages_and_readme() {
    let api = StubServer::start().await;
    let raw = StubServer::start().await;
    let config = config(&api, &raw, true);
    let repo = site(&api, &config).await;
    api.route(
        "/repos/gn/site/languages",
        200,
        json!({ "TypeScript": 300, "CSS": 100 }).to_string(),
    );
    api.route("/repos/gn/site/readme", 200, readme_envelope());

    let enricher = RepoEnricher::new(config, ResponseCache::new()).unwrap();
    let extras = enricher.card_extras(&repo).await;

    assert_eq!(
        extras.cover,
        Some(format!("{}gn/site/main/assets/hero.png", raw.url()))
    );
    assert_eq!(extras.bullets, ["Server-rendered pages", "MDX content"]);
    assert_eq!(extras.stack, ["TypeScript", "CSS"]);
    assert_eq!(extras.top_langs.len(), 2);
    assert_eq!(extras.top_langs[0].name, "TypeScript");
    assert!((extras.top_langs[0].pct - 75.0).abs() < f64::EPSILON);
    assert!((extras.top_langs[1].pct - 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn readme_skipped_when_extras_disabled() {
    let api = StubServer::start().await;
    let raw = StubServer::start().await;
    let config = config(&api, &raw, false);
    let repo = site(&api, &config).await;
    api.route("/repos/gn/site/languages", 200, json!({ "Rust": 10 }).to_string());
    api.route("/repos/gn/site/readme", 200, readme_envelope());

    let enricher = RepoEnricher::new(config, ResponseCache::new()).unwrap();
    let extras = enricher.card_extras(&repo).await;

    assert_eq!(extras.cover, None);
    assert!(extras.bullets.is_empty());
    assert!(api.hits("/repos/gn/site/readme").is_empty());
}

#[tokio::test]
async fn failed_languages_keep_readme_data() {
    let api = StubServer::start().await;
    let raw = StubServer::start().await;
    let config = config(&api, &raw, true);
    let repo = site(&api, &config).await;
    api.route("/repos/gn/site/languages", 500, "{}");
    api.route("/repos/gn/site/readme", 200, readme_envelope());

    let enricher = RepoEnricher::new(config, ResponseCache::new()).unwrap();
    let extras = enricher.card_extras(&repo).await;

    assert!(extras.top_langs.is_empty());
    assert_eq!(extras.stack, ["TypeScript"]);
    assert!(extras.cover.is_some());
    assert!(enricher.languages(&repo).await.is_empty());
}

#[tokio::test]
async fn slow_readme_keeps_language_data() {
    let api = StubServer::start().await;
    let raw = StubServer::start().await;
    let config = config(&api, &raw, true);
    let repo = site(&api, &config).await;
    api.route("/repos/gn/site/languages", 200, json!({ "Rust": 10 }).to_string());
    api.route_delayed(
        "/repos/gn/site/readme",
        200,
        readme_envelope(),
        Duration::from_secs(2),
    );

    let enricher = RepoEnricher::new(config, ResponseCache::new()).unwrap();
    let extras = enricher.card_extras(&repo).await;

    assert_eq!(extras.cover, None);
    assert_eq!(extras.top_langs.len(), 1);
    assert!((extras.top_langs[0].pct - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn extras_for_all_are_index_aligned() {
    let api = StubServer::start().await;
    let raw = StubServer::start().await;
    let config = config(&api, &raw, false);
    let repo = site(&api, &config).await;
    let mut other = repo.clone();
    other.name = "tool".to_string();
    other.full_name = "gn/tool".to_string();
    other.language = None;
    api.route("/repos/gn/site/languages", 200, json!({ "Go": 1 }).to_string());
    api.route("/repos/gn/tool/languages", 200, json!({ "Zig": 1 }).to_string());

    let enricher = RepoEnricher::new(config, ResponseCache::new()).unwrap();
    let extras = enricher.card_extras_for_all(&[repo, other]).await;

    assert_eq!(extras.len(), 2);
    assert_eq!(extras[0].stack, ["TypeScript", "Go"]);
    assert_eq!(extras[1].stack, ["Zig"]);
}
