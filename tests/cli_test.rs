use mockito::Matcher;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn write_config(name: &str, server: &mockito::ServerGuard) -> PathBuf {
    let file_name = format!("release-dashboard-cli-{}-{}.toml", name, std::process::id());
    let path = std::env::temp_dir().join(file_name);
    let config = format!("[github]\norg = \"acme\"\napi_url = \"{}\"\n", server.url());
    std::fs::write(&path, config).unwrap();
    path
}

fn run(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_release-dashboard"))
        .env_remove("GITHUB_ORG")
        .env("RUST_LOG", "info")
        .arg("--token")
        .arg("test-token")
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("run release-dashboard")
}

fn tag_json(server: &str, name: &str, sha: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "node_id": format!("tag-{}", name),
        "commit": { "sha": sha, "url": format!("{}/repos/acme/api/commits/{}", server, sha) },
        "zipball_url": format!("{}/repos/acme/api/zipball/{}", server, name),
        "tarball_url": format!("{}/repos/acme/api/tarball/{}", server, name)
    })
}

fn commit_json(server: &str, sha: &str, date: &str) -> serde_json::Value {
    let person = serde_json::json!({ "name": "Dev", "email": "dev@example.com", "date": date });
    serde_json::json!([{
        "url": format!("{}/repos/acme/api/commits/{}", server, sha),
        "sha": sha,
        "node_id": format!("commit-{}", sha),
        "html_url": format!("https://github.com/acme/api/commit/{}", sha),
        "comments_url": format!("{}/repos/acme/api/commits/{}/comments", server, sha),
        "commit": {
            "url": format!("{}/repos/acme/api/git/commits/{}", server, sha),
            "author": person,
            "committer": person,
            "message": "release",
            "comment_count": 0,
            "tree": {
                "sha": "tree",
                "url": format!("{}/repos/acme/api/git/trees/tree", server)
            }
        },
        "author": null,
        "committer": null,
        "parents": []
    }])
}

#[test]
fn test_summary_json_stdout_is_only_the_report() {
    let mut server = mockito::Server::new();
    let url = server.url();
    let _repos = server
        .mock("GET", "/orgs/acme/repos")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!([{
                "id": 1, "name": "api",
                "url": format!("{}/repos/acme/api", url),
                "html_url": "https://github.com/acme/api",
                "archived": false, "fork": false
            }])
            .to_string(),
        )
        .create();
    let _tags = server
        .mock("GET", "/repos/acme/api/tags")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let config = write_config("summary", &server);
    let output = run(&config, &["summary", "--format", "json"]);
    std::fs::remove_file(&config).ok();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["org"], "acme");
    assert_eq!(report["summary"]["totalRepositories"], 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("analyzing repositories"));
}

#[test]
fn test_releases_limit_caps_listing_not_stats() {
    let mut server = mockito::Server::new();
    let url = server.url();
    let _tags = server
        .mock("GET", "/repos/acme/api/tags")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!([
                tag_json(&url, "v3.0.0", "ccc"),
                tag_json(&url, "v2.0.0", "bbb"),
                tag_json(&url, "v1.0.0", "aaa")
            ])
            .to_string(),
        )
        .create();
    let mut commits = Vec::new();
    for (sha, date) in [
        ("ccc", "2024-03-01T00:00:00Z"),
        ("bbb", "2024-02-01T00:00:00Z"),
        ("aaa", "2024-01-01T00:00:00Z"),
    ] {
        commits.push(
            server
                .mock("GET", "/repos/acme/api/commits")
                .match_query(Matcher::UrlEncoded("sha".into(), sha.into()))
                .with_header("content-type", "application/json")
                .with_body(commit_json(&url, sha, date).to_string())
                .create(),
        );
    }

    let config = write_config("releases", &server);
    let output = run(&config, &["releases", "--repo", "api", "--limit", "2"]);
    std::fs::remove_file(&config).ok();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 releases, 3 semantic"));
    let listed: Vec<&str> = stdout.lines().filter(|l| l.starts_with("  - ")).collect();
    assert_eq!(
        listed,
        vec![
            "  - v3.0.0 [release] 2024-03-01",
            "  - v2.0.0 [release] 2024-02-01"
        ]
    );
}
