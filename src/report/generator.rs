use anyhow::Result;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

use super::{DashboardReport, RepositoryReport};

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/dashboard.md.hbs");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

pub struct ReportGenerator {
    template_engine: Handlebars<'static>,
    format: OutputFormat,
}

impl ReportGenerator {
    pub fn new(format: OutputFormat, template_path: Option<&Path>) -> Result<Self> {
        let mut template_engine = Handlebars::new();
        template_engine.register_escape_fn(handlebars::no_escape);

        match template_path {
            Some(path) => {
                let template_content = std::fs::read_to_string(path)?;
                template_engine.register_template_string("dashboard", &template_content)?;
            }
            None => template_engine.register_template_string("dashboard", DEFAULT_TEMPLATE)?,
        }

        Ok(Self {
            template_engine,
            format,
        })
    }

    pub fn generate(&self, report: &DashboardReport) -> Result<String> {
        match self.format {
            OutputFormat::Markdown => self.generate_markdown(report),
            OutputFormat::Json => self.generate_json(report),
            OutputFormat::Html => self.generate_html(report),
        }
    }

    fn generate_markdown(&self, report: &DashboardReport) -> Result<String> {
        let summary = &report.summary;
        let data = json!({
            "org": report.org,
            "generated_at": report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            "summary": {
                "total_repositories": summary.total_repositories,
                "repositories_with_releases": summary.repositories_with_releases,
                "total_releases": summary.total_releases,
                "semantic_releases": summary.semantic_releases,
                "stale_repositories": summary.stale_repositories,
                "most_recent": summary.most_recent_release.as_ref().map(|m| json!({
                    "repository": m.repository,
                    "tag_name": m.tag_name,
                    "days_since": m.days_since,
                })),
            },
            "repositories": report.repositories.iter().map(repository_view).collect::<Vec<_>>(),
        });

        Ok(self.template_engine.render("dashboard", &data)?)
    }

    fn generate_json(&self, report: &DashboardReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn generate_html(&self, report: &DashboardReport) -> Result<String> {
        let markdown = self.generate_markdown(report)?;
        let mut options = pulldown_cmark::Options::empty();
        options.insert(pulldown_cmark::Options::ENABLE_TABLES);
        // Raw HTML in repository text renders as literal text.
        let parser = pulldown_cmark::Parser::new_ext(&markdown, options).map(|event| match event {
            pulldown_cmark::Event::Html(raw) => pulldown_cmark::Event::Text(raw),
            other => other,
        });
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Release Dashboard: {}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI',
                Helvetica, Arial, sans-serif;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
        }}
        h1, h2, h3 {{ border-bottom: 1px solid #e1e4e8; padding-bottom: 0.3em; }}
        code {{ background: #f6f8fa; padding: 2px 4px; border-radius: 3px; }}
        table {{ border-collapse: collapse; }}
        th, td {{ border: 1px solid #e1e4e8; padding: 4px 10px; }}
    </style>
</head>
<body>
    {}
</body>
</html>"#,
            handlebars::html_escape(&report.org),
            html
        ))
    }
}

fn repository_view(repo: &RepositoryReport) -> serde_json::Value {
    let stats = repo.release_stats.as_ref().filter(|s| s.has_releases());
    let latest = stats.and_then(|s| s.latest_release());

    json!({
        "full_name": repo.full_name,
        "url": repo.url,
        "description": repo.description,
        "language": repo.language,
        "stars": repo.star_count,
        "has_releases": stats.is_some(),
        "total_releases": stats.map(|s| s.total_releases()),
        "semantic_releases": stats.map(|s| s.semantic_releases()),
        "latest_tag": latest.map(|r| r.tag_name()),
        "latest_date": latest.map(|r| r.date().format("%Y-%m-%d").to_string()),
        "days_since_latest": stats.and_then(|s| s.days_since_latest_release()),
        "latest_semantic_tag": stats
            .and_then(|s| s.latest_semantic_release())
            .map(|r| r.tag_name()),
        "latest_releases": repo.latest_releases.iter().map(|r| json!({
            "tag_name": r.tag_name(),
            "date": r.date().format("%Y-%m-%d").to_string(),
            "version": r.version().map(ToString::to_string),
            "recent": repo.recent_releases.iter().any(|recent| recent.tag_name() == r.tag_name()),
        })).collect::<Vec<_>>(),
        "monthly": repo.monthly_releases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::report::tests::sample_enriched;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn report() -> DashboardReport {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let analysis = AnalysisConfig {
            chart_months: 2,
            ..AnalysisConfig::default()
        };
        DashboardReport::build("acme", &sample_enriched(now), &analysis, now)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_markdown_report() {
        let generator = ReportGenerator::new(OutputFormat::Markdown, None).unwrap();
        let output = generator.generate(&report()).unwrap();

        assert!(output.contains("# Release Dashboard: acme"));
        assert!(output.contains("- **Repositories:** 2"));
        assert!(output.contains("## [acme/api](https://github.com/acme/api)"));
        assert!(output.contains("**Releases:** 3 (2 semantic)"));
        assert!(output.contains("**Latest Semantic:** `v1.1.0`"));
        assert!(output.contains("- `v2.0.0-rc.1` 2024-03-05 → 2.0.0-rc.1 🆕"));
        assert!(output.contains("| 2024-03 | 1 | 0 |"));
        assert!(output.contains("*No releases found*"));
    }

    #[test]
    fn test_json_report_uses_wire_names() {
        let generator = ReportGenerator::new(OutputFormat::Json, None).unwrap();
        let output = generator.generate(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let stats = &value["repositories"][0]["releaseStats"];
        assert_eq!(stats["totalReleases"], 3);
        assert_eq!(stats["semanticReleases"], 2);
        assert_eq!(stats["latestRelease"]["tagName"], "v2.0.0-rc.1");
        assert_eq!(stats["latestRelease"]["version"], "2.0.0-rc.1");
        assert_eq!(stats["latestSemanticRelease"]["tagName"], "v1.1.0");
        assert_eq!(stats["daysSinceLatestRelease"], 10);
        assert_eq!(value["repositories"][1]["releaseStats"], serde_json::Value::Null);
    }

    #[test]
    fn test_html_report_wraps_markdown() {
        let generator = ReportGenerator::new(OutputFormat::Html, None).unwrap();
        let output = generator.generate(&report()).unwrap();
        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("<title>Release Dashboard: acme</title>"));
        assert!(output.contains("<table>"));
    }

    #[test]
    fn test_html_report_escapes_repository_text() {
        let mut report = report();
        report.org = "<b>acme</b>".to_string();
        report.repositories[0].description = Some("<script>alert(1)</script>".to_string());

        let generator = ReportGenerator::new(OutputFormat::Html, None).unwrap();
        let output = generator.generate(&report).unwrap();

        assert!(!output.contains("<script>"));
        assert!(output.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(output.contains("<title>Release Dashboard: &lt;b&gt;acme&lt;/b&gt;</title>"));
    }

    #[test]
    fn test_custom_template() {
        let file_name = format!("release-dashboard-tpl-{}.hbs", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, "{{org}} has {{summary.total_releases}} releases").unwrap();

        let generator = ReportGenerator::new(OutputFormat::Markdown, Some(&path)).unwrap();
        let output = generator.generate(&report()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(output, "acme has 3 releases");
    }
}
