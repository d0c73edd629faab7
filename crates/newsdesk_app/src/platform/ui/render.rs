use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate};
use newsdesk_core::{
    ArticleCard, PageStatus, PageView, ResultsView, SiteView, SourceCard, SourceLink,
};

const INDENT: &str = "    ";

/// Renders one page as plain text: header, filled fields, then its status.
pub fn render_page(view: &PageView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.page);
    for (field, value) in &view.fields {
        if !value.trim().is_empty() {
            let _ = writeln!(out, "{field}: {value}");
        }
    }
    out.push_str(&render_status(&view.status));
    out
}

pub fn render_status(status: &PageStatus) -> String {
    match status {
        PageStatus::Idle => "(nothing submitted yet)\n".to_string(),
        PageStatus::Loading => "Loading...\n".to_string(),
        PageStatus::Error(message) => format!("Error: {message}\n"),
        PageStatus::Text { heading, body } => format!("{heading}:\n{}\n", body.trim_end()),
        PageStatus::Results(results) => render_results(results),
        PageStatus::Site(site) => render_site(site),
    }
}

fn render_site(site: &SiteView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", site.title);
    let _ = writeln!(out, "{}", site.headline);
    if let Some(form) = &site.search_form {
        let _ = writeln!(out, "search form: {form}");
    }
    if !site.sections.is_empty() {
        let _ = writeln!(out, "\nSections");
        for section in &site.sections {
            let _ = writeln!(out, "{INDENT}{section}");
        }
    }
    if !site.links.is_empty() {
        let _ = writeln!(out, "\nLinks");
        for (idx, (text, url)) in site.links.iter().enumerate() {
            let _ = writeln!(out, "[{}] {text}", idx + 1);
            let _ = writeln!(out, "{INDENT}{url}");
        }
    }
    out
}

fn render_results(results: &ResultsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", results.headline);
    if let Some(notice) = &results.notice {
        let _ = writeln!(out, "{notice}");
    }

    if !results.sources.is_empty() {
        let _ = writeln!(out, "\nSources");
        for (idx, card) in results.sources.iter().enumerate() {
            out.push_str(&format_source_card(idx + 1, card));
        }
    }

    if !results.articles.is_empty() {
        let _ = writeln!(out, "\nArticles");
        for (idx, card) in results.articles.iter().enumerate() {
            out.push_str(&format_article_card(idx + 1, card));
        }
    }
    out
}

fn format_source_card(number: usize, card: &SourceCard) -> String {
    let mut out = String::new();
    match &card.link {
        SourceLink::Valid { href, host } => {
            let _ = writeln!(out, "[{number}] {} ({host})", card.name);
            let _ = writeln!(out, "{INDENT}{}", card.description);
            let _ = writeln!(out, "{INDENT}{href}");
        }
        SourceLink::Invalid { raw } => {
            let _ = writeln!(out, "[{number}] {}", card.name);
            let _ = writeln!(out, "{INDENT}{}", card.description);
            if raw.is_empty() {
                let _ = writeln!(out, "{INDENT}invalid URL (none given)");
            } else {
                let _ = writeln!(out, "{INDENT}invalid URL: {raw}");
            }
        }
    }
    out
}

fn format_article_card(number: usize, card: &ArticleCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{number}] {}", card.title);
    let _ = writeln!(
        out,
        "{INDENT}{} | {} | {}",
        card.category,
        format_published(&card.published),
        card.authors
    );
    let _ = writeln!(out, "{INDENT}{}", card.source);
    let _ = writeln!(out, "{INDENT}{}", card.summary);
    if let Some(image) = &card.image_url {
        let _ = writeln!(out, "{INDENT}image: {image}");
    }
    match &card.link {
        Some(link) => {
            let _ = writeln!(out, "{INDENT}{link}");
        }
        None => {
            let _ = writeln!(out, "{INDENT}(no link)");
        }
    }
    out
}

/// Pretty-prints ISO dates and RFC 3339 timestamps; anything else is shown as given.
fn format_published(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::{article_cards, source_cards, Article, Page, Source};
    use pretty_assertions::assert_eq;

    #[test]
    fn dates_are_humanized_when_parseable() {
        assert_eq!(format_published("2025-03-08"), "March 8, 2025");
        assert_eq!(format_published("2025-03-08T10:00:00Z"), "March 8, 2025");
        assert_eq!(format_published("Date unknown"), "Date unknown");
    }

    #[test]
    fn invalid_source_renders_fallback_without_link() {
        let cards = source_cards(&[Source {
            name: Some("Mystery Wire".to_string()),
            description: None,
            url: "htp//broken".to_string(),
        }]);
        let text = format_source_card(1, &cards[0]);
        assert_eq!(
            text,
            "[1] Mystery Wire\n    No description available.\n    invalid URL: htp//broken\n"
        );
        assert!(!text.contains("http"));
    }

    #[test]
    fn article_card_layout() {
        let cards = article_cards(&[Article {
            title: "Tech stocks surge".to_string(),
            url: "https://www.example.com/tech".to_string(),
            category: "BUSINESS".to_string(),
            publish_date: Some("2025-03-08".to_string()),
            authors: vec!["Jane Smith".to_string()],
            source_domain: "example.com".to_string(),
            ..Article::default()
        }]);
        assert_eq!(
            format_article_card(2, &cards[0]),
            "[2] Tech stocks surge\n    BUSINESS | March 8, 2025 | Jane Smith\n    example.com\n    No summary available.\n    https://www.example.com/tech\n"
        );
    }

    #[test]
    fn site_layout() {
        let site = SiteView {
            title: "AP News".to_string(),
            headline: "57 links from apnews.com".to_string(),
            sections: vec!["Top Stories".to_string()],
            links: vec![(
                "Politics".to_string(),
                "https://apnews.com/politics".to_string(),
            )],
            search_form: Some("GET https://apnews.com/search (q)".to_string()),
        };
        assert_eq!(
            render_status(&PageStatus::Site(site)),
            "AP News\n57 links from apnews.com\nsearch form: GET https://apnews.com/search (q)\n\nSections\n    Top Stories\n\nLinks\n[1] Politics\n    https://apnews.com/politics\n"
        );
    }

    #[test]
    fn page_header_lists_filled_fields_only() {
        let view = PageView {
            page: Page::Aggregate,
            fields: vec![
                ("question".to_string(), "elections".to_string()),
                ("language".to_string(), String::new()),
            ],
            status: PageStatus::Error("X".to_string()),
        };
        assert_eq!(render_page(&view), "== aggregate ==\nquestion: elections\nError: X\n");
    }
}
