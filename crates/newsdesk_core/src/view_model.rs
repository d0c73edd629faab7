use url::Url;

use crate::{Article, Page, PageState, Payload, SearchForm, Source, ViewState};

const UNTITLED: &str = "Untitled article";
const NO_SUMMARY: &str = "No summary available.";
const NO_CATEGORY: &str = "Uncategorized";
const NO_DATE: &str = "Date unknown";
const NO_AUTHOR: &str = "Unknown author";
const NO_SOURCE: &str = "Unknown source";
const UNNAMED_SOURCE: &str = "Unnamed source";
const NO_DESCRIPTION: &str = "No description available.";
const NO_TITLE: &str = "Untitled site";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub pages: Vec<PageView>,
}

impl AppViewModel {
    pub fn page(&self, page: Page) -> Option<&PageView> {
        self.pages.iter().find(|view| view.page == page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub page: Page,
    /// Current field values in the page's display order; blank when unset.
    pub fields: Vec<(String, String)>,
    pub status: PageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Idle,
    Loading,
    Error(String),
    Text { heading: String, body: String },
    Results(ResultsView),
    Site(SiteView),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsView {
    pub headline: String,
    pub notice: Option<String>,
    pub sources: Vec<SourceCard>,
    pub articles: Vec<ArticleCard>,
}

/// Structure summary of an explored site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteView {
    pub title: String,
    pub headline: String,
    pub sections: Vec<String>,
    /// `(text, url)` pairs in the order the backend listed them.
    pub links: Vec<(String, String)>,
    /// e.g. `GET https://example.com/search (q, page)`.
    pub search_form: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub published: String,
    pub authors: String,
    pub source: String,
    pub image_url: Option<String>,
    /// Navigation target; `None` when the article came without one.
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCard {
    pub name: String,
    pub description: String,
    pub link: SourceLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLink {
    Valid { href: String, host: String },
    /// The url did not parse; the card shows the raw text and no link.
    Invalid { raw: String },
}

impl PageView {
    pub(crate) fn build(page: Page, state: &PageState) -> Self {
        let fields = page
            .fields()
            .iter()
            .map(|&field| {
                let value = state.form().get(field).unwrap_or_default();
                (field.to_string(), value.to_string())
            })
            .collect();

        let status = match state.view_state() {
            ViewState::Idle => PageStatus::Idle,
            ViewState::Loading => PageStatus::Loading,
            ViewState::Error(message) => PageStatus::Error(message.clone()),
            ViewState::Success(payload) => status_for_payload(payload),
        };

        Self {
            page,
            fields,
            status,
        }
    }
}

fn status_for_payload(payload: &Payload) -> PageStatus {
    match payload {
        Payload::Answer(answer) => PageStatus::Text {
            heading: "Answer".to_string(),
            body: answer.clone(),
        },
        Payload::Scraped { url, text, length } => PageStatus::Text {
            heading: format!("{url} ({length} characters)"),
            body: text.clone(),
        },
        Payload::Sources(sources) => PageStatus::Results(ResultsView {
            headline: plural(sources.len(), "source"),
            notice: None,
            sources: source_cards(sources),
            articles: Vec::new(),
        }),
        Payload::Articles {
            articles,
            count,
            domain,
            message,
        } => PageStatus::Results(ResultsView {
            headline: with_domain(plural(*count, "article"), domain.as_deref()),
            notice: message.clone(),
            sources: Vec::new(),
            articles: article_cards(articles),
        }),
        Payload::Aggregate {
            sources,
            articles,
            count,
            domain,
        } => PageStatus::Results(ResultsView {
            headline: with_domain(
                format!(
                    "{} across {}",
                    plural(*count, "article"),
                    plural(sources.len(), "source")
                ),
                domain.as_deref(),
            ),
            notice: None,
            sources: source_cards(sources),
            articles: article_cards(articles),
        }),
        Payload::Explored {
            domain,
            title,
            links,
            sections,
            search_form,
            link_count,
        } => PageStatus::Site(SiteView {
            title: or_placeholder(title.as_deref(), NO_TITLE),
            headline: with_domain(plural(*link_count, "link"), Some(domain.as_str())),
            sections: sections
                .iter()
                .filter_map(|s| non_blank(s))
                .map(str::to_string)
                .collect(),
            links: links
                .iter()
                .map(|link| {
                    let text = non_blank(&link.text).unwrap_or(link.url.as_str());
                    (text.to_string(), link.url.clone())
                })
                .collect(),
            search_form: search_form.as_ref().map(describe_search_form),
        }),
    }
}

fn describe_search_form(form: &SearchForm) -> String {
    let method = non_blank(&form.method).unwrap_or("get").to_ascii_uppercase();
    let action = non_blank(&form.action).unwrap_or("(same page)");
    if form.inputs.is_empty() {
        format!("{method} {action}")
    } else {
        format!("{method} {action} ({})", form.inputs.join(", "))
    }
}

/// One card per article, in input order.
pub fn article_cards(articles: &[Article]) -> Vec<ArticleCard> {
    articles.iter().map(article_card).collect()
}

/// One card per source, in input order.
pub fn source_cards(sources: &[Source]) -> Vec<SourceCard> {
    sources.iter().map(source_card).collect()
}

fn article_card(article: &Article) -> ArticleCard {
    let link = non_blank(&article.url).map(str::to_string);
    let source = non_blank(&article.source_domain)
        .map(str::to_string)
        .or_else(|| link.as_deref().and_then(host_of))
        .unwrap_or_else(|| NO_SOURCE.to_string());
    let authors: Vec<&str> = article
        .authors
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();

    ArticleCard {
        title: or_placeholder(Some(article.title.as_str()), UNTITLED),
        summary: or_placeholder(article.summary.as_deref(), NO_SUMMARY),
        category: match non_blank(&article.category) {
            Some(c) if !c.eq_ignore_ascii_case("unknown") => c.to_string(),
            _ => NO_CATEGORY.to_string(),
        },
        published: or_placeholder(article.publish_date.as_deref(), NO_DATE),
        authors: if authors.is_empty() {
            NO_AUTHOR.to_string()
        } else {
            authors.join(", ")
        },
        source,
        image_url: article.image_url.as_deref().and_then(non_blank).map(str::to_string),
        link,
    }
}

fn source_card(source: &Source) -> SourceCard {
    let raw = source.url.trim();
    let link = match Url::parse(raw) {
        Ok(url) => match url.host_str() {
            Some(host) => SourceLink::Valid {
                href: url.to_string(),
                host: host.to_string(),
            },
            None => SourceLink::Invalid {
                raw: raw.to_string(),
            },
        },
        Err(_) => SourceLink::Invalid {
            raw: raw.to_string(),
        },
    };

    SourceCard {
        name: or_placeholder(source.name.as_deref(), UNNAMED_SOURCE),
        description: or_placeholder(source.description.as_deref(), NO_DESCRIPTION),
        link,
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .and_then(non_blank)
        .unwrap_or(placeholder)
        .to_string()
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn with_domain(headline: String, domain: Option<&str>) -> String {
    match domain.and_then(non_blank) {
        Some(domain) => format!("{headline} from {domain}"),
        None => headline,
    }
}
