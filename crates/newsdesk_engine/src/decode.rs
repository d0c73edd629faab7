use newsdesk_core::{Article, Page, Payload, SearchForm, SiteLink, Source};
use newsdesk_logging::newsdesk_warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::DispatchError;

#[derive(Deserialize)]
struct AnswerBody {
    answer: String,
}

#[derive(Deserialize)]
struct SourcesBody {
    answer: SourceList,
}

#[derive(Deserialize)]
struct SourceList {
    sources: Vec<Source>,
}

#[derive(Deserialize)]
struct ArticlesBody {
    articles: Vec<Article>,
    count: usize,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct AggregateBody {
    sources: Vec<Source>,
    articles: Vec<Article>,
    count: usize,
    #[serde(default)]
    domain: Option<String>,
}

#[derive(Deserialize)]
struct ScrapeBody {
    url: String,
    text: String,
    #[serde(deserialize_with = "count_or_numeric_string")]
    length: usize,
}

#[derive(Deserialize)]
struct ExploreBody {
    domain: String,
    #[serde(default)]
    title: Option<String>,
    links_sample: Vec<SiteLink>,
    sections_sample: Vec<String>,
    #[serde(default)]
    search_form: Option<SearchForm>,
    #[serde(deserialize_with = "count_or_numeric_string")]
    link_count: usize,
}

/// The scraper declares string-valued response models, so counts may arrive as `"1234"`.
fn count_or_numeric_string<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(usize),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expected a count, got {text:?}"))
        }),
    }
}

/// Decodes a successful body into the payload shape `page` expects.
pub fn decode_payload(page: Page, body: &[u8]) -> Result<Payload, DispatchError> {
    let decoded = match page {
        Page::Ask => serde_json::from_slice::<AnswerBody>(body).map(|b| Payload::Answer(b.answer)),
        Page::Sources => {
            serde_json::from_slice::<SourcesBody>(body).map(|b| Payload::Sources(b.answer.sources))
        }
        Page::Search => serde_json::from_slice::<ArticlesBody>(body).map(|b| Payload::Articles {
            articles: b.articles,
            count: b.count,
            domain: b.domain,
            message: b.message,
        }),
        Page::Aggregate => {
            serde_json::from_slice::<AggregateBody>(body).map(|b| Payload::Aggregate {
                sources: b.sources,
                articles: b.articles,
                count: b.count,
                domain: b.domain,
            })
        }
        Page::Scrape => serde_json::from_slice::<ScrapeBody>(body).map(|b| Payload::Scraped {
            url: b.url,
            text: b.text,
            length: b.length,
        }),
        Page::Explore => serde_json::from_slice::<ExploreBody>(body).map(|b| Payload::Explored {
            domain: b.domain,
            title: b.title,
            links: b.links_sample,
            sections: b.sections_sample,
            search_form: b.search_form,
            link_count: b.link_count,
        }),
    };

    decoded.map_err(|err| {
        newsdesk_warn!("{} response did not decode: {}", page, err);
        DispatchError::malformed()
    })
}

/// Message carried by an error body, if any.
///
/// Understands `{"error": "..."}` and FastAPI's `{"detail": ...}`, where
/// `detail` is either a string or a list of `{"msg": ...}` entries.
pub fn server_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return non_blank(error);
    }
    match value.get("detail")? {
        Value::String(detail) => non_blank(detail),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            non_blank(&messages.join("; "))
        }
        _ => None,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
