use std::collections::BTreeMap;

use url::Url;

use crate::{Page, RequestSpec, SearchMethod};

/// User-entered field values for one page.
///
/// Values are stored exactly as typed. Submitting does not clear them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    fields: BTreeMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Trimmed value, or `None` when the field is absent or blank.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a {field}.")]
    MissingField { field: &'static str },
    #[error("'{value}' is not a valid http(s) URL.")]
    InvalidUrl { value: String },
    #[error("Unknown search method '{0}' (expected direct_scrape, serper or combined).")]
    UnknownSearchMethod(String),
}

/// Validates the form of `page` and turns it into the one request to send.
pub fn build_request(page: Page, form: &FormState) -> Result<RequestSpec, ValidationError> {
    for &field in page.required_fields() {
        if form.value(field).is_none() {
            return Err(ValidationError::MissingField { field });
        }
    }

    let text =
        |field: &'static str| -> String { form.value(field).unwrap_or_default().to_string() };

    let request = match page {
        Page::Ask => RequestSpec::get("/ask", vec![("question".into(), text("question"))]),
        Page::Sources => {
            RequestSpec::post_json("/sources", vec![("question".into(), text("question"))])
        }
        Page::Search => {
            let url = checked_url(&text("url"))?;
            let method = match form.value("method") {
                Some(raw) => raw
                    .parse::<SearchMethod>()
                    .map_err(ValidationError::UnknownSearchMethod)?,
                None => SearchMethod::default(),
            };
            RequestSpec::get(
                "/search",
                vec![
                    ("url".into(), url),
                    ("query".into(), text("query")),
                    ("method".into(), method.as_str().to_string()),
                ],
            )
        }
        // The language field stays local; the coordinator only takes a question.
        Page::Aggregate => {
            RequestSpec::get("/coordinate", vec![("question".into(), text("question"))])
        }
        Page::Scrape => {
            let url = checked_url(&text("url"))?;
            RequestSpec::get("/scrape", vec![("url".into(), url)])
        }
        Page::Explore => {
            let url = checked_url(&text("url"))?;
            RequestSpec::get("/explore", vec![("url".into(), url)])
        }
    };

    Ok(request)
}

fn checked_url(raw: &str) -> Result<String, ValidationError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(raw.to_string())
        }
        _ => Err(ValidationError::InvalidUrl {
            value: raw.to_string(),
        }),
    }
}
