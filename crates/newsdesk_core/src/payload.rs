use serde::{Deserialize, Deserializer};

/// One article as returned by the search and coordinate endpoints.
///
/// Every field tolerates being absent or `null`; the card renderer fills in
/// placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_domain: String,
}

/// One suggested news source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// A same-site link found while exploring a site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SiteLink {
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// The first form on a site that looks like a search box.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Vec<String>,
}

/// Decoded success data, one variant per endpoint shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Answer(String),
    Sources(Vec<Source>),
    Articles {
        articles: Vec<Article>,
        count: usize,
        domain: Option<String>,
        /// Reason given by the backend when nothing matched.
        message: Option<String>,
    },
    Aggregate {
        sources: Vec<Source>,
        articles: Vec<Article>,
        count: usize,
        domain: Option<String>,
    },
    Scraped {
        url: String,
        text: String,
        length: usize,
    },
    Explored {
        domain: String,
        title: Option<String>,
        /// At most a sample; `link_count` is the full total.
        links: Vec<SiteLink>,
        sections: Vec<String>,
        search_form: Option<SearchForm>,
        link_count: usize,
    },
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_tolerates_nulls_and_missing_fields() {
        let article: Article = serde_json::from_str(
            r#"{"title": "Rates hold", "url": "https://example.com/a", "authors": null, "category": null}"#,
        )
        .unwrap();
        assert_eq!(article.title, "Rates hold");
        assert!(article.authors.is_empty());
        assert_eq!(article.category, "");
        assert_eq!(article.summary, None);
    }

    #[test]
    fn source_without_url_decodes_to_empty_url() {
        let source: Source = serde_json::from_str(r#"{"name": "Reuters"}"#).unwrap();
        assert_eq!(source.name.as_deref(), Some("Reuters"));
        assert_eq!(source.url, "");
    }
}
