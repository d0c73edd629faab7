use std::fmt;
use std::str::FromStr;

/// One form-and-results page. Each page talks to exactly one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Page {
    /// One-sentence Q&A (`GET /ask`).
    Ask,
    /// News source suggestions (`POST /sources`).
    Sources,
    /// Article search on a single site (`GET /search`).
    Search,
    /// Sources plus articles for a question (`GET /coordinate`).
    Aggregate,
    /// Raw text of a single page (`GET /scrape`).
    Scrape,
    /// Title, headings, links and search form of a site (`GET /explore`).
    Explore,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Ask,
        Page::Sources,
        Page::Search,
        Page::Aggregate,
        Page::Scrape,
        Page::Explore,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Page::Ask => 0,
            Page::Sources => 1,
            Page::Search => 2,
            Page::Aggregate => 3,
            Page::Scrape => 4,
            Page::Explore => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Page::Ask => "ask",
            Page::Sources => "sources",
            Page::Search => "search",
            Page::Aggregate => "aggregate",
            Page::Scrape => "scrape",
            Page::Explore => "explore",
        }
    }

    /// All fields the page collects, in display order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Page::Ask | Page::Sources => &["question"],
            Page::Search => &["url", "query", "method"],
            // `language` is collected but the endpoint has no parameter for it.
            Page::Aggregate => &["question", "language"],
            Page::Scrape | Page::Explore => &["url"],
        }
    }

    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Page::Ask | Page::Sources | Page::Aggregate => &["question"],
            Page::Search => &["url", "query"],
            Page::Scrape | Page::Explore => &["url"],
        }
    }

    /// Field that receives free text when the user gives no `key=value` pairs.
    pub fn primary_field(self) -> &'static str {
        match self {
            Page::Ask | Page::Sources | Page::Aggregate => "question",
            Page::Search => "query",
            Page::Scrape | Page::Explore => "url",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page '{}'", self.0)
    }
}

impl std::error::Error for UnknownPage {}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Page::ALL
            .into_iter()
            .find(|page| page.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPage(wanted.to_string()))
    }
}

/// Scraping strategy understood by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMethod {
    DirectScrape,
    Serper,
    #[default]
    Combined,
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 3] = [
        SearchMethod::DirectScrape,
        SearchMethod::Serper,
        SearchMethod::Combined,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMethod::DirectScrape => "direct_scrape",
            SearchMethod::Serper => "serper",
            SearchMethod::Combined => "combined",
        }
    }
}

impl FromStr for SearchMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SearchMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| wanted.to_string())
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
