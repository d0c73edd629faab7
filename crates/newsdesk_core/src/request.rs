use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Transport-neutral description of one outbound request.
///
/// `path` is relative to the endpoint base configured for the page. For
/// `Post`, `body` holds the fields of a flat JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: &'static str,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<(String, String)>>,
}

impl RequestSpec {
    pub(crate) fn get(path: &'static str, query: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            query,
            body: None,
        }
    }

    pub(crate) fn post_json(path: &'static str, body: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            query: Vec::new(),
            body: Some(body),
        }
    }
}
