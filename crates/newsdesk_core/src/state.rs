use crate::view_model::{AppViewModel, PageView};
use crate::{FormState, Page, Payload};

/// Sequence number attached to every dispatch of a page. Starts at 1.
pub type RequestToken = u64;

/// What a page is currently showing. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(Payload),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageState {
    form: FormState,
    view: ViewState,
    latest_token: RequestToken,
}

impl PageState {
    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Token of the most recent submission, 0 before the first one.
    pub fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    pub(crate) fn set_field(&mut self, field: String, value: String) {
        self.form.set(field, value);
    }

    pub(crate) fn begin_request(&mut self) -> RequestToken {
        self.latest_token += 1;
        self.view = ViewState::Loading;
        self.latest_token
    }

    /// Shows a pre-dispatch failure. Bumps the token so a response still in
    /// flight from an earlier submission cannot overwrite the message.
    pub(crate) fn reject(&mut self, message: String) {
        self.latest_token += 1;
        self.view = ViewState::Error(message);
    }

    /// Applies a response. Returns false when it belongs to a superseded
    /// submission or the page already settled.
    pub(crate) fn settle(&mut self, token: RequestToken, result: Result<Payload, String>) -> bool {
        if token != self.latest_token || self.view != ViewState::Loading {
            return false;
        }
        self.view = match result {
            Ok(payload) => ViewState::Success(payload),
            Err(message) => ViewState::Error(message),
        };
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pages: [PageState; 6],
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self, page: Page) -> &PageState {
        &self.pages[page.index()]
    }

    pub(crate) fn page_mut(&mut self, page: Page) -> &mut PageState {
        &mut self.pages[page.index()]
    }

    /// True while any page waits for a response.
    pub fn is_busy(&self) -> bool {
        self.pages.iter().any(|p| p.view == ViewState::Loading)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            pages: Page::ALL
                .into_iter()
                .map(|page| PageView::build(page, self.page(page)))
                .collect(),
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
