//! Newsdesk core: pure page state machine and card view-model helpers.
mod effect;
mod form;
mod msg;
mod page;
mod payload;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{build_request, FormState, ValidationError};
pub use msg::Msg;
pub use page::{Page, SearchMethod, UnknownPage};
pub use payload::{Article, Payload, SearchForm, SiteLink, Source};
pub use request::{HttpMethod, RequestSpec};
pub use state::{AppState, PageState, RequestToken, ViewState};
pub use update::update;
pub use view_model::{
    article_cards, source_cards, AppViewModel, ArticleCard, PageStatus, PageView, ResultsView,
    SiteView, SourceCard, SourceLink,
};
