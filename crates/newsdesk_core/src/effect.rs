use crate::{Page, RequestSpec, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send exactly one request for `page`; the response must come back tagged with `token`.
    Dispatch {
        page: Page,
        token: RequestToken,
        request: RequestSpec,
    },
}
