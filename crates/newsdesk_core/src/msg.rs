use crate::{Page, Payload, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a form field on a page.
    FieldChanged {
        page: Page,
        field: String,
        value: String,
    },
    /// User submitted the current form of a page.
    Submitted(Page),
    /// A dispatched request settled. The error side is already a display message.
    ResponseReceived {
        page: Page,
        token: RequestToken,
        result: Result<Payload, String>,
    },
}
