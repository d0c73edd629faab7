use std::sync::Arc;
use std::time::Duration;

use newsdesk_core::{
    build_request, update, AppState, FormState, Msg, Page, Payload, RequestSpec, ViewState,
};
use newsdesk_engine::{DispatchError, Dispatcher, EngineEvent, EngineHandle};

/// Answers with the question text, taking longer for questions starting with "slow".
struct EchoDispatcher;

#[async_trait::async_trait]
impl Dispatcher for EchoDispatcher {
    async fn dispatch(&self, _page: Page, request: &RequestSpec) -> Result<Payload, DispatchError> {
        let question = request
            .query
            .iter()
            .find(|(k, _)| k == "question")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        let delay = if question.starts_with("slow") { 300 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(Payload::Answer(question))
    }
}

fn ask(question: &str) -> RequestSpec {
    let mut form = FormState::new();
    form.set("question", question);
    build_request(Page::Ask, &form).unwrap()
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn completions_arrive_in_resolution_order() {
    newsdesk_logging::initialize_for_tests();
    let engine = EngineHandle::with_dispatcher(Arc::new(EchoDispatcher)).unwrap();

    engine.dispatch(Page::Ask, 1, ask("slow first"));
    engine.dispatch(Page::Ask, 2, ask("fast second"));

    let tokens: Vec<u64> = (0..2)
        .map(|_| match next_event(&engine) {
            EngineEvent::Completed { token, .. } => token,
        })
        .collect();
    assert_eq!(tokens, vec![2, 1]);
}

#[test]
fn late_response_to_an_older_submit_does_not_win() {
    newsdesk_logging::initialize_for_tests();
    let engine = EngineHandle::with_dispatcher(Arc::new(EchoDispatcher)).unwrap();
    let mut state = AppState::new();

    for question in ["slow first", "fast second"] {
        let (next, _) = update(
            state,
            Msg::FieldChanged {
                page: Page::Ask,
                field: "question".into(),
                value: question.into(),
            },
        );
        let (next, effects) = update(next, Msg::Submitted(Page::Ask));
        for effect in effects {
            let newsdesk_core::Effect::Dispatch {
                page,
                token,
                request,
            } = effect;
            engine.dispatch(page, token, request);
        }
        state = next;
    }

    for _ in 0..2 {
        let EngineEvent::Completed {
            page,
            token,
            result,
        } = next_event(&engine);
        let (next, _) = update(
            state,
            Msg::ResponseReceived {
                page,
                token,
                result: result.map_err(|err| err.message),
            },
        );
        state = next;
    }

    assert_eq!(
        state.page(Page::Ask).view_state(),
        &ViewState::Success(Payload::Answer("fast second".into()))
    );
}
