use newsdesk_logging::{newsdesk_debug, newsdesk_info};

use crate::{build_request, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldChanged { page, field, value } => {
            state.page_mut(page).set_field(field, value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Submitted(page) => {
            let built = build_request(page, state.page(page).form());
            let page_state = state.page_mut(page);
            let effects = match built {
                Ok(request) => {
                    // No guard against a pending request: the newer token wins.
                    let token = page_state.begin_request();
                    newsdesk_info!("{} submitted token={} {}", page, token, request.path);
                    vec![Effect::Dispatch {
                        page,
                        token,
                        request,
                    }]
                }
                Err(err) => {
                    newsdesk_debug!("{} submit rejected: {}", page, err);
                    page_state.reject(err.to_string());
                    Vec::new()
                }
            };
            state.mark_dirty();
            effects
        }
        Msg::ResponseReceived {
            page,
            token,
            result,
        } => {
            let latest = state.page(page).latest_token();
            if state.page_mut(page).settle(token, result) {
                state.mark_dirty();
            } else {
                newsdesk_debug!(
                    "{} dropped stale response token={} latest={}",
                    page,
                    token,
                    latest
                );
            }
            Vec::new()
        }
    };

    (state, effects)
}
