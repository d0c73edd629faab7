use std::time::Duration;

use newsdesk_core::{Effect, Msg};
use newsdesk_engine::{DispatchSettings, EngineEvent, EngineHandle};
use newsdesk_logging::{newsdesk_info, newsdesk_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: DispatchSettings) -> std::io::Result<Self> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch {
                    page,
                    token,
                    request,
                } => {
                    newsdesk_info!(
                        "Dispatch page={} token={} {} {}",
                        page,
                        token,
                        request.method,
                        request.path
                    );
                    self.engine.dispatch(page, token, request);
                }
            }
        }
    }

    /// Waits up to `timeout` for one engine event, then drains whatever else is ready.
    pub fn poll(&self, timeout: Duration) -> Vec<Msg> {
        let mut msgs = Vec::new();
        if let Some(event) = self.engine.recv_timeout(timeout) {
            msgs.push(map_event(event));
            while let Some(event) = self.engine.try_recv() {
                msgs.push(map_event(event));
            }
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Completed {
            page,
            token,
            result,
        } => Msg::ResponseReceived {
            page,
            token,
            result: result.map_err(|err| {
                newsdesk_warn!("{} token={} failed: {}", page, token, err.kind);
                err.message
            }),
        },
    }
}
