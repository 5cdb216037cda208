use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BotApi, OutboundAction};
use crate::error::ApiError;

/// Records every executed action; optionally fails each call with a fixed
/// upstream status.
#[derive(Default)]
pub struct StubApi {
    pub calls: Mutex<Vec<OutboundAction>>,
    failure: Option<(u16, String)>,
}

impl StubApi {
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some((status, body.to_string())),
        }
    }

    pub async fn recorded(&self) -> Vec<OutboundAction> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl BotApi for StubApi {
    async fn execute(&self, action: &OutboundAction) -> Result<(), ApiError> {
        self.calls.lock().await.push(action.clone());
        match &self.failure {
            Some((status, body)) => Err(ApiError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}
