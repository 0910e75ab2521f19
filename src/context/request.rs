//! Request-scoped identifier context.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Context;

pub const SERVER_ID_KEY: &str = "ServerId";
pub const REQUEST_ID_KEY: &str = "RequestId";
pub const HOST_ID_KEY: &str = "HostId";

/// The identifiers most services want on every log line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestContext {
    #[serde(default)]
    pub server_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub host_id: Option<String>,
}

impl RequestContext {
    /// Context for a fresh request on `server_id`, with a generated request id.
    pub fn generate(server_id: &str) -> Self {
        let request_id = format!("req-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            server_id: Some(server_id.to_string()),
            request_id: Some(request_id),
            host_id: None,
        }
    }

    pub fn with_host(mut self, host_id: &str) -> Self {
        self.host_id = Some(host_id.to_string());
        self
    }
}

impl Context for RequestContext {
    fn value(&self, key: &str) -> Option<Value> {
        let found = match key {
            SERVER_ID_KEY => self.server_id.as_ref(),
            REQUEST_ID_KEY => self.request_id.as_ref(),
            HOST_ID_KEY => self.host_id.as_ref(),
            _ => None,
        };
        found.map(|s| Value::String(s.clone()))
    }
}
