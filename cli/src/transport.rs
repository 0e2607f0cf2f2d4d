//! Executes the plain-data requests built by `forum-core` over real HTTP.

use forum_core::{HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

pub struct Transport {
    agent: ureq::Agent,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        // Non-2xx statuses come back as data; `ForumClient` interprets them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ureq::Error> {
        debug!(method = req.method.as_str(), path = %req.path, "sending request");

        let mut response = match req.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&req.path);
                for (key, value) in &req.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.call()?
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&req.path);
                for (key, value) in &req.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                match req.body {
                    Some(body) => builder.send(body.as_bytes())?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;
        debug!(status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
