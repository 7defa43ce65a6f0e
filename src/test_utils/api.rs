use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::api::{ApiClient, ApiError, Transport};

/// A [Transport] that plays back scripted replies and records every request.
#[derive(Default)]
pub(crate) struct StubTransport {
    replies: Mutex<VecDeque<Result<String, ApiError>>>,
    requests: Mutex<Vec<Vec<(String, String)>>>,
}

impl StubTransport {
    pub(crate) fn new(replies: Vec<Result<String, ApiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::default(),
        }
    }

    pub(crate) fn replying(bodies: &[&str]) -> Self {
        Self::new(bodies.iter().map(|body| Ok((*body).to_owned())).collect())
    }

    pub(crate) fn requests(&self) -> Vec<Vec<(String, String)>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post_form(&self, params: &[(&str, String)]) -> Result<String, ApiError> {
        self.requests.lock().unwrap().push(
            params
                .iter()
                .map(|(key, value)| ((*key).to_owned(), value.clone()))
                .collect(),
        );

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("StubTransport ran out of replies")
    }
}

/// A [Transport] whose requests never get a reply.
pub(crate) struct HangingTransport;

#[async_trait]
impl Transport for HangingTransport {
    async fn post_form(&self, _params: &[(&str, String)]) -> Result<String, ApiError> {
        std::future::pending().await
    }
}

/// An [ApiClient] backed by a [StubTransport] replying with `bodies`.
pub(crate) fn stub_api(bodies: &[&str]) -> (ApiClient, Arc<StubTransport>) {
    let transport = Arc::new(StubTransport::replying(bodies));

    (ApiClient::new(transport.clone()), transport)
}
