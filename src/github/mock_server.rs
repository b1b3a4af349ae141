//! Wiremock harness for exercising the blocking client in unit tests.
//!
//! `reqwest::blocking` refuses to run inside an async context, so the mock
//! server lives on its own runtime and requests are made from the test thread.

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

use crate::config::Config;
use crate::github::GitHubClient;

pub(crate) struct MockGitHub {
    server: Option<MockServer>,
    runtime: Runtime,
}

impl MockGitHub {
    pub(crate) fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        Self {
            server: Some(server),
            runtime,
        }
    }

    pub(crate) fn mount(&self, mock: Mock) {
        let server = self.server.as_ref().unwrap();
        self.runtime.block_on(mock.mount(server));
    }

    pub(crate) fn client(&self) -> GitHubClient {
        let uri = self.server.as_ref().unwrap().uri();
        GitHubClient::from_config(&Config::new("ghp_test").with_api_url(uri)).unwrap()
    }
}

impl Drop for MockGitHub {
    fn drop(&mut self) {
        let _guard = self.runtime.enter();
        self.server.take();
    }
}
