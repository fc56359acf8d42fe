//! # tidar environment state
//!
//! This module defines [`TidarEnv`], the shared environment object of the archive fetch layer.
//! It owns the persistent HTTP client used for directory listings and small text files (readme
//! and label downloads); large product files go through the streaming path in
//! [`crate::archive::fetch`] instead.
//!
//! The object is cheaply cloneable and reused across fetch operations to avoid per-request
//! session setup.

use std::time::Duration;

use ureq::Agent;

use crate::tidar_errors::TidarError;

/// Persistent HTTP client state shared by the fetch layer.
#[derive(Debug, Clone)]
pub struct TidarEnv {
    pub http_client: Agent,
}

impl Default for TidarEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TidarEnv {
    /// Create the environment with a client using a global request timeout.
    pub fn new() -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();
        let agent: Agent = config.into();

        TidarEnv { http_client: agent }
    }

    /// GET a URL and return the response body as text.
    pub(crate) fn get_from_url(&self, url: &str) -> Result<String, TidarError> {
        Ok(self
            .http_client
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?)
    }
}
