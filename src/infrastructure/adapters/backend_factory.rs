//! 백엔드 팩토리 포트 구현 어댑터.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{BackendFactory, CompletionBackend};
use crate::infrastructure::providers;

/// HTTP API 백엔드 팩토리 어댑터.
pub struct HttpBackendFactory;

impl BackendFactory for HttpBackendFactory {
    fn build(
        &self,
        config: &Config,
        model_override: Option<&str>,
    ) -> Result<Box<dyn CompletionBackend>> {
        providers::build_backend(config, model_override)
    }
}
