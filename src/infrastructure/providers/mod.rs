//! 텍스트 생성 백엔드(HTTP API) 구현 모듈.

mod api_runner;
pub mod openai;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::CompletionBackend;

/// 설정에서 활성 백엔드를 생성한다.
pub fn build_backend(
    config: &Config,
    model_override: Option<&str>,
) -> Result<Box<dyn CompletionBackend>> {
    let backend = openai::OpenAiBackend::from_config(config, model_override)?;
    Ok(Box::new(backend))
}
