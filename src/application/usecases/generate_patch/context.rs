//! 실행 컨텍스트(설정/입력 검증/프롬프트) 준비 단계.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::config::Config;
use crate::application::usecases::generate_patch::GeneratePatchUseCase;
use crate::domain::patch::{PatchRequest, PromptText, RunOptions};
use crate::domain::prompt::build_prompt;

/// 유스케이스 전 구간에서 공유되는 실행 상태.
pub(super) struct RunContext {
    pub config: Config,
    pub prompt: PromptText,
    pub output_path: PathBuf,
}

/// 설정을 읽고 입력을 검증해 사용자 프롬프트를 만든다.
pub(super) fn prepare_run(
    use_case: &GeneratePatchUseCase<'_>,
    options: &RunOptions,
) -> Result<RunContext> {
    use_case.reporter.section("Load Config");
    let config = use_case
        .config_repo
        .load()
        .context("failed to load patchpilot config")?;

    let request = PatchRequest::new(
        options.issue_text.as_str(),
        options.related_code.as_str(),
        options.review_comment.clone(),
    )
    .context("invalid patch request")?;

    let language = config.prompt_language();
    let prompt = build_prompt(&request, language);
    debug!(
        language = language.code(),
        instruction = request.instruction_kind().label(),
        prompt_bytes = prompt.len(),
        "built patch prompt"
    );

    use_case.reporter.section("Prompt");
    use_case
        .reporter
        .kv("Instruction", request.instruction_kind().label());
    use_case.reporter.kv("Language", language.code());
    use_case
        .reporter
        .kv("Prompt Bytes", &prompt.len().to_string());

    let output_path = options
        .output_path
        .clone()
        .unwrap_or_else(|| config.output_path());

    Ok(RunContext {
        config,
        prompt,
        output_path,
    })
}
