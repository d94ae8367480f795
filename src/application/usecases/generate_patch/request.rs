//! 백엔드 호출 단계.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::application::ports::CompletionBackend;
use crate::application::usecases::generate_patch::{GeneratePatchUseCase, context::RunContext};
use crate::domain::error::GenerationError;
use crate::domain::patch::{GeneratedPatch, PatchConversation, PromptText, RunOptions, TokenUsage};

/// 시스템 메시지 + 사용자 프롬프트를 한 번 전송하고 응답을 패치 결과로 변환한다.
/// 네트워크 오류나 응답 형식 불일치는 모두 `GenerationError`로 감싼다.
pub async fn generate_patch(
    backend: &dyn CompletionBackend,
    system_prompt: &str,
    prompt: &PromptText,
) -> Result<GeneratedPatch, GenerationError> {
    let conversation = PatchConversation::new(system_prompt, prompt);
    let response = backend
        .complete(&conversation)
        .await
        .map_err(|source| GenerationError::new(backend.name(), source))?;
    Ok(GeneratedPatch::from_response(response))
}

/// 설정/자격 증명 오류는 요청 전(Building 단계)에 드러나야 한다.
pub(super) fn configure_backend(
    use_case: &GeneratePatchUseCase<'_>,
    options: &RunOptions,
    ctx: &RunContext,
) -> Result<Box<dyn CompletionBackend>> {
    use_case
        .backend_factory
        .build(&ctx.config, options.model.as_deref())
        .context("failed to configure completion backend")
}

pub(super) async fn request_patch(
    use_case: &GeneratePatchUseCase<'_>,
    backend: &dyn CompletionBackend,
    ctx: &RunContext,
) -> Result<GeneratedPatch> {
    use_case.reporter.section("Request");
    use_case.reporter.kv("Backend", backend.name());
    use_case.reporter.kv("Model", backend.model());
    use_case.reporter.status(backend.name(), "running");

    let started = Instant::now();
    let system_prompt = ctx.config.system_prompt();
    let patch = generate_patch(backend, &system_prompt, &ctx.prompt).await?;
    let elapsed = started.elapsed().as_secs_f32();

    info!(
        backend = backend.id(),
        model = backend.model(),
        elapsed_secs = elapsed,
        response_bytes = patch.raw_response_text.len(),
        "received patch response"
    );
    use_case
        .reporter
        .status(backend.name(), &format!("done {elapsed:.1}s"));
    if !patch.usage.is_empty() {
        use_case.reporter.kv("Tokens", &format_usage(&patch.usage));
    }

    if patch.extracted_diff.is_none() {
        warn!("no diff block found in backend response");
        use_case
            .reporter
            .status("Patch", "warning: no ```diff block found in the response");
    }

    Ok(patch)
}

fn format_usage(usage: &TokenUsage) -> String {
    let fmt = |v: Option<u64>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    format!(
        "prompt={} completion={} total={}",
        fmt(usage.prompt_tokens),
        fmt(usage.completion_tokens),
        fmt(usage.total_tokens)
    )
}
