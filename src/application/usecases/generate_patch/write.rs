//! 결과 파일 기록 단계.

use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use crate::application::usecases::generate_patch::{GeneratePatchUseCase, context::RunContext};
use crate::domain::patch::{GeneratedPatch, RunOptions};

/// 응답 원문을 결과 파일에 기록하고, 요청된 경우 추출된 diff도 따로 기록한다.
/// 추출본을 기록했으면 그 경로를 반환한다.
pub(super) fn write_artifacts(
    use_case: &GeneratePatchUseCase<'_>,
    options: &RunOptions,
    ctx: &RunContext,
    patch: &GeneratedPatch,
) -> Result<Option<PathBuf>> {
    use_case.reporter.section("Write");
    use_case
        .writer
        .write(&ctx.output_path, &patch.raw_response_text)?;
    use_case
        .reporter
        .kv("Patch", &ctx.output_path.display().to_string());

    let Some(diff_path) = &options.diff_output_path else {
        return Ok(None);
    };

    let Some(diff) = &patch.extracted_diff else {
        warn!(path = %diff_path.display(), "skipping diff output: nothing extracted");
        use_case
            .reporter
            .status("Diff", "skipped: no diff block to extract");
        return Ok(None);
    };

    use_case.writer.write(diff_path, diff)?;
    use_case
        .reporter
        .kv("Diff", &diff_path.display().to_string());
    Ok(Some(diff_path.clone()))
}
