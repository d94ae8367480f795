//! 이슈/리뷰 코멘트로부터 diff 패치를 생성하는 유스케이스.
//!
//! Building → Requesting → Writing 순서로 한 번씩만 진행하며 재시도는 없다.

mod context;
mod request;
mod write;

use anyhow::Result;
use tracing::warn;

use crate::application::ports::{ArtifactWriter, BackendFactory, ConfigRepository, Reporter};
use crate::domain::patch::{PatchOutcome, PatchStage, RunOptions};

use context::prepare_run;
use request::{configure_backend, request_patch};
use write::write_artifacts;

pub use request::generate_patch;

/// 설정 로딩부터 프롬프트 구성, 백엔드 호출, 결과 파일 기록까지 조율한다.
pub struct GeneratePatchUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub backend_factory: &'a dyn BackendFactory,
    pub writer: &'a dyn ArtifactWriter,
    pub reporter: &'a dyn Reporter,
}

impl<'a> GeneratePatchUseCase<'a> {
    /// 패치 생성 진입점.
    /// 실패하면 실패 단계를 보고하고 오류를 그대로 전파한다.
    pub async fn execute(&self, options: RunOptions) -> Result<PatchOutcome> {
        self.reporter.section("Session");
        self.reporter.kv(
            "Mode",
            if options.dry_run {
                "dry-run"
            } else {
                "write-patch"
            },
        );

        let mut stage = PatchStage::Building;
        let result = self.run_stages(&options, &mut stage).await;
        if let Err(err) = &result {
            warn!(stage = stage.as_str(), "patch generation failed: {err:#}");
            self.reporter.status("Failed", stage.as_str());
        }
        result
    }

    async fn run_stages(
        &self,
        options: &RunOptions,
        stage: &mut PatchStage,
    ) -> Result<PatchOutcome> {
        let ctx = prepare_run(self, options)?;

        if options.dry_run {
            self.reporter.section("Dry Run: Prompt");
            self.reporter.raw(ctx.prompt.as_str());
            return Ok(PatchOutcome::DryRun { prompt: ctx.prompt });
        }

        let backend = configure_backend(self, options, &ctx)?;

        *stage = PatchStage::Requesting;
        let patch = request_patch(self, backend.as_ref(), &ctx).await?;

        *stage = PatchStage::Writing;
        let diff_output_path = write_artifacts(self, options, &ctx, &patch)?;

        self.reporter.status("Done", "Patch generated.");
        Ok(PatchOutcome::Written {
            patch,
            output_path: ctx.output_path,
            diff_output_path,
        })
    }
}
