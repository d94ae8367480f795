//! patchpilot library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::{Context, Result};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use domain::patch::{PatchOutcome, RunOptions};
use interface::composition::AppComposition;

/// 라이브러리 직접 호출용 실행 함수.
pub async fn run(options: RunOptions) -> Result<PatchOutcome> {
    let composition = AppComposition::default();
    composition.generate_patch_usecase().execute(options).await
}

/// 동기 호출자용 실행 함수. 현재 스레드 런타임에서 완료될 때까지 블록한다.
/// `quiet`이면 진행 상황 출력을 숨긴다.
pub fn run_blocking(options: RunOptions, quiet: bool) -> Result<PatchOutcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let composition = AppComposition::new(quiet);
    runtime.block_on(composition.generate_patch_usecase().execute(options))
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute()
}
