use patchpilot::domain::patch::{PatchOutcome, RunOptions};

#[test]
fn run_blocking_dry_run_returns_prompt_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("patch.txt");

    let outcome = patchpilot::run_blocking(
        RunOptions {
            issue_text: "Fix off-by-one in loop".to_string(),
            related_code: "for i in range(n): arr[i+1]".to_string(),
            output_path: Some(output.clone()),
            dry_run: true,
            ..Default::default()
        },
        true,
    )
    .unwrap();

    let PatchOutcome::DryRun { prompt } = outcome else {
        panic!("expected dry-run outcome, got {outcome:?}");
    };
    assert!(prompt.as_str().contains("Fix off-by-one in loop"));
    assert!(prompt.as_str().contains("arr[i+1]"));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
