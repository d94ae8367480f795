//! CLI 명령 파싱 모듈.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::domain::patch::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "patchpilot")]
#[command(about = "Generate a unified-diff patch from issue or review text with an LLM")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Issue text describing the requested fix
    #[arg(long, env = "ISSUE_CONTENT", hide_env_values = true)]
    issue: Option<String>,

    /// Read the issue text from a file (overrides --issue)
    #[arg(long, value_name = "PATH")]
    issue_file: Option<PathBuf>,

    /// Related code excerpt from the repository
    #[arg(long, env = "RELATED_CODE", hide_env_values = true)]
    code: Option<String>,

    /// Read the related code from a file (overrides --code)
    #[arg(long, value_name = "PATH")]
    code_file: Option<PathBuf>,

    /// Review comment to address instead of the issue
    #[arg(long, env = "COMMENT_CONTENT", hide_env_values = true)]
    comment: Option<String>,

    /// Read the review comment from a file (overrides --comment)
    #[arg(long, value_name = "PATH")]
    comment_file: Option<PathBuf>,

    /// Output file for the raw response (default: defaults.output_path or patch.txt)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also write the extracted diff body to this file
    #[arg(long, value_name = "PATH")]
    diff_output: Option<PathBuf>,

    /// Model identifier (overrides providers.openai.model)
    #[arg(long)]
    model: Option<String>,

    /// Print the prompt only; no request, no file written
    #[arg(long)]
    dry_run: bool,

    /// Hide progress output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and API key source
    Config,
}

#[derive(Debug)]
pub enum CliAction {
    InspectConfig,
    Generate { options: RunOptions, quiet: bool },
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action(|path| fs::read_to_string(path))
    }

    /// 파싱된 인자를 실행 옵션으로 변환한다. `*_file` 인자는 `read`로 읽는다.
    pub fn into_action(
        self,
        read: impl Fn(&Path) -> io::Result<String>,
    ) -> Result<CliAction, String> {
        if let Some(Commands::Config) = self.command {
            return Ok(CliAction::InspectConfig);
        }

        let issue_text = pick_input(self.issue, self.issue_file.as_deref(), &read)?;
        let related_code = pick_input(self.code, self.code_file.as_deref(), &read)?;
        let review_comment = pick_input(self.comment, self.comment_file.as_deref(), &read)?;

        Ok(CliAction::Generate {
            options: RunOptions {
                issue_text: issue_text.unwrap_or_default(),
                related_code: related_code.unwrap_or_default(),
                review_comment,
                output_path: self.output,
                diff_output_path: self.diff_output,
                model: self.model.filter(|m| !m.trim().is_empty()),
                dry_run: self.dry_run,
            },
            quiet: self.quiet,
        })
    }
}

/// 파일 플래그가 있으면 인라인/환경 변수 값보다 우선한다.
fn pick_input(
    inline: Option<String>,
    file: Option<&Path>,
    read: &impl Fn(&Path) -> io::Result<String>,
) -> Result<Option<String>, String> {
    match file {
        Some(path) => read(path)
            .map(Some)
            .map_err(|e| format!("failed to read {}: {e}", path.display())),
        None => Ok(inline),
    }
}
