//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터.
pub struct ConsoleReporter {
    interactive: bool,
    quiet: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ConsoleReporter {
    /// `quiet`이면 진행 상황은 숨기고 `raw` 출력(프롬프트 등)만 남긴다.
    pub fn new(quiet: bool) -> Self {
        Self {
            interactive: io::stdout().is_terminal(),
            quiet,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        if self.quiet {
            return;
        }
        println!();
        println!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        if self.quiet {
            return;
        }
        println!("{:<12}: {}", key, value);
    }

    fn status(&self, scope: &str, message: &str) {
        if self.quiet {
            return;
        }
        if self.interactive {
            println!("[{:<12}] {}", scope, colorize_status(message));
        } else {
            println!("[{:<12}] {}", scope, message);
        }
    }

    fn raw(&self, line: &str) {
        println!("{}", line);
    }
}

fn colorize_status(status: &str) -> String {
    if status == "running" {
        format!("\x1b[33m{status}\x1b[0m")
    } else if status.starts_with("done") || status == "Patch generated." {
        format!("\x1b[32m{status}\x1b[0m")
    } else if status.starts_with("warning") || status.starts_with("skipped") {
        format!("\x1b[31m{status}\x1b[0m")
    } else {
        status.to_string()
    }
}
