//! 패치 생성 도메인 엔티티/값 객체.

use std::fmt;
use std::path::PathBuf;

use crate::domain::error::RequestError;

/// 패치 생성 시 샘플링 온도(결정적 출력을 위해 0으로 고정).
pub const PATCH_TEMPERATURE: f32 = 0.0;

/// CLI/라이브러리 호출 단위 실행 옵션.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub issue_text: String,
    pub related_code: String,
    pub review_comment: Option<String>,
    /// 설정의 `output_path`보다 우선한다.
    pub output_path: Option<PathBuf>,
    /// 추출된 diff 본문만 별도로 기록할 경로
    pub diff_output_path: Option<PathBuf>,
    /// 설정의 모델 식별자보다 우선한다.
    pub model: Option<String>,
    pub dry_run: bool,
}

/// 프롬프트 입력 묶음. 생성 시점에 검증되고 이후 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    issue_text: String,
    related_code: String,
    review_comment: Option<String>,
}

impl PatchRequest {
    /// 빈 문자열 코멘트만 코멘트가 없는 것으로 본다(공백뿐인 코멘트도 코멘트다).
    /// 이슈 본문과 코멘트가 모두 빈 문자열이면 `RequestError::MissingInstruction`.
    pub fn new(
        issue_text: impl Into<String>,
        related_code: impl Into<String>,
        review_comment: Option<String>,
    ) -> Result<Self, RequestError> {
        let issue_text = issue_text.into();
        let review_comment = review_comment.filter(|c| !c.is_empty());

        if review_comment.is_none() && issue_text.is_empty() {
            return Err(RequestError::MissingInstruction);
        }

        Ok(Self {
            issue_text,
            related_code: related_code.into(),
            review_comment,
        })
    }

    pub fn issue_text(&self) -> &str {
        &self.issue_text
    }

    pub fn related_code(&self) -> &str {
        &self.related_code
    }

    pub fn review_comment(&self) -> Option<&str> {
        self.review_comment.as_deref()
    }

    pub fn instruction_kind(&self) -> InstructionKind {
        if self.review_comment.is_some() {
            InstructionKind::ReviewComment
        } else {
            InstructionKind::Issue
        }
    }
}

/// 프롬프트에 들어가는 수정 지시의 출처.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    Issue,
    ReviewComment,
}

impl InstructionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::ReviewComment => "review-comment",
        }
    }
}

/// `build_prompt`가 만든 사용자 프롬프트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText(String);

impl PromptText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 대화 메시지 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// 백엔드로 보내는 단일 요청(시스템 + 사용자 메시지 2개).
#[derive(Debug, Clone, PartialEq)]
pub struct PatchConversation {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl PatchConversation {
    pub fn new(system_prompt: &str, prompt: &PromptText) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: prompt.as_str().to_string(),
                },
            ],
            temperature: PATCH_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    pub fn is_empty(&self) -> bool {
        self.prompt_tokens.is_none() && self.completion_tokens.is_none() && self.total_tokens.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub content: String,
    pub usage: TokenUsage,
}

/// 백엔드 응답에서 만든 패치 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPatch {
    /// 펜스(```)를 포함한 응답 원문. 결과 파일에는 이 값을 그대로 기록한다.
    pub raw_response_text: String,
    pub extracted_diff: Option<String>,
    pub usage: TokenUsage,
}

impl GeneratedPatch {
    pub fn from_response(response: ProviderResponse) -> Self {
        let extracted_diff = extract_diff_block(&response.content);
        Self {
            raw_response_text: response.content,
            extracted_diff,
            usage: response.usage,
        }
    }
}

/// 실행 단계. 실패 시 어느 단계에서 멈췄는지 보고하는 데 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStage {
    Building,
    Requesting,
    Writing,
}

impl PatchStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Requesting => "requesting",
            Self::Writing => "writing",
        }
    }
}

/// 유스케이스 실행 결과.
#[derive(Debug, Clone)]
pub enum PatchOutcome {
    /// `--dry-run`: 프롬프트만 만들고 종료
    DryRun { prompt: PromptText },
    Written {
        patch: GeneratedPatch,
        output_path: PathBuf,
        diff_output_path: Option<PathBuf>,
    },
}

/// 응답 텍스트에서 첫 번째 ```diff(또는 ```patch) 블록 본문을 꺼낸다.
/// 닫는 펜스는 여는 펜스와 같은 들여쓰기에서만 인정한다.
/// 공백으로 시작하는 diff 컨텍스트 줄에 펜스가 있어도 본문으로 남는다.
/// 블록이 없거나 닫는 펜스가 없으면 `None`.
pub fn extract_diff_block(text: &str) -> Option<String> {
    let mut lines = text.lines();

    let indent = loop {
        let line = lines.next()?;
        let trimmed = line.trim_start();
        if let Some(label) = trimmed.strip_prefix("```") {
            let label = label.trim();
            if label.eq_ignore_ascii_case("diff") || label.eq_ignore_ascii_case("patch") {
                break &line[..line.len() - trimmed.len()];
            }
        }
    };

    let mut body: Vec<&str> = Vec::new();
    for line in lines {
        if line
            .strip_prefix(indent)
            .is_some_and(|rest| rest.starts_with("```"))
        {
            let mut diff = body.join("\n");
            diff.push('\n');
            return Some(diff);
        }
        body.push(line);
    }

    None
}
