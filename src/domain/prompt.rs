//! 패치 요청 프롬프트 구성 정책.

use crate::domain::patch::{PatchRequest, PromptText};

/// 프롬프트 문구 언어.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptLanguage {
    #[default]
    Japanese,
    English,
}

impl PromptLanguage {
    /// 설정 문자열을 언어 정책으로 변환한다.
    /// 지원값: ja/japanese, en/english (미지정/알수없음은 ja 기본값)
    pub fn from_config(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::Japanese;
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Self::English,
            "ja" | "jp" | "japanese" => Self::Japanese,
            _ => Self::Japanese,
        }
    }

    /// inspection 출력용 코드값.
    pub fn code(self) -> &'static str {
        match self {
            Self::Japanese => "ja",
            Self::English => "en",
        }
    }

    pub fn code_header(self) -> &'static str {
        match self {
            Self::Japanese => "以下はリポジトリの関連コード断片です:",
            Self::English => "Here is the related code from the repository:",
        }
    }

    pub fn comment_header(self) -> &'static str {
        match self {
            Self::Japanese => "以下はPRへのコメントです。これを踏まえ、修正を加えてください:",
            Self::English => "Here is a review comment on the PR. Apply changes that address it:",
        }
    }

    pub fn issue_header(self) -> &'static str {
        match self {
            Self::Japanese => "以下はIssueで要求されている修正内容です:",
            Self::English => "Here is the fix requested in the issue:",
        }
    }

    pub fn output_instruction(self) -> &'static str {
        match self {
            Self::Japanese => {
                "上記を反映するためのdiffパッチを生成してください。出力は```diffで始まり```で終わるコードブロック内に収めてください。"
            }
            Self::English => {
                "Generate a diff patch that reflects the above. Put the output inside a single code block that starts with ```diff and ends with ```."
            }
        }
    }
}

/// 관련 코드 + (리뷰 코멘트 또는 이슈 본문) + 출력 형식 지시문 순서로 프롬프트를 만든다.
/// 코멘트가 있으면 이슈 본문은 넣지 않는다.
pub fn build_prompt(request: &PatchRequest, language: PromptLanguage) -> PromptText {
    let mut prompt = section(language.code_header(), request.related_code());

    match request.review_comment() {
        Some(comment) => prompt.push_str(&section(language.comment_header(), comment)),
        None => prompt.push_str(&section(language.issue_header(), request.issue_text())),
    }

    prompt.push_str(language.output_instruction());
    PromptText::new(prompt)
}

fn section(header: &str, body: &str) -> String {
    format!("{header}\n{body}\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANGUAGES: [PromptLanguage; 2] = [PromptLanguage::Japanese, PromptLanguage::English];

    fn request(issue: &str, code: &str, comment: &str) -> PatchRequest {
        PatchRequest::new(issue, code, Some(comment.to_string())).unwrap()
    }

    #[test]
    fn issue_prompt_excludes_comment_header() {
        for language in LANGUAGES {
            for issue in ["Fix off-by-one in loop", "x", "複数行\nの説明"] {
                let prompt = build_prompt(&request(issue, "let a = 1;", ""), language);
                let text = prompt.as_str();
                assert!(text.contains(language.issue_header()));
                assert!(text.contains(issue));
                assert!(!text.contains(language.comment_header()));
            }
        }
    }

    #[test]
    fn comment_prompt_excludes_issue_header() {
        for language in LANGUAGES {
            for issue in ["", "Fix off-by-one in loop"] {
                let prompt = build_prompt(&request(issue, "code", "please rename"), language);
                let text = prompt.as_str();
                assert!(text.contains(language.comment_header()));
                assert!(text.contains("please rename"));
                assert!(!text.contains(language.issue_header()));
                if !issue.is_empty() {
                    assert!(!text.contains(issue));
                }
            }
        }
    }

    #[test]
    fn whitespace_comment_selects_comment_branch() {
        for language in LANGUAGES {
            let prompt = build_prompt(&request("fix loop", "code", " "), language);
            assert!(prompt.as_str().contains(language.comment_header()));
            assert!(!prompt.as_str().contains(language.issue_header()));
        }
    }

    #[test]
    fn related_code_section_is_always_present() {
        let prompt = build_prompt(&request("fix", "", ""), PromptLanguage::English);
        assert!(
            prompt
                .as_str()
                .starts_with("Here is the related code from the repository:\n\n\n")
        );
    }

    #[test]
    fn japanese_layout_matches_expected_text() {
        let prompt = build_prompt(
            &request("Fix off-by-one in loop", "for i in range(n): arr[i+1]", ""),
            PromptLanguage::Japanese,
        );
        let expected = "以下はリポジトリの関連コード断片です:\nfor i in range(n): arr[i+1]\n\n\
                        以下はIssueで要求されている修正内容です:\nFix off-by-one in loop\n\n\
                        上記を反映するためのdiffパッチを生成してください。出力は```diffで始まり```で終わるコードブロック内に収めてください。";
        assert_eq!(prompt.as_str(), expected);
    }

    #[test]
    fn prompt_ends_with_fenced_diff_instruction() {
        for language in LANGUAGES {
            let prompt = build_prompt(&request("fix", "code", ""), language);
            assert!(prompt.as_str().ends_with(language.output_instruction()));
            assert!(prompt.as_str().contains("```diff"));
        }
    }

    #[test]
    fn build_is_deterministic() {
        let req = request("issue", "code", "comment");
        for language in LANGUAGES {
            assert_eq!(build_prompt(&req, language), build_prompt(&req, language));
        }
    }

    #[test]
    fn language_from_config() {
        assert_eq!(PromptLanguage::from_config(None), PromptLanguage::Japanese);
        assert_eq!(PromptLanguage::from_config(Some(" EN ")), PromptLanguage::English);
        assert_eq!(PromptLanguage::from_config(Some("japanese")), PromptLanguage::Japanese);
        assert_eq!(PromptLanguage::from_config(Some("fr")), PromptLanguage::Japanese);
    }
}
