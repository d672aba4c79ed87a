//! 送信ペイロード組み立て
//!
//! 画像1枚 + 問診票8項目を1つのmultipartリクエストにまとめる。
//! 現在の入力とフォーム状態だけから作る純粋関数。

use crate::intake::{MimeType, SelectedInput};
use crate::questionnaire::QuestionnaireAnswers;

/// 解析エンドポイント
pub const PREDICT_PATH: &str = "/predict";

/// 画像パートのフィールド名
pub const FILE_FIELD: &str = "file";

/// 画像パート
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub mime_type: MimeType,
    pub bytes: Vec<u8>,
}

/// multipart送信内容
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub file: FilePart,
    /// 問診票（常に8項目）
    pub fields: Vec<(&'static str, String)>,
}

impl SubmissionPayload {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

pub fn assemble_submission(
    input: &SelectedInput,
    answers: &QuestionnaireAnswers,
) -> SubmissionPayload {
    SubmissionPayload {
        file: FilePart {
            file_name: input.file_name.clone(),
            mime_type: input.mime_type,
            bytes: input.bytes.clone(),
        },
        fields: answers
            .fields()
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect(),
    }
}
