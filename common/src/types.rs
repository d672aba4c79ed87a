//! 解析サービスのレスポンス型
//!
//! - DiagnosisResult: 成功時（2xx）のボディ
//! - ErrorBody: 失敗時（非2xx）のボディ

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// 診断結果（成功レスポンス）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// 表示用画像（Data URL）
    #[serde(rename = "image")]
    pub image_data_uri: String,

    pub redness_score: f64,

    /// 正常スコア（赤み判定の補数）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_score: Option<f64>,

    pub fatigue_score: f64,
    pub fatigue_status: String,

    pub dryness_score: f64,
    pub dryness_status: String,

    pub diagnosis: Diagnosis,
}

/// 総合診断
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub status: String,
    pub overall_score: f64,
    /// "low" / "moderate" / その他
    pub severity: String,

    #[serde(default)]
    pub conditions: Vec<String>,

    #[serde(default)]
    pub findings: Vec<String>,

    #[serde(default)]
    pub recommendations: Vec<String>,

    #[serde(default)]
    pub consultation_needed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_note: Option<String>,
}

impl Diagnosis {
    pub fn severity(&self) -> Severity {
        Severity::from_label(&self.severity)
    }
}

/// サーバーが付ける重症度区分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Low,
    Moderate,
    /// 想定外の値（"high" を含む）
    Other(String),
}

impl Severity {
    /// 完全一致のみ。大文字小文字も区別する
    pub fn from_label(label: &str) -> Self {
        match label {
            "low" => Severity::Low,
            "moderate" => Severity::Moderate,
            other => Severity::Other(other.to_string()),
        }
    }
}

/// 失敗レスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Data URL の分解結果
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageDataUri {
    /// "data:image/jpeg;base64,..." を分解してデコード
    pub fn parse(data_uri: &str) -> Option<Self> {
        let rest = data_uri.strip_prefix("data:")?;
        let (header, data) = rest.split_once(',')?;
        let mime_type = header.strip_suffix(";base64")?;
        let bytes = STANDARD.decode(data.trim()).ok()?;

        Some(Self {
            mime_type: if mime_type.is_empty() {
                "image/jpeg".to_string()
            } else {
                mime_type.to_string()
            },
            bytes,
        })
    }

    /// 保存時の拡張子
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            _ => "jpg",
        }
    }
}
