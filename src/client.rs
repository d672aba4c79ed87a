//! 解析サービス連携モジュール
//!
//! POST /predict にmultipartで送信し、レスポンスを診断結果かエラーに振り分ける。
//! - 2xx: DiagnosisResult
//! - 非2xx: ServiceError（ボディの error、なければ固定文言）
//! - 通信失敗・読めないボディ: TransportError（固定文言）

use crate::config::Config;
use crate::error::Result;
use eye_scan_common::submission::FILE_FIELD;
use eye_scan_common::{DiagnosisResult, Error, ErrorBody, SubmissionPayload, PREDICT_PATH};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub const SERVICE_FALLBACK_MESSAGE: &str = "An error occurred during analysis.";
pub const TRANSPORT_FALLBACK_MESSAGE: &str = "Failed to connect to server. Please try again.";

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(server_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), PREDICT_PATH),
        })
    }

    pub fn from_config(config: &Config, server_override: Option<&str>) -> Result<Self> {
        Self::new(
            &config.resolve_server_url(server_override),
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 送信して結果を返す。失敗はすべてセッションのエラー種別に変換済み
    pub async fn predict(
        &self,
        payload: &SubmissionPayload,
    ) -> std::result::Result<DiagnosisResult, Error> {
        let form = build_form(payload).map_err(|e| {
            tracing::error!(error = %e, "multipart組み立て失敗");
            Error::TransportError(TRANSPORT_FALLBACK_MESSAGE.to_string())
        })?;

        tracing::debug!(endpoint = %self.endpoint, bytes = payload.file.bytes.len(), "送信開始");

        let response = match self.client.post(&self.endpoint).multipart(form).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "解析サービスに接続できません");
                return Err(Error::TransportError(TRANSPORT_FALLBACK_MESSAGE.to_string()));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, %status, "レスポンス受信失敗");
                return Err(Error::TransportError(TRANSPORT_FALLBACK_MESSAGE.to_string()));
            }
        };

        tracing::debug!(%status, len = body.len(), "レスポンス受信");
        interpret_response(status.is_success(), &body)
    }
}

fn build_form(payload: &SubmissionPayload) -> reqwest::Result<Form> {
    let file = Part::bytes(payload.file.bytes.clone())
        .file_name(payload.file.file_name.clone())
        .mime_str(payload.file.mime_type.as_str())?;

    let form = payload
        .fields
        .iter()
        .fold(Form::new().part(FILE_FIELD, file), |form, (name, value)| {
            form.text(*name, value.clone())
        });
    Ok(form)
}

/// ステータスとボディから結果を判定
///
/// JSONとして読めないボディはステータスに関わらず通信失敗扱い
pub fn interpret_response(
    success: bool,
    body: &str,
) -> std::result::Result<DiagnosisResult, Error> {
    if success {
        return serde_json::from_str::<DiagnosisResult>(body).map_err(|e| {
            tracing::warn!(error = %e, "診断結果のパースに失敗");
            unreadable_body()
        });
    }

    let body: ErrorBody = serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "エラーレスポンスのパースに失敗");
        unreadable_body()
    })?;
    let message = body
        .error
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| SERVICE_FALLBACK_MESSAGE.to_string());
    tracing::warn!(%message, "解析サービスがエラーを返しました");
    Err(Error::ServiceError(message))
}

fn unreadable_body() -> Error {
    Error::TransportError(TRANSPORT_FALLBACK_MESSAGE.to_string())
}
