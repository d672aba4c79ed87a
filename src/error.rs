use thiserror::Error;

#[derive(Error, Debug)]
pub enum EyeScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("HTTPクライアント初期化エラー: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    /// セッション（受付・送信・遷移）のエラー
    #[error(transparent)]
    Session(#[from] eye_scan_common::Error),
}

pub type Result<T> = std::result::Result<T, EyeScanError>;
