//! エラー型定義

use thiserror::Error;

/// 受付・送信・遷移の共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 受付時: 許可されていないMIMEタイプ
    #[error("Invalid file type. Please upload PNG, JPG, or JPEG image.")]
    InvalidFileType { mime_type: String },

    /// 受付時: 16MiBを超えるファイル
    #[error("File size exceeds 16MB. Please upload a smaller image.")]
    FileTooLarge { size_bytes: u64 },

    /// 送信時: サービスが失敗を返した（非2xx）
    #[error("{0}")]
    ServiceError(String),

    /// 送信時: レスポンスを得られなかった
    #[error("{0}")]
    TransportError(String),

    /// 問診票: 選択肢にない値
    #[error("Invalid answer for {field}: {value}")]
    InvalidAnswer { field: &'static str, value: String },

    /// 現在の画面状態では受け付けない操作
    #[error("{action} is not available while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

impl Error {
    /// 受付時のエラーか（アップロード面は表示されたまま）
    pub fn is_intake(&self) -> bool {
        matches!(self, Error::InvalidFileType { .. } | Error::FileTooLarge { .. })
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_file_type() {
        let error = Error::InvalidFileType {
            mime_type: "image/gif".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("PNG, JPG, or JPEG"));
    }

    #[test]
    fn test_error_display_file_too_large() {
        let error = Error::FileTooLarge {
            size_bytes: 20 * 1024 * 1024,
        };
        assert!(format!("{}", error).contains("16MB"));
    }

    #[test]
    fn test_error_display_service_passthrough() {
        let error = Error::ServiceError("No file uploaded".to_string());
        assert_eq!(format!("{}", error), "No file uploaded");
    }

    #[test]
    fn test_error_display_invalid_answer() {
        let error = Error::InvalidAnswer {
            field: "sleep_hours",
            value: "12".to_string(),
        };
        assert_eq!(format!("{}", error), "Invalid answer for sleep_hours: 12");
    }

    #[test]
    fn test_error_display_transition() {
        let error = Error::InvalidTransition {
            state: "Idle",
            action: "Analyze",
        };
        assert_eq!(format!("{}", error), "Analyze is not available while Idle");
    }

    #[test]
    fn test_error_kind_helpers() {
        assert!(Error::FileTooLarge { size_bytes: 1 }.is_intake());
        assert!(!Error::TransportError("x".into()).is_intake());
        assert!(!Error::ServiceError("x".into()).is_intake());
    }
}
