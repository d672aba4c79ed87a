//! 画像ファイルの受付と検証
//!
//! クリック選択・ドラッグ&ドロップのどちらも同じ `CandidateFile` を渡す。
//! 検証順: MIMEタイプ → サイズ

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 最大ファイルサイズ（16MiB）
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// 受け付けるMIMEタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeType {
    Png,
    Jpeg,
    /// 非標準だがブラウザが返すことがある
    Jpg,
}

impl MimeType {
    pub const ALL: [MimeType; 3] = [MimeType::Png, MimeType::Jpeg, MimeType::Jpg];

    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Png => "image/png",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Jpg => "image/jpg",
        }
    }

    /// MIMEタイプ文字列を判定（許可リスト外はNone）
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == normalized)
    }

    /// 拡張子からMIMEタイプを推定
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(MimeType::Png),
            "jpg" | "jpeg" => Some(MimeType::Jpeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 受付前のファイル（選択/ドロップされたもの）
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub file_name: String,
    /// 呼び出し側が報告したMIMEタイプ（未検証）
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// 検証済みの送信対象画像
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedInput {
    pub file_name: String,
    pub mime_type: MimeType,
    pub bytes: Vec<u8>,
}

impl SelectedInput {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// ファイルを検証して `SelectedInput` に変換
pub fn validate_file(file: CandidateFile) -> Result<SelectedInput> {
    let mime_type = MimeType::parse(&file.mime_type).ok_or_else(|| Error::InvalidFileType {
        mime_type: file.mime_type.clone(),
    })?;

    let size_bytes = file.size_bytes();
    if size_bytes > MAX_FILE_SIZE {
        return Err(Error::FileTooLarge { size_bytes });
    }

    Ok(SelectedInput {
        file_name: file.file_name,
        mime_type,
        bytes: file.bytes,
    })
}

/// プレビュー表示用の表現（Data URL）
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub data_url: String,
    pub size_bytes: u64,
}

impl Preview {
    /// "data:image/jpeg;base64,..." 形式にデコード
    pub fn decode(input: &SelectedInput) -> Self {
        Self {
            data_url: format!(
                "data:{};base64,{}",
                input.mime_type.as_str(),
                STANDARD.encode(&input.bytes)
            ),
            size_bytes: input.size_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(mime: &str, size: usize) -> CandidateFile {
        CandidateFile::new("eye.jpg", mime, vec![0u8; size])
    }

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ["image/png", "image/jpeg", "image/jpg"] {
            let input = validate_file(candidate(mime, 2 * 1024 * 1024)).unwrap();
            assert_eq!(input.mime_type.as_str(), mime);
            assert_eq!(input.size_bytes(), 2 * 1024 * 1024);
        }
    }

    #[test]
    fn test_rejects_other_types() {
        for mime in ["image/gif", "image/webp", "application/pdf", "text/plain", ""] {
            let err = validate_file(candidate(mime, 10)).unwrap_err();
            assert!(matches!(err, Error::InvalidFileType { .. }), "{mime}");
        }
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        assert!(validate_file(candidate("image/png", MAX_FILE_SIZE as usize)).is_ok());

        let err = validate_file(candidate("image/png", MAX_FILE_SIZE as usize + 1)).unwrap_err();
        assert!(matches!(err, Error::FileTooLarge { size_bytes } if size_bytes == MAX_FILE_SIZE + 1));
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = validate_file(candidate("image/gif", MAX_FILE_SIZE as usize + 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidFileType { .. }));
    }

    #[test]
    fn test_mime_parse_normalizes() {
        assert_eq!(MimeType::parse(" IMAGE/PNG "), Some(MimeType::Png));
        assert_eq!(MimeType::parse("image/pjpeg"), None);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(MimeType::from_extension("JPG"), Some(MimeType::Jpeg));
        assert_eq!(MimeType::from_extension("jpeg"), Some(MimeType::Jpeg));
        assert_eq!(MimeType::from_extension("png"), Some(MimeType::Png));
        assert_eq!(MimeType::from_extension("gif"), None);
    }

    #[test]
    fn test_preview_data_url() {
        let input = validate_file(CandidateFile::new("a.png", "image/png", b"abc".to_vec())).unwrap();
        let preview = Preview::decode(&input);
        assert_eq!(preview.data_url, "data:image/png;base64,YWJj");
        assert_eq!(preview.size_bytes, 3);
    }
}
