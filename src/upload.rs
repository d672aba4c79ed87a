//! 画像ファイルの読み込み（アップロード面）
//!
//! パス指定（クリック選択に相当）で読み込んだファイルを `CandidateFile` にする。
//! MIMEタイプは拡張子から決め、検証はセッション側で行う。

use crate::error::{EyeScanError, Result};
use eye_scan_common::{CandidateFile, MimeType, SelectedInput};
use std::io::Cursor;
use std::path::Path;

/// 拡張子から判定できない場合のMIMEタイプ
const UNKNOWN_MIME: &str = "application/octet-stream";

pub fn load_candidate(path: &Path) -> Result<CandidateFile> {
    if !path.is_file() {
        return Err(EyeScanError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mime_type = path
        .extension()
        .and_then(|ext| MimeType::from_extension(&ext.to_string_lossy()))
        .map(|m| m.as_str())
        .unwrap_or(UNKNOWN_MIME);

    let bytes = std::fs::read(path)?;
    tracing::debug!(file = %file_name, mime = mime_type, size = bytes.len(), "画像を読み込みました");

    Ok(CandidateFile::new(file_name, mime_type, bytes))
}

/// 画像の寸法（プレビュー表示用）
pub fn image_dimensions(input: &SelectedInput) -> Result<(u32, u32)> {
    image::ImageReader::new(Cursor::new(&input.bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| EyeScanError::ImageLoad(format!("{}: {}", input.file_name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_candidate_not_found() {
        let result = load_candidate(Path::new("/nonexistent/eye.jpg"));
        assert!(matches!(result, Err(EyeScanError::FileNotFound(_))));
    }

    #[test]
    fn test_load_candidate_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("EYE.JPG");
        fs::write(&path, b"dummy").unwrap();

        let candidate = load_candidate(&path).unwrap();
        assert_eq!(candidate.file_name, "EYE.JPG");
        assert_eq!(candidate.mime_type, "image/jpeg");
        assert_eq!(candidate.size_bytes(), 5);
    }

    #[test]
    fn test_load_candidate_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eye.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let candidate = load_candidate(&path).unwrap();
        assert_eq!(candidate.mime_type, UNKNOWN_MIME);
        assert!(eye_scan_common::validate_file(candidate).is_err());
    }

    #[test]
    fn test_image_dimensions_png() {
        let mut bytes = Vec::new();
        image::RgbImage::new(4, 3)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let input =
            eye_scan_common::validate_file(CandidateFile::new("eye.png", "image/png", bytes))
                .unwrap();
        assert_eq!(image_dimensions(&input).unwrap(), (4, 3));
    }

    #[test]
    fn test_image_dimensions_rejects_garbage() {
        let input = eye_scan_common::validate_file(CandidateFile::new(
            "eye.png",
            "image/png",
            b"not an image".to_vec(),
        ))
        .unwrap();
        assert!(image_dimensions(&input).is_err());
    }
}
