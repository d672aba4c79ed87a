//! 診断結果の表示内容を組み立てる
//!
//! 入力は `DiagnosisResult` のみ。描画命令（文字列・色・角度）を返すだけで副作用はない。

use crate::types::{DiagnosisResult, Severity};

/// 所見なし時のメッセージ
pub const NO_CONDITIONS_MESSAGE: &str = "✓ No significant conditions detected";

pub const CONDITIONS_HEADER: &str = "Detected Conditions:";

/// 要注意マーカー（いずれかを含む推奨事項は urgent 扱い）
pub const URGENT_MARKERS: [&str; 2] = ["\u{26a0}\u{fe0f}", "\u{1f6a8}"];

/// ゲージの未到達部分の色
pub const GAUGE_TRACK_COLOR: &str = "#e0e0e0";

/// 総合ステータスの表示スタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Healthy,
    Moderate,
    /// 想定外の重症度はすべてここに落とす
    Attention,
}

impl StatusStyle {
    pub fn from_severity(severity: &Severity) -> Self {
        match severity {
            Severity::Low => StatusStyle::Healthy,
            Severity::Moderate => StatusStyle::Moderate,
            Severity::Other(_) => StatusStyle::Attention,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            StatusStyle::Healthy => "healthy",
            StatusStyle::Moderate => "moderate",
            StatusStyle::Attention => "attention",
        }
    }
}

/// スコアの色区分（重症度とは独立）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColor {
    Red,
    Orange,
    Green,
}

impl ScoreColor {
    /// 70超: 赤 / 50超: オレンジ / それ以下: 緑
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            ScoreColor::Red
        } else if score > 50.0 {
            ScoreColor::Orange
        } else {
            ScoreColor::Green
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ScoreColor::Red => "#e74c3c",
            ScoreColor::Orange => "#f39c12",
            ScoreColor::Green => "#27ae60",
        }
    }
}

/// スコアの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChannel {
    Redness,
    Fatigue,
    Dryness,
}

impl ScoreChannel {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreChannel::Redness => "Redness",
            ScoreChannel::Fatigue => "Fatigue",
            ScoreChannel::Dryness => "Dryness",
        }
    }
}

/// 円形ゲージ1つ分
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGauge {
    pub channel: ScoreChannel,
    pub score: f64,
    pub degrees: f64,
    pub color: ScoreColor,
    pub status: String,
}

impl ScoreGauge {
    fn new(channel: ScoreChannel, score: f64, status: String) -> Self {
        Self {
            channel,
            score,
            degrees: arc_degrees(score),
            color: ScoreColor::from_score(score),
            status,
        }
    }

    /// "80%" 形式
    pub fn value_text(&self) -> String {
        format!("{}%", self.score)
    }

    /// CSS conic-gradient
    pub fn background(&self) -> String {
        format!(
            "conic-gradient({} {}deg, {} {}deg)",
            self.color.hex(),
            self.degrees,
            GAUGE_TRACK_COLOR,
            self.degrees
        )
    }
}

/// スコア[0,100] → 円弧の角度。範囲外の補正はしない
pub fn arc_degrees(score: f64) -> f64 {
    (score / 100.0) * 360.0
}

/// 赤みのみローカルで判定する（疲労・乾燥はサーバーの文字列をそのまま使う）
pub fn redness_status(score: f64) -> &'static str {
    if score > 50.0 {
        "Detected"
    } else {
        "Normal"
    }
}

/// 総合ステータス欄
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBanner {
    pub text: String,
    pub overall_score: f64,
    pub style: StatusStyle,
}

impl StatusBanner {
    pub fn overall_score_text(&self) -> String {
        self.overall_score.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionsSection {
    Detected(Vec<String>),
    NoneDetected,
}

impl ConditionsSection {
    pub fn header(&self) -> &'static str {
        match self {
            ConditionsSection::Detected(_) => CONDITIONS_HEADER,
            ConditionsSection::NoneDetected => NO_CONDITIONS_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub text: String,
    pub urgent: bool,
}

impl Recommendation {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            urgent: URGENT_MARKERS.iter().any(|m| text.contains(m)),
        }
    }
}

/// 結果画面の表示内容
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub image_data_uri: String,
    pub status: StatusBanner,
    pub redness: ScoreGauge,
    pub fatigue: ScoreGauge,
    pub dryness: ScoreGauge,
    pub conditions: ConditionsSection,
    /// 空なら何も表示しない
    pub findings: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub consultation_needed: bool,
    pub medical_note: Option<String>,
}

impl RenderedView {
    pub fn gauges(&self) -> [&ScoreGauge; 3] {
        [&self.redness, &self.fatigue, &self.dryness]
    }
}

pub fn render(result: &DiagnosisResult) -> RenderedView {
    let diagnosis = &result.diagnosis;

    let conditions = if diagnosis.conditions.is_empty() {
        ConditionsSection::NoneDetected
    } else {
        ConditionsSection::Detected(diagnosis.conditions.clone())
    };

    RenderedView {
        image_data_uri: result.image_data_uri.clone(),
        status: StatusBanner {
            text: diagnosis.status.clone(),
            overall_score: diagnosis.overall_score,
            style: StatusStyle::from_severity(&diagnosis.severity()),
        },
        redness: ScoreGauge::new(
            ScoreChannel::Redness,
            result.redness_score,
            redness_status(result.redness_score).to_string(),
        ),
        fatigue: ScoreGauge::new(
            ScoreChannel::Fatigue,
            result.fatigue_score,
            result.fatigue_status.clone(),
        ),
        dryness: ScoreGauge::new(
            ScoreChannel::Dryness,
            result.dryness_score,
            result.dryness_status.clone(),
        ),
        conditions,
        findings: diagnosis.findings.clone(),
        recommendations: diagnosis
            .recommendations
            .iter()
            .map(|r| Recommendation::new(r))
            .collect(),
        consultation_needed: diagnosis.consultation_needed,
        medical_note: diagnosis
            .medical_note
            .clone()
            .filter(|note| !note.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diagnosis;

    fn result(redness: f64, severity: &str) -> DiagnosisResult {
        DiagnosisResult {
            image_data_uri: "data:image/jpeg;base64,YWJj".to_string(),
            redness_score: redness,
            normal_score: None,
            fatigue_score: 55.0,
            fatigue_status: "Fatigued".to_string(),
            dryness_score: 10.0,
            dryness_status: "Normal".to_string(),
            diagnosis: Diagnosis {
                status: "Mild Concerns".to_string(),
                overall_score: 66.7,
                severity: severity.to_string(),
                conditions: vec![],
                findings: vec![],
                recommendations: vec!["Avoid rubbing your eyes".to_string()],
                consultation_needed: false,
                medical_note: None,
            },
        }
    }

    #[test]
    fn test_high_redness() {
        let view = render(&result(80.0, "low"));
        assert_eq!(view.redness.degrees, 288.0);
        assert_eq!(view.redness.color, ScoreColor::Red);
        assert_eq!(view.redness.status, "Detected");
        assert_eq!(view.redness.value_text(), "80%");
    }

    #[test]
    fn test_low_redness() {
        let view = render(&result(30.0, "low"));
        assert_eq!(view.redness.degrees, 108.0);
        assert_eq!(view.redness.color, ScoreColor::Green);
        assert_eq!(view.redness.status, "Normal");
    }

    #[test]
    fn test_color_tier_boundaries() {
        assert_eq!(ScoreColor::from_score(70.0), ScoreColor::Orange);
        assert_eq!(ScoreColor::from_score(70.01), ScoreColor::Red);
        assert_eq!(ScoreColor::from_score(50.0), ScoreColor::Green);
        assert_eq!(ScoreColor::from_score(50.5), ScoreColor::Orange);
        assert_eq!(ScoreColor::from_score(0.0), ScoreColor::Green);
    }

    #[test]
    fn test_redness_status_boundary() {
        assert_eq!(redness_status(50.0), "Normal");
        assert_eq!(redness_status(50.1), "Detected");
    }

    #[test]
    fn test_fatigue_and_dryness_status_pass_through() {
        let view = render(&result(30.0, "low"));
        assert_eq!(view.fatigue.status, "Fatigued");
        assert_eq!(view.fatigue.color, ScoreColor::Orange);
        assert_eq!(view.dryness.status, "Normal");
        assert_eq!(view.dryness.degrees, 36.0);
    }

    #[test]
    fn test_status_style_mapping() {
        assert_eq!(render(&result(0.0, "low")).status.style, StatusStyle::Healthy);
        assert_eq!(render(&result(0.0, "moderate")).status.style.class_name(), "moderate");
        assert_eq!(
            render(&result(0.0, "unknown-value")).status.style.class_name(),
            "attention"
        );
        assert_eq!(render(&result(0.0, "high")).status.style, StatusStyle::Attention);
    }

    #[test]
    fn test_empty_sections() {
        let view = render(&result(30.0, "low"));
        assert_eq!(view.conditions, ConditionsSection::NoneDetected);
        assert_eq!(view.conditions.header(), NO_CONDITIONS_MESSAGE);
        assert!(view.findings.is_empty());
        assert_eq!(view.recommendations.len(), 1);
    }

    #[test]
    fn test_detected_conditions() {
        let mut r = result(80.0, "moderate");
        r.diagnosis.conditions = vec!["Eye Redness (High Confidence)".to_string()];
        let view = render(&r);
        assert_eq!(view.conditions.header(), CONDITIONS_HEADER);
        assert_eq!(
            view.conditions,
            ConditionsSection::Detected(vec!["Eye Redness (High Confidence)".to_string()])
        );
    }

    #[test]
    fn test_urgent_recommendations() {
        let mut r = result(80.0, "high");
        r.diagnosis.recommendations = vec![
            "🚨 URGENT: Multiple conditions detected - seek immediate professional eye care".to_string(),
            "⚠️ IMPORTANT: Consult an eye care professional".to_string(),
            "Avoid rubbing your eyes".to_string(),
        ];
        let view = render(&r);
        let flags: Vec<bool> = view.recommendations.iter().map(|r| r.urgent).collect();
        assert_eq!(flags, vec![true, true, false]);
        assert_eq!(view.recommendations[1].text, "⚠️ IMPORTANT: Consult an eye care professional");
    }

    #[test]
    fn test_medical_note_only_when_non_empty() {
        let mut r = result(30.0, "low");
        r.diagnosis.medical_note = Some(String::new());
        assert!(render(&r).medical_note.is_none());

        r.diagnosis.medical_note = Some("See a professional.".to_string());
        assert_eq!(render(&r).medical_note.as_deref(), Some("See a professional."));
    }

    #[test]
    fn test_gauge_background() {
        let view = render(&result(80.0, "low"));
        assert_eq!(
            view.redness.background(),
            "conic-gradient(#e74c3c 288deg, #e0e0e0 288deg)"
        );
    }

    #[test]
    fn test_overall_score_text() {
        let view = render(&result(30.0, "low"));
        assert_eq!(view.status.overall_score_text(), "66.7");
        assert_eq!(view.status.text, "Mild Concerns");
    }
}
