//! 問診票（8項目）
//!
//! 未回答の項目は常にデフォルト値を持つ。送信時に欠落する項目はない。

use crate::error::Error;
use std::str::FromStr;

/// はい/いいえ（デフォルト: いいえ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }
}

impl FromStr for YesNo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Ok(YesNo::Yes),
            "no" | "n" => Ok(YesNo::No),
            _ => Err(invalid_answer("yes/no", s)),
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

/// 1日のスクリーン時間（選択肢の先頭がデフォルト）
///
/// 送信値はサービス側が整数として解釈する時間数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenTime {
    #[default]
    UnderTwo,
    TwoToFour,
    FourToSix,
    SixToEight,
    OverEight,
}

impl ScreenTime {
    pub const OPTIONS: [ScreenTime; 5] = [
        ScreenTime::UnderTwo,
        ScreenTime::TwoToFour,
        ScreenTime::FourToSix,
        ScreenTime::SixToEight,
        ScreenTime::OverEight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenTime::UnderTwo => "2",
            ScreenTime::TwoToFour => "4",
            ScreenTime::FourToSix => "6",
            ScreenTime::SixToEight => "8",
            ScreenTime::OverEight => "10",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScreenTime::UnderTwo => "Less than 2 hours",
            ScreenTime::TwoToFour => "2-4 hours",
            ScreenTime::FourToSix => "4-6 hours",
            ScreenTime::SixToEight => "6-8 hours",
            ScreenTime::OverEight => "More than 8 hours",
        }
    }
}

impl FromStr for ScreenTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::OPTIONS
            .into_iter()
            .find(|o| o.as_str() == value)
            .ok_or_else(|| invalid_answer("screen_time", s))
    }
}

/// 睡眠時間（選択肢の先頭がデフォルト）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SleepHours {
    #[default]
    UnderFive,
    Five,
    Six,
    Seven,
    Eight,
    NineOrMore,
}

impl SleepHours {
    pub const OPTIONS: [SleepHours; 6] = [
        SleepHours::UnderFive,
        SleepHours::Five,
        SleepHours::Six,
        SleepHours::Seven,
        SleepHours::Eight,
        SleepHours::NineOrMore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SleepHours::UnderFive => "4",
            SleepHours::Five => "5",
            SleepHours::Six => "6",
            SleepHours::Seven => "7",
            SleepHours::Eight => "8",
            SleepHours::NineOrMore => "9",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SleepHours::UnderFive => "Less than 5 hours",
            SleepHours::Five => "5 hours",
            SleepHours::Six => "6 hours",
            SleepHours::Seven => "7 hours",
            SleepHours::Eight => "8 hours",
            SleepHours::NineOrMore => "9+ hours",
        }
    }
}

impl FromStr for SleepHours {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::OPTIONS
            .into_iter()
            .find(|o| o.as_str() == value)
            .ok_or_else(|| invalid_answer("sleep_hours", s))
    }
}

/// 問診票の回答（常に8項目すべて埋まっている）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuestionnaireAnswers {
    pub burning: YesNo,
    pub itching: YesNo,
    pub watery_eyes: YesNo,
    pub sensitivity: YesNo,
    pub redness_visible: YesNo,
    pub contact_lens: YesNo,
    pub screen_time: ScreenTime,
    pub sleep_hours: SleepHours,
}

/// フォーム操作1回分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Burning(YesNo),
    Itching(YesNo),
    WateryEyes(YesNo),
    Sensitivity(YesNo),
    RednessVisible(YesNo),
    ContactLens(YesNo),
    ScreenTime(ScreenTime),
    SleepHours(SleepHours),
}

fn invalid_answer(field: &'static str, value: &str) -> Error {
    Error::InvalidAnswer {
        field,
        value: value.to_string(),
    }
}

impl QuestionnaireAnswers {
    /// 送信時のフィールド名（固定順）
    pub const FIELD_NAMES: [&'static str; 8] = [
        "burning",
        "itching",
        "watery_eyes",
        "sensitivity",
        "redness_visible",
        "contact_lens",
        "screen_time",
        "sleep_hours",
    ];

    pub fn apply(&mut self, input: FormInput) {
        match input {
            FormInput::Burning(v) => self.burning = v,
            FormInput::Itching(v) => self.itching = v,
            FormInput::WateryEyes(v) => self.watery_eyes = v,
            FormInput::Sensitivity(v) => self.sensitivity = v,
            FormInput::RednessVisible(v) => self.redness_visible = v,
            FormInput::ContactLens(v) => self.contact_lens = v,
            FormInput::ScreenTime(v) => self.screen_time = v,
            FormInput::SleepHours(v) => self.sleep_hours = v,
        }
    }

    /// (フィールド名, 値) の8組
    pub fn fields(&self) -> [(&'static str, &'static str); 8] {
        let values = [
            self.burning.as_str(),
            self.itching.as_str(),
            self.watery_eyes.as_str(),
            self.sensitivity.as_str(),
            self.redness_visible.as_str(),
            self.contact_lens.as_str(),
            self.screen_time.as_str(),
            self.sleep_hours.as_str(),
        ];
        std::array::from_fn(|i| (Self::FIELD_NAMES[i], values[i]))
    }
}
