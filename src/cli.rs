use clap::{Args, Parser, Subcommand};
use eye_scan_common::{FormInput, ScreenTime, SleepHours, YesNo};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eye-scan")]
#[command(about = "目の写真と問診票から充血・疲れ目・ドライアイを解析", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真と問診票を解析サービスへ送信して結果を表示
    Analyze {
        /// 目の写真（PNG/JPEG、16MB以下）
        #[arg(required = true)]
        image: PathBuf,

        #[command(flatten)]
        answers: AnswerArgs,

        /// 解析サービスのURL（設定より優先）
        #[arg(long)]
        server: Option<String>,

        /// 表示の代わりに診断結果JSONを出力
        #[arg(long)]
        json: bool,

        /// 解析済み画像の保存先
        #[arg(long)]
        save_image: Option<PathBuf>,
    },

    /// 問診票を対話形式で入力して解析
    Interactive {
        /// 解析サービスのURL（設定より優先）
        #[arg(long)]
        server: Option<String>,
    },

    /// 画像の受付チェックのみ（送信しない）
    Check {
        #[arg(required = true)]
        image: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 解析サービスのURLを設定
        #[arg(long)]
        set_server_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 問診票（未指定は既定値）
#[derive(Args, Debug, Default)]
pub struct AnswerArgs {
    /// 焼けるような痛み (yes/no)
    #[arg(long)]
    pub burning: Option<YesNo>,

    /// かゆみ (yes/no)
    #[arg(long)]
    pub itching: Option<YesNo>,

    /// 涙目 (yes/no)
    #[arg(long)]
    pub watery_eyes: Option<YesNo>,

    /// 光への過敏 (yes/no)
    #[arg(long)]
    pub sensitivity: Option<YesNo>,

    /// 目で見て分かる充血 (yes/no)
    #[arg(long)]
    pub redness_visible: Option<YesNo>,

    /// コンタクトレンズ使用 (yes/no)
    #[arg(long)]
    pub contact_lens: Option<YesNo>,

    /// 1日のスクリーン時間 (2/4/6/8/10)
    #[arg(long)]
    pub screen_time: Option<ScreenTime>,

    /// 睡眠時間 (4/5/6/7/8/9)
    #[arg(long)]
    pub sleep_hours: Option<SleepHours>,
}

impl AnswerArgs {
    /// 指定されたフラグだけをフォーム操作に変換
    pub fn form_inputs(&self) -> Vec<FormInput> {
        [
            self.burning.map(FormInput::Burning),
            self.itching.map(FormInput::Itching),
            self.watery_eyes.map(FormInput::WateryEyes),
            self.sensitivity.map(FormInput::Sensitivity),
            self.redness_visible.map(FormInput::RednessVisible),
            self.contact_lens.map(FormInput::ContactLens),
            self.screen_time.map(FormInput::ScreenTime),
            self.sleep_hours.map(FormInput::SleepHours),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_answers() {
        let cli = Cli::parse_from([
            "eye-scan",
            "analyze",
            "eye.jpg",
            "--burning",
            "yes",
            "--screen-time",
            "8",
        ]);
        let Commands::Analyze { image, answers, server, json, .. } = cli.command else {
            panic!("analyze expected");
        };
        assert_eq!(image, PathBuf::from("eye.jpg"));
        assert!(server.is_none());
        assert!(!json);
        assert_eq!(
            answers.form_inputs(),
            vec![
                FormInput::Burning(YesNo::Yes),
                FormInput::ScreenTime(ScreenTime::SixToEight),
            ]
        );
    }

    #[test]
    fn test_untouched_flags_send_nothing() {
        assert!(AnswerArgs::default().form_inputs().is_empty());
    }

    #[test]
    fn test_rejects_unknown_option() {
        let err = Cli::try_parse_from(["eye-scan", "analyze", "eye.jpg", "--sleep-hours", "12"])
            .err()
            .expect("12 hours is not an option");
        assert!(err.to_string().contains("Invalid answer for sleep_hours: 12"));
    }

    #[test]
    fn test_yes_no_flag_accepts_short_form() {
        let cli = Cli::parse_from(["eye-scan", "analyze", "eye.jpg", "--contact-lens", "y"]);
        let Commands::Analyze { answers, .. } = cli.command else {
            panic!("analyze expected");
        };
        assert_eq!(answers.form_inputs(), vec![FormInput::ContactLens(YesNo::Yes)]);
        assert!(answers.sleep_hours.is_none());
    }
}
