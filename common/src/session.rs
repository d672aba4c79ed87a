//! セッション状態機械
//!
//! 画面状態は `ViewState` ひとつだけを正とし、各セクションの表示/非表示は
//! そこから導出する。遷移可否は `next_state` の表で決まる。
//!
//! ```text
//! Idle ──選択OK──▶ Preview ──Analyze──▶ Analyzing ──成功──▶ Results
//!  │  ◀──Clear────┘                        └──失敗──▶ Error(Submission)
//!  └──選択NG──▶ Error(Intake)
//! Error ──Retry──▶ Idle / Results ──New Analysis──▶ Idle / 任意 ──Reset──▶ Idle
//! ```

use crate::error::{Error, Result};
use crate::intake::{validate_file, CandidateFile, Preview, SelectedInput};
use crate::questionnaire::{FormInput, QuestionnaireAnswers};
use crate::submission::{assemble_submission, SubmissionPayload};
use crate::types::DiagnosisResult;

/// エラー画面に至った経路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// ファイル受付時（アップロード面は表示されたまま）
    Intake,
    /// 送信後
    Submission,
}

/// 画面状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Preview,
    Analyzing,
    Results,
    Error(ErrorOrigin),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "Idle",
            ViewState::Preview => "Preview",
            ViewState::Analyzing => "Analyzing",
            ViewState::Results => "Results",
            ViewState::Error(_) => "Error",
        }
    }

    pub fn visibility(&self) -> Visibility {
        let mut v = Visibility::default();
        match self {
            ViewState::Idle => v.upload = true,
            ViewState::Preview => v.preview = true,
            ViewState::Analyzing => v.loading = true,
            ViewState::Results => v.results = true,
            ViewState::Error(origin) => {
                v.error = true;
                v.upload = *origin == ErrorOrigin::Intake;
            }
        }
        v
    }
}

/// 表示セクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub upload: bool,
    pub preview: bool,
    pub loading: bool,
    pub results: bool,
    pub error: bool,
}

/// 遷移のきっかけ（ペイロードなし）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FileAccepted,
    FileRejected,
    Clear,
    Analyze,
    Succeeded,
    Failed,
    Retry,
    NewAnalysis,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::FileAccepted | Action::FileRejected => "File selection",
            Action::Clear => "Clear",
            Action::Analyze => "Analyze",
            Action::Succeeded | Action::Failed => "Response",
            Action::Retry => "Retry",
            Action::NewAnalysis => "New Analysis",
            Action::Reset => "Reset",
        }
    }
}

/// 遷移表。None は許可されない遷移
pub fn next_state(state: ViewState, action: Action) -> Option<ViewState> {
    const INTAKE_ERROR: ViewState = ViewState::Error(ErrorOrigin::Intake);

    match (state, action) {
        (_, Action::Reset) => Some(ViewState::Idle),
        (ViewState::Idle | INTAKE_ERROR, Action::FileAccepted) => Some(ViewState::Preview),
        (ViewState::Idle | INTAKE_ERROR, Action::FileRejected) => Some(INTAKE_ERROR),
        (ViewState::Preview, Action::Clear) => Some(ViewState::Idle),
        (ViewState::Preview, Action::Analyze) => Some(ViewState::Analyzing),
        (ViewState::Analyzing, Action::Succeeded) => Some(ViewState::Results),
        (ViewState::Analyzing, Action::Failed) => {
            Some(ViewState::Error(ErrorOrigin::Submission))
        }
        (ViewState::Error(_), Action::Retry) => Some(ViewState::Idle),
        (ViewState::Results, Action::NewAnalysis) => Some(ViewState::Idle),
        _ => None,
    }
}

/// 外部イベント
#[derive(Debug)]
pub enum SessionEvent {
    /// クリック選択 / ドラッグ&ドロップ
    FileSelected(CandidateFile),
    Form(FormInput),
    PreviewDecoded { generation: u64, preview: Preview },
    Clear,
    Analyze,
    ResponseReceived(Result<DiagnosisResult>),
    Retry,
    NewAnalysis,
    Reset,
}

/// 呼び出し側に依頼する処理
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// プレビューを非同期にデコードし、同じ generation で返す
    DecodePreview { generation: u64 },
    /// 送信を1件だけ発行する
    Submit(SubmissionPayload),
}

/// セッションコントローラ
#[derive(Debug, Default)]
pub struct Session {
    state: ViewState,
    selected: Option<SelectedInput>,
    preview: Option<Preview>,
    answers: QuestionnaireAnswers,
    result: Option<DiagnosisResult>,
    error: Option<Error>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn visibility(&self) -> Visibility {
        self.state.visibility()
    }

    pub fn selected_input(&self) -> Option<&SelectedInput> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn answers(&self) -> &QuestionnaireAnswers {
        &self.answers
    }

    pub fn result(&self) -> Option<&DiagnosisResult> {
        self.result.as_ref()
    }

    /// エラー画面に表示するメッセージ
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// 直近のファイル選択の世代番号
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// イベントを1件処理する
    ///
    /// 許可されない遷移は `Error::InvalidTransition` を返し、状態は変えない。
    pub fn handle(&mut self, event: SessionEvent) -> Result<Option<Effect>> {
        match event {
            SessionEvent::FileSelected(file) => self.select_file(file),
            SessionEvent::Form(input) => {
                self.answers.apply(input);
                Ok(None)
            }
            SessionEvent::PreviewDecoded { generation, preview } => {
                // 後から選択されたファイルが優先
                if generation == self.generation && self.selected.is_some() {
                    self.preview = Some(preview);
                }
                Ok(None)
            }
            SessionEvent::Clear => {
                self.transition(Action::Clear)?;
                self.clear_input();
                Ok(None)
            }
            SessionEvent::Analyze => self.analyze(),
            SessionEvent::ResponseReceived(outcome) => self.complete(outcome),
            SessionEvent::Retry => {
                self.transition(Action::Retry)?;
                self.reset_data();
                Ok(None)
            }
            SessionEvent::NewAnalysis => {
                self.transition(Action::NewAnalysis)?;
                self.reset_data();
                Ok(None)
            }
            SessionEvent::Reset => {
                self.transition(Action::Reset)?;
                self.reset_data();
                Ok(None)
            }
        }
    }

    fn select_file(&mut self, file: CandidateFile) -> Result<Option<Effect>> {
        match validate_file(file) {
            Ok(input) => {
                self.transition(Action::FileAccepted)?;
                self.generation += 1;
                self.selected = Some(input);
                self.preview = None;
                self.result = None;
                self.error = None;
                Ok(Some(Effect::DecodePreview {
                    generation: self.generation,
                }))
            }
            Err(err) => {
                self.transition(Action::FileRejected)?;
                self.clear_input();
                self.error = Some(err);
                Ok(None)
            }
        }
    }

    fn analyze(&mut self) -> Result<Option<Effect>> {
        let payload = match &self.selected {
            Some(input) if self.state == ViewState::Preview => {
                assemble_submission(input, &self.answers)
            }
            _ => return Err(self.rejected(Action::Analyze)),
        };
        self.transition(Action::Analyze)?;
        self.result = None;
        self.error = None;
        Ok(Some(Effect::Submit(payload)))
    }

    fn complete(&mut self, outcome: Result<DiagnosisResult>) -> Result<Option<Effect>> {
        match outcome {
            Ok(result) => {
                self.transition(Action::Succeeded)?;
                self.result = Some(result);
            }
            Err(err) => {
                self.transition(Action::Failed)?;
                self.error = Some(err);
            }
        }
        Ok(None)
    }

    fn transition(&mut self, action: Action) -> Result<()> {
        let next = next_state(self.state, action).ok_or_else(|| self.rejected(action))?;
        self.state = next;
        Ok(())
    }

    fn rejected(&self, action: Action) -> Error {
        Error::InvalidTransition {
            state: self.state.name(),
            action: action.name(),
        }
    }

    fn clear_input(&mut self) {
        self.selected = None;
        self.preview = None;
    }

    fn reset_data(&mut self) {
        self.clear_input();
        self.result = None;
        self.error = None;
        self.answers = QuestionnaireAnswers::default();
    }
}
