//! セッションと解析サービスの橋渡し
//!
//! ユーザー操作をセッションイベントに変換し、返ってきた Effect を実行する。
//! 送信は常に1件のみ（Analyze は Preview からしか受け付けない）。

use crate::client::AnalysisClient;
use crate::error::Result;
use eye_scan_common::{
    CandidateFile, Effect, FormInput, Preview, Session, SessionEvent, SubmissionPayload,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct Controller {
    session: Session,
    client: AnalysisClient,
    show_progress: bool,
}

impl Controller {
    pub fn new(client: AnalysisClient) -> Self {
        Self {
            session: Session::new(),
            client,
            show_progress: false,
        }
    }

    /// 送信中にスピナーを表示する
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// ファイル選択（不正なファイルはエラー画面に遷移し、Errにはならない）
    pub fn select_file(&mut self, file: CandidateFile) -> Result<()> {
        if let Some(Effect::DecodePreview { generation }) =
            self.dispatch(SessionEvent::FileSelected(file))?
        {
            if let Some(input) = self.session.selected_input() {
                let preview = Preview::decode(input);
                self.dispatch(SessionEvent::PreviewDecoded { generation, preview })?;
            }
        }
        Ok(())
    }

    pub fn answer(&mut self, input: FormInput) -> Result<()> {
        self.dispatch(SessionEvent::Form(input))?;
        Ok(())
    }

    /// Analyze を押して結果（成功/失敗）が返るまで待つ
    pub async fn analyze(&mut self) -> Result<()> {
        let Some(Effect::Submit(payload)) = self.dispatch(SessionEvent::Analyze)? else {
            return Ok(());
        };

        let outcome = self.submit(&payload).await;
        self.dispatch(SessionEvent::ResponseReceived(outcome))?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.dispatch(SessionEvent::Clear).map(|_| ())
    }

    pub fn retry(&mut self) -> Result<()> {
        self.dispatch(SessionEvent::Retry).map(|_| ())
    }

    pub fn new_analysis(&mut self) -> Result<()> {
        self.dispatch(SessionEvent::NewAnalysis).map(|_| ())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.dispatch(SessionEvent::Reset).map(|_| ())
    }

    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> std::result::Result<eye_scan_common::DiagnosisResult, eye_scan_common::Error> {
        let spinner = self.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Analyzing...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let outcome = self.client.predict(payload).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        outcome
    }

    fn dispatch(&mut self, event: SessionEvent) -> Result<Option<Effect>> {
        let from = self.session.state();
        let effect = self.session.handle(event)?;
        let to = self.session.state();

        if from != to {
            tracing::info!(from = from.name(), to = to.name(), "画面遷移");
        }
        match self.session.error().filter(|_| from != to) {
            Some(err) if err.is_intake() => tracing::info!(error = %err, "ファイルを受け付けません"),
            Some(err) => tracing::warn!(error = %err, "エラー画面を表示"),
            None => {}
        }
        Ok(effect)
    }
}
