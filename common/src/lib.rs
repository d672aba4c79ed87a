//! Eye Scan Common Library
//!
//! セッション制御のコア（画面状態・受付・送信組み立て・結果表示）。
//! I/Oと通信は持たず、CLIなどのフロントエンドから共有される。

pub mod error;
pub mod intake;
pub mod questionnaire;
pub mod render;
pub mod session;
pub mod submission;
pub mod types;

pub use error::{Error, Result};
pub use intake::{validate_file, CandidateFile, MimeType, Preview, SelectedInput, MAX_FILE_SIZE};
pub use questionnaire::{FormInput, QuestionnaireAnswers, ScreenTime, SleepHours, YesNo};
pub use render::{render, RenderedView, ScoreColor, StatusStyle};
pub use session::{next_state, Action, Effect, ErrorOrigin, Session, SessionEvent, ViewState, Visibility};
pub use submission::{assemble_submission, SubmissionPayload, PREDICT_PATH};
pub use types::{Diagnosis, DiagnosisResult, ErrorBody, ImageDataUri, Severity};
