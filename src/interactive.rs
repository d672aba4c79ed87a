//! 対話モード
//!
//! 画面状態ごとにプロンプトを出し、操作をコントローラへ渡す。

use crate::controller::Controller;
use crate::display;
use crate::error::{EyeScanError, Result};
use crate::upload;
use dialoguer::{Confirm, Input, Select};
use eye_scan_common::{render, ErrorOrigin, FormInput, ScreenTime, SleepHours, ViewState, YesNo};
use std::path::Path;

const YES_NO_QUESTIONS: [(&str, fn(YesNo) -> FormInput); 6] = [
    ("Burning sensation?", FormInput::Burning),
    ("Itching?", FormInput::Itching),
    ("Watery eyes?", FormInput::WateryEyes),
    ("Sensitivity to light?", FormInput::Sensitivity),
    ("Visible redness?", FormInput::RednessVisible),
    ("Wearing contact lenses?", FormInput::ContactLens),
];

enum Step {
    Continue,
    Quit,
}

pub async fn run(mut controller: Controller) -> Result<()> {
    println!("👁  eye-scan - 対話モード（空入力で終了）\n");

    loop {
        let step = match controller.session().state() {
            ViewState::Idle | ViewState::Error(ErrorOrigin::Intake) => {
                if let Some(err) = controller.session().error() {
                    println!("⚠ {}\n", err);
                }
                choose_file(&mut controller)?
            }
            ViewState::Preview => preview_step(&mut controller).await?,
            ViewState::Results => {
                if let Some(result) = controller.session().result() {
                    println!("\n{}", display::format_view(&render(result)));
                }
                match select("次の操作", &["New Analysis", "Quit"])? {
                    0 => {
                        controller.new_analysis()?;
                        Step::Continue
                    }
                    _ => Step::Quit,
                }
            }
            ViewState::Error(ErrorOrigin::Submission) => {
                if let Some(err) = controller.session().error() {
                    println!("\n⚠ {}", err);
                }
                match select("次の操作", &["Try Again", "Quit"])? {
                    0 => {
                        controller.retry()?;
                        Step::Continue
                    }
                    _ => Step::Quit,
                }
            }
            // Analyze は完了まで待つのでここには来ない
            ViewState::Analyzing => Step::Continue,
        };

        if let Step::Quit = step {
            break;
        }
    }

    println!("\n✅ 終了");
    Ok(())
}

async fn preview_step(controller: &mut Controller) -> Result<Step> {
    if let (Some(input), Some(preview)) = (
        controller.session().selected_input(),
        controller.session().preview(),
    ) {
        let dims = upload::image_dimensions(input).ok();
        println!("✔ {}", display::format_preview(input, preview, dims));
    }

    match select("操作を選択", &["Analyze", "Choose another image", "Quit"])? {
        0 => {
            for input in ask_questionnaire()? {
                controller.answer(input)?;
            }
            controller.analyze().await?;
            Ok(Step::Continue)
        }
        1 => {
            controller.clear()?;
            Ok(Step::Continue)
        }
        _ => Ok(Step::Quit),
    }
}

fn choose_file(controller: &mut Controller) -> Result<Step> {
    let input: String = Input::new()
        .with_prompt("目の写真のパス (PNG/JPG/JPEG)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Step::Quit);
    }

    if let Some(warning) = select_path(controller, Path::new(trimmed))? {
        println!("⚠ {}", warning);
    }
    Ok(Step::Continue)
}

/// パスの画像を選択する。読めないファイルは警告文を返し、ループは続ける
fn select_path(controller: &mut Controller, path: &Path) -> Result<Option<String>> {
    match upload::load_candidate(path) {
        Ok(candidate) => {
            controller.select_file(candidate)?;
            Ok(None)
        }
        Err(e) => {
            tracing::warn!(error = %e, "画像を読み込めません");
            Ok(Some(e.to_string()))
        }
    }
}

fn ask_questionnaire() -> Result<Vec<FormInput>> {
    let mut inputs = Vec::with_capacity(8);

    for (question, to_input) in YES_NO_QUESTIONS {
        let yes = Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        inputs.push(to_input(YesNo::from(yes)));
    }

    let labels: Vec<&str> = ScreenTime::OPTIONS.iter().map(|o| o.label()).collect();
    let i = select("Daily screen time", &labels)?;
    inputs.push(FormInput::ScreenTime(ScreenTime::OPTIONS[i]));

    let labels: Vec<&str> = SleepHours::OPTIONS.iter().map(|o| o.label()).collect();
    let i = select("Hours of sleep", &labels)?;
    inputs.push(FormInput::SleepHours(SleepHours::OPTIONS[i]));

    Ok(inputs)
}

fn select(prompt: &str, items: &[&str]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(prompt_error)
}

fn prompt_error(e: dialoguer::Error) -> EyeScanError {
    EyeScanError::Prompt(e.to_string())
}
