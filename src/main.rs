use anyhow::{bail, Context};
use clap::Parser;
use eye_scan_common::{render, validate_file, ImageDataUri, ViewState};
use eye_scan_rust::{cli, client, config, controller, display, interactive, upload};
use cli::{Cli, Commands};
use client::AnalysisClient;
use config::Config;
use controller::Controller;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, answers, server, json, save_image } => {
            let client = AnalysisClient::from_config(&config, server.as_deref())?;
            tracing::info!(endpoint = client.endpoint(), "解析サービス");

            let mut controller = Controller::new(client).with_progress(!json);

            // 1. 画像選択
            controller.select_file(upload::load_candidate(&image)?)?;
            if let Some(err) = controller.session().error() {
                bail!("{}", err);
            }
            if !json {
                if let (Some(input), Some(preview)) = (
                    controller.session().selected_input(),
                    controller.session().preview(),
                ) {
                    let dims = upload::image_dimensions(input).ok();
                    println!("✔ {}", display::format_preview(input, preview, dims));
                }
            }

            // 2. 問診票
            for input in answers.form_inputs() {
                controller.answer(input)?;
            }

            // 3. 送信
            controller.analyze().await?;

            let session = controller.session();
            let result = match (session.state(), session.result()) {
                (ViewState::Results, Some(result)) => result,
                _ => match session.error() {
                    Some(err) => bail!("{}", err),
                    None => bail!("{}", client::SERVICE_FALLBACK_MESSAGE),
                },
            };

            if json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                println!("\n{}", display::format_view(&render(result)));
            }

            if let Some(path) = save_image {
                let decoded = ImageDataUri::parse(&result.image_data_uri)
                    .context("診断結果に画像が含まれていません")?;
                std::fs::write(&path, &decoded.bytes)
                    .with_context(|| format!("画像を保存できません: {}", path.display()))?;
                if !json {
                    println!("✔ 画像を保存: {}", path.display());
                }
            }
        }

        Commands::Interactive { server } => {
            let client = AnalysisClient::from_config(&config, server.as_deref())?;
            tracing::info!(endpoint = client.endpoint(), "解析サービス");
            interactive::run(Controller::new(client).with_progress(true)).await?;
        }

        Commands::Check { image } => {
            let candidate = upload::load_candidate(&image)?;
            let input = validate_file(candidate)?;
            match upload::image_dimensions(&input) {
                Ok((w, h)) => println!(
                    "✔ {} ({}, {} bytes, {}x{}px)",
                    input.file_name,
                    input.mime_type,
                    input.size_bytes(),
                    w,
                    h
                ),
                Err(e) => {
                    tracing::warn!(error = %e, "画像の寸法を取得できません");
                    println!("✔ {} ({}, {} bytes)", input.file_name, input.mime_type, input.size_bytes());
                }
            }
        }

        Commands::Config { set_server_url, show } => {
            let mut config = config;

            if let Some(url) = set_server_url {
                config.set_server_url(url)?;
                println!("✔ 解析サービスのURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  解析サービス: {}", config.resolve_server_url(None));
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

/// RUST_LOG があれば優先、なければ --verbose で debug
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
