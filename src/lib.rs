//! eye-scan CLI
//!
//! 目の写真と問診票を解析サービスへ送信するフロントエンド。
//! セッション制御は eye-scan-common、ここは端末表示・設定・通信を持つ。

pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod interactive;
pub mod upload;
