//! # Feedback Service ライブラリ
//!
//! Feedback Service の設定・ユースケース・ハンドラ・ルーター構築を公開する。
//! 統合テストからモックを差し込んでルーターを組み立てられるようにする。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
