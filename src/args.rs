// src/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::config::{
    DEFAULT_DIRECTORY, DEFAULT_EXTENSION, DEFAULT_RECORD_COMMAND, DEFAULT_SYNTH_COMMAND,
};
use crate::parsers;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "integ-assert",
    version = crate::VERSION,
    about = "統合テストの合成結果を記録済みテンプレートと比較して検証するツール"
)]
pub struct Args {
    /// テスト名（受け付けるが無視され、常に全テストを検証します）
    #[arg(value_name = "TESTS")]
    pub tests: Vec<String>,

    /// 統合テストのディレクトリ
    #[arg(
        short = 'd',
        long,
        default_value = DEFAULT_DIRECTORY,
        value_hint = ValueHint::DirPath,
        help_heading = "入力"
    )]
    pub directory: PathBuf,

    /// テストアプリの拡張子（integ.*.<EXT> を検出）
    #[arg(
        long,
        default_value = DEFAULT_EXTENSION,
        value_parser = parsers::parse_extension,
        help_heading = "入力"
    )]
    pub extension: String,

    /// テストアプリを合成するコマンド（末尾にアプリのファイル名が付加されます）
    #[arg(
        long,
        default_value = DEFAULT_SYNTH_COMMAND,
        value_parser = parsers::parse_command,
        help_heading = "合成"
    )]
    pub synth_command: String,

    /// 合成オプション（context/env）を記述した YAML または JSON ファイル
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "合成")]
    pub synth_options: Option<PathBuf>,

    /// 期待値を再記録するコマンド（エラーメッセージに表示）
    #[arg(
        long,
        default_value = DEFAULT_RECORD_COMMAND,
        value_parser = parsers::parse_command,
        help_heading = "出力"
    )]
    pub record_command: String,

    /// ログを詳細化（-v: info, -vv: debug, -vvv: trace）
    #[arg(short, long, action = ArgAction::Count, help_heading = "出力")]
    pub verbose: u8,
}
