use std::net::Ipv4Addr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO エラー: {path}\n理由: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("メンバーファイルの読み込みに失敗しました: {path}\n理由: {message}")]
    MemberFile { path: PathBuf, message: String },

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("無効なCIDR表記: {0}")]
    InvalidCidr(String),

    #[error("コントローラー数 {requested} が名前プールのサイズ {available} を超えています")]
    NamePoolExhausted { requested: usize, available: usize },

    #[error("名前プールに重複した名前があります: {0}")]
    DuplicateName(String),

    #[error("名前プールの名前 '{0}' がネットワークリソース名と衝突しています")]
    ReservedName(String),

    #[error("アドレス {address} がサブネット {subnet} のホスト範囲外です")]
    AddressOutOfRange { address: Ipv4Addr, subnet: String },

    #[error("サブスクリプションIDが設定されていません（イメージ参照の生成に必須です）")]
    MissingSubscriptionId,

    #[error("認証情報の取得に失敗しました: {0}")]
    Credential(String),

    #[error("メンバーディレクトリの取得に失敗しました: {0}")]
    Directory(String),

    #[error("リソースグラフエラー: {0}")]
    Graph(#[from] stackflow_cloud::CloudError),
}

pub type Result<T> = std::result::Result<T, StackError>;
