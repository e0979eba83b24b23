//! StackFlow Core
//!
//! リーダークラスタのトポロジーコンパイラ。
//!
//! 環境名・スタック名・コントローラー台数・SSH鍵ソース・ベースイメージ参照から、
//! 名前とアドレスが一意で、ネットワーク参照が正しく配線された
//! リソースグラフを生成します。
//!
//! ```text
//! CredentialProvider ─┐
//! IdentityDirectory ──┤
//! build_network ──────┼──▶ compile ──▶ ResourceGraph ──▶ ProvisioningBackend
//! allocate ───────────┘
//! ```

pub mod allocator;
pub mod compiler;
pub mod error;
pub mod graph;
pub mod loader;
pub mod model;
pub mod network;
pub mod parser;
pub mod source;

pub use allocator::allocate;
pub use compiler::{aggregate_ssh_keys, compile, render_image_reference};
pub use error::{Result, StackError};
pub use graph::{StackBuild, build_graph, build_stack};
pub use loader::{load_stack, member_directory};
pub use model::*;
pub use network::{build_network, build_network_with};
pub use parser::{parse_kdl_file, parse_kdl_string};
pub use source::{
    CredentialProvider, EnvCredentialProvider, IdentityDirectory, JsonMemberDirectory,
    StaticCredentials, StaticDirectory,
};
pub use stackflow_cloud::CredentialBundle;
