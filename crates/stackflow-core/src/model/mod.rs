//! モデル定義
//!
//! スタック設定と、そこから導出されるトポロジーのデータモデル。

mod cidr;
mod member;
mod stack;
mod topology;

// Re-exports
pub use cidr::*;
pub use member::*;
pub use stack::*;
pub use topology::*;
