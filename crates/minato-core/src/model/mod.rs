//! モデル定義
//!
//! Minatoで使用されるデータモデルを定義します。
//! 各モデルは機能ごとにモジュールに分離されています。

mod port;
mod service;
mod stack;
mod volume;

// Re-exports
pub use port::*;
pub use service::*;
pub use stack::*;
pub use volume::*;
