//! 配置管理
//!
//! 配置来源（优先级从低到高）：内置默认值、`config.*` 文件、`COGA_` 前缀环境变量、常用环境变量。

mod r#impl;
mod structs;

pub use structs::*;
pub use r#impl::DEVELOPMENT_JWT_SECRET;
