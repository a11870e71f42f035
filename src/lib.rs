//! mocode - code playground core
//!
//! 模块结构：
//! - kernel: 项目状态机、预览沙箱、持久化（headless）
//! - app: Session，负责把 kernel 的 effect 接到存储和预览上

pub mod app;
pub mod kernel;
