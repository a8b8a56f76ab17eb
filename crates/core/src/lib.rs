//! # `tickerlens-core` - 领域核心
//!
//! 定义行情对比与组合曲线计算所需的实体、错误枚举与端口 (Port) 接口。
//! 本 crate 不包含任何具体实现，所有适配器 (Yahoo、文件目录、内存持仓) 均位于下游 crate。

pub mod common;
pub mod config;

pub mod market {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod chart {
    pub mod entity;
    pub mod error;
}

pub mod portfolio {
    pub mod entity;
}

pub mod store {
    pub mod error;
    pub mod port;
}

#[cfg(feature = "test-utils")]
pub mod test_utils;
