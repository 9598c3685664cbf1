//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("边不存在: {0}")]
    EdgeNotFound(String),

    #[error("顶点已存在: {0}")]
    VertexAlreadyExists(String),

    #[error("不可达: {0}")]
    Unreachable(String),

    #[error("前驱链断裂: {0}")]
    BrokenPath(String),

    #[error("解析错误 (第 {line} 行): {message}")]
    Parse { line: usize, message: String },

    #[error("命令错误: {0}")]
    Command(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
