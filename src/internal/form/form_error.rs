//! 表单准备阶段的错误类型。

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("打开文件失败 {path}: {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("读取文件信息失败 {path}: {source}")]
    FileMetadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("只能上传文件，当前为目录: {0}")]
    IsDir(PathBuf),
}
