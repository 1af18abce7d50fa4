//! 上传表单模型：字段按原顺序保存，文本字段与文件字段混排。
//!
//! 表单只描述「要提交什么」；真正的 multipart 编码和字节计数由传输层完成。

use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncRead;

use super::form_error::FormError;

/// 一个待提交的表单。
///
/// `action` 对应表单的 action 属性，可以是相对地址。
#[derive(Debug, Default)]
pub struct UploadForm {
    pub action: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

#[derive(Debug)]
pub enum FormValue {
    Text(String),
    File(FileField),
}

/// 文件字段：文件名、可选 MIME 与数据来源
#[derive(Debug)]
pub struct FileField {
    pub file_name: String,
    pub mime: Option<String>,
    pub source: FileSource,
}

/// 文件数据来源
pub enum FileSource {
    /// 内存中的完整内容，长度已知
    Bytes(Bytes),
    /// 本地文件，提交时打开并读取元数据获得长度
    Path(PathBuf),
    /// 任意异步读取流，长度未知（进度不可计算）
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            FileSource::Path(p) => f.debug_tuple("Path").field(p).finish(),
            FileSource::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl UploadForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
        }
    }

    /// 追加文本字段
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: FormValue::Text(value.into()),
        });
        self
    }

    /// 追加文件字段
    pub fn file(mut self, name: impl Into<String>, file: FileField) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: FormValue::File(file),
        });
        self
    }

    /// 是否包含至少一个文件字段
    pub fn has_file(&self) -> bool {
        self.fields
            .iter()
            .any(|f| matches!(f.value, FormValue::File(_)))
    }

    /// 打开所有文件来源，得到可直接编码的表单。
    ///
    /// 所有文件长度都已知时 `total` 为文件字节总和，否则为 `None`。
    pub async fn open(self) -> Result<OpenedForm, FormError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut total: Option<u64> = Some(0);

        for field in self.fields {
            let value = match field.value {
                FormValue::Text(text) => OpenedValue::Text(text),
                FormValue::File(file) => {
                    let opened = file.open().await?;
                    total = match (total, opened.len) {
                        (Some(sum), Some(len)) => Some(sum + len),
                        _ => None,
                    };
                    OpenedValue::File(opened)
                }
            };
            fields.push((field.name, value));
        }

        Ok(OpenedForm {
            fields,
            total,
        })
    }
}

impl FileField {
    pub fn from_bytes(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            source: FileSource::Bytes(content.into()),
        }
    }

    /// 文件名取路径最后一段
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_name,
            mime: None,
            source: FileSource::Path(path.to_path_buf()),
        }
    }

    pub fn from_reader(
        file_name: impl Into<String>,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            source: FileSource::Reader(Box::new(reader)),
        }
    }

    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    async fn open(self) -> Result<OpenedFile, FormError> {
        let (len, content) = match self.source {
            FileSource::Bytes(bytes) => (Some(bytes.len() as u64), OpenedContent::Bytes(bytes)),
            FileSource::Path(path) => {
                let file = File::open(&path)
                    .await
                    .map_err(|source| FormError::OpenFile { path: path.clone(), source })?;
                let metadata = file
                    .metadata()
                    .await
                    .map_err(|source| FormError::FileMetadata { path: path.clone(), source })?;
                if metadata.is_dir() {
                    return Err(FormError::IsDir(path));
                }
                (Some(metadata.len()), OpenedContent::Reader(Box::new(file)))
            }
            FileSource::Reader(reader) => (None, OpenedContent::Reader(reader)),
        };

        Ok(OpenedFile {
            file_name: self.file_name,
            mime: self.mime,
            len,
            content,
        })
    }
}

/// 已打开的表单
#[derive(Debug)]
pub struct OpenedForm {
    pub fields: Vec<(String, OpenedValue)>,
    /// 文件字节总数，任一文件长度未知时为 `None`
    pub total: Option<u64>,
}

#[derive(Debug)]
pub enum OpenedValue {
    Text(String),
    File(OpenedFile),
}

#[derive(Debug)]
pub struct OpenedFile {
    pub file_name: String,
    pub mime: Option<String>,
    pub len: Option<u64>,
    pub content: OpenedContent,
}

pub enum OpenedContent {
    Bytes(Bytes),
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl fmt::Debug for OpenedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenedContent::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            OpenedContent::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}
