//! 表单领域模块：表单字段模型、文件来源打开、文件选择回显。

pub mod file_label;
pub mod form_error;
pub mod upload_form;

pub use file_label::file_label;
pub use form_error::FormError;
pub use upload_form::{
    FileField, FileSource, FormField, FormValue, OpenedContent, OpenedFile,
    OpenedForm, OpenedValue, UploadForm,
};
