use serde::Deserialize;

/// 上传失败提示的默认前缀
pub const DEFAULT_ALERT_PREFIX: &str = "An error occurred during the upload. Please try again.";

/// 删除确认框的默认文字
pub const DEFAULT_DELETE_PROMPT: &str = "Are you sure you wish to delete this file?";

/// 成功后跳转的默认地址（站点根）
pub const DEFAULT_HOME_LOCATION: &str = "/";

/// 页面文案配置。缺省字段使用上面的默认值，可直接从嵌入方的配置文件反序列化。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub alert_prefix: String,
    pub delete_prompt: String,
    /// 相对站点基础地址解析
    pub home_location: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            alert_prefix: DEFAULT_ALERT_PREFIX.to_string(),
            delete_prompt: DEFAULT_DELETE_PROMPT.to_string(),
            home_location: DEFAULT_HOME_LOCATION.to_string(),
        }
    }
}
