use core::fmt;
use std::sync::Arc;

use base64::Engine;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("基础地址为空")]
    EmptyBaseUrl,

    #[error("基础地址格式错误: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("认证头格式错误: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("创建 HTTP 客户端失败: {0}")]
    Client(#[from] reqwest::Error),

    #[error("表单地址格式错误: {0}")]
    InvalidAction(String),

    #[error("表单地址超出站点范围: {0}")]
    ActionOutsideSite(String),
}

/// 上传站点认证结构体
///
/// 该结构体定位
/// - 保存站点根地址，表单 action 与「回到首页」都相对它解析
/// - 持有预先配置好认证头的 HTTP 客户端，供传输层复用
///
/// 默认 Eq 比较 base_url 和 token，只比较 token 用 eq_only_token
#[derive(Clone)]
pub struct UploadAuth {
    pub client: Client,     // 内部是Arc，不需要特殊处理
    pub base_url: Arc<Url>, // 传输任务跨线程共享
    pub(crate) encrypted_token: Arc<String>, // 只保留摘要，不保留明文
}

impl UploadAuth {
    /// 匿名访问站点
    pub fn anonymous(base_url: &str) -> Result<Self, AuthError> {
        let base_url = format_base_url(base_url)?;
        let client = Client::builder().http1_only().build()?;

        Ok(Self {
            client,
            base_url: Arc::new(base_url),
            encrypted_token: Arc::new(String::new()),
        })
    }

    /// 使用 HTTP Basic 认证访问站点
    pub fn basic(
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, AuthError> {
        let base_url = format_base_url(base_url)?;

        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{username}:{password}"));

        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Basic {token}"))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = Client::builder()
            .http1_only()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: Arc::new(base_url),
            encrypted_token: Arc::new(encrypt_str(&token)),
        })
    }

    /// 仅比较token是否相等
    pub fn eq_only_token(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
    }

    /// 把表单的 action 属性解析为完整地址。
    ///
    /// 空 action 指向站点根地址本身；结果必须与根地址同协议、同主机，且位于根路径之下。
    pub fn resolve(&self, action: &str) -> Result<Url, AuthError> {
        let joined = self
            .base_url
            .join(action)
            .map_err(|e| AuthError::InvalidAction(format!("{action}: {e}")))?;

        if joined.scheme() != self.base_url.scheme()
            || joined.host_str() != self.base_url.host_str()
            || joined.port_or_known_default() != self.base_url.port_or_known_default()
            || !joined.path().starts_with(self.base_url.path())
        {
            return Err(AuthError::ActionOutsideSite(joined.to_string()));
        }

        Ok(joined)
    }
}

/// 用于比较认证结构体是否相等
impl PartialEq for UploadAuth {
    fn eq(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
            && self.base_url == other.base_url
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for UploadAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadAuth")
            .field("base_url", &self.base_url.as_str())
            .field("client", &"<Client with hidden authorization>")
            .finish()
    }
}

fn format_base_url(url: &str) -> Result<Url, AuthError> {
    if url.is_empty() {
        return Err(AuthError::EmptyBaseUrl);
    }

    let mut base_url = Url::parse(url)?;

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    Ok(base_url)
}

fn encrypt_str(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}
