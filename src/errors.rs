//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::http::StatusCode;

use crate::models::ErrorCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_coga_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CogaError {
            $($variant(String),)*
        }

        impl CogaError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CogaError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CogaError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CogaError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CogaError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CogaError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_coga_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    Conflict("E014", "Conflict Error"),
}

impl CogaError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            CogaError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CogaError::Authorization(_) => StatusCode::FORBIDDEN,
            CogaError::NotFound(_) => StatusCode::NOT_FOUND,
            CogaError::Validation(_) => StatusCode::BAD_REQUEST,
            CogaError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            CogaError::Authentication(_) => ErrorCode::Unauthorized,
            CogaError::Authorization(_) => ErrorCode::Forbidden,
            CogaError::NotFound(_) => ErrorCode::NotFound,
            CogaError::Validation(_) => ErrorCode::BadRequest,
            CogaError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl fmt::Display for CogaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CogaError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CogaError {
    fn from(err: sea_orm::DbErr) -> Self {
        CogaError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CogaError {
    fn from(err: serde_json::Error) -> Self {
        CogaError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CogaError>;
