use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色（由身份提供方签发在令牌中）
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub enum UserRole {
    #[serde(rename = "adm")]
    Admin, // 管理员：创建并管理评估
    #[serde(rename = "evaluator")]
    Evaluator, // 评估员：填写答卷
}

impl UserRole {
    pub const ADMIN: &'static str = "adm";
    pub const EVALUATOR: &'static str = "evaluator";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn evaluator_roles() -> &'static [&'static UserRole] {
        &[&Self::Evaluator]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!("无效的用户角色: '{s}'. 支持的角色: adm, evaluator"))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Evaluator => write!(f, "{}", UserRole::EVALUATOR),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::EVALUATOR => Ok(UserRole::Evaluator),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 当前请求的身份（来自已验证的令牌，本服务不存储用户）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct AuthUser {
    // 身份提供方的用户 ID
    pub id: String,
    pub email: String,
    pub role: UserRole,
}
