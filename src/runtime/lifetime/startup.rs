use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{CogaError, Result};
use crate::models::questions::{entities::UserQuestion, requests::NewUserQuestion};
use crate::models::templates::{entities::TemplateQuestion, requests::NewTemplate};
use crate::services::catalog::find_category;
use crate::storage::Storage;
use crate::utils::scoring::effective_weight;
use crate::utils::validate::extract_weight_marker;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_QUESTIONS: &str = include_str!("seed/questions.json");
const PREDEFINED_TEMPLATES: &str = include_str!("seed/templates.json");

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

#[derive(Debug, Deserialize)]
struct SeedQuestion {
    text: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct SeedTemplate {
    name: String,
    category: String,
    description: Option<String>,
    questions: Vec<SeedQuestion>,
}

impl SeedQuestion {
    /// 去除文本中的权重标记，分类键替换为展示名称
    fn normalize(self) -> (String, String, f64) {
        let (text, weight) = extract_weight_marker(&self.text);
        let category = find_category(&self.category)
            .map(|c| c.label.to_string())
            .unwrap_or(self.category);
        (text, category, weight.map_or(1.0, effective_weight))
    }
}

/// 创建缓存实例
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let config = AppConfig::get();
    let cache_type = &config.cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    if let Some(constructor) = get_object_cache_plugin(cache_type) {
        match constructor().await {
            Ok(cache) => {
                warn!("Successfully created {} cache backend", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("Failed to create {} cache: {}", cache_type, e),
        }
    } else {
        warn!("Cache backend '{}' not found in registry", cache_type);
    }

    // 回退到默认的内存缓存
    if cache_type != "moka" {
        warn!("Falling back to default memory cache");
        if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
            match fallback_constructor().await {
                Ok(cache) => {
                    warn!("Successfully created fallback Moka (in-memory) cache backend");
                    return Ok(Arc::from(cache));
                }
                Err(fallback_e) => {
                    warn!("Failed to create fallback Moka cache: {}", fallback_e);
                }
            }
        }
    }

    Err(CogaError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// 题库为空时写入默认题目
pub async fn seed_default_questions(storage: &Arc<dyn Storage>) -> Result<usize> {
    let count = storage.count_user_questions().await?;
    if count > 0 {
        debug!(
            "Question bank already has {} question(s), skipping seed",
            count
        );
        return Ok(0);
    }

    let questions: Vec<SeedQuestion> = serde_json::from_str(DEFAULT_QUESTIONS)
        .map_err(|e| CogaError::serialization(format!("解析默认题目失败: {e}")))?;

    let mut created = 0;
    for question in questions {
        let (text, category, weight) = question.normalize();
        storage
            .create_user_question(NewUserQuestion {
                text,
                category,
                weight,
                created_by: UserQuestion::SYSTEM_OWNER.to_string(),
                is_public: true,
            })
            .await?;
        created += 1;
    }

    info!("Seeded {} default question(s)", created);
    Ok(created)
}

/// 模板表为空时写入预置模板
pub async fn seed_predefined_templates(storage: &Arc<dyn Storage>) -> Result<usize> {
    let count = storage.count_templates().await?;
    if count > 0 {
        debug!("Database already has {} template(s), skipping seed", count);
        return Ok(0);
    }

    let templates: Vec<SeedTemplate> = serde_json::from_str(PREDEFINED_TEMPLATES)
        .map_err(|e| CogaError::serialization(format!("解析预置模板失败: {e}")))?;

    let mut created = 0;
    for template in templates {
        let questions = template
            .questions
            .into_iter()
            .map(|q| {
                let (text, category, weight) = q.normalize();
                TemplateQuestion {
                    text,
                    category,
                    weight,
                }
            })
            .collect();

        storage
            .create_template(NewTemplate {
                name: template.name,
                category: template.category,
                description: template.description,
                questions,
                // 预置模板没有创建者
                created_by: None,
            })
            .await?;
        created += 1;
    }

    info!("Seeded {} predefined template(s)", created);
    Ok(created)
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和默认数据
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 重复安装时返回 Err，忽略即可
    let _ = rustls::crypto::ring::default_provider().install_default();

    crate::cache::register_builtin_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if AppConfig::get().app.seed_defaults {
        // 种子数据写入失败不影响启动
        if let Err(e) = seed_default_questions(&storage).await {
            warn!("Failed to seed default questions: {}", e);
        }
        if let Err(e) = seed_predefined_templates(&storage).await {
            warn!("Failed to seed predefined templates: {}", e);
        }
    }

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
