//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod evaluations;
mod questions;
mod responses;
mod templates;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{CogaError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 按数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CogaError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CogaError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        // 内存数据库每个连接各自独立，只能使用单连接且不能被回收
        let in_memory = url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| CogaError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CogaError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CogaError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 测试用内存数据库
#[cfg(test)]
pub(crate) async fn memory_storage() -> SeaOrmStorage {
    SeaOrmStorage::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    })
    .await
    .expect("in-memory sqlite should open")
}

#[cfg(test)]
pub(crate) fn sample_evaluation(
    owner: &str,
    questions: Vec<crate::models::evaluations::entities::Question>,
) -> NewEvaluation {
    NewEvaluation {
        app_name: "Portal do Aluno".to_string(),
        description: Some("Avaliação inicial".to_string()),
        questions,
        evaluator_id: owner.to_string(),
        evaluator_email: format!("{owner}@example.com"),
        is_template: false,
        template_name: None,
        shared_with: vec![],
        is_public: false,
    }
}

// Storage trait 实现
use crate::models::{
    evaluations::{
        entities::{Evaluation, EvaluationResponse},
        requests::{NewEvaluation, ResponseUpsert, UpdateEvaluationRequest},
    },
    questions::{
        entities::UserQuestion,
        requests::{NewUserQuestion, QuestionScope},
    },
    templates::{entities::Template, requests::NewTemplate},
};
use crate::storage::{Storage, UpsertOutcome};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 评估模块
    async fn create_evaluation(&self, evaluation: NewEvaluation) -> Result<Evaluation> {
        self.create_evaluation_impl(evaluation).await
    }

    async fn get_evaluation_by_id(&self, id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(id).await
    }

    async fn list_evaluations(&self, owner_id: Option<&str>) -> Result<Vec<Evaluation>> {
        self.list_evaluations_impl(owner_id).await
    }

    async fn update_evaluation(
        &self,
        id: i64,
        update: UpdateEvaluationRequest,
    ) -> Result<Option<Evaluation>> {
        self.update_evaluation_impl(id, update).await
    }

    async fn delete_evaluation(&self, id: i64) -> Result<bool> {
        self.delete_evaluation_impl(id).await
    }

    async fn recompute_evaluation_scores(&self, id: i64) -> Result<Option<Evaluation>> {
        self.recompute_evaluation_scores_impl(id).await
    }

    // 答卷模块
    async fn upsert_response(&self, upsert: ResponseUpsert) -> Result<UpsertOutcome> {
        self.upsert_response_impl(upsert).await
    }

    async fn get_response_by_respondent(
        &self,
        evaluation_id: i64,
        respondent_id: &str,
    ) -> Result<Option<EvaluationResponse>> {
        self.get_response_by_respondent_impl(evaluation_id, respondent_id)
            .await
    }

    async fn list_responses(&self, evaluation_id: i64) -> Result<Vec<EvaluationResponse>> {
        self.list_responses_impl(evaluation_id).await
    }

    async fn list_orphaned_responses(&self) -> Result<Vec<EvaluationResponse>> {
        self.list_orphaned_responses_impl().await
    }

    // 题库模块
    async fn create_user_question(&self, question: NewUserQuestion) -> Result<UserQuestion> {
        self.create_user_question_impl(question).await
    }

    async fn get_user_question_by_id(&self, id: i64) -> Result<Option<UserQuestion>> {
        self.get_user_question_by_id_impl(id).await
    }

    async fn get_user_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<UserQuestion>> {
        self.get_user_questions_by_ids_impl(ids).await
    }

    async fn list_user_questions(
        &self,
        user_id: &str,
        scope: QuestionScope,
        category: Option<&str>,
    ) -> Result<Vec<UserQuestion>> {
        self.list_user_questions_impl(user_id, scope, category)
            .await
    }

    async fn update_user_question_visibility(
        &self,
        id: i64,
        is_public: bool,
    ) -> Result<Option<UserQuestion>> {
        self.update_user_question_visibility_impl(id, is_public)
            .await
    }

    async fn delete_user_question(&self, id: i64) -> Result<bool> {
        self.delete_user_question_impl(id).await
    }

    async fn increment_question_usage(&self, ids: &[i64]) -> Result<u64> {
        self.increment_question_usage_impl(ids).await
    }

    async fn count_user_questions(&self) -> Result<u64> {
        self.count_user_questions_impl().await
    }

    // 模板模块
    async fn create_template(&self, template: NewTemplate) -> Result<Template> {
        self.create_template_impl(template).await
    }

    async fn get_template_by_id(&self, id: i64) -> Result<Option<Template>> {
        self.get_template_by_id_impl(id).await
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        self.list_templates_impl().await
    }

    async fn delete_template(&self, id: i64) -> Result<bool> {
        self.delete_template_impl(id).await
    }

    async fn count_templates(&self) -> Result<u64> {
        self.count_templates_impl().await
    }
}
