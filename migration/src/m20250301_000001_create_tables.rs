use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建评估表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Evaluations::AppName).string().not_null())
                    .col(ColumnDef::new(Evaluations::Description).text().null())
                    .col(ColumnDef::new(Evaluations::Questions).text().not_null())
                    .col(ColumnDef::new(Evaluations::EvaluatorId).string().not_null())
                    .col(
                        ColumnDef::new(Evaluations::EvaluatorEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::TotalScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Evaluations::AverageScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Evaluations::IsTemplate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Evaluations::TemplateName).string().null())
                    .col(ColumnDef::new(Evaluations::SharedWith).text().null())
                    .col(
                        ColumnDef::new(Evaluations::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ResponsesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评估答卷表（删除评估时置空外键，保留答卷）
        manager
            .create_table(
                Table::create()
                    .table(EvaluationResponses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationResponses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::EvaluationId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::OriginalEvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::RespondentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::RespondentEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::Questions)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::TotalScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::AverageScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationResponses::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                EvaluationResponses::Table,
                                EvaluationResponses::EvaluationId,
                            )
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建用户题目表
        manager
            .create_table(
                Table::create()
                    .table(UserQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserQuestions::Text).text().not_null())
                    .col(ColumnDef::new(UserQuestions::Category).string().not_null())
                    .col(
                        ColumnDef::new(UserQuestions::Weight)
                            .double()
                            .not_null()
                            .default(1.0),
                    )
                    .col(ColumnDef::new(UserQuestions::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(UserQuestions::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserQuestions::UsedCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserQuestions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目模板表
        manager
            .create_table(
                Table::create()
                    .table(QuestionTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionTemplates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuestionTemplates::Name).string().not_null())
                    .col(
                        ColumnDef::new(QuestionTemplates::Category)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuestionTemplates::Description).text().null())
                    .col(
                        ColumnDef::new(QuestionTemplates::Questions)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuestionTemplates::CreatedBy).string().null())
                    .col(
                        ColumnDef::new(QuestionTemplates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 评估表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_evaluator_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::EvaluatorId)
                    .to_owned(),
            )
            .await?;

        // 答卷表索引：每个评估每位答题人至多一份答卷
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_responses_respondent")
                    .table(EvaluationResponses::Table)
                    .col(EvaluationResponses::OriginalEvaluationId)
                    .col(EvaluationResponses::RespondentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_responses_evaluation_id")
                    .table(EvaluationResponses::Table)
                    .col(EvaluationResponses::EvaluationId)
                    .to_owned(),
            )
            .await?;

        // 用户题目表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_questions_created_by")
                    .table(UserQuestions::Table)
                    .col(UserQuestions::CreatedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_questions_is_public")
                    .table(UserQuestions::Table)
                    .col(UserQuestions::IsPublic)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(QuestionTemplates::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UserQuestions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EvaluationResponses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Evaluations {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    AppName,
    Description,
    Questions,
    EvaluatorId,
    EvaluatorEmail,
    TotalScore,
    AverageScore,
    IsTemplate,
    TemplateName,
    SharedWith,
    IsPublic,
    ResponsesCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationResponses {
    #[sea_orm(iden = "evaluation_responses")]
    Table,
    Id,
    EvaluationId,
    OriginalEvaluationId,
    RespondentId,
    RespondentEmail,
    Questions,
    TotalScore,
    AverageScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserQuestions {
    #[sea_orm(iden = "user_questions")]
    Table,
    Id,
    Text,
    Category,
    Weight,
    CreatedBy,
    IsPublic,
    UsedCount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QuestionTemplates {
    #[sea_orm(iden = "question_templates")]
    Table,
    Id,
    Name,
    Category,
    Description,
    Questions,
    CreatedBy,
    CreatedAt,
}
