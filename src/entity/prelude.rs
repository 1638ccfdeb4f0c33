//! 预导入模块，方便使用

pub use super::evaluation_responses::{
    ActiveModel as EvaluationResponseActiveModel, Entity as EvaluationResponses,
    Model as EvaluationResponseModel,
};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::question_templates::{
    ActiveModel as QuestionTemplateActiveModel, Entity as QuestionTemplates,
    Model as QuestionTemplateModel,
};
pub use super::user_questions::{
    ActiveModel as UserQuestionActiveModel, Entity as UserQuestions, Model as UserQuestionModel,
};
