use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, load_owned_evaluation};
use crate::models::{
    ApiResponse,
    evaluations::{
        entities::{Evaluation, EvaluationResponse, Question},
        responses::{EvaluationResults, QuestionResult},
    },
};
use crate::services::current_user;
use crate::utils::scoring::{overall_weighted_average, question_averages, round2, scale_to_ten};

/// 汇总评估的全部答卷
pub fn build_results(evaluation: &Evaluation, responses: &[EvaluationResponse]) -> EvaluationResults {
    let answers: Vec<&[Question]> = responses.iter().map(|r| r.questions.as_slice()).collect();
    let averages = question_averages(&evaluation.questions, &answers);
    let overall = overall_weighted_average(&averages);

    let questions = evaluation
        .questions
        .iter()
        .zip(&averages)
        .enumerate()
        .map(|(index, (question, average))| QuestionResult {
            index,
            text: question.text.clone(),
            category: question.category.clone(),
            weight: average.weight,
            answers: average.answers,
            average: round2(average.average),
        })
        .collect();

    EvaluationResults {
        evaluation_id: evaluation.id,
        app_name: evaluation.app_name.clone(),
        respondents: responses.len(),
        questions,
        weighted_average: round2(overall),
        scaled_score: round2(scale_to_ten(overall)),
    }
}

pub async fn get_results(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let evaluation = match load_owned_evaluation(&storage, evaluation_id, &user).await {
        Ok(evaluation) => evaluation,
        Err(resp) => return Ok(resp),
    };

    match storage.list_responses(evaluation_id).await {
        Ok(responses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            build_results(&evaluation, &responses),
            "Evaluation results retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            &e,
            "Failed to retrieve evaluation results",
        )),
    }
}
