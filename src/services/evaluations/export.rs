use actix_web::{
    HttpRequest, HttpResponse, Result as ActixResult,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
};

use super::{EvaluationService, load_owned_evaluation, results::build_results};
use crate::models::{ApiResponse, evaluations::responses::EvaluationExport};
use crate::services::current_user;

/// 导出评估、全部答卷与汇总结果，作为 JSON 附件下载
pub async fn export_evaluation(
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

    let responses = match storage.list_responses(evaluation_id).await {
        Ok(responses) => responses,
        Err(e) => return Ok(ApiResponse::from_error(&e, "Failed to export evaluation")),
    };

    let results = build_results(&evaluation, &responses);
    let export = EvaluationExport {
        evaluation,
        responses,
        results,
        exported_at: chrono::Utc::now(),
    };

    let filename = format!("evaluation-{evaluation_id}.json");
    Ok(HttpResponse::Ok()
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .json(ApiResponse::success(export, "Evaluation exported successfully")))
}
