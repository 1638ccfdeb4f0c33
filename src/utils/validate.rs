use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::evaluations::entities::Question;
use crate::utils::scoring::is_valid_likert;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// 题目文本中的权重标记，例如 "[Peso: 3]"
static WEIGHT_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\[Peso:\s*(\d+(?:[.,]\d+)?)\]").expect("Invalid weight marker regex")
});

pub const MAX_TEXT_LENGTH: usize = 1000;
pub const MAX_NAME_LENGTH: usize = 200;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 校验名称类字段（应用名、模板名、分类）
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err("Name must be at most 200 characters");
    }
    Ok(())
}

/// 校验题目文本
pub fn validate_question_text(text: &str) -> Result<(), &'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Question text must not be empty");
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err("Question text must be at most 1000 characters");
    }
    Ok(())
}

/// 校验权重：必须为有限数（非正数在计分时按 1 处理）
pub fn validate_weight(weight: f64) -> Result<(), &'static str> {
    if !weight.is_finite() {
        return Err("Weight must be a finite number");
    }
    Ok(())
}

/// 校验题目列表中的每一项
pub fn validate_questions(questions: &[Question]) -> Result<(), String> {
    for (index, question) in questions.iter().enumerate() {
        let position = index + 1;
        validate_question_text(&question.text).map_err(|e| format!("第 {position} 题: {e}"))?;
        validate_weight(question.weight).map_err(|e| format!("第 {position} 题: {e}"))?;
        if !is_valid_likert(question.likert_score) {
            return Err(format!(
                "第 {position} 题: Likert score must be between 1 and 5"
            ));
        }
    }
    Ok(())
}

/// 解析题目文本中的权重标记，返回去除标记后的文本和权重
pub fn extract_weight_marker(text: &str) -> (String, Option<f64>) {
    match WEIGHT_MARKER_RE.captures(text) {
        Some(caps) => {
            let weight = caps
                .get(1)
                .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok());
            let cleaned = WEIGHT_MARKER_RE.replace(text, "").trim().to_string();
            (cleaned, weight)
        }
        None => (text.to_string(), None),
    }
}
