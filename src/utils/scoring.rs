//! 评分聚合
//!
//! 纯函数：给定评估的题目模板与若干答卷，计算单题平均分与整体加权平均分。
//! 题目按位置对齐；未作答的题目平均分为 0，且不参与加权平均。

use crate::models::evaluations::entities::Question;

/// 最低与最高 Likert 评分
pub const LIKERT_MIN: i32 = 1;
pub const LIKERT_MAX: i32 = 5;

/// 单题统计结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionAverage {
    pub weight: f64,
    pub answers: usize,
    pub average: f64,
}

/// 单份答卷的得分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseScores {
    pub total_score: f64,
    pub average_score: f64,
}

/// 有效权重：非正数或 NaN 视为 1
pub fn effective_weight(weight: f64) -> f64 {
    if weight.is_nan() || weight <= 0.0 {
        1.0
    } else {
        weight
    }
}

/// 计算每道题在所有答卷中的平均分
///
/// `responses` 中每个元素是一份答卷的题目列表，与 `template` 按位置对齐；
/// 长度不足的答卷视为对缺失题目未作答。
pub fn question_averages(
    template: &[Question],
    responses: &[&[Question]],
) -> Vec<QuestionAverage> {
    template
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let scores: Vec<i32> = responses
                .iter()
                .filter_map(|answers| answers.get(index).and_then(|q| q.likert_score))
                .collect();

            let average = if scores.is_empty() {
                0.0
            } else {
                scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
            };

            QuestionAverage {
                weight: effective_weight(question.weight),
                answers: scores.len(),
                average,
            }
        })
        .collect()
}

/// 整体加权平均分，只计入至少有一份作答的题目
pub fn overall_weighted_average(averages: &[QuestionAverage]) -> f64 {
    let (weighted_sum, weight_sum) = averages
        .iter()
        .filter(|a| a.answers > 0)
        .fold((0.0, 0.0), |(sum, weights), a| {
            (sum + a.average * a.weight, weights + a.weight)
        });

    if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        0.0
    }
}

/// 将 0-5 的平均分换算为 0-10 分制
pub fn scale_to_ten(average: f64) -> f64 {
    (average * 2.0).clamp(0.0, 10.0)
}

/// 评估的汇总分：总分为已作答题目平均分之和，平均分为加权平均
pub fn aggregate_scores(averages: &[QuestionAverage]) -> ResponseScores {
    ResponseScores {
        total_score: averages
            .iter()
            .filter(|a| a.answers > 0)
            .map(|a| a.average)
            .sum(),
        average_score: overall_weighted_average(averages),
    }
}

/// 单份答卷的得分
pub fn response_scores(questions: &[Question]) -> ResponseScores {
    let averages = question_averages(questions, &[questions]);
    ResponseScores {
        total_score: questions
            .iter()
            .filter_map(|q| q.likert_score)
            .map(f64::from)
            .sum(),
        average_score: overall_weighted_average(&averages),
    }
}

/// 作答进度百分比
pub fn progress_percent(questions: &[Question]) -> u32 {
    if questions.is_empty() {
        return 0;
    }
    let answered = questions.iter().filter(|q| q.likert_score.is_some()).count();
    (answered as f64 / questions.len() as f64 * 100.0).round() as u32
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 校验评分是否在 Likert 范围内
pub fn is_valid_likert(score: Option<i32>) -> bool {
    score.is_none_or(|s| (LIKERT_MIN..=LIKERT_MAX).contains(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(weight: f64, score: Option<i32>) -> Question {
        Question {
            likert_score: score,
            ..Question::blank("q", "c", weight)
        }
    }

    #[test]
    fn test_effective_weight() {
        assert_eq!(effective_weight(2.0), 2.0);
        assert_eq!(effective_weight(0.0), 1.0);
        assert_eq!(effective_weight(-3.0), 1.0);
        assert_eq!(effective_weight(f64::NAN), 1.0);
    }

    #[test]
    fn test_weighted_average_example() {
        let template = vec![question(2.0, None), question(1.0, None)];
        let first = vec![question(2.0, Some(3)), question(1.0, Some(4))];
        let second = vec![question(2.0, Some(5)), question(1.0, None)];

        let averages = question_averages(&template, &[first.as_slice(), second.as_slice()]);
        assert_eq!(averages[0].average, 4.0);
        assert_eq!(averages[0].answers, 2);
        assert_eq!(averages[1].average, 4.0);
        assert_eq!(averages[1].answers, 1);

        let overall = overall_weighted_average(&averages);
        assert!((overall - 4.0).abs() < 1e-9);
        assert!((scale_to_ten(overall) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_order_invariance() {
        let template = vec![question(3.0, None), question(1.0, None), question(2.0, None)];
        let a = vec![question(3.0, Some(1)), question(1.0, Some(5)), question(2.0, None)];
        let b = vec![question(3.0, Some(4)), question(1.0, Some(2)), question(2.0, Some(3))];
        let c = vec![question(3.0, Some(2)), question(1.0, None), question(2.0, Some(5))];

        let forward = overall_weighted_average(&question_averages(
            &template,
            &[a.as_slice(), b.as_slice(), c.as_slice()],
        ));
        let backward = overall_weighted_average(&question_averages(
            &template,
            &[c.as_slice(), b.as_slice(), a.as_slice()],
        ));
        let shuffled = overall_weighted_average(&question_averages(
            &template,
            &[b.as_slice(), c.as_slice(), a.as_slice()],
        ));

        assert!((forward - backward).abs() < 1e-9);
        assert!((forward - shuffled).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_weight_counts_as_one() {
        let template = vec![question(0.0, None), question(-1.0, None)];
        let answers = vec![question(0.0, Some(2)), question(-1.0, Some(4))];

        let averages = question_averages(&template, &[answers.as_slice()]);
        assert!(averages.iter().all(|a| a.weight == 1.0));
        assert_eq!(overall_weighted_average(&averages), 3.0);
    }

    #[test]
    fn test_unanswered_question_is_zero_and_excluded() {
        let template = vec![question(1.0, None), question(5.0, None)];
        let answers = vec![question(1.0, Some(2)), question(5.0, None)];

        let averages = question_averages(&template, &[answers.as_slice()]);
        assert_eq!(averages[1].average, 0.0);
        assert_eq!(averages[1].answers, 0);
        assert_eq!(overall_weighted_average(&averages), 2.0);
    }

    #[test]
    fn test_no_responses() {
        let template = vec![question(1.0, None)];
        let averages = question_averages(&template, &[]);
        assert_eq!(overall_weighted_average(&averages), 0.0);
        assert_eq!(scale_to_ten(0.0), 0.0);
    }

    #[test]
    fn test_short_response_is_unanswered_for_missing_positions() {
        let template = vec![question(1.0, None), question(1.0, None)];
        let short = vec![question(1.0, Some(5))];
        let averages = question_averages(&template, &[short.as_slice()]);
        assert_eq!(averages[1].answers, 0);
    }

    #[test]
    fn test_scale_to_ten_clamps() {
        assert_eq!(scale_to_ten(6.0), 10.0);
        assert_eq!(scale_to_ten(-1.0), 0.0);
        assert_eq!(scale_to_ten(2.5), 5.0);
    }

    #[test]
    fn test_response_scores() {
        let answers = vec![
            question(2.0, Some(5)),
            question(1.0, Some(2)),
            question(1.0, None),
        ];
        let scores = response_scores(&answers);
        assert_eq!(scores.total_score, 7.0);
        assert!((scores.average_score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_scores() {
        let averages = vec![
            QuestionAverage {
                weight: 1.0,
                answers: 2,
                average: 3.5,
            },
            QuestionAverage {
                weight: 1.0,
                answers: 0,
                average: 0.0,
            },
        ];
        let scores = aggregate_scores(&averages);
        assert_eq!(scores.total_score, 3.5);
        assert_eq!(scores.average_score, 3.5);
    }

    #[test]
    fn test_progress_and_rounding() {
        let answers = vec![
            question(1.0, Some(5)),
            question(1.0, None),
            question(1.0, Some(1)),
        ];
        assert_eq!(progress_percent(&answers), 67);
        assert_eq!(progress_percent(&[]), 0);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.675_1), 2.68);
    }

    #[test]
    fn test_likert_range() {
        assert!(is_valid_likert(None));
        assert!(is_valid_likert(Some(1)));
        assert!(is_valid_likert(Some(5)));
        assert!(!is_valid_likert(Some(0)));
        assert!(!is_valid_likert(Some(6)));
    }
}
