use crate::bank::QuestionBank;
use delfos_model::evaluation::{AnswerEvaluation, Evaluation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluateError {
    #[error("nothing to grade")]
    Empty,

    #[error("{answers} answers submitted for {questions} question ids")]
    Misaligned { questions: usize, answers: usize },
}

/// Grades a submission against the bank's answer keys. Pure: nothing is
/// persisted here.
///
/// Unknown question ids never fail the batch; they grade as incorrect with an
/// empty correct answer, so the caller always receives one result per
/// submitted item. The user's answer is trimmed and compared
/// case-insensitively.
pub fn evaluate(
    bank: &QuestionBank,
    question_ids: &[String],
    user_answers: &[String],
) -> Result<Evaluation, EvaluateError> {
    if question_ids.is_empty() || user_answers.is_empty() {
        return Err(EvaluateError::Empty);
    }
    if question_ids.len() != user_answers.len() {
        return Err(EvaluateError::Misaligned {
            questions: question_ids.len(),
            answers: user_answers.len(),
        });
    }

    let mut results = Vec::with_capacity(question_ids.len());
    let mut correct_answers = 0usize;
    for (question_id, user_answer) in question_ids.iter().zip(user_answers) {
        let key = bank.lookup_answer(question_id);
        let correct_answer = key.map(|key| key.answer.clone()).unwrap_or_default();
        let is_correct =
            !correct_answer.is_empty() && user_answer.trim().eq_ignore_ascii_case(&correct_answer);
        if is_correct {
            correct_answers += 1;
        }
        results.push(AnswerEvaluation {
            question_id: question_id.clone(),
            user_answer: user_answer.clone(),
            correct_answer,
            is_correct,
            description: key.and_then(|key| key.description.clone()),
        });
    }

    let total_questions = results.len();
    #[allow(clippy::cast_precision_loss)]
    let score_percentage = 100.0 * correct_answers as f64 / total_questions as f64;
    Ok(Evaluation {
        total_questions,
        correct_answers,
        incorrect_answers: total_questions - correct_answers,
        score_percentage,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::tests::test_bank;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn counts_add_up_and_percentage_is_bounded() {
        let bank = test_bank(4);
        let result = evaluate(
            &bank,
            &ids(&["CRD0001", "CRD0002", "CRD0003", "CRD0004"]),
            &ids(&["a", "a", "a", "b"]),
        )
        .unwrap();
        assert_eq!(result.total_questions, 4);
        assert_eq!(result.correct_answers, 3);
        assert_eq!(result.incorrect_answers, 1);
        assert_eq!(
            result.correct_answers + result.incorrect_answers,
            result.total_questions
        );
        assert!((result.score_percentage - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn comparison_ignores_case_and_surrounding_whitespace() {
        let bank = test_bank(2);
        let relaxed = evaluate(&bank, &ids(&["CRD0002"]), &ids(&["  B "])).unwrap();
        let strict = evaluate(&bank, &ids(&["CRD0002"]), &ids(&["b"])).unwrap();
        assert!(relaxed.results[0].is_correct);
        assert!(strict.results[0].is_correct);
        assert_eq!(relaxed.correct_answers, strict.correct_answers);
    }

    #[test]
    fn unknown_question_grades_as_incorrect() {
        let bank = test_bank(1);
        let result = evaluate(&bank, &ids(&["CRD0001", "ZZZ9999"]), &ids(&["a", "a"])).unwrap();
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.incorrect_answers, 1);
        let unknown = &result.results[1];
        assert!(!unknown.is_correct);
        assert_eq!(unknown.correct_answer, "");
        assert!(unknown.description.is_none());
    }

    #[test]
    fn blank_answer_to_unknown_question_is_still_incorrect() {
        let bank = test_bank(1);
        let result = evaluate(&bank, &ids(&["ZZZ9999"]), &ids(&["   "])).unwrap();
        assert_eq!(result.correct_answers, 0);
        assert!(!result.results[0].is_correct);
    }

    #[test]
    fn results_carry_the_answer_description() {
        let bank = test_bank(1);
        let result = evaluate(&bank, &ids(&["CRD0001"]), &ids(&["b"])).unwrap();
        assert_eq!(result.results[0].description.as_deref(), Some("because of 1"));
        assert!(!result.results[0].is_correct);
    }

    #[test]
    fn empty_input_is_rejected() {
        let bank = test_bank(1);
        assert_eq!(evaluate(&bank, &[], &[]).unwrap_err(), EvaluateError::Empty);
        assert_eq!(
            evaluate(&bank, &ids(&["CRD0001"]), &[]).unwrap_err(),
            EvaluateError::Empty
        );
    }

    #[test]
    fn misaligned_input_is_rejected() {
        let bank = test_bank(2);
        assert_eq!(
            evaluate(&bank, &ids(&["CRD0001", "CRD0002"]), &ids(&["a"])).unwrap_err(),
            EvaluateError::Misaligned {
                questions: 2,
                answers: 1
            }
        );
    }
}
