use serde::{Deserialize, Serialize};
use trivia_core::serde::deserialize_int_or_str;
use trivia_models::{CategoryId, Question, QuestionId};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::modules::categories::model::CategoryMap;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

fn positive_category(category: &CategoryId) -> Result<(), ValidationError> {
    if category.into_inner() < 1 {
        return Err(ValidationError::new("category")
            .with_message("category must reference an existing category".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionDto {
    #[validate(custom(function = "not_blank"))]
    pub question: String,
    #[validate(custom(function = "not_blank"))]
    pub answer: String,
    /// Category id, as a number or numeric string
    #[serde(deserialize_with = "deserialize_int_or_str")]
    #[validate(custom(function = "positive_category"))]
    #[schema(value_type = i32)]
    pub category: CategoryId,
    /// Difficulty rating from 1 to 5, as a number or numeric string
    #[serde(deserialize_with = "deserialize_int_or_str")]
    #[validate(range(min = 1, max = 5))]
    pub difficulty: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchQuestionsDto {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// Body of `POST /questions`: a search when `searchTerm` is present,
/// otherwise a new question.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QuestionsRequest {
    Search(SearchQuestionsDto),
    Create(CreateQuestionDto),
}

impl Validate for QuestionsRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Search(_) => Ok(()),
            Self::Create(dto) => dto.validate(),
        }
    }
}

/// One page of questions plus the size of the whole matching set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

impl QuestionPage {
    pub fn empty(total_questions: i64) -> Self {
        Self {
            questions: Vec::new(),
            total_questions,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>, example = json!({"1": "Science"}))]
    pub categories: Option<CategoryMap>,
}

impl QuestionsResponse {
    pub fn new(page: QuestionPage, current_category: Option<String>) -> Self {
        Self {
            success: true,
            questions: page.questions,
            total_questions: page.total_questions,
            current_category,
            categories: None,
        }
    }

    pub fn with_categories(mut self, categories: CategoryMap) -> Self {
        self.categories = Some(categories);
        self
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedQuestionResponse {
    pub success: bool,
    pub created: QuestionId,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedQuestionResponse {
    pub success: bool,
    pub deleted: QuestionId,
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<QuestionsRequest, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_search_term_selects_search() {
        let request = parse(r#"{"searchTerm":"soccer"}"#).unwrap();
        assert!(matches!(request, QuestionsRequest::Search(ref s) if s.search_term == "soccer"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_search_term_wins_over_create_fields() {
        let request = parse(
            r#"{"searchTerm":"title","question":"q","answer":"a","category":1,"difficulty":1}"#,
        )
        .unwrap();
        assert!(matches!(request, QuestionsRequest::Search(_)));
    }

    #[test]
    fn test_full_create_body() {
        let request = parse(
            r#"{"question":"Who discovered penicillin?","answer":"Alexander Fleming","category":1,"difficulty":3}"#,
        )
        .unwrap();

        match request {
            QuestionsRequest::Create(ref dto) => {
                assert_eq!(dto.category, CategoryId(1));
                assert_eq!(dto.difficulty, 3);
            }
            _ => panic!("expected a create request"),
        }
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let request =
            parse(r#"{"question":"q","answer":"a","category":"5","difficulty":"2"}"#).unwrap();
        assert!(matches!(request, QuestionsRequest::Create(ref dto) if dto.category == CategoryId(5)));
    }

    #[test]
    fn test_missing_fields_do_not_parse() {
        assert!(parse(r#"{"question":"q","answer":"a","difficulty":2}"#).is_err());
        assert!(parse(r#"{"question":"q","answer":"a","category":2}"#).is_err());
        assert!(parse(r#"{}"#).is_err());
    }

    #[test]
    fn test_invalid_types_do_not_parse() {
        assert!(parse(r#"{"question":"q","answer":"a","category":"science","difficulty":2}"#).is_err());
        assert!(parse(r#"{"question":1,"answer":"a","category":1,"difficulty":2}"#).is_err());
    }

    #[test]
    fn test_blank_text_fails_validation() {
        let request = parse(r#"{"question":"   ","answer":"a","category":1,"difficulty":1}"#).unwrap();
        assert!(request.validate().is_err());

        let request = parse(r#"{"question":"q","answer":"","category":1,"difficulty":1}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_out_of_range_numbers_fail_validation() {
        let request = parse(r#"{"question":"q","answer":"a","category":0,"difficulty":1}"#).unwrap();
        assert!(request.validate().is_err());

        let request = parse(r#"{"question":"q","answer":"a","category":1,"difficulty":6}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_questions_response_omits_missing_categories() {
        let response = QuestionsResponse::new(QuestionPage::empty(0), None);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["questions"], serde_json::json!([]));
        assert_eq!(json["total_questions"], 0);
        assert!(json["current_category"].is_null());
        assert!(json.get("categories").is_none());
    }
}
