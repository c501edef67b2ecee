use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::MINOR_UNIT_SCALE;
use crate::learning::learning_errors::LearningError;

/// Content payload type of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Video,
    Text,
    Quiz,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "VIDEO",
            ContentType::Text => "TEXT",
            ContentType::Quiz => "QUIZ",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = LearningError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "VIDEO" => Ok(ContentType::Video),
            "TEXT" => Ok(ContentType::Text),
            "QUIZ" => Ok(ContentType::Quiz),
            other => Err(LearningError::UnknownContentType(other.to_string())),
        }
    }
}

/// Domain model representing a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub instructor_id: String,
    pub title: String,
    pub description: String,
    pub price: Option<i64>,
    pub published: bool,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Price in major units, if the course is not free.
    pub fn price_major(&self) -> Option<Decimal> {
        self.price.map(|p| Decimal::new(p, MINOR_UNIT_SCALE))
    }
}

/// Input model for creating a new course
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub id: Option<String>,
    pub instructor_id: String,
    pub title: String,
    pub description: String,
    pub price: Option<i64>,
    pub thumbnail: Option<String>,
}

impl NewCourse {
    /// Validates the new course data
    pub fn validate(&self) -> std::result::Result<(), LearningError> {
        if self.instructor_id.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Instructor ID cannot be empty".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Title cannot be empty".to_string(),
            ));
        }
        if let Some(price) = self.price {
            if price <= 0 {
                return Err(LearningError::InvalidData(
                    "Price must be positive when set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Input model for updating an existing course
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: Option<i64>,
    pub published: bool,
    pub thumbnail: Option<String>,
}

impl CourseUpdate {
    /// Validates the course update data
    pub fn validate(&self) -> std::result::Result<(), LearningError> {
        if self.id.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Course ID is required for updates".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Title cannot be empty".to_string(),
            ));
        }
        if let Some(price) = self.price {
            if price <= 0 {
                return Err(LearningError::InvalidData(
                    "Price must be positive when set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Domain model representing a lesson within a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub content_type: ContentType,
    pub content_ref: String,
    pub order_index: i32,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new lesson
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    pub id: Option<String>,
    pub course_id: String,
    pub title: String,
    pub content_type: ContentType,
    pub content_ref: String,
    pub order_index: i32,
    pub duration_minutes: Option<i32>,
}

impl NewLesson {
    /// Validates the new lesson data
    pub fn validate(&self) -> std::result::Result<(), LearningError> {
        if self.course_id.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Course ID cannot be empty".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Title cannot be empty".to_string(),
            ));
        }
        if self.content_ref.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Content reference cannot be empty".to_string(),
            ));
        }
        if self.order_index < 0 {
            return Err(LearningError::InvalidData(
                "Order index cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing lesson
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonUpdate {
    pub id: String,
    pub title: String,
    pub content_type: ContentType,
    pub content_ref: String,
    pub order_index: i32,
    pub duration_minutes: Option<i32>,
}

impl LessonUpdate {
    /// Validates the lesson update data
    pub fn validate(&self) -> std::result::Result<(), LearningError> {
        if self.id.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Lesson ID is required for updates".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Title cannot be empty".to_string(),
            ));
        }
        if self.content_ref.trim().is_empty() {
            return Err(LearningError::InvalidData(
                "Content reference cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Course-level progress record for an enrolled user.
///
/// `percent_complete` is recomputed from lesson completions, never edited
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub percent_complete: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Record of a user having finished a single lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCompletion {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub lesson_id: String,
    pub completed_at: DateTime<Utc>,
}

/// Dashboard view of an enrollment, joined with course display fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgressSummary {
    pub course_id: String,
    pub course_title: String,
    pub course_thumbnail: Option<String>,
    pub progress: i32,
    pub last_accessed: DateTime<Utc>,
}
