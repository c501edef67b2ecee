//! Database models for courses, lessons, and enrollment progress.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use centsible_core::errors::Error;
use centsible_core::learning::{
    ContentType, Course, Enrollment, Lesson, LessonCompletion, NewCourse, NewLesson,
};

fn to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
}

/// Database model for courses
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::courses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CourseDB {
    pub id: String,
    pub instructor_id: String,
    pub title: String,
    pub description: String,
    pub price: Option<i64>,
    pub published: bool,
    pub thumbnail: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CourseDB {
    /// Builds an insertable row from the domain input model. New courses
    /// start unpublished.
    pub fn from_new(new: NewCourse, id: String, now: NaiveDateTime) -> Self {
        CourseDB {
            id,
            instructor_id: new.instructor_id,
            title: new.title,
            description: new.description,
            price: new.price,
            published: false,
            thumbnail: new.thumbnail,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<CourseDB> for Course {
    fn from(db: CourseDB) -> Self {
        Course {
            id: db.id,
            instructor_id: db.instructor_id,
            title: db.title,
            description: db.description,
            price: db.price,
            published: db.published,
            thumbnail: db.thumbnail,
            created_at: to_utc(db.created_at),
            updated_at: to_utc(db.updated_at),
        }
    }
}

/// Database model for lessons
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::lessons)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct LessonDB {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub content_type: String,
    pub content_ref: String,
    pub order_index: i32,
    pub duration_minutes: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl LessonDB {
    /// Builds an insertable row from the domain input model.
    pub fn from_new(new: NewLesson, id: String, now: NaiveDateTime) -> Self {
        LessonDB {
            id,
            course_id: new.course_id,
            title: new.title,
            content_type: new.content_type.as_str().to_string(),
            content_ref: new.content_ref,
            order_index: new.order_index,
            duration_minutes: new.duration_minutes,
            created_at: now,
            updated_at: now,
        }
    }
}

// Unknown content-type strings are rejected at this boundary.
impl TryFrom<LessonDB> for Lesson {
    type Error = Error;

    fn try_from(db: LessonDB) -> Result<Self, Self::Error> {
        let content_type = ContentType::from_str(&db.content_type)?;
        Ok(Lesson {
            id: db.id,
            course_id: db.course_id,
            title: db.title,
            content_type,
            content_ref: db.content_ref,
            order_index: db.order_index,
            duration_minutes: db.duration_minutes,
            created_at: to_utc(db.created_at),
            updated_at: to_utc(db.updated_at),
        })
    }
}

/// Database model for course-level enrollment progress
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::enrollments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDB {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub percent_complete: i32,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<EnrollmentDB> for Enrollment {
    fn from(db: EnrollmentDB) -> Self {
        Enrollment {
            id: db.id,
            user_id: db.user_id,
            course_id: db.course_id,
            percent_complete: db.percent_complete,
            completed_at: db.completed_at.map(to_utc),
            created_at: to_utc(db.created_at),
            updated_at: to_utc(db.updated_at),
        }
    }
}

/// Database model for lesson completion records
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::lesson_completions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct LessonCompletionDB {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub lesson_id: String,
    pub completed_at: NaiveDateTime,
}

impl From<LessonCompletionDB> for LessonCompletion {
    fn from(db: LessonCompletionDB) -> Self {
        LessonCompletion {
            id: db.id,
            user_id: db.user_id,
            course_id: db.course_id,
            lesson_id: db.lesson_id,
            completed_at: to_utc(db.completed_at),
        }
    }
}
