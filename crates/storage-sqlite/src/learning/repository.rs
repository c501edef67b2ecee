use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use centsible_core::constants::FULL_PROGRESS;
use centsible_core::errors::{DatabaseError, Error, Result};
use centsible_core::learning::{
    Course, CourseProgressSummary, CourseUpdate, Enrollment, LearningRepositoryTrait, Lesson,
    LessonCompletion, LessonUpdate, NewCourse, NewLesson,
};

use super::model::{CourseDB, EnrollmentDB, LessonCompletionDB, LessonDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{courses, enrollments, lesson_completions, lessons};

pub struct LearningRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LearningRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LearningRepository { pool, writer }
    }
}

#[async_trait]
impl LearningRepositoryTrait for LearningRepository {
    fn load_courses(&self, published: Option<bool>) -> Result<Vec<Course>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = courses::table.into_boxed();
        if let Some(published) = published {
            query = query.filter(courses::published.eq(published));
        }

        let rows = query
            .order(courses::created_at.desc())
            .load::<CourseDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    fn get_course(&self, course_id: &str) -> Result<Course> {
        let mut conn = get_connection(&self.pool)?;

        let row = courses::table
            .find(course_id)
            .first::<CourseDB>(&mut conn)
            .into_core()?;
        Ok(Course::from(row))
    }

    async fn insert_new_course(&self, new_course: NewCourse) -> Result<Course> {
        self.writer
            .exec(move |conn| {
                let id = new_course
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let now = Utc::now().naive_utc();
                let course_db = CourseDB::from_new(new_course, id, now);

                let result_db: CourseDB = diesel::insert_into(courses::table)
                    .values(&course_db)
                    .returning(CourseDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Course::from(result_db))
            })
            .await
    }

    async fn update_course(&self, course_update: CourseUpdate) -> Result<Course> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let updated_rows =
                    diesel::update(courses::table.filter(courses::id.eq(&course_update.id)))
                        .set((
                            courses::title.eq(&course_update.title),
                            courses::description.eq(&course_update.description),
                            courses::price.eq(course_update.price),
                            courses::published.eq(course_update.published),
                            courses::thumbnail.eq(course_update.thumbnail.clone()),
                            courses::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;

                if updated_rows == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Course {} not found",
                        course_update.id
                    ))));
                }

                let result_db = courses::table
                    .find(&course_update.id)
                    .first::<CourseDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Course::from(result_db))
            })
            .await
    }

    async fn delete_course(&self, course_id: &str) -> Result<usize> {
        let course_id = course_id.to_string();
        self.writer
            .exec(move |conn| {
                // Lessons, enrollments, and completions cascade via FK.
                let deleted = diesel::delete(courses::table.find(&course_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(deleted)
            })
            .await
    }

    fn load_lessons(&self, course_id: &str) -> Result<Vec<Lesson>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = lessons::table
            .filter(lessons::course_id.eq(course_id))
            .order(lessons::order_index.asc())
            .load::<LessonDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(Lesson::try_from).collect()
    }

    fn get_lesson(&self, lesson_id: &str) -> Result<Lesson> {
        let mut conn = get_connection(&self.pool)?;

        let row = lessons::table
            .find(lesson_id)
            .first::<LessonDB>(&mut conn)
            .into_core()?;
        Lesson::try_from(row)
    }

    async fn insert_new_lesson(&self, new_lesson: NewLesson) -> Result<Lesson> {
        self.writer
            .exec(move |conn| {
                let id = new_lesson
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let now = Utc::now().naive_utc();
                let lesson_db = LessonDB::from_new(new_lesson, id, now);

                let result_db: LessonDB = diesel::insert_into(lessons::table)
                    .values(&lesson_db)
                    .returning(LessonDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Lesson::try_from(result_db)
            })
            .await
    }

    async fn update_lesson(&self, lesson_update: LessonUpdate) -> Result<Lesson> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let updated_rows =
                    diesel::update(lessons::table.filter(lessons::id.eq(&lesson_update.id)))
                        .set((
                            lessons::title.eq(&lesson_update.title),
                            lessons::content_type.eq(lesson_update.content_type.as_str()),
                            lessons::content_ref.eq(&lesson_update.content_ref),
                            lessons::order_index.eq(lesson_update.order_index),
                            lessons::duration_minutes.eq(lesson_update.duration_minutes),
                            lessons::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;

                if updated_rows == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Lesson {} not found",
                        lesson_update.id
                    ))));
                }

                let result_db = lessons::table
                    .find(&lesson_update.id)
                    .first::<LessonDB>(conn)
                    .map_err(StorageError::from)?;
                Lesson::try_from(result_db)
            })
            .await
    }

    async fn delete_lesson(&self, lesson_id: &str) -> Result<usize> {
        let lesson_id = lesson_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(lessons::table.find(&lesson_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(deleted)
            })
            .await
    }

    fn count_lessons(&self, course_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        lessons::table
            .filter(lessons::course_id.eq(course_id))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn get_enrollment(&self, user_id: &str, course_id: &str) -> Result<Option<Enrollment>> {
        let mut conn = get_connection(&self.pool)?;

        let row = enrollments::table
            .filter(enrollments::user_id.eq(user_id))
            .filter(enrollments::course_id.eq(course_id))
            .first::<EnrollmentDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Enrollment::from))
    }

    async fn upsert_enrollment(
        &self,
        user_id: &str,
        course_id: &str,
        percent_complete: i32,
    ) -> Result<Enrollment> {
        let user_id = user_id.to_string();
        let course_id = course_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let completed_at = if percent_complete >= FULL_PROGRESS {
                    Some(now)
                } else {
                    None
                };
                let enrollment_db = EnrollmentDB {
                    id: Uuid::new_v4().to_string(),
                    user_id,
                    course_id,
                    percent_complete,
                    completed_at,
                    created_at: now,
                    updated_at: now,
                };

                diesel::insert_into(enrollments::table)
                    .values(&enrollment_db)
                    .on_conflict((enrollments::user_id, enrollments::course_id))
                    .do_update()
                    .set((
                        enrollments::percent_complete.eq(percent_complete),
                        enrollments::completed_at.eq(completed_at),
                        enrollments::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let row = enrollments::table
                    .filter(enrollments::user_id.eq(&enrollment_db.user_id))
                    .filter(enrollments::course_id.eq(&enrollment_db.course_id))
                    .first::<EnrollmentDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Enrollment::from(row))
            })
            .await
    }

    async fn insert_lesson_completion(
        &self,
        user_id: &str,
        course_id: &str,
        lesson_id: &str,
    ) -> Result<LessonCompletion> {
        let user_id = user_id.to_string();
        let course_id = course_id.to_string();
        let lesson_id = lesson_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let completion_db = LessonCompletionDB {
                    id: Uuid::new_v4().to_string(),
                    user_id,
                    course_id,
                    lesson_id,
                    completed_at: now,
                };

                // Completing the same lesson twice is a no-op.
                diesel::insert_into(lesson_completions::table)
                    .values(&completion_db)
                    .on_conflict((
                        lesson_completions::user_id,
                        lesson_completions::lesson_id,
                    ))
                    .do_nothing()
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let row = lesson_completions::table
                    .filter(lesson_completions::user_id.eq(&completion_db.user_id))
                    .filter(lesson_completions::lesson_id.eq(&completion_db.lesson_id))
                    .first::<LessonCompletionDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(LessonCompletion::from(row))
            })
            .await
    }

    fn count_completed_lessons(&self, user_id: &str, course_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        lesson_completions::table
            .filter(lesson_completions::user_id.eq(user_id))
            .filter(lesson_completions::course_id.eq(course_id))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn load_course_progress(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<CourseProgressSummary>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = enrollments::table
            .inner_join(courses::table)
            .filter(enrollments::user_id.eq(user_id))
            .order(enrollments::updated_at.desc())
            .limit(limit)
            .select((
                enrollments::course_id,
                courses::title,
                courses::thumbnail,
                enrollments::percent_complete,
                enrollments::updated_at,
            ))
            .load::<(String, String, Option<String>, i32, NaiveDateTime)>(&mut conn)
            .into_core()?;

        Ok(rows
            .into_iter()
            .map(
                |(course_id, course_title, course_thumbnail, progress, last_accessed)| {
                    CourseProgressSummary {
                        course_id,
                        course_title,
                        course_thumbnail,
                        progress,
                        last_accessed: DateTime::<Utc>::from_naive_utc_and_offset(
                            last_accessed,
                            Utc,
                        ),
                    }
                },
            )
            .collect())
    }
}
