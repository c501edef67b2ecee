use log::debug;
use std::sync::Arc;

use crate::constants::FULL_PROGRESS;
use crate::errors::Result;
use crate::learning::learning_errors::LearningError;
use crate::learning::learning_model::{
    Course, CourseProgressSummary, CourseUpdate, Enrollment, Lesson, LessonCompletion,
    LessonUpdate, NewCourse, NewLesson,
};
use crate::learning::learning_traits::{LearningRepositoryTrait, LearningServiceTrait};
use async_trait::async_trait;

/// Service for managing courses, lessons, and enrollment progress
pub struct LearningService {
    repository: Arc<dyn LearningRepositoryTrait>,
}

impl LearningService {
    pub fn new(repository: Arc<dyn LearningRepositoryTrait>) -> Self {
        LearningService { repository }
    }

    /// Checks that the acting instructor owns the course.
    fn authorize_instructor(&self, instructor_id: &str, course: &Course) -> Result<()> {
        if course.instructor_id != instructor_id {
            return Err(LearningError::NotAuthorized(format!(
                "Course {} does not belong to instructor {}",
                course.id, instructor_id
            ))
            .into());
        }
        Ok(())
    }

    /// Recomputes a user's course-level percent from lesson completions.
    async fn refresh_course_progress(&self, user_id: &str, course_id: &str) -> Result<()> {
        let total_lessons = self.repository.count_lessons(course_id)?;
        if total_lessons == 0 {
            return Ok(());
        }

        let completed_lessons = self
            .repository
            .count_completed_lessons(user_id, course_id)?;
        let percent =
            ((completed_lessons as f64 / total_lessons as f64) * FULL_PROGRESS as f64).round()
                as i32;
        debug!(
            "Course {} progress for user {}: {}/{} lessons ({percent}%)",
            course_id, user_id, completed_lessons, total_lessons
        );
        self.repository
            .upsert_enrollment(user_id, course_id, percent)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LearningServiceTrait for LearningService {
    fn get_courses(&self, published: Option<bool>) -> Result<Vec<Course>> {
        self.repository.load_courses(published)
    }

    fn get_course(&self, course_id: &str) -> Result<Course> {
        self.repository.get_course(course_id)
    }

    async fn create_course(&self, new_course: NewCourse) -> Result<Course> {
        new_course.validate()?;
        self.repository.insert_new_course(new_course).await
    }

    async fn update_course(
        &self,
        instructor_id: &str,
        course_update: CourseUpdate,
    ) -> Result<Course> {
        course_update.validate()?;
        let existing = self.repository.get_course(&course_update.id)?;
        self.authorize_instructor(instructor_id, &existing)?;
        self.repository.update_course(course_update).await
    }

    async fn delete_course(&self, instructor_id: &str, course_id: &str) -> Result<usize> {
        let existing = self.repository.get_course(course_id)?;
        self.authorize_instructor(instructor_id, &existing)?;
        self.repository.delete_course(course_id).await
    }

    fn get_lessons(&self, course_id: &str) -> Result<Vec<Lesson>> {
        self.repository.load_lessons(course_id)
    }

    async fn create_lesson(&self, instructor_id: &str, new_lesson: NewLesson) -> Result<Lesson> {
        new_lesson.validate()?;
        let course = self.repository.get_course(&new_lesson.course_id)?;
        self.authorize_instructor(instructor_id, &course)?;
        self.repository.insert_new_lesson(new_lesson).await
    }

    async fn update_lesson(
        &self,
        instructor_id: &str,
        lesson_update: LessonUpdate,
    ) -> Result<Lesson> {
        lesson_update.validate()?;
        let lesson = self.repository.get_lesson(&lesson_update.id)?;
        let course = self.repository.get_course(&lesson.course_id)?;
        self.authorize_instructor(instructor_id, &course)?;
        self.repository.update_lesson(lesson_update).await
    }

    async fn delete_lesson(&self, instructor_id: &str, lesson_id: &str) -> Result<usize> {
        let lesson = self.repository.get_lesson(lesson_id)?;
        let course = self.repository.get_course(&lesson.course_id)?;
        self.authorize_instructor(instructor_id, &course)?;
        self.repository.delete_lesson(lesson_id).await
    }

    async fn enroll(&self, user_id: &str, course_id: &str) -> Result<Enrollment> {
        if let Some(enrollment) = self.repository.get_enrollment(user_id, course_id)? {
            return Ok(enrollment);
        }
        self.repository.get_course(course_id)?;
        self.repository
            .upsert_enrollment(user_id, course_id, 0)
            .await
    }

    async fn mark_lesson_complete(
        &self,
        user_id: &str,
        lesson_id: &str,
    ) -> Result<LessonCompletion> {
        let lesson = self.repository.get_lesson(lesson_id)?;

        // Auto-enroll on first touch, matching the enrollment flow.
        if self
            .repository
            .get_enrollment(user_id, &lesson.course_id)?
            .is_none()
        {
            self.repository
                .upsert_enrollment(user_id, &lesson.course_id, 0)
                .await?;
        }

        let completion = self
            .repository
            .insert_lesson_completion(user_id, &lesson.course_id, lesson_id)
            .await?;

        self.refresh_course_progress(user_id, &lesson.course_id)
            .await?;

        Ok(completion)
    }

    fn get_course_progress(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<CourseProgressSummary>> {
        self.repository.load_course_progress(user_id, limit)
    }
}
