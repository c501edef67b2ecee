use crate::errors::Result;
use crate::learning::learning_model::{
    Course, CourseProgressSummary, CourseUpdate, Enrollment, Lesson, LessonCompletion,
    LessonUpdate, NewCourse, NewLesson,
};
use async_trait::async_trait;

/// Trait for course/lesson/enrollment repository operations
#[async_trait]
pub trait LearningRepositoryTrait: Send + Sync {
    fn load_courses(&self, published: Option<bool>) -> Result<Vec<Course>>;
    fn get_course(&self, course_id: &str) -> Result<Course>;
    async fn insert_new_course(&self, new_course: NewCourse) -> Result<Course>;
    async fn update_course(&self, course_update: CourseUpdate) -> Result<Course>;
    async fn delete_course(&self, course_id: &str) -> Result<usize>;

    /// Lessons of a course, ordered by `order_index` ascending.
    fn load_lessons(&self, course_id: &str) -> Result<Vec<Lesson>>;
    fn get_lesson(&self, lesson_id: &str) -> Result<Lesson>;
    async fn insert_new_lesson(&self, new_lesson: NewLesson) -> Result<Lesson>;
    async fn update_lesson(&self, lesson_update: LessonUpdate) -> Result<Lesson>;
    async fn delete_lesson(&self, lesson_id: &str) -> Result<usize>;
    fn count_lessons(&self, course_id: &str) -> Result<i64>;

    fn get_enrollment(&self, user_id: &str, course_id: &str) -> Result<Option<Enrollment>>;
    /// Creates or refreshes the course-level progress row.
    async fn upsert_enrollment(
        &self,
        user_id: &str,
        course_id: &str,
        percent_complete: i32,
    ) -> Result<Enrollment>;
    /// Records a lesson completion; inserting the same completion twice is a
    /// no-op returning the existing record.
    async fn insert_lesson_completion(
        &self,
        user_id: &str,
        course_id: &str,
        lesson_id: &str,
    ) -> Result<LessonCompletion>;
    fn count_completed_lessons(&self, user_id: &str, course_id: &str) -> Result<i64>;
    /// Most recently accessed enrollments joined with course display fields.
    fn load_course_progress(&self, user_id: &str, limit: i64)
        -> Result<Vec<CourseProgressSummary>>;
}

/// Trait for learning service operations
#[async_trait]
pub trait LearningServiceTrait: Send + Sync {
    fn get_courses(&self, published: Option<bool>) -> Result<Vec<Course>>;
    fn get_course(&self, course_id: &str) -> Result<Course>;
    async fn create_course(&self, new_course: NewCourse) -> Result<Course>;
    async fn update_course(&self, instructor_id: &str, course_update: CourseUpdate)
        -> Result<Course>;
    async fn delete_course(&self, instructor_id: &str, course_id: &str) -> Result<usize>;

    fn get_lessons(&self, course_id: &str) -> Result<Vec<Lesson>>;
    async fn create_lesson(&self, instructor_id: &str, new_lesson: NewLesson) -> Result<Lesson>;
    async fn update_lesson(&self, instructor_id: &str, lesson_update: LessonUpdate)
        -> Result<Lesson>;
    async fn delete_lesson(&self, instructor_id: &str, lesson_id: &str) -> Result<usize>;

    /// Idempotent course enrollment.
    async fn enroll(&self, user_id: &str, course_id: &str) -> Result<Enrollment>;
    /// Marks a lesson complete (auto-enrolling if needed) and recomputes the
    /// course-level percent.
    async fn mark_lesson_complete(
        &self,
        user_id: &str,
        lesson_id: &str,
    ) -> Result<LessonCompletion>;
    fn get_course_progress(&self, user_id: &str, limit: i64)
        -> Result<Vec<CourseProgressSummary>>;
}
