pub mod model;
pub mod repository;

pub use model::{CourseDB, EnrollmentDB, LessonCompletionDB, LessonDB};
pub use repository::LearningRepository;
