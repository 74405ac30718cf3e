pub mod repository;

pub mod arranged_file_repository;
pub mod batch_submission_repository;
pub mod evaluation_status_repository;
pub mod executable_repository;
pub mod judge_result_repository;
pub mod lecture_repository;
pub mod login_history_repository;
pub mod problem_repository;
pub mod required_file_repository;
pub mod submission_repository;
pub mod test_case_repository;
pub mod uploaded_file_repository;
pub mod user_repository;

pub use repository::Repository;
