pub mod arranged_file;
pub mod batch_submission;
pub mod evaluation_status;
pub mod executable;
pub mod judge_result;
pub mod lecture;
pub mod login_history;
pub mod problem;
pub mod required_file;
pub mod submission;
pub mod test_case;
pub mod uploaded_file;
pub mod user;
