#[allow(non_snake_case)]
pub mod m20260101_000001_create_lectures;
#[allow(non_snake_case)]
pub mod m20260101_000002_create_problems;
#[allow(non_snake_case)]
pub mod m20260101_000003_create_required_files;
#[allow(non_snake_case)]
pub mod m20260101_000004_create_arranged_files;
#[allow(non_snake_case)]
pub mod m20260101_000005_create_executables;
#[allow(non_snake_case)]
pub mod m20260101_000006_create_test_cases;
#[allow(non_snake_case)]
pub mod m20260101_000007_create_users;
#[allow(non_snake_case)]
pub mod m20260101_000008_create_login_history;
#[allow(non_snake_case)]
pub mod m20260101_000009_create_batch_submissions;
#[allow(non_snake_case)]
pub mod m20260101_000010_create_evaluation_statuses;
#[allow(non_snake_case)]
pub mod m20260101_000011_create_submissions;
#[allow(non_snake_case)]
pub mod m20260101_000012_create_uploaded_files;
#[allow(non_snake_case)]
pub mod m20260101_000013_create_judge_results;
