pub mod aggregation;
pub mod progress;
pub mod read_models;

pub use aggregation::reconcile_batch_results;
pub use progress::{recompute_batch_progress, recompute_submission_progress};
pub use read_models::{
    batch_detail, batch_student_file, batch_user_detail, get_batch, get_submission,
    list_batches, list_submissions, submission_detail, submission_file_bundle, BatchDetail,
    BundleKind, EvaluationStatusDetail, SubmissionDetail, SubmissionListQuery,
};
