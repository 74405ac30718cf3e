#[derive(Debug, Clone, Default)]
pub struct LectureFilter {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub query: Option<String>,
}

impl LectureFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }
    pub fn with_query(mut self, query: String) -> Self {
        self.query = Some(query);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProblemFilter {
    pub id: Option<i64>,
    pub lecture_id: Option<i64>,
    pub assignment_id: Option<i64>,
}

impl ProblemFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_lecture_id(mut self, lecture_id: i64) -> Self {
        self.lecture_id = Some(lecture_id);
        self
    }
    pub fn with_assignment_id(mut self, assignment_id: i64) -> Self {
        self.assignment_id = Some(assignment_id);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequiredFileFilter {
    pub id: Option<i64>,
    pub problem_id: Option<i64>,
}

impl RequiredFileFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_problem_id(mut self, problem_id: i64) -> Self {
        self.problem_id = Some(problem_id);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArrangedFileFilter {
    pub id: Option<i64>,
    pub problem_id: Option<i64>,
    pub eval: Option<bool>,
}

impl ArrangedFileFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_problem_id(mut self, problem_id: i64) -> Self {
        self.problem_id = Some(problem_id);
        self
    }
    pub fn with_eval(mut self, eval: bool) -> Self {
        self.eval = Some(eval);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecutableFilter {
    pub id: Option<i64>,
    pub problem_id: Option<i64>,
    pub eval: Option<bool>,
}

impl ExecutableFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_problem_id(mut self, problem_id: i64) -> Self {
        self.problem_id = Some(problem_id);
        self
    }
    pub fn with_eval(mut self, eval: bool) -> Self {
        self.eval = Some(eval);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestCaseFilter {
    pub id: Option<i64>,
    pub problem_id: Option<i64>,
    pub eval: Option<bool>,
}

impl TestCaseFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_problem_id(mut self, problem_id: i64) -> Self {
        self.problem_id = Some(problem_id);
        self
    }
    pub fn with_eval(mut self, eval: bool) -> Self {
        self.eval = Some(eval);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub role: Option<crate::models::user::Role>,
    pub disabled: Option<bool>,
    pub query: Option<String>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }
    pub fn with_email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }
    pub fn with_role(mut self, role: crate::models::user::Role) -> Self {
        self.role = Some(role);
        self
    }
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }
    pub fn with_query(mut self, query: String) -> Self {
        self.query = Some(query);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginHistoryFilter {
    pub id: Option<i64>,
    pub user_id: Option<String>,
    pub login_at: Option<i64>,
}

impl LoginHistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }
    /// Disambiguates by the session's `login_at`, given as a unix
    /// timestamp (matching `Claims::login`), so callers holding a token
    /// can pick out the exact `(user_id, login_at)` row it names.
    pub fn with_login_at(mut self, login_at: i64) -> Self {
        self.login_at = Some(login_at);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchSubmissionFilter {
    pub id: Option<i64>,
    pub lecture_id: Option<i64>,
    pub user_id: Option<String>,
}

impl BatchSubmissionFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_lecture_id(mut self, lecture_id: i64) -> Self {
        self.lecture_id = Some(lecture_id);
        self
    }
    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationStatusFilter {
    pub id: Option<i64>,
    pub batch_id: Option<i64>,
    pub user_id: Option<String>,
    pub status: Option<crate::verdict::EvaluationStatusKind>,
}

impl EvaluationStatusFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_batch_id(mut self, batch_id: i64) -> Self {
        self.batch_id = Some(batch_id);
        self
    }
    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }
    pub fn with_status(mut self, status: crate::verdict::EvaluationStatusKind) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub id: Option<i64>,
    pub user_id: Option<String>,
    pub lecture_id: Option<i64>,
    pub assignment_id: Option<i64>,
    pub evaluation_status_id: Option<i64>,
    pub progress: Option<crate::verdict::Progress>,
    pub eval: Option<bool>,
}

impl SubmissionFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }
    pub fn with_lecture_id(mut self, lecture_id: i64) -> Self {
        self.lecture_id = Some(lecture_id);
        self
    }
    pub fn with_assignment_id(mut self, assignment_id: i64) -> Self {
        self.assignment_id = Some(assignment_id);
        self
    }
    pub fn with_evaluation_status_id(mut self, evaluation_status_id: i64) -> Self {
        self.evaluation_status_id = Some(evaluation_status_id);
        self
    }
    pub fn with_progress(mut self, progress: crate::verdict::Progress) -> Self {
        self.progress = Some(progress);
        self
    }
    pub fn with_eval(mut self, eval: bool) -> Self {
        self.eval = Some(eval);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct JudgeResultFilter {
    pub id: Option<i64>,
    pub submission_id: Option<i64>,
}

impl JudgeResultFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_submission_id(mut self, submission_id: i64) -> Self {
        self.submission_id = Some(submission_id);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadedFileFilter {
    pub id: Option<i64>,
    pub submission_id: Option<i64>,
}

impl UploadedFileFilter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
    pub fn with_submission_id(mut self, submission_id: i64) -> Self {
        self.submission_id = Some(submission_id);
        self
    }
}
