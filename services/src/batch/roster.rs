use db::verdict::EvaluationStatusKind;
use util::roster::RosterRow;

const ENROLLED_ROLE: &str = "履修生";

/// A roster row that passed role filtering and normalisation, paired with
/// the decision of whether it gets materialised as a judgeable slot.
pub struct WalkedRow {
    pub student_id: String,
    pub status: EvaluationStatusKind,
    pub submit_date: Option<String>,
    /// `Some(reason)` when the row is dropped rather than materialised.
    pub skip_reason: Option<String>,
}

/// Walks the parsed roster, restricted to `ロール == 履修生`, normalising the
/// `提出` column into an `EvaluationStatusKind` (spec §4.F).
pub fn walk_roster(rows: &[RosterRow]) -> Vec<WalkedRow> {
    rows.iter()
        .filter(|r| r.role == ENROLLED_ROLE)
        .map(|r| {
            let status = normalise_status(&r.submitted);
            let needs_submit_date = matches!(
                status,
                EvaluationStatusKind::Submitted | EvaluationStatusKind::Delay
            );
            let skip_reason = if needs_submit_date && r.submit_date.is_none() {
                Some(format!(
                    "{}: marked {:?} but submit date is missing",
                    r.student_id, r.submitted
                ))
            } else {
                None
            };
            WalkedRow {
                student_id: r.student_id.clone(),
                status,
                submit_date: r.submit_date.clone(),
                skip_reason,
            }
        })
        .collect()
}

fn normalise_status(raw: &str) -> EvaluationStatusKind {
    let lowered = raw.to_lowercase();
    if lowered.contains("non") || lowered.contains("未提出") {
        EvaluationStatusKind::NonSubmitted
    } else if lowered.contains("delay") || lowered.contains("遅延") {
        EvaluationStatusKind::Delay
    } else {
        EvaluationStatusKind::Submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(student_id: &str, role: &str, submitted: &str, submit_date: Option<&str>) -> RosterRow {
        RosterRow {
            student_id: student_id.into(),
            role: role.into(),
            submitted: submitted.into(),
            submit_date: submit_date.map(String::from),
        }
    }

    #[test]
    fn filters_to_enrolled_role_only() {
        let rows = vec![
            row("1", "履修生", "submitted", Some("2026-01-01")),
            row("2", "聴講生", "submitted", Some("2026-01-01")),
        ];
        let walked = walk_roster(&rows);
        assert_eq!(walked.len(), 1);
        assert_eq!(walked[0].student_id, "1");
    }

    #[test]
    fn missing_submit_date_on_submitted_row_is_skipped() {
        let rows = vec![row("1", "履修生", "submitted", None)];
        let walked = walk_roster(&rows);
        assert!(walked[0].skip_reason.is_some());
    }

    #[test]
    fn non_submitted_does_not_require_submit_date() {
        let rows = vec![row("1", "履修生", "non-submitted", None)];
        let walked = walk_roster(&rows);
        assert!(walked[0].skip_reason.is_none());
        assert_eq!(walked[0].status, EvaluationStatusKind::NonSubmitted);
    }
}
