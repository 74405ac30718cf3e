use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};

/// Per-testcase verdict produced by the judge worker, plus `FN` which the
/// core itself emits when a required artefact is missing. Ordering is
/// severity-ascending and drives `aggregate`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    #[sea_orm(string_value = "AC")]
    Ac,
    #[sea_orm(string_value = "WA")]
    Wa,
    #[sea_orm(string_value = "TLE")]
    Tle,
    #[sea_orm(string_value = "MLE")]
    Mle,
    #[sea_orm(string_value = "RE")]
    Re,
    #[sea_orm(string_value = "CE")]
    Ce,
    #[sea_orm(string_value = "OLE")]
    Ole,
    #[sea_orm(string_value = "IE")]
    Ie,
    #[sea_orm(string_value = "FN")]
    Fn,
}

/// Subset of `Verdict` the worker is allowed to write into `JudgeResult.result`.
/// `Fn` is excluded: it is only ever synthesized at submission-summary level.
pub type SingleVerdict = Verdict;

/// `max` under the severity order. Returns `None` for an empty slice.
pub fn aggregate(results: &[Verdict]) -> Option<Verdict> {
    results.iter().copied().max()
}

/// Progress a Submission row moves through before a terminal `result` lands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Progress {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "queued")]
    Queued,
    #[sea_orm(string_value = "running")]
    Running,
    #[sea_orm(string_value = "done")]
    Done,
}

/// Per-student status within a batch evaluation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationStatusKind {
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "delay")]
    Delay,
    #[sea_orm(string_value = "non-submitted")]
    NonSubmitted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_matches_spec() {
        assert!(Verdict::Ac < Verdict::Wa);
        assert!(Verdict::Wa < Verdict::Tle);
        assert!(Verdict::Tle < Verdict::Mle);
        assert!(Verdict::Mle < Verdict::Re);
        assert!(Verdict::Re < Verdict::Ce);
        assert!(Verdict::Ce < Verdict::Ole);
        assert!(Verdict::Ole < Verdict::Ie);
        assert!(Verdict::Ie < Verdict::Fn);
    }

    #[test]
    fn aggregate_picks_max_severity() {
        let results = vec![Verdict::Ac, Verdict::Wa, Verdict::Ac];
        assert_eq!(aggregate(&results), Some(Verdict::Wa));
    }

    #[test]
    fn aggregate_is_idempotent_and_commutative() {
        let a = vec![Verdict::Tle, Verdict::Ac, Verdict::Re];
        let b = vec![Verdict::Re, Verdict::Ac, Verdict::Tle];
        assert_eq!(aggregate(&a), aggregate(&b));
        assert_eq!(aggregate(&a), aggregate(&[aggregate(&a).unwrap()]));
    }

    #[test]
    fn aggregate_of_empty_is_none() {
        assert_eq!(aggregate(&[]), None);
    }
}
