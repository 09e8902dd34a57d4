//! Case suites for batch parameter solving.
//!
//! A suite is an ordered list of named solver requests. Running it produces a
//! reproducible JSON report that can be rendered as a table and diffed against
//! an earlier report.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};
use upconv_params::{ConvTransposeParams, SolveRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteCase {
    pub name: String,
    #[serde(flatten)]
    pub request: SolveRequest,
}

impl SuiteCase {
    pub fn new(name: impl Into<String>, request: SolveRequest) -> Self {
        Self {
            name: name.into(),
            request,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Solved,
    NotPossible,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub case: String,
    pub request: SolveRequest,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<ConvTransposeParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<i128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaseOutcome {
    pub fn is_solved(&self) -> bool {
        self.status == CaseStatus::Solved
    }
}

/// Solve one case. A rejected request becomes an `Invalid` outcome rather than
/// an error so that one bad case does not hide the rest of a suite.
pub fn evaluate_case(case: &SuiteCase) -> CaseOutcome {
    let request = case.request;
    let (status, params, error) = match request.solve() {
        Ok(Some(params)) => (CaseStatus::Solved, Some(params), None),
        Ok(None) => (CaseStatus::NotPossible, None, None),
        Err(err) => {
            warn!(case = %case.name, error = %err, "rejected solver request");
            (CaseStatus::Invalid, None, Some(err.to_string()))
        }
    };
    let output_size = params.map(|p| p.output_size(request.input_size, request.kernel_size));

    debug!(
        case = %case.name,
        input = request.input_size,
        multiplier = request.multiplier,
        kernel = request.kernel_size,
        status = ?status,
        "evaluated case"
    );

    CaseOutcome {
        case: case.name.clone(),
        request,
        status,
        params,
        output_size,
        error,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub generated_at_unix_ms: u128,
    pub cases: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn solved(&self) -> usize {
        self.cases.iter().filter(|case| case.is_solved()).count()
    }

    pub fn as_map(&self) -> BTreeMap<&str, &CaseOutcome> {
        self.cases
            .iter()
            .map(|case| (case.case.as_str(), case))
            .collect()
    }

    /// Cases present in both reports whose request, status or params differ.
    pub fn diff<'a>(&'a self, baseline: &'a SuiteReport) -> BTreeMap<&'a str, OutcomeChange<'a>> {
        let previous = baseline.as_map();

        self.as_map()
            .into_iter()
            .filter_map(|(case, current)| {
                let &before = previous.get(case)?;
                let changed = current.request != before.request
                    || current.status != before.status
                    || current.params != before.params;
                changed.then_some((
                    case,
                    OutcomeChange {
                        current,
                        baseline: before,
                    },
                ))
            })
            .collect()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading report {}", path.display()))?;
        let report = serde_json::from_str(&json)?;
        Ok(report)
    }
}

#[derive(Debug)]
pub struct OutcomeChange<'a> {
    pub current: &'a CaseOutcome,
    pub baseline: &'a CaseOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseSuite {
    cases: Vec<SuiteCase>,
}

impl CaseSuite {
    pub fn new(cases: Vec<SuiteCase>) -> Self {
        Self { cases }
    }

    /// Representative upsampling layers: even and odd kernels, kernels one
    /// below the multiplier, and kernels too small to reach the target.
    pub fn demo() -> Self {
        let cases = [
            ("x2_k2", 32, 2, 2),
            ("x2_k3", 32, 2, 3),
            ("x2_k4", 64, 2, 4),
            ("x3_k3", 16, 3, 3),
            ("x3_k2", 16, 3, 2),
            ("x4_k2_small", 16, 4, 2),
            ("x4_k2_large", 128, 4, 2),
            ("x2_k1", 128, 2, 1),
        ]
        .into_iter()
        .map(|(name, input, multiplier, kernel)| {
            SuiteCase::new(name, SolveRequest::new(input, multiplier, kernel))
        })
        .collect();
        Self::new(cases)
    }

    pub fn cases(&self) -> &[SuiteCase] {
        &self.cases
    }

    pub fn validate(&self) -> Result<()> {
        if self.cases.is_empty() {
            bail!("case suite is empty");
        }
        let mut seen = HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.name.as_str()) {
                bail!("duplicate case name '{}' in suite", case.name);
            }
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).with_context(|| format!("reading case suite {}", path.display()))?;
        let suite: Self = serde_json::from_slice(&data)
            .with_context(|| format!("parsing case suite {}", path.display()))?;
        suite.validate()?;
        Ok(suite)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let blob = serde_json::to_vec_pretty(self)?;
        fs::write(path, blob)?;
        Ok(())
    }

    pub fn run(&self) -> Result<SuiteReport> {
        self.validate()?;

        let cases: Vec<CaseOutcome> = self.cases.iter().map(evaluate_case).collect();

        let generated_at_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| Duration::from_secs(0))
            .as_millis();

        let report = SuiteReport {
            generated_at_unix_ms,
            cases,
        };
        info!(
            cases = report.cases.len(),
            solved = report.solved(),
            "case suite finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_suite_outcomes() {
        let report = CaseSuite::demo().run().unwrap();
        let statuses: Vec<CaseStatus> = report.cases.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                CaseStatus::Solved,
                CaseStatus::Solved,
                CaseStatus::Solved,
                CaseStatus::Solved,
                CaseStatus::Solved,
                CaseStatus::NotPossible,
                CaseStatus::NotPossible,
                CaseStatus::Solved,
            ]
        );
        assert_eq!(report.solved(), 6);

        for outcome in report.cases.iter().filter(|c| c.is_solved()) {
            assert_eq!(outcome.output_size, Some(outcome.request.target_size()));
        }
    }

    #[test]
    fn test_invalid_case_does_not_abort_run() {
        let suite = CaseSuite::new(vec![
            SuiteCase::new("bad", SolveRequest::new(16, 0, 3)),
            SuiteCase::new("good", SolveRequest::new(16, 2, 2)),
        ]);
        let report = suite.run().unwrap();
        assert_eq!(report.cases[0].status, CaseStatus::Invalid);
        assert!(report.cases[0]
            .error
            .as_deref()
            .unwrap()
            .contains("multiplier"));
        assert!(report.cases[1].is_solved());
    }

    #[test]
    fn test_validate_rejects_empty_and_duplicates() {
        assert!(CaseSuite::default().validate().is_err());

        let suite = CaseSuite::new(vec![
            SuiteCase::new("dup", SolveRequest::new(8, 2, 2)),
            SuiteCase::new("dup", SolveRequest::new(8, 2, 3)),
        ]);
        let err = suite.run().unwrap_err();
        assert!(err.to_string().contains("dup"));
    }

    #[test]
    fn test_diff_reports_changed_cases_only() {
        let baseline = CaseSuite::demo().run().unwrap();
        let mut current = baseline.clone();
        current.cases[0].status = CaseStatus::NotPossible;
        current.cases[0].params = None;

        let changes = current.diff(&baseline);
        assert_eq!(changes.len(), 1);
        let change = &changes["x2_k2"];
        assert_eq!(change.current.status, CaseStatus::NotPossible);
        assert_eq!(change.baseline.status, CaseStatus::Solved);
    }

    #[test]
    fn test_suite_case_flattens_request() {
        let case: SuiteCase = serde_json::from_str(
            r#"{"name": "x3", "input_size": 16, "multiplier": 3, "kernel_size": 3,
                "allow_output_padding": false}"#,
        )
        .unwrap();
        assert_eq!(case.request, SolveRequest::new(16, 3, 3).with_output_padding(false));
    }
}
