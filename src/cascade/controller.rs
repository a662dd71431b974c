use std::sync::Arc;

use tracing::trace;

use crate::cascade::keyword::{KeywordFilter, KeywordPolicy};
use crate::cascade::stage::StageClassifier;
use crate::cascade::{Branch, ClassificationRecord, Outcome, StageResult};
use crate::error::{CascadeError, ReportError};
use crate::input::Report;
use crate::labels::{Label, Marker, StageKind};
use crate::model::ModelStore;
use crate::vectorize::{ReportFeatures, Vectorizer};

#[derive(Debug)]
enum State {
    Start,
    ReportedEval,
    InsufficientEval(StageResult),
    ResultEval(StageResult),
    Done(Branch),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Start => "start",
            State::ReportedEval => "reported_eval",
            State::InsufficientEval(_) => "insufficient_eval",
            State::ResultEval(_) => "result_eval",
            State::Done(_) => "done",
        }
    }
}

/// The four-stage cascade for one marker.
#[derive(Debug, Clone)]
pub struct Cascade {
    marker: Marker,
    policy: KeywordPolicy,
    vectorizer: Arc<Vectorizer>,
    keyword: KeywordFilter,
    reported: StageClassifier,
    insufficient: StageClassifier,
    positive: StageClassifier,
    method: StageClassifier,
}

impl Cascade {
    /// Resolves every stage up front so a missing artifact fails before any
    /// report is touched.
    pub fn new(
        marker: Marker,
        store: &ModelStore,
        vectorizer: Arc<Vectorizer>,
        policy: KeywordPolicy,
    ) -> Result<Self, CascadeError> {
        let stage = |kind: StageKind| -> Result<StageClassifier, CascadeError> {
            Ok(StageClassifier::new(store.get(marker, kind)?.clone()))
        };
        if !vectorizer.patterns().has_marker(marker) {
            return Err(CascadeError::Config {
                marker,
                stage: StageKind::Reported,
                message: "pattern set has no test patterns for this marker".to_string(),
            });
        }
        Ok(Self {
            marker,
            policy,
            keyword: KeywordFilter::new(vectorizer.patterns().clone()),
            reported: stage(StageKind::Reported)?,
            insufficient: stage(StageKind::Insufficient)?,
            positive: stage(StageKind::Positive)?,
            method: stage(StageKind::Method)?,
            vectorizer,
        })
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    pub fn policy(&self) -> KeywordPolicy {
        self.policy
    }

    /// Per-report problems become `Outcome::Failed`; only configuration
    /// errors come back as `Err`.
    pub fn classify(&self, report: &Report) -> Result<ClassificationRecord, CascadeError> {
        let outcome = match self.vectorizer.extract(report, self.marker) {
            Ok(features) => Outcome::Classified(self.run(report, &features)?),
            Err(ReportError::Malformed { reason }) => Outcome::Failed { reason },
        };
        Ok(ClassificationRecord {
            report_id: report.id.clone(),
            marker: self.marker,
            outcome,
        })
    }

    fn run(&self, report: &Report, features: &ReportFeatures) -> Result<Branch, CascadeError> {
        let mut state = State::Start;
        loop {
            trace!(report = %report.id, marker = %self.marker, state = state.name(), "cascade_state");
            state = match state {
                State::Start => State::ReportedEval,
                State::ReportedEval => {
                    let reported = self.eval_reported(report, features)?;
                    match reported.label {
                        Label::Reported => State::ResultEval(reported),
                        _ => State::InsufficientEval(reported),
                    }
                }
                State::InsufficientEval(reported) => State::Done(Branch::NotReported {
                    insufficient: eval(&self.insufficient, features)?,
                    reported,
                }),
                State::ResultEval(reported) => State::Done(Branch::Reported {
                    positive: eval(&self.positive, features)?,
                    method: eval(&self.method, features)?,
                    reported,
                }),
                State::Done(branch) => return Ok(branch),
            };
        }
    }

    fn eval_reported(
        &self,
        report: &Report,
        features: &ReportFeatures,
    ) -> Result<StageResult, CascadeError> {
        let keyword = self.keyword.filter(&report.text, self.marker);
        if self.policy == KeywordPolicy::Gate && keyword == Label::NotReported {
            return Ok(StageResult::keyword(StageKind::Reported, Label::NotReported));
        }
        eval(&self.reported, features)
    }
}

fn eval(stage: &StageClassifier, features: &ReportFeatures) -> Result<StageResult, CascadeError> {
    let vector = stage.vectorize(features);
    stage.classify(&vector)
}
