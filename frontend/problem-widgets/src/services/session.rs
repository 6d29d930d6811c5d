//! Per-problem answering flow.
//!
//! A [`ProblemSession`] ties the loaded widget to its problem and drives the
//! `Unanswered -> Submitted -> {Locked | Unanswered}` cycle. Results come back
//! as [`ViewTransition`]s; the session never touches the page itself.

use super::grading_client::GradingBackend;
use super::stopwatch::Stopwatch;
use crate::dom::Element;
use crate::error::SessionError;
use crate::metrics::{ANSWERS_SUBMITTED_TOTAL, STDIN_RUNS_TOTAL};
use crate::models::answer::{AnswerKind, AnswerSpec, CorrectAnswer};
use crate::models::grading::{GradingOutcome, RunOutcome};
use crate::models::submission::{RunStdinPayload, SubmissionPayload};
use crate::models::view::{ProblemState, RunOutputView, VerdictView, ViewTransition};
use crate::models::ProblemRef;
use crate::utils::escape::escape_output;
use crate::utils::page::ProblemPage;
use crate::widgets::{self, AnswerWidget, WidgetInput};

pub struct ProblemSession {
    problem: ProblemRef,
    widget: Option<Box<dyn AnswerWidget>>,
    stopwatch: Option<Stopwatch>,
    state: ProblemState,
}

impl ProblemSession {
    /// Load the widget for `spec`. Correct answers mean the problem was already
    /// answered, so the session starts locked.
    pub fn load(problem: ProblemRef, spec: &AnswerSpec, correct: Option<&CorrectAnswer>) -> Self {
        let widget = match widgets::load_widget(spec, correct) {
            Ok(widget) => Some(widget),
            Err(e) => {
                tracing::error!(problem_id = %problem.problem_id, "Failed to load answer widget: {}", e);
                None
            }
        };
        let state = if correct.is_some() {
            ProblemState::Locked
        } else {
            ProblemState::Unanswered
        };

        Self {
            problem,
            widget,
            stopwatch: None,
            state,
        }
    }

    pub fn from_page(problem: ProblemRef, page: &ProblemPage) -> Self {
        Self::load(problem, &page.answer, page.correct_answers.as_ref())
    }

    pub fn with_stopwatch(mut self, stopwatch: Stopwatch) -> Self {
        self.stopwatch = Some(stopwatch);
        self
    }

    pub fn problem(&self) -> &ProblemRef {
        &self.problem
    }

    pub fn state(&self) -> ProblemState {
        self.state
    }

    pub fn widget(&self) -> Option<&dyn AnswerWidget> {
        self.widget.as_deref()
    }

    pub fn elapsed_seconds(&self) -> Option<u64> {
        self.stopwatch.as_ref().map(Stopwatch::elapsed_seconds)
    }

    /// The answer container, or nothing when no widget could be loaded.
    pub fn render(&self) -> Option<Element> {
        self.widget
            .as_deref()
            .map(|widget| widgets::render_container(widget))
    }

    pub fn apply(&mut self, input: WidgetInput) -> Result<(), SessionError> {
        let widget = self.widget.as_mut().ok_or(SessionError::NoWidget)?;
        widget.apply(input)?;
        Ok(())
    }

    pub fn collect(&self) -> Result<SubmissionPayload, SessionError> {
        let widget = self.widget.as_ref().ok_or(SessionError::NoWidget)?;
        Ok(SubmissionPayload {
            answer: widget.collect(),
            problem_id: self.problem.problem_id,
            time_elapsed_in_seconds: self.elapsed_seconds(),
        })
    }

    pub async fn submit(
        &mut self,
        backend: &dyn GradingBackend,
    ) -> Result<Vec<ViewTransition>, SessionError> {
        if self.state == ProblemState::Locked {
            return Err(SessionError::Locked);
        }
        let payload = self.collect()?;
        self.state = ProblemState::Submitted;

        let mut transitions = Vec::new();
        let mut lock = false;

        match backend.validate_answer(&self.problem, &payload).await {
            Ok(result) => {
                let label = match result.outcome() {
                    GradingOutcome::Graded { verdict, note } => {
                        let message = match note {
                            Some(note) => format!("{} ({})", verdict.message(), note),
                            None => verdict.message().to_string(),
                        };
                        transitions.push(ViewTransition::ShowVerdict(VerdictView {
                            verdict,
                            message,
                        }));
                        verdict.as_str()
                    }
                    GradingOutcome::Rejected(error) => {
                        transitions.push(ViewTransition::error(error));
                        "rejected"
                    }
                    GradingOutcome::Unknown => {
                        tracing::warn!(
                            problem_id = %self.problem.problem_id,
                            "Grading response has neither coefficient nor error"
                        );
                        transitions.push(ViewTransition::unknown_error());
                        "unknown"
                    }
                };
                ANSWERS_SUBMITTED_TOTAL.with_label_values(&[label]).inc();
                lock = result.locks();
            }
            Err(e) => {
                tracing::error!(problem_id = %self.problem.problem_id, "Failed to validate answer: {}", e);
                ANSWERS_SUBMITTED_TOTAL.with_label_values(&["error"]).inc();
                transitions.push(ViewTransition::unknown_error());
            }
        }

        if lock {
            self.lock();
            transitions.push(ViewTransition::Lock);
        } else {
            self.state = ProblemState::Unanswered;
        }

        Ok(transitions)
    }

    /// Run the editor contents on `stdin`. Only code problems can run, and
    /// running never changes the answer state.
    pub async fn run_stdin(
        &mut self,
        backend: &dyn GradingBackend,
        stdin: &str,
    ) -> Result<Vec<ViewTransition>, SessionError> {
        if self.state == ProblemState::Locked {
            return Err(SessionError::Locked);
        }
        let widget = self.widget.as_ref().ok_or(SessionError::NoWidget)?;
        if widget.kind() != AnswerKind::Code {
            return Err(SessionError::NotRunnable);
        }

        let payload = RunStdinPayload {
            submission: self.collect()?,
            stdin: stdin.to_string(),
        };

        let (transition, label) = match backend.run_stdin(&self.problem, &payload).await {
            Ok(result) => match result.outcome() {
                RunOutcome::Output { exit_code, output } => (
                    ViewTransition::ShowRunOutput(RunOutputView {
                        exit_code,
                        output_html: escape_output(&output),
                    }),
                    "output",
                ),
                RunOutcome::Failed(error) => (ViewTransition::error(error), "failed"),
                RunOutcome::Unknown => (ViewTransition::unknown_error(), "unknown"),
            },
            Err(e) => {
                tracing::error!(problem_id = %self.problem.problem_id, "Failed to run code: {}", e);
                (ViewTransition::unknown_error(), "error")
            }
        };

        STDIN_RUNS_TOTAL.with_label_values(&[label]).inc();
        Ok(vec![transition])
    }

    fn lock(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            widget.disable();
        }
        self.state = ProblemState::Locked;
        tracing::info!(problem_id = %self.problem.problem_id, "Problem locked in");
    }
}
