//! Answer widgets, one implementation per [`AnswerKind`].
//!
//! A widget owns the control state of a rendered answer (checked options, typed
//! text, editor contents). [`AnswerWidget::render`] produces the element tree,
//! [`AnswerWidget::apply`] replays user interaction and
//! [`AnswerWidget::collect`] reads the state back into a payload.

use crate::dom::Element;
use crate::error::WidgetError;
use crate::metrics::WIDGETS_RENDERED_TOTAL;
use crate::models::answer::{AnswerKind, AnswerSpec, CorrectAnswer};
use crate::models::submission::AnswerPayload;

pub mod choice;
pub mod code;
pub mod fill_blank;

pub use choice::{CheckboxWidget, RadioWidget};
pub use code::{CodeEditor, CodeWidget};
pub use fill_blank::FillBlankWidget;

pub const ANSWER_CONTAINER_ID: &str = "answer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetInput {
    /// Check one radio option, unchecking the rest.
    Select(String),
    /// Flip one checkbox option.
    Toggle(String),
    /// Replace the text of the blank or the code editor.
    Type(String),
}

pub trait AnswerWidget: Send + Sync {
    fn kind(&self) -> AnswerKind;

    fn render(&self) -> Element;

    fn collect(&self) -> AnswerPayload;

    fn apply(&mut self, input: WidgetInput) -> Result<(), WidgetError>;

    /// Disable every control. Review-mode widgets start disabled.
    fn disable(&mut self);

    fn is_disabled(&self) -> bool;
}

/// Build the widget for `spec`; `correct` switches it into review mode.
pub fn load_widget(
    spec: &AnswerSpec,
    correct: Option<&CorrectAnswer>,
) -> Result<Box<dyn AnswerWidget>, WidgetError> {
    let widget: Box<dyn AnswerWidget> = match spec.kind()? {
        AnswerKind::RadioChoice => Box::new(RadioWidget::new(spec.choice_options()?, correct)),
        AnswerKind::CheckboxChoice => {
            Box::new(CheckboxWidget::new(spec.choice_options()?, correct))
        }
        AnswerKind::FillBlank => Box::new(FillBlankWidget::new(spec.blank_template()?, correct)),
        AnswerKind::Code => Box::new(CodeWidget::new(correct)),
    };
    Ok(widget)
}

/// Wrap a widget's tree in the page's answer container.
pub fn render_container(widget: &dyn AnswerWidget) -> Element {
    WIDGETS_RENDERED_TOTAL
        .with_label_values(&[widget.kind().as_str()])
        .inc();

    Element::new("div")
        .attr("id", ANSWER_CONTAINER_ID)
        .attr("data-kind", widget.kind().as_str())
        .child(widget.render())
}

/// Render the answer area, or nothing when the spec cannot be rendered.
///
/// Failures stay local to the widget: they are logged, never propagated.
pub fn render_answer(spec: &AnswerSpec, correct: Option<&CorrectAnswer>) -> Option<Element> {
    match load_widget(spec, correct) {
        Ok(widget) => Some(render_container(widget.as_ref())),
        Err(e) => {
            tracing::error!("Failed to render answer widget: {}", e);
            None
        }
    }
}
