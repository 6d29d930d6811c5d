use std::collections::HashSet;

use super::{AnswerWidget, WidgetInput};
use crate::dom::Element;
use crate::error::WidgetError;
use crate::models::answer::{AnswerKind, AnswerOption, CorrectAnswer};
use crate::models::submission::AnswerPayload;

const OPTION_INPUT_NAME: &str = "option";

fn render_options(
    legend: &str,
    input_type: &str,
    options: &[AnswerOption],
    is_checked: impl Fn(&str) -> bool,
    disabled: bool,
) -> Element {
    let mut fieldset = Element::new("fieldset").child(Element::new("legend").text(legend));
    for option in options {
        fieldset = fieldset
            .child(
                Element::new("input")
                    .attr("type", input_type)
                    .attr("id", option.id.as_str())
                    .attr("value", option.id.as_str())
                    .attr("name", OPTION_INPUT_NAME)
                    .flag("checked", is_checked(&option.id))
                    .flag("disabled", disabled),
            )
            .child(
                Element::new("label")
                    .attr("for", option.id.as_str())
                    .markup(option.text.as_str()),
            )
            .child(Element::new("br"));
    }
    fieldset
}

fn ensure_known(options: &[AnswerOption], id: &str) -> Result<(), WidgetError> {
    if options.iter().any(|option| option.id == id) {
        Ok(())
    } else {
        Err(WidgetError::UnknownOption(id.to_string()))
    }
}

/// Single choice: exactly one option may be checked.
pub struct RadioWidget {
    options: Vec<AnswerOption>,
    selected: Option<String>,
    disabled: bool,
}

impl RadioWidget {
    pub fn new(options: Vec<AnswerOption>, correct: Option<&CorrectAnswer>) -> Self {
        let selected = correct.and_then(|answer| {
            answer
                .ids()
                .into_iter()
                .find(|id| options.iter().any(|option| option.id == *id))
                .map(str::to_string)
        });
        Self {
            options,
            selected,
            disabled: correct.is_some(),
        }
    }
}

impl AnswerWidget for RadioWidget {
    fn kind(&self) -> AnswerKind {
        AnswerKind::RadioChoice
    }

    fn render(&self) -> Element {
        render_options(
            "Choose one correct option",
            "radio",
            &self.options,
            |id| self.selected.as_deref() == Some(id),
            self.disabled,
        )
    }

    fn collect(&self) -> AnswerPayload {
        AnswerPayload::RadioChoice {
            answer_id: self.selected.clone(),
        }
    }

    fn apply(&mut self, input: WidgetInput) -> Result<(), WidgetError> {
        if self.disabled {
            return Err(WidgetError::Disabled);
        }
        match input {
            WidgetInput::Select(id) => {
                ensure_known(&self.options, &id)?;
                self.selected = Some(id);
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedInput(self.kind())),
        }
    }

    fn disable(&mut self) {
        self.disabled = true;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Multiple choice: options toggle independently.
pub struct CheckboxWidget {
    options: Vec<AnswerOption>,
    checked: HashSet<String>,
    disabled: bool,
}

impl CheckboxWidget {
    pub fn new(options: Vec<AnswerOption>, correct: Option<&CorrectAnswer>) -> Self {
        let checked = correct
            .map(|answer| answer.ids().into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        Self {
            options,
            checked,
            disabled: correct.is_some(),
        }
    }
}

impl AnswerWidget for CheckboxWidget {
    fn kind(&self) -> AnswerKind {
        AnswerKind::CheckboxChoice
    }

    fn render(&self) -> Element {
        render_options(
            "Choose all correct options",
            "checkbox",
            &self.options,
            |id| self.checked.contains(id),
            self.disabled,
        )
    }

    /// Checked ids in option order.
    fn collect(&self) -> AnswerPayload {
        AnswerPayload::CheckboxChoice {
            answer_id: self
                .options
                .iter()
                .filter(|option| self.checked.contains(&option.id))
                .map(|option| option.id.clone())
                .collect(),
        }
    }

    fn apply(&mut self, input: WidgetInput) -> Result<(), WidgetError> {
        if self.disabled {
            return Err(WidgetError::Disabled);
        }
        match input {
            WidgetInput::Toggle(id) => {
                ensure_known(&self.options, &id)?;
                if !self.checked.remove(&id) {
                    self.checked.insert(id);
                }
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedInput(self.kind())),
        }
    }

    fn disable(&mut self) {
        self.disabled = true;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }
}
