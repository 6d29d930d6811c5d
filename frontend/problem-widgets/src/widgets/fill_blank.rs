use super::{AnswerWidget, WidgetInput};
use crate::dom::Element;
use crate::error::WidgetError;
use crate::models::answer::{AnswerKind, BlankTemplate, CorrectAnswer};
use crate::models::submission::AnswerPayload;

pub const BLANK_INPUT_ID: &str = "blank";

pub struct FillBlankWidget {
    template: BlankTemplate,
    value: String,
    disabled: bool,
}

impl FillBlankWidget {
    pub fn new(template: BlankTemplate, correct: Option<&CorrectAnswer>) -> Self {
        Self {
            template,
            value: correct.map(CorrectAnswer::joined).unwrap_or_default(),
            disabled: correct.is_some(),
        }
    }
}

impl AnswerWidget for FillBlankWidget {
    fn kind(&self) -> AnswerKind {
        AnswerKind::FillBlank
    }

    fn render(&self) -> Element {
        Element::new("div")
            .child(Element::new("p").text("Fill in the blank"))
            .child(
                Element::new("p")
                    .markup(self.template.prefix.as_str())
                    .child(
                        Element::new("span").child(
                            Element::new("input")
                                .attr("type", "text")
                                .attr("id", BLANK_INPUT_ID)
                                .attr("value", self.value.as_str())
                                .flag("disabled", self.disabled),
                        ),
                    )
                    .markup(self.template.suffix.as_str()),
            )
    }

    fn collect(&self) -> AnswerPayload {
        AnswerPayload::FillBlank {
            value: self.value.clone(),
        }
    }

    fn apply(&mut self, input: WidgetInput) -> Result<(), WidgetError> {
        if self.disabled {
            return Err(WidgetError::Disabled);
        }
        match input {
            WidgetInput::Type(text) => {
                self.value = text;
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
