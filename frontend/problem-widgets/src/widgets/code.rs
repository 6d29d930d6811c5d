use super::{AnswerWidget, WidgetInput};
use crate::dom::Element;
use crate::error::WidgetError;
use crate::models::answer::{AnswerKind, CodeTestCase, CorrectAnswer};
use crate::models::submission::AnswerPayload;

pub const EDITOR_ID: &str = "code";

const HELP_RULES: [&str; 3] = [
    "Read every parameter from stdin with a blocking read, one read per declared parameter line.",
    "Numeric input is read as floating point unless the parameter type is declared explicitly.",
    "Escape control sequences such as \\n or \\t inside string literals.",
];

/// Code editing surface owned by the active code widget.
#[derive(Debug, Clone, Default)]
pub struct CodeEditor {
    contents: String,
    disabled: bool,
}

impl CodeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn set_contents(&mut self, contents: impl Into<String>) -> Result<(), WidgetError> {
        if self.disabled {
            return Err(WidgetError::Disabled);
        }
        self.contents = contents.into();
        Ok(())
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn render(&self) -> Element {
        Element::new("textarea")
            .attr("id", EDITOR_ID)
            .attr("name", "code")
            .attr("rows", "16")
            .attr("spellcheck", "false")
            .flag("disabled", self.disabled)
            .text(self.contents.as_str())
    }
}

enum CodeMode {
    Entry(CodeEditor),
    Review(Vec<CodeTestCase>),
}

pub struct CodeWidget {
    mode: CodeMode,
}

impl CodeWidget {
    pub fn new(correct: Option<&CorrectAnswer>) -> Self {
        let mode = match correct {
            Some(answer) => CodeMode::Review(CodeTestCase::parse_all(&answer.joined())),
            None => CodeMode::Entry(CodeEditor::new()),
        };
        Self { mode }
    }

    pub fn editor(&self) -> Option<&CodeEditor> {
        match &self.mode {
            CodeMode::Entry(editor) => Some(editor),
            CodeMode::Review(_) => None,
        }
    }

    pub fn test_cases(&self) -> &[CodeTestCase] {
        match &self.mode {
            CodeMode::Entry(_) => &[],
            CodeMode::Review(cases) => cases,
        }
    }

    fn render_help() -> Element {
        Element::new("details")
            .attr("class", "code-help")
            .child(Element::new("summary").text("How your program is run"))
            .child(
                Element::new("ul")
                    .children(HELP_RULES.iter().map(|rule| Element::new("li").text(*rule))),
            )
    }

    fn render_tests(cases: &[CodeTestCase]) -> Element {
        let rows = cases.iter().map(|case| {
            Element::new("tr")
                .child(Element::new("td").child(Element::new("pre").text(case.stdin.join("\n"))))
                .child(Element::new("td").child(Element::new("pre").text(case.stdout.as_str())))
        });

        Element::new("div")
            .attr("class", "code-tests")
            .child(Element::new("p").text("Example tests"))
            .child(
                Element::new("table")
                    .child(
                        Element::new("thead").child(
                            Element::new("tr")
                                .child(Element::new("th").text("stdin"))
                                .child(Element::new("th").text("stdout")),
                        ),
                    )
                    .child(Element::new("tbody").children(rows)),
            )
    }
}

impl AnswerWidget for CodeWidget {
    fn kind(&self) -> AnswerKind {
        AnswerKind::Code
    }

    fn render(&self) -> Element {
        match &self.mode {
            CodeMode::Entry(editor) => Element::new("div")
                .attr("class", "code-answer")
                .child(editor.render())
                .child(Self::render_help()),
            CodeMode::Review(cases) => Self::render_tests(cases),
        }
    }

    fn collect(&self) -> AnswerPayload {
        AnswerPayload::Code {
            code: self
                .editor()
                .map(|editor| editor.contents().to_string())
                .unwrap_or_default(),
        }
    }

    fn apply(&mut self, input: WidgetInput) -> Result<(), WidgetError> {
        let CodeMode::Entry(editor) = &mut self.mode else {
            return Err(WidgetError::Disabled);
        };
        match input {
            WidgetInput::Type(code) => editor.set_contents(code),
            _ => Err(WidgetError::UnsupportedInput(AnswerKind::Code)),
        }
    }

    fn disable(&mut self) {
        if let CodeMode::Entry(editor) = &mut self.mode {
            editor.disable();
        }
    }

    fn is_disabled(&self) -> bool {
        match &self.mode {
            CodeMode::Entry(editor) => editor.is_disabled(),
            CodeMode::Review(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::CorrectValue;

    #[test]
    fn test_entry_mode_renders_empty_editor_and_help() {
        let widget = CodeWidget::new(None);
        let tree = widget.render();

        let editor = tree.find_by_id(EDITOR_ID).unwrap();
        assert_eq!(editor.tag, "textarea");
        assert_eq!(editor.text_content(), "");
        assert_eq!(tree.find_all("li").len(), HELP_RULES.len());
        assert_eq!(
            widget.collect(),
            AnswerPayload::Code {
                code: String::new()
            }
        );
    }

    #[test]
    fn test_editor_contents_collected_verbatim() {
        let mut widget = CodeWidget::new(None);
        let source = "a = float(input())\nprint(a * 2)\n";
        widget.apply(WidgetInput::Type(source.to_string())).unwrap();

        assert_eq!(
            widget.collect(),
            AnswerPayload::Code {
                code: source.to_string()
            }
        );
        assert!(widget
            .render()
            .to_html()
            .contains("a = float(input())\nprint(a * 2)"));
    }

    #[test]
    fn test_disabled_editor_rejects_input() {
        let mut widget = CodeWidget::new(None);
        widget.disable();
        assert!(widget.is_disabled());
        assert!(matches!(
            widget.apply(WidgetInput::Type("x".to_string())),
            Err(WidgetError::Disabled)
        ));
        assert!(widget
            .render()
            .find_by_id(EDITOR_ID)
            .unwrap()
            .has_attr("disabled"));
    }

    #[test]
    fn test_review_mode_renders_test_cases() {
        let correct = CorrectAnswer {
            is_correct: CorrectValue::One("1,2\r\n3\n4,5\r\n9".to_string()),
        };
        let widget = CodeWidget::new(Some(&correct));

        assert_eq!(widget.test_cases().len(), 2);
        assert!(widget.editor().is_none());

        let tree = widget.render();
        assert!(tree.find_by_id(EDITOR_ID).is_none());
        let cells: Vec<String> = tree.find_all("pre").iter().map(|pre| pre.text_content()).collect();
        assert_eq!(cells, vec!["1\n2", "3", "4\n5", "9"]);
    }
}
