use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::error::PageError;
use crate::models::answer::{AnswerSpec, CorrectAnswer};

lazy_static! {
    static ref CSRF_SELECTOR: Selector =
        Selector::parse("input[name=csrfmiddlewaretoken]").unwrap();
    static ref ANSWER_SELECTOR: Selector = Selector::parse("#answer").unwrap();
}

/// Values a problem page hands to the answer widget on load.
#[derive(Debug, Clone)]
pub struct ProblemPage {
    pub csrf_token: String,
    pub answer: AnswerSpec,
    pub correct_answers: Option<CorrectAnswer>,
}

impl ProblemPage {
    pub fn parse(html: &str) -> Result<Self, PageError> {
        let doc = Html::parse_document(html);

        let csrf_token = doc
            .select(&CSRF_SELECTOR)
            .find_map(|input| input.value().attr("value"))
            .map(str::to_string)
            .ok_or(PageError::MissingCsrfToken)?;

        let answer_el = doc
            .select(&ANSWER_SELECTOR)
            .next()
            .ok_or(PageError::MissingAnswer)?;

        let raw_answer = answer_el
            .value()
            .attr("data-answer")
            .ok_or(PageError::MissingAnswer)?;
        let answer = serde_json::from_str(raw_answer).map_err(|source| {
            PageError::MalformedJson {
                attribute: "data-answer",
                source,
            }
        })?;

        let correct_answers = correct_answers(answer_el)?;

        tracing::debug!(
            has_correct_answers = correct_answers.is_some(),
            "Parsed problem page"
        );

        Ok(Self {
            csrf_token,
            answer,
            correct_answers,
        })
    }
}

fn correct_answers(answer_el: ElementRef<'_>) -> Result<Option<CorrectAnswer>, PageError> {
    answer_el
        .value()
        .attr("data-correct-answers")
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            serde_json::from_str(raw).map_err(|source| PageError::MalformedJson {
                attribute: "data-correct-answers",
                source,
            })
        })
        .transpose()
}
