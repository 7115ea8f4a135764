use tryout_core::attempt::{Attempt, AttemptPhase};

use crate::vm::time_fmt::format_countdown;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: String,
    pub text: String,
    pub selected: bool,
}

/// One button of the question navigation panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItemVm {
    pub index: usize,
    pub number: usize,
    pub answered: bool,
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptVm {
    pub title: String,
    pub timer: String,
    pub position: String,
    pub prompt: String,
    pub image_url: Option<String>,
    pub options: Vec<OptionVm>,
    pub nav: Vec<NavItemVm>,
    pub answered: usize,
    pub total: usize,
    pub has_previous: bool,
    pub is_last: bool,
    pub can_submit: bool,
    pub submitting: bool,
}

impl AttemptVm {
    #[must_use]
    pub fn from_attempt(attempt: &Attempt) -> Self {
        let index = attempt.current_index();
        let total = attempt.questions().len();
        let selected = attempt.selected(index);
        let (prompt, image_url, options) = attempt.current_question().map_or_else(
            || (String::new(), None, Vec::new()),
            |question| {
                let options = question
                    .options
                    .iter()
                    .map(|option| OptionVm {
                        key: option.key.clone(),
                        text: option.text.clone(),
                        selected: selected == Some(option.key.as_str()),
                    })
                    .collect();
                (
                    question.prompt.clone(),
                    question.image().map(str::to_string),
                    options,
                )
            },
        );
        let nav = (0..total)
            .map(|i| NavItemVm {
                index: i,
                number: i + 1,
                answered: attempt.selected(i).is_some(),
                current: i == index,
            })
            .collect();

        Self {
            title: attempt.subtest().title.clone(),
            timer: format_countdown(attempt.seconds_left()),
            position: format!("Nomor Soal : {} / {total}", index + 1),
            prompt,
            image_url,
            options,
            nav,
            answered: attempt.answered_count(),
            total,
            has_previous: index > 0,
            is_last: attempt.is_last_question(),
            can_submit: attempt.can_submit(),
            submitting: attempt.phase() == AttemptPhase::Submitting,
        }
    }
}
