//! Button assembly: style, feedbacks, and steps.

use indexmap::IndexMap;
use tracing::trace;

use crate::config::{ActionSpec, ButtonSpec, FeedbackSpec, StyleSpec};
use crate::identity::IdGenerator;
use crate::resolve::IdentifierResolver;
use crate::style::{
    contains_variable_expression, hex_to_color, join_text_lines, FontSize, DEFAULT_BG_COLOR,
    DEFAULT_TEXT_COLOR,
};

use super::schema::{
    ActionSets, ButtonOptions, ButtonStyle, FeedbackStyle, ResolvedAction, ResolvedButton,
    ResolvedFeedback, ResolvedStep, StepOptions,
};

/// Timeout before a multi-step button falls back to step 1, in milliseconds.
pub const DEFAULT_STEP_TIMEOUT_MS: u64 = 5000;

/// Name given to the confirmation step.
pub const CONFIRM_STEP_NAME: &str = "Confirm";

const ALIGN_CENTER: &str = "center:center";
const STEP_PROGRESSION_AUTO: &str = "auto";

/// Build the base style of a button. A missing style block gives defaults.
#[must_use]
pub fn build_style(spec: Option<&StyleSpec>) -> ButtonStyle {
    let empty = StyleSpec::default();
    let spec = spec.unwrap_or(&empty);
    let text = join_text_lines(spec.text_top.as_deref(), spec.text_bottom.as_deref());

    ButtonStyle {
        text_expression: contains_variable_expression(&text),
        text,
        size: FontSize::from_token_or_default(spec.font_size.as_deref()),
        alignment: ALIGN_CENTER.to_string(),
        pngalignment: ALIGN_CENTER.to_string(),
        color: hex_to_color(spec.color_text.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)),
        bgcolor: hex_to_color(spec.color_bg.as_deref().unwrap_or(DEFAULT_BG_COLOR)),
        show_topbar: "default".to_string(),
        png64: None,
    }
}

/// Style override applied while a feedback is active, and whether the
/// feedback is inverted.
///
/// A feedback with only `style_when_false` is emitted inverted, using that
/// style as the active one.
#[must_use]
pub fn feedback_style(spec: &FeedbackSpec) -> (FeedbackStyle, bool) {
    let when_true = spec.style_when_true.as_ref().filter(|s| !s.is_empty());
    let when_false = spec.style_when_false.as_ref().filter(|s| !s.is_empty());

    let (active, inverted) = match (when_true, when_false) {
        (None, Some(when_false)) => (Some(when_false), true),
        (when_true, _) => (when_true, false),
    };

    let Some(active) = active else {
        return (FeedbackStyle::default(), inverted);
    };

    let text = (active.text_top.is_some() || active.text_bottom.is_some())
        .then(|| join_text_lines(active.text_top.as_deref(), active.text_bottom.as_deref()));

    let style = FeedbackStyle {
        bgcolor: active.color_bg.as_deref().map(hex_to_color),
        color: active.color_text.as_deref().map(hex_to_color),
        text,
    };
    (style, inverted)
}

/// Assembles buttons, drawing identities from one shared generator.
pub struct ButtonAssembler<'r, 'g> {
    resolver: &'r IdentifierResolver<'r>,
    ids: &'g mut dyn IdGenerator,
}

impl<'r, 'g> ButtonAssembler<'r, 'g> {
    pub fn new(resolver: &'r IdentifierResolver<'r>, ids: &'g mut dyn IdGenerator) -> Self {
        Self { resolver, ids }
    }

    /// Build one button.
    ///
    /// Identities are drawn in a fixed order: step 1 and its actions, then
    /// step 2 and its actions, then feedbacks.
    pub fn build(&mut self, spec: &ButtonSpec) -> ResolvedButton {
        let mut steps = IndexMap::new();

        let (step_id, step) = self.build_step(&spec.actions.press, "");
        steps.insert(step_id, step);

        let mut options = ButtonOptions {
            rotary_actions: false,
            step_progression: STEP_PROGRESSION_AUTO.to_string(),
            step_auto_progress_timeout: None,
        };

        if spec.is_multistep() {
            let (step_id, step) = self.build_step(spec.second_step_actions(), CONFIRM_STEP_NAME);
            steps.insert(step_id, step);
            options.step_auto_progress_timeout =
                Some(spec.step_2_timeout_ms.unwrap_or(DEFAULT_STEP_TIMEOUT_MS));
        }

        let feedbacks = spec.feedbacks.iter().map(|f| self.build_feedback(f)).collect();

        trace!(steps = steps.len(), "Assembled button");
        ResolvedButton {
            control_type: "button".to_string(),
            options,
            style: build_style(spec.style.as_ref()),
            feedbacks,
            steps,
            local_variables: Vec::new(),
        }
    }

    fn build_step(&mut self, actions: &[ActionSpec], name: &str) -> (String, ResolvedStep) {
        let step_id = self.ids.next_id();
        let down = actions.iter().map(|a| self.build_action(a)).collect();
        let step = ResolvedStep {
            action_sets: ActionSets {
                down,
                up: Vec::new(),
            },
            options: StepOptions {
                run_while_held: Vec::new(),
                name: name.to_string(),
            },
        };
        (step_id, step)
    }

    fn build_action(&mut self, spec: &ActionSpec) -> ResolvedAction {
        let entity = self
            .resolver
            .resolve_action(&spec.connection, &spec.action, &spec.options);
        ResolvedAction {
            entity_type: "action".to_string(),
            id: self.ids.next_id(),
            definition_id: entity.definition_id,
            connection_id: entity.connection_id,
            headline: None,
            options: entity.options,
            disabled: false,
            upgrade_index: None,
        }
    }

    fn build_feedback(&mut self, spec: &FeedbackSpec) -> ResolvedFeedback {
        let entity = self
            .resolver
            .resolve_feedback(&spec.connection, &spec.feedback, &spec.options);
        let (style, is_inverted) = feedback_style(spec);
        ResolvedFeedback {
            entity_type: "feedback".to_string(),
            id: self.ids.next_id(),
            definition_id: entity.definition_id,
            connection_id: entity.connection_id,
            headline: None,
            options: entity.options,
            disabled: false,
            upgrade_index: None,
            is_inverted,
            style,
        }
    }
}
