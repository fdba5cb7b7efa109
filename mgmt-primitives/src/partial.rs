//! Custom markup injected into authentication pages.

use serde::{Deserialize, Serialize};

use crate::{PromptType, Result};

/// HTML fragments for the injection points of an authentication page.
///
/// Every slot is optional. Slots that are unset or empty are left out of
/// the serialized payload, so an all-empty value serializes as `{}`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PartialMarkup {
    #[serde(rename = "form-content-start", skip_serializing_if = "is_blank")]
    form_content_start: Option<String>,
    #[serde(rename = "form-content-end", skip_serializing_if = "is_blank")]
    form_content_end: Option<String>,
    #[serde(rename = "form-footer-start", skip_serializing_if = "is_blank")]
    form_footer_start: Option<String>,
    #[serde(rename = "form-footer-end", skip_serializing_if = "is_blank")]
    form_footer_end: Option<String>,
    #[serde(rename = "secondary-actions-start", skip_serializing_if = "is_blank")]
    secondary_actions_start: Option<String>,
    #[serde(rename = "secondary-actions-end", skip_serializing_if = "is_blank")]
    secondary_actions_end: Option<String>,
}

#[allow(clippy::ref_option)]
fn is_blank(slot: &Option<String>) -> bool {
    slot.as_deref().is_none_or(str::is_empty)
}

impl PartialMarkup {
    /// Sets the markup rendered at the start of the form content.
    #[must_use]
    pub fn with_form_content_start(mut self, html: impl Into<String>) -> Self {
        self.form_content_start = Some(html.into());
        self
    }

    /// Sets the markup rendered at the end of the form content.
    #[must_use]
    pub fn with_form_content_end(mut self, html: impl Into<String>) -> Self {
        self.form_content_end = Some(html.into());
        self
    }

    /// Sets the markup rendered at the start of the form footer.
    #[must_use]
    pub fn with_form_footer_start(mut self, html: impl Into<String>) -> Self {
        self.form_footer_start = Some(html.into());
        self
    }

    /// Sets the markup rendered at the end of the form footer.
    #[must_use]
    pub fn with_form_footer_end(mut self, html: impl Into<String>) -> Self {
        self.form_footer_end = Some(html.into());
        self
    }

    /// Sets the markup rendered before the secondary actions.
    #[must_use]
    pub fn with_secondary_actions_start(mut self, html: impl Into<String>) -> Self {
        self.secondary_actions_start = Some(html.into());
        self
    }

    /// Sets the markup rendered after the secondary actions.
    #[must_use]
    pub fn with_secondary_actions_end(mut self, html: impl Into<String>) -> Self {
        self.secondary_actions_end = Some(html.into());
        self
    }

    /// Returns the form content start slot.
    #[must_use]
    pub fn form_content_start(&self) -> Option<&str> {
        self.form_content_start.as_deref()
    }

    /// Returns the form content end slot.
    #[must_use]
    pub fn form_content_end(&self) -> Option<&str> {
        self.form_content_end.as_deref()
    }

    /// Returns the form footer start slot.
    #[must_use]
    pub fn form_footer_start(&self) -> Option<&str> {
        self.form_footer_start.as_deref()
    }

    /// Returns the form footer end slot.
    #[must_use]
    pub fn form_footer_end(&self) -> Option<&str> {
        self.form_footer_end.as_deref()
    }

    /// Returns the secondary actions start slot.
    #[must_use]
    pub fn secondary_actions_start(&self) -> Option<&str> {
        self.secondary_actions_start.as_deref()
    }

    /// Returns the secondary actions end slot.
    #[must_use]
    pub fn secondary_actions_end(&self) -> Option<&str> {
        self.secondary_actions_end.as_deref()
    }

    /// Returns `true` when no slot carries any markup.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.form_content_start,
            &self.form_content_end,
            &self.form_footer_start,
            &self.form_footer_end,
            &self.secondary_actions_start,
            &self.secondary_actions_end,
        ]
        .into_iter()
        .all(is_blank)
    }
}

/// Custom markup bound to the authentication screen it is rendered on.
///
/// The prompt type only selects the target resource; it is never part of
/// the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptPartial {
    prompt: PromptType,
    markup: PartialMarkup,
}

impl PromptPartial {
    /// Creates an empty partial for the named prompt.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPromptType`] if `prompt` is not a known prompt type.
    pub fn new(prompt: impl AsRef<str>) -> Result<Self> {
        Ok(Self::for_prompt(prompt.as_ref().parse()?))
    }

    /// Creates an empty partial for an already validated prompt type.
    #[must_use]
    pub fn for_prompt(prompt: PromptType) -> Self {
        Self::from_parts(prompt, PartialMarkup::default())
    }

    /// Combines a prompt type with existing markup.
    #[must_use]
    pub const fn from_parts(prompt: PromptType, markup: PartialMarkup) -> Self {
        Self { prompt, markup }
    }

    /// Replaces the markup wholesale.
    #[must_use]
    pub fn with_markup(mut self, markup: PartialMarkup) -> Self {
        self.markup = markup;
        self
    }

    /// Sets the markup rendered at the start of the form content.
    #[must_use]
    pub fn with_form_content_start(mut self, html: impl Into<String>) -> Self {
        self.markup = self.markup.with_form_content_start(html);
        self
    }

    /// Sets the markup rendered at the end of the form content.
    #[must_use]
    pub fn with_form_content_end(mut self, html: impl Into<String>) -> Self {
        self.markup = self.markup.with_form_content_end(html);
        self
    }

    /// Sets the markup rendered at the start of the form footer.
    #[must_use]
    pub fn with_form_footer_start(mut self, html: impl Into<String>) -> Self {
        self.markup = self.markup.with_form_footer_start(html);
        self
    }

    /// Sets the markup rendered at the end of the form footer.
    #[must_use]
    pub fn with_form_footer_end(mut self, html: impl Into<String>) -> Self {
        self.markup = self.markup.with_form_footer_end(html);
        self
    }

    /// Sets the markup rendered before the secondary actions.
    #[must_use]
    pub fn with_secondary_actions_start(mut self, html: impl Into<String>) -> Self {
        self.markup = self.markup.with_secondary_actions_start(html);
        self
    }

    /// Sets the markup rendered after the secondary actions.
    #[must_use]
    pub fn with_secondary_actions_end(mut self, html: impl Into<String>) -> Self {
        self.markup = self.markup.with_secondary_actions_end(html);
        self
    }

    /// Returns the prompt type this partial is routed to.
    #[must_use]
    pub const fn prompt(&self) -> PromptType {
        self.prompt
    }

    /// Returns the markup slots.
    #[must_use]
    pub const fn markup(&self) -> &PartialMarkup {
        &self.markup
    }

    /// Splits the partial into its prompt type and markup.
    #[must_use]
    pub fn into_parts(self) -> (PromptType, PartialMarkup) {
        (self.prompt, self.markup)
    }
}
