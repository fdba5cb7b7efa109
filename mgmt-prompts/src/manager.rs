//! Resource manager for `prompts/{prompt}/partials`.

use std::fmt;
use std::sync::Arc;

use mgmt_primitives::{IntoPromptType, PartialMarkup, PromptPartial, PromptType};
use mgmt_transport::{ApiRequest, Method, RequestOption, Transport, uri};
use tracing::{debug, info};

use crate::error::{PartialError, PartialResult};

/// Creates, reads, updates, and clears custom prompt partials.
///
/// The manager holds no state besides the shared transport, so clones are
/// cheap and may be used from any number of tasks at once.
#[derive(Clone)]
pub struct PromptPartialManager {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for PromptPartialManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptPartialManager").finish_non_exhaustive()
    }
}

impl PromptPartialManager {
    /// Creates a manager that sends requests through `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Creates the partial for `partial.prompt()` with a `POST`.
    ///
    /// # Errors
    ///
    /// Returns [`PartialError::Transport`] if the request fails.
    pub async fn create(
        &self,
        partial: &PromptPartial,
        options: &[RequestOption],
    ) -> PartialResult<()> {
        self.write(Method::Post, partial.prompt(), partial.markup(), options)
            .await
    }

    /// Replaces the partial for `partial.prompt()` with a `PUT`.
    ///
    /// # Errors
    ///
    /// Returns [`PartialError::Transport`] if the request fails.
    pub async fn update(
        &self,
        partial: &PromptPartial,
        options: &[RequestOption],
    ) -> PartialResult<()> {
        self.write(Method::Put, partial.prompt(), partial.markup(), options)
            .await
    }

    /// Fetches the partial configured for `prompt`.
    ///
    /// Accepts a [`PromptType`] or a raw prompt name; unknown names are
    /// rejected before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`PartialError::InvalidPrompt`] for unknown prompt names,
    /// [`PartialError::Transport`] if the request fails, and
    /// [`PartialError::Decode`] if the response is not a partial.
    pub async fn read(
        &self,
        prompt: impl IntoPromptType,
        options: &[RequestOption],
    ) -> PartialResult<PromptPartial> {
        let prompt = prompt.into_prompt_type()?;
        let request = ApiRequest::new(Method::Get, partials_path(prompt)).with_options(options);

        debug!(%prompt, "reading prompt partial");
        let response = self.transport.execute(request).await?;

        let markup = if response.body.iter().all(u8::is_ascii_whitespace) {
            PartialMarkup::default()
        } else {
            serde_json::from_slice(&response.body)
                .map_err(|source| PartialError::Decode { source })?
        };
        Ok(PromptPartial::from_parts(prompt, markup))
    }

    /// Clears the partial for `partial.prompt()`.
    ///
    /// The API has no delete for partials; the resource is replaced with an
    /// empty object instead. Markup set on `partial` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PartialError::Transport`] if the request fails.
    pub async fn delete(
        &self,
        partial: &PromptPartial,
        options: &[RequestOption],
    ) -> PartialResult<()> {
        self.write(
            Method::Put,
            partial.prompt(),
            &PartialMarkup::default(),
            options,
        )
        .await
    }

    async fn write(
        &self,
        method: Method,
        prompt: PromptType,
        markup: &PartialMarkup,
        options: &[RequestOption],
    ) -> PartialResult<()> {
        let body = serde_json::to_value(markup).map_err(|source| PartialError::Encode { source })?;
        let request = ApiRequest::new(method, partials_path(prompt))
            .with_body(body)
            .with_options(options);

        self.transport.execute(request).await?;
        info!(%method, %prompt, "prompt partial written");
        Ok(())
    }
}

fn partials_path(prompt: PromptType) -> String {
    uri(&["prompts", prompt.as_str(), "partials"])
}
