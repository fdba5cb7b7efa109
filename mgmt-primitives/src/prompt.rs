//! Prompt type identifiers.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Authentication screen that a custom partial applies to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum PromptType {
    /// Combined sign-up screen.
    Signup,
    /// Identifier-first sign-up screen.
    SignupId,
    /// Password step of the identifier-first sign-up flow.
    SignupPassword,
    /// Combined login screen.
    Login,
    /// Identifier-first login screen.
    LoginId,
    /// Password step of the identifier-first login flow.
    LoginPassword,
}

impl PromptType {
    /// Every prompt type accepted by the partials endpoint.
    pub const ALL: [Self; 6] = [
        Self::Signup,
        Self::SignupId,
        Self::SignupPassword,
        Self::Login,
        Self::LoginId,
        Self::LoginPassword,
    ];

    /// Returns the identifier used in resource paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::SignupId => "signup-id",
            Self::SignupPassword => "signup-password",
            Self::Login => "login",
            Self::LoginId => "login-id",
            Self::LoginPassword => "login-password",
        }
    }
}

impl Display for PromptType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|prompt| prompt.as_str() == s)
            .ok_or_else(|| Error::invalid_prompt_type(s))
    }
}

impl TryFrom<&str> for PromptType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<String> for PromptType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl AsRef<str> for PromptType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Conversion into a validated [`PromptType`].
///
/// Lets operations keyed by a prompt type accept either the enum or a raw
/// string while still rejecting unknown values before any I/O happens.
pub trait IntoPromptType {
    /// Validates and converts the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPromptType`] if the value is not a known prompt type.
    fn into_prompt_type(self) -> Result<PromptType>;
}

impl IntoPromptType for PromptType {
    fn into_prompt_type(self) -> Result<PromptType> {
        Ok(self)
    }
}

impl IntoPromptType for &str {
    fn into_prompt_type(self) -> Result<PromptType> {
        self.parse()
    }
}

impl IntoPromptType for String {
    fn into_prompt_type(self) -> Result<PromptType> {
        self.parse()
    }
}

impl IntoPromptType for &String {
    fn into_prompt_type(self) -> Result<PromptType> {
        self.parse()
    }
}
