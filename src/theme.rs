//! The binary light/dark theme value.
//!
//! The document marker convention is asymmetric: dark is written as
//! `data-theme="dark"`, light is the absence of the attribute. Any marker
//! value other than `"dark"` reads back as light.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

const LIGHT: &str = "light";
const DARK: &str = "dark";

/// Active visual mode of the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Default mode; no marker attribute on the root element.
    #[default]
    Light,
    /// Dark mode; marker attribute set to `"dark"`.
    Dark,
}

impl Theme {
    /// Lowercase name used for storage and events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => LIGHT,
            Self::Dark => DARK,
        }
    }

    /// The other theme.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Map the system "prefers dark" signal onto a theme.
    #[must_use]
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// Read a theme back from the document marker attribute.
    #[must_use]
    pub fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some(DARK) => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Attribute value to write for this theme; `None` means remove it.
    #[must_use]
    pub fn marker_value(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some(DARK),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(LIGHT) {
            Ok(Self::Light)
        } else if trimmed.eq_ignore_ascii_case(DARK) {
            Ok(Self::Dark)
        } else {
            Err(ThemeError::InvalidTheme(s.to_owned()))
        }
    }
}
