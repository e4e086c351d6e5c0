//! Behavioural options for the [`Ini`](crate::Ini) facade.
use crate::parser::Quoting;

/// When the facade writes the bound file back after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSave {
    /// Every mutation that changes the document rewrites the bound file.
    #[default]
    OnChange,
    /// Mutations stay in memory until [`Ini::save`](crate::Ini::save).
    Never,
}

/// Facade configuration.
///
/// # Examples
///
/// ```
/// use inifmt::{AutoSave, Options, Quoting};
///
/// let options = Options::default()
///     .with_quoting(Quoting::Raw)
///     .with_autosave(AutoSave::Never);
/// assert_eq!(options.quoting, Quoting::Raw);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Lexical variant used by both parse and dump.
    pub quoting: Quoting,
    /// Write-back policy for mutations.
    pub autosave: AutoSave,
}

impl Options {
    /// Use `quoting` for parse and dump.
    #[must_use]
    pub const fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    /// Use `autosave` as the write-back policy.
    #[must_use]
    pub const fn with_autosave(mut self, autosave: AutoSave) -> Self {
        self.autosave = autosave;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_escape_and_autosave() {
        let options = Options::default();
        assert_eq!(options.quoting, Quoting::Escaped);
        assert_eq!(options.autosave, AutoSave::OnChange);
    }

    #[test]
    fn builders_override_fields() {
        let options = Options::default()
            .with_quoting(Quoting::Raw)
            .with_autosave(AutoSave::Never);
        assert_eq!(
            options,
            Options {
                quoting: Quoting::Raw,
                autosave: AutoSave::Never,
            }
        );
    }
}
