/// Rendering options the host pipeline hands to the transform.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Options {
    /// Whether the host renders with typographic replacements enabled.
    ///
    /// Carried through for observability only; annotation parsing and
    /// binding are identical either way.
    pub typographer: bool,
}

impl Options {
    /// Create a new `OptionsBuilder` for fluent configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use curly_parser::Options;
    ///
    /// let options = Options::builder()
    ///     .with_typographer()
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Create a new `Options` with default settings.
    ///
    /// Equivalent to `Options::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for [`Options`].
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct OptionsBuilder {
    typographer: bool,
}

impl OptionsBuilder {
    /// Record that the host renders with typographic replacements enabled.
    #[must_use]
    pub fn with_typographer(mut self) -> Self {
        self.typographer = true;
        self
    }

    /// Build the [`Options`] from this builder.
    #[must_use]
    pub fn build(self) -> Options {
        Options {
            typographer: self.typographer,
        }
    }
}
