//! Rendering validated capabilities back into ISUPPORT tokens.

use crate::capability::Capability;
use crate::field::Field;
use crate::store::ServerCapabilities;

/// Builder for ISUPPORT token strings.
///
/// Values rendered from a store parse back to the same typed value, so the
/// output can be replayed into another [`ServerCapabilities`].
///
/// # Example
///
/// ```
/// use slirc_isupport::{IsupportBuilder, ServerCapabilities};
///
/// let caps = ServerCapabilities::new();
/// let line = IsupportBuilder::from_capabilities(&caps).build();
/// assert_eq!(line, "CASEMAPPING=ascii CHANTYPES=#& CHANNELLEN=200");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IsupportBuilder {
    tokens: Vec<String>,
}

impl IsupportBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// One token per validated capability, in [`Capability::ALL`] order.
    /// Unset capabilities are omitted.
    pub fn from_capabilities(caps: &ServerCapabilities) -> Self {
        Capability::ALL
            .into_iter()
            .fold(Self::new(), |builder, cap| match caps.get(cap) {
                Field::Validated(value) => builder.token(cap, &value.to_string()),
                Field::Unset => builder,
            })
    }

    /// Add `KEY=VALUE`.
    pub fn token(mut self, capability: Capability, value: &str) -> Self {
        self.tokens.push(format!("{}={}", capability, value));
        self
    }

    /// Add `-KEY`, withdrawing a capability.
    pub fn negate(mut self, capability: Capability) -> Self {
        self.tokens.push(format!("-{}", capability));
        self
    }

    /// The tokens built so far.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Build the tokens into a single space-separated string.
    pub fn build(self) -> String {
        self.tokens.join(" ")
    }

    /// Build the tokens into multiple lines, each with at most `max_per_line` tokens.
    pub fn build_lines(self, max_per_line: usize) -> Vec<String> {
        self.tokens
            .chunks(max_per_line.max(1))
            .map(|chunk| chunk.join(" "))
            .collect()
    }
}
