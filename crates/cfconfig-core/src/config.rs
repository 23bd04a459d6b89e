//! Runtime configuration for the configuration block service

use crate::layout::RecordLayout;

/// Policy knobs for [`ConfigBlockService`](crate::ConfigBlockService)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Layout the codecs work against
    pub layout: RecordLayout,

    /// Substitute the default document when a block is corrupt
    pub fallback_to_default: bool,

    /// Range-check records before encoding
    pub strict: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            layout: RecordLayout::current(),
            fallback_to_default: true,
            strict: false,
        }
    }
}

impl ServiceConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout
    pub fn layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set fallback_to_default
    pub fn fallback_to_default(mut self, fallback: bool) -> Self {
        self.fallback_to_default = fallback;
        self
    }

    /// Set strict mode
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
