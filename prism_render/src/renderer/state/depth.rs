//! Depth testing state

/// Comparison function for depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFunc {
    /// Never pass
    Never,
    /// Pass if value < reference
    Less,
    /// Pass if value == reference
    Equal,
    /// Pass if value <= reference
    LessOrEqual,
    /// Pass if value > reference
    Greater,
    /// Pass if value != reference
    NotEqual,
    /// Pass if value >= reference
    GreaterOrEqual,
    /// Always pass
    Always,
}

/// Depth testing and writing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthState {
    /// Enable the depth test
    pub test_enabled: bool,
    /// Enable writing to the depth buffer
    pub write_enabled: bool,
    /// Depth comparison function
    pub func: CompareFunc,
}

impl Default for DepthState {
    fn default() -> Self {
        Self {
            test_enabled: true,
            write_enabled: true,
            func: CompareFunc::Less,
        }
    }
}

impl DepthState {
    /// Depth test and depth writes both off
    pub fn disabled() -> Self {
        Self {
            test_enabled: false,
            write_enabled: false,
            ..Self::default()
        }
    }

    /// Test against the depth buffer without writing to it
    pub fn read_only() -> Self {
        Self {
            write_enabled: false,
            ..Self::default()
        }
    }

    /// Write depth unconditionally; the test stays enabled with `Always`
    /// because GL skips depth writes entirely when the test is disabled
    pub fn write_only() -> Self {
        Self {
            func: CompareFunc::Always,
            ..Self::default()
        }
    }
}
