use std::fmt;

use crate::session::ContextWindow;

const SEGMENTS: u64 = 5;
const FILLED: &str = "\u{25B0}";
const EMPTY: &str = "\u{25B1}";
/// Upper bound on rendered glyphs (2000% usage).
const MAX_GLYPHS: u64 = SEGMENTS * 20;

/// Context-window occupancy, ready to render as `▰▰▱▱▱ 45k/200k tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenGauge {
    pub current: u64,
    pub capacity: u64,
}

impl TokenGauge {
    /// Build a gauge from the session's context-window block. Returns `None`
    /// when the capacity is unknown (block absent, size absent or zero).
    pub fn from_context(ctx: Option<&ContextWindow>) -> Option<Self> {
        let ctx = ctx?;
        let capacity = ctx.context_window_size.filter(|&size| size > 0)?;
        let current = ctx.current_usage.map(|u| u.total()).unwrap_or(0);
        Some(Self { current, capacity })
    }

    /// Whole percent used, rounded down. Not clamped: over-capacity usage
    /// reports more than 100.
    pub fn percent(&self) -> u64 {
        self.current.saturating_mul(100) / self.capacity
    }

    /// Filled bar segments, one per 20%. Exceeds five past full capacity.
    pub fn filled_segments(&self) -> u64 {
        self.percent() / 20
    }

    /// The glyph bar. Over capacity it overflows with extra filled glyphs,
    /// up to `MAX_GLYPHS`.
    pub fn bar(&self) -> String {
        let filled = self.filled_segments().min(MAX_GLYPHS);
        let empty = SEGMENTS.saturating_sub(filled);
        FILLED.repeat(filled as usize) + &EMPTY.repeat(empty as usize)
    }
}

impl fmt::Display for TokenGauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}k/{}k tokens",
            self.bar(),
            self.current / 1000,
            self.capacity / 1000
        )
    }
}
