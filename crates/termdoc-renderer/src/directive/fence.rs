//! Code fence tracking for directive scanning.
//!
//! Directive syntax inside fenced code blocks is documentation about the
//! directive, not an invocation of it.

/// Opening fence of the block currently being skipped.
#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
}

/// Tracks code fence state during line-by-line scanning.
///
/// Fences use three or more backticks or tildes. A closing fence uses the
/// same character, is at least as long as the opening one and carries no
/// info string.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the last line seen was inside (or opened/closed) a fence.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` for fence marker lines.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let Some((marker, len)) = fence_run(trimmed) else {
            return false;
        };

        match self.open {
            Some(open) => {
                let closes = marker == open.marker
                    && len >= open.len
                    && trimmed[len * marker.len_utf8()..].trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = Some(Fence { marker, len });
                true
            }
        }
    }
}

/// Leading run of three or more fence characters.
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    (len >= 3).then_some((marker, len))
}
