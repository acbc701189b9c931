use std::cell::Cell;
use std::rc::Rc;

/// Shared cancellation flag for an in-flight venue map load.
///
/// Single-threaded by construction: the viewer and the host's fetch task
/// live on the same event loop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let held_by_task = token.clone();
        assert!(!held_by_task.is_cancelled());
        token.cancel();
        assert!(held_by_task.is_cancelled());
    }
}
