/// A lockable holder that buffers writes while locked.
///
/// While locked, [`write`](Self::write) stashes the value as pending (last write wins) and
/// [`read`](Self::read) keeps returning the committed value. Unlocking does not flush; the
/// pending value is committed exactly once by the next `read` or `write` made while unlocked.
#[derive(Clone, Debug, Default)]
pub struct GuardedCell<T> {
    value: T,
    locked: bool,
    pending: Option<T>,
}

impl<T> GuardedCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            locked: false,
            pending: None,
        }
    }

    /// Committed value, flushing any pending write first when unlocked.
    pub fn read(&mut self) -> &T {
        self.flush();
        &self.value
    }

    /// Mutable access to the committed value, flushing first when unlocked.
    pub fn read_mut(&mut self) -> &mut T {
        self.flush();
        &mut self.value
    }

    /// Committed value without flushing.
    pub fn peek(&self) -> &T {
        &self.value
    }

    pub fn write(&mut self, value: T) {
        if self.locked {
            self.pending = Some(value);
            return;
        }
        self.flush();
        self.value = value;
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the cell, preferring a pending write over the committed value.
    pub fn into_inner(self) -> T {
        self.pending.unwrap_or(self.value)
    }

    fn flush(&mut self) {
        if self.locked {
            return;
        }
        if let Some(v) = self.pending.take() {
            self.value = v;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/guarded.rs"]
mod tests;
