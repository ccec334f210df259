//! Restartable walk over an ordered list, e.g. a user's friends.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

/// Ordered, fixed list of entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster<T> {
    entries: Vec<T>,
}

impl<T> Roster<T> {
    #[must_use]
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh cursor positioned before the first entry.
    #[must_use]
    pub fn cursor(&self) -> RosterCursor<'_, T> {
        RosterCursor { entries: &self.entries, index: 0 }
    }
}

impl<T> From<Vec<T>> for Roster<T> {
    fn from(entries: Vec<T>) -> Self {
        Self::new(entries)
    }
}

impl<T> FromIterator<T> for Roster<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Roster<T> {
    type Item = &'a T;
    type IntoIter = RosterCursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

/// Yields each entry once, in order, then `None` until [`RosterCursor::restart`].
/// Not fused: a restarted cursor yields again after returning `None`.
#[derive(Clone, Debug)]
pub struct RosterCursor<'a, T> {
    entries: &'a [T],
    index: usize,
}

impl<T> RosterCursor<'_, T> {
    pub fn restart(&mut self) {
        self.index = 0;
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<'a, T> Iterator for RosterCursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.index)?;
        self.index += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for RosterCursor<'_, T> {}
