//! Cursors over an [`ArrayList`].
//!
//! Both cursors read through the list on every step and keep nothing but a
//! position. They borrow the list, so the list itself cannot change while
//! a cursor is alive; a host writing to the shared native array in the
//! meantime is not detected; the cursor simply sees the new contents.
//! Removal goes through the list, never through a cursor.

use super::array_list::ArrayList;
use super::codec::ElementCodec;

/// Forward cursor starting at index 0.
pub struct Iter<'a, C: ElementCodec> {
    list: &'a ArrayList<C>,
    cursor: usize,
}

impl<'a, C: ElementCodec> Iter<'a, C> {
    pub(super) fn new(list: &'a ArrayList<C>) -> Self {
        Self { list, cursor: 0 }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor < self.list.size()
    }
}

impl<C: ElementCodec> Iterator for Iter<'_, C> {
    type Item = C::Element;

    // Raw values without an element representation are skipped.
    fn next(&mut self) -> Option<Self::Item> {
        while self.has_next() {
            let element = self.list.get(self.cursor);
            self.cursor += 1;
            if element.is_some() {
                return element;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.list.size().saturating_sub(self.cursor)))
    }
}

/// Bidirectional cursor.
///
/// The cursor sits between elements: `next` returns the element at
/// `next_index()` and moves right, `previous` moves left and returns the
/// element at the new position. Both steps skip raw values the codec cannot
/// map, so `has_next` may be `true` while `next` returns `None` when only
/// such values remain.
pub struct ListIter<'a, C: ElementCodec> {
    list: &'a ArrayList<C>,
    cursor: usize,
}

impl<'a, C: ElementCodec> ListIter<'a, C> {
    pub(super) fn new(list: &'a ArrayList<C>, cursor: usize) -> Self {
        Self { list, cursor }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor < self.list.size()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Moves left past raw values without an element representation.
    pub fn previous(&mut self) -> Option<C::Element> {
        while self.has_previous() {
            self.cursor -= 1;
            let element = self.list.get(self.cursor);
            if element.is_some() {
                return element;
            }
        }
        None
    }

    #[must_use]
    pub fn next_index(&self) -> usize {
        self.cursor
    }

    /// `None` at the start of the list.
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }
}

impl<C: ElementCodec> Iterator for ListIter<'_, C> {
    type Item = C::Element;

    // Raw values without an element representation are skipped, as in `Iter`.
    fn next(&mut self) -> Option<Self::Item> {
        while self.has_next() {
            let element = self.list.get(self.cursor);
            self.cursor += 1;
            if element.is_some() {
                return element;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.list.size().saturating_sub(self.cursor)))
    }
}
