use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::native_object::NativeObject;
use crate::core::value::{AnyArray, NativeValue};

/// Element types a [`NativeArray`] can hold.
///
/// Each raw element kind knows how to box its array into [`AnyArray`] so
/// arrays can be stored as fields of host objects and read back typed.
pub trait RawElement: Clone + PartialEq + fmt::Debug + 'static {
    fn into_any_array(array: NativeArray<Self>) -> AnyArray;

    fn from_any_array(array: &AnyArray) -> Option<NativeArray<Self>>;

    fn to_native(&self) -> NativeValue;
}

impl RawElement for f64 {
    fn into_any_array(array: NativeArray<Self>) -> AnyArray {
        AnyArray::Number(array)
    }

    fn from_any_array(array: &AnyArray) -> Option<NativeArray<Self>> {
        match array {
            AnyArray::Number(array) => Some(array.clone()),
            _ => None,
        }
    }

    fn to_native(&self) -> NativeValue {
        NativeValue::Number(*self)
    }
}

impl RawElement for i32 {
    fn into_any_array(array: NativeArray<Self>) -> AnyArray {
        AnyArray::Integer(array)
    }

    fn from_any_array(array: &AnyArray) -> Option<NativeArray<Self>> {
        match array {
            AnyArray::Integer(array) => Some(array.clone()),
            _ => None,
        }
    }

    fn to_native(&self) -> NativeValue {
        NativeValue::Number(f64::from(*self))
    }
}

impl RawElement for String {
    fn into_any_array(array: NativeArray<Self>) -> AnyArray {
        AnyArray::String(array)
    }

    fn from_any_array(array: &AnyArray) -> Option<NativeArray<Self>> {
        match array {
            AnyArray::String(array) => Some(array.clone()),
            _ => None,
        }
    }

    fn to_native(&self) -> NativeValue {
        NativeValue::String(self.clone())
    }
}

impl RawElement for NativeObject {
    fn into_any_array(array: NativeArray<Self>) -> AnyArray {
        AnyArray::Object(array)
    }

    fn from_any_array(array: &AnyArray) -> Option<NativeArray<Self>> {
        match array {
            AnyArray::Object(array) => Some(array.clone()),
            _ => None,
        }
    }

    fn to_native(&self) -> NativeValue {
        NativeValue::Object(self.clone())
    }
}

impl RawElement for NativeArray<f64> {
    fn into_any_array(array: NativeArray<Self>) -> AnyArray {
        AnyArray::NumberArray(array)
    }

    fn from_any_array(array: &AnyArray) -> Option<NativeArray<Self>> {
        match array {
            AnyArray::NumberArray(array) => Some(array.clone()),
            _ => None,
        }
    }

    fn to_native(&self) -> NativeValue {
        NativeValue::Array(AnyArray::Number(self.clone()))
    }
}

impl RawElement for NativeValue {
    fn into_any_array(array: NativeArray<Self>) -> AnyArray {
        AnyArray::Value(array)
    }

    fn from_any_array(array: &AnyArray) -> Option<NativeArray<Self>> {
        match array {
            AnyArray::Value(array) => Some(array.clone()),
            _ => None,
        }
    }

    fn to_native(&self) -> NativeValue {
        self.clone()
    }
}

/// Flat, 0-indexed, growable array owned by the host runtime.
///
/// Cloning the handle aliases the same storage: the host and any number of
/// adapters may hold it at once. Bounds follow host `splice`/`slice`/`fill`
/// semantics, so out-of-range positions are clamped rather than rejected.
pub struct NativeArray<R> {
    inner: Rc<RefCell<Vec<R>>>,
}

impl<R> Clone for NativeArray<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R> PartialEq for NativeArray<R> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<R: fmt::Debug> fmt::Debug for NativeArray<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(items) => f.debug_list().entries(items.iter()).finish(),
            Err(_) => f.write_str("NativeArray(<borrowed>)"),
        }
    }
}

impl<R> Default for NativeArray<R> {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl<R> NativeArray<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_vec(items: Vec<R>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(items)),
        }
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Returns `true` when both handles alias the same host storage.
    #[must_use]
    pub fn same_array(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Runs `read` against the current contents without copying them.
    pub fn with_slice<T>(&self, read: impl FnOnce(&[R]) -> T) -> T {
        read(&self.inner.borrow())
    }

    pub fn push(&self, item: R) {
        self.inner.borrow_mut().push(item);
    }

    pub fn pop(&self) -> Option<R> {
        self.inner.borrow_mut().pop()
    }

    /// Removes `delete_count` elements starting at `start` and inserts
    /// `items` in their place; returns the removed elements as a new array.
    ///
    /// `start` past the end is clamped to the length, so inserting there
    /// appends.
    pub fn splice<I>(&self, start: usize, delete_count: usize, items: I) -> NativeArray<R>
    where
        I: IntoIterator<Item = R>,
    {
        let items: Vec<R> = items.into_iter().collect();
        let mut inner = self.inner.borrow_mut();
        let start = start.min(inner.len());
        let end = start.saturating_add(delete_count).min(inner.len());
        let removed: Vec<R> = inner.splice(start..end, items).collect();
        NativeArray::from_vec(removed)
    }

    pub fn insert_at(&self, index: usize, item: R) {
        self.splice(index, 0, [item]);
    }

    pub fn remove(&self, index: usize) -> Option<R> {
        self.splice(index, 1, []).pop()
    }

    pub fn clear(&self) {
        let length = self.length();
        self.splice(0, length, []);
    }

    #[must_use]
    pub fn read_only(&self) -> HostArrayView<R> {
        HostArrayView {
            array: self.clone(),
        }
    }
}

impl<R: Clone> NativeArray<R> {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<R> {
        self.inner.borrow().get(index).cloned()
    }

    /// Replaces the element at `index`; positions outside the array are ignored.
    pub fn set(&self, index: usize, item: R) {
        self.fill(item, index, index.saturating_add(1));
    }

    /// Copies `start..end` into a new, independent array.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> NativeArray<R> {
        let inner = self.inner.borrow();
        let end = end.min(inner.len());
        let start = start.min(end);
        NativeArray::from_vec(inner[start..end].to_vec())
    }

    pub fn fill(&self, item: R, start: usize, end: usize) {
        let mut inner = self.inner.borrow_mut();
        let end = end.min(inner.len());
        let start = start.min(end);
        for slot in &mut inner[start..end] {
            *slot = item.clone();
        }
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<R> {
        self.inner.borrow().clone()
    }
}

impl<R: PartialEq> NativeArray<R> {
    #[must_use]
    pub fn index_of(&self, item: &R) -> Option<usize> {
        self.inner.borrow().iter().position(|entry| entry == item)
    }

    #[must_use]
    pub fn last_index_of(&self, item: &R) -> Option<usize> {
        self.inner.borrow().iter().rposition(|entry| entry == item)
    }
}

/// Read-only handle given to the host side of a shared array.
///
/// The adapter stays the only mutator; the host can observe the contents
/// at any time through this view.
pub struct HostArrayView<R> {
    array: NativeArray<R>,
}

impl<R> Clone for HostArrayView<R> {
    fn clone(&self) -> Self {
        Self {
            array: self.array.clone(),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for HostArrayView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostArrayView").field(&self.array).finish()
    }
}

impl<R: Clone + PartialEq> HostArrayView<R> {
    #[must_use]
    pub fn length(&self) -> usize {
        self.array.length()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<R> {
        self.array.get(index)
    }

    #[must_use]
    pub fn index_of(&self, item: &R) -> Option<usize> {
        self.array.index_of(item)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<R> {
        self.array.to_vec()
    }

    #[must_use]
    pub fn views(&self, array: &NativeArray<R>) -> bool {
        self.array.same_array(array)
    }
}
