use std::fmt;

use tracing::{debug, trace, warn};

use crate::core::{HostArrayView, NativeArray, NativeObject, json};
use crate::error::{BridgeError, BridgeResult};

use super::codec::{
    ArrayContainerCodec, ArrayFactory, ContainerCodec, ElementCodec, Factory, IntegerCodec,
    KeyCodec, NumberCodec, ObjectCodec, StringCodec, ValueCodec,
};
use super::container::{NativeArrayContainer, NativeObjectContainer};
use super::iter::{Iter, ListIter};
use super::{BridgeConfig, OutOfRangeInsert};

pub type NumberList = ArrayList<NumberCodec>;
pub type IntegerList = ArrayList<IntegerCodec>;
pub type StringList = ArrayList<StringCodec>;
pub type ObjectList = ArrayList<ObjectCodec>;
pub type ValueList = ArrayList<ValueCodec>;
pub type KeyList<K> = ArrayList<KeyCodec<K>>;
pub type ContainerList<E> = ArrayList<ContainerCodec<E>>;
pub type ArrayContainerList<E> = ArrayList<ArrayContainerCodec<E>>;

/// Ordered list over a host-owned [`NativeArray`].
///
/// The native array is the source of truth the host reads. For codecs with
/// materialized elements the list also owns a companion sequence of
/// wrappers, kept index-aligned with the array: every mutation goes to both
/// views, one element at a time.
///
/// Index handling is asymmetric:
/// - `get`, `set` and `remove` with an index outside `0..size()` return
///   `None` and change nothing;
/// - `add_all_at` and `list_iter_at` reject invalid positions with
///   [`BridgeError::IndexOutOfBounds`];
/// - `add_at` past the end follows [`BridgeConfig::out_of_range_insert`].
///
/// Mutating the shared array behind the list's back (for example from the
/// host side) is not detected and leaves the two views diverged.
pub struct ArrayList<C: ElementCodec> {
    array: NativeArray<C::Raw>,
    companion: Option<Vec<C::Element>>,
    codec: C,
    config: BridgeConfig,
}

impl<C: ElementCodec + Default> ArrayList<C> {
    /// Creates an empty list over a fresh native array.
    #[must_use]
    pub fn new() -> Self {
        Self::with_codec(C::default())
    }

    /// Wraps an existing native array, hydrating wrappers if the codec
    /// materializes them.
    pub fn from_array(array: NativeArray<C::Raw>) -> BridgeResult<Self> {
        Self::load(array, C::default())
    }
}

impl<C: ElementCodec + Default> Default for ArrayList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ArrayList<ContainerCodec<E>>
where
    E: NativeObjectContainer + Clone + PartialEq,
{
    /// Wraps an existing array of host objects, building one wrapper per
    /// element with `factory`, in index order.
    pub fn load_with_factory(
        array: NativeArray<NativeObject>,
        factory: impl Factory<E> + 'static,
    ) -> BridgeResult<Self> {
        Self::load(array, ContainerCodec::with_factory(factory))
    }
}

impl<E> ArrayList<ArrayContainerCodec<E>>
where
    E: NativeArrayContainer + Clone + PartialEq,
{
    /// Wraps an existing array of host number arrays, building one wrapper
    /// per nested array with `factory`, in index order.
    pub fn load_with_array_factory(
        array: NativeArray<NativeArray<f64>>,
        factory: impl ArrayFactory<E> + 'static,
    ) -> BridgeResult<Self> {
        Self::load(array, ArrayContainerCodec::with_factory(factory))
    }
}

impl<C: ElementCodec> ArrayList<C> {
    #[must_use]
    pub fn with_codec(codec: C) -> Self {
        Self {
            array: NativeArray::new(),
            companion: C::MATERIALIZED.then(Vec::new),
            codec,
            config: BridgeConfig::default(),
        }
    }

    /// Wraps `array` as-is.
    ///
    /// Materializing codecs create the companion sequence here, once, without
    /// touching `array`. Fails with [`BridgeError::MissingFactory`] when the
    /// array is non-empty and the codec cannot create wrappers.
    pub fn load(array: NativeArray<C::Raw>, codec: C) -> BridgeResult<Self> {
        let companion = if C::MATERIALIZED {
            Some(hydrate(&array, &codec)?)
        } else {
            None
        };
        Ok(Self {
            array,
            companion,
            codec,
            config: BridgeConfig::default(),
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> BridgeConfig {
        self.config
    }

    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The shared native array backing this list.
    #[must_use]
    pub fn array(&self) -> &NativeArray<C::Raw> {
        &self.array
    }

    /// Read-only handle for the host side of the shared array.
    #[must_use]
    pub fn host_view(&self) -> HostArrayView<C::Raw> {
        self.array.read_only()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.array.length()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<C::Element> {
        if !self.check_range(index) {
            return None;
        }
        match &self.companion {
            Some(companion) => companion.get(index).cloned(),
            None => self
                .array
                .get(index)
                .and_then(|raw| self.codec.create(&raw)),
        }
    }

    /// Replaces the element at `index` and returns the previous one.
    pub fn set(&mut self, index: usize, element: C::Element) -> Option<C::Element> {
        if !self.check_range(index) {
            return None;
        }
        let raw = self.codec.unwrap(&element);
        let previous = match self.companion.as_mut().and_then(|c| c.get_mut(index)) {
            Some(slot) => Some(std::mem::replace(slot, element)),
            None => self
                .array
                .get(index)
                .and_then(|raw| self.codec.create(&raw)),
        };
        self.array.set(index, raw);
        trace!(index, "set list element");
        previous
    }

    /// Appends `element`. Always succeeds.
    pub fn add(&mut self, element: C::Element) -> bool {
        let raw = self.codec.unwrap(&element);
        if let Some(companion) = self.companion.as_mut() {
            companion.push(element);
        }
        self.array.push(raw);
        trace!(size = self.size(), "add list element");
        true
    }

    /// Inserts `element` at `index`, shifting later elements right.
    ///
    /// With [`OutOfRangeInsert::AppendAtEnd`] an index past the end appends,
    /// matching host `splice`; with [`OutOfRangeInsert::Reject`] it fails.
    pub fn add_at(&mut self, index: usize, element: C::Element) -> BridgeResult<()> {
        let len = self.size();
        let index = if index > len {
            match self.config.out_of_range_insert {
                OutOfRangeInsert::AppendAtEnd => {
                    warn!(index, len, "list insert past end, appending");
                    len
                }
                OutOfRangeInsert::Reject => {
                    return Err(BridgeError::IndexOutOfBounds { index, len });
                }
            }
        } else {
            index
        };

        let raw = self.codec.unwrap(&element);
        if let Some(companion) = self.companion.as_mut() {
            let position = index.min(companion.len());
            companion.insert(position, element);
        }
        self.array.insert_at(index, raw);
        trace!(index, size = self.size(), "insert list element");
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Option<C::Element> {
        if !self.check_range(index) {
            return None;
        }
        let raw = self.array.remove(index)?;
        trace!(index, size = self.size(), "remove list element");
        match self.companion.as_mut() {
            Some(companion) if index < companion.len() => Some(companion.remove(index)),
            _ => self.codec.create(&raw),
        }
    }

    /// Removes the first occurrence of `element`.
    pub fn remove_element(&mut self, element: &C::Element) -> bool {
        match self.index_of(element) {
            Some(index) => self.remove(index).is_some(),
            None => false,
        }
    }

    /// First position of `element`.
    ///
    /// Materialized lists compare wrappers (container wrappers compare by
    /// their backing host object); other lists compare raw values.
    #[must_use]
    pub fn index_of(&self, element: &C::Element) -> Option<usize> {
        match &self.companion {
            Some(companion) => companion.iter().position(|entry| entry == element),
            None => self.array.index_of(&self.codec.unwrap(element)),
        }
    }

    #[must_use]
    pub fn last_index_of(&self, element: &C::Element) -> Option<usize> {
        match &self.companion {
            Some(companion) => companion.iter().rposition(|entry| entry == element),
            None => self.array.last_index_of(&self.codec.unwrap(element)),
        }
    }

    #[must_use]
    pub fn contains(&self, element: &C::Element) -> bool {
        self.index_of(element).is_some()
    }

    pub fn clear(&mut self) {
        if let Some(companion) = self.companion.as_mut() {
            companion.clear();
        }
        self.array.clear();
        trace!("clear list");
    }

    /// Appends every value in order; returns `true` when `values` is not empty.
    pub fn add_values(&mut self, values: &[C::Element]) -> bool {
        self.add_all(values.iter().cloned())
    }

    /// Appends every element in order; returns `true` when anything was added.
    pub fn add_all<I>(&mut self, elements: I) -> bool
    where
        I: IntoIterator<Item = C::Element>,
    {
        let mut added = 0_usize;
        for element in elements {
            self.add(element);
            added += 1;
        }
        debug!(added, size = self.size(), "add all list elements");
        added > 0
    }

    /// Inserts every element starting at `index`, keeping their order.
    ///
    /// `index` may be `0..=size()`; anything else fails before the list is
    /// touched.
    pub fn add_all_at<I>(&mut self, index: usize, elements: I) -> BridgeResult<bool>
    where
        I: IntoIterator<Item = C::Element>,
    {
        let len = self.size();
        if index > len {
            return Err(BridgeError::IndexOutOfBounds { index, len });
        }
        let mut position = index;
        for element in elements {
            self.add_at(position, element)?;
            position += 1;
        }
        debug!(
            index,
            inserted = position - index,
            size = self.size(),
            "insert all list elements"
        );
        Ok(position > index)
    }

    /// Removes every occurrence of each element in `elements`.
    ///
    /// Stops early for an element whose match lies past the end of a native
    /// array shrunk by the host.
    pub fn remove_all(&mut self, elements: &[C::Element]) -> bool {
        let mut modified = false;
        for element in elements {
            while let Some(index) = self.index_of(element) {
                if self.remove(index).is_none() {
                    warn!(index, size = self.size(), "list views diverged, skipping removal");
                    break;
                }
                modified = true;
            }
        }
        debug!(modified, size = self.size(), "remove all list elements");
        modified
    }

    /// Keeps only elements contained in `elements`.
    ///
    /// An empty `elements` clears the list and returns `true` if anything
    /// was removed; it is never treated as a no-op. Raw values with no
    /// element representation are dropped as well.
    pub fn retain_all(&mut self, elements: &[C::Element]) -> bool {
        let mut modified = false;
        for index in (0..self.size()).rev() {
            let keep = self
                .get(index)
                .is_some_and(|element| elements.contains(&element));
            if !keep {
                self.remove(index);
                modified = true;
            }
        }
        debug!(modified, size = self.size(), "retain all list elements");
        modified
    }

    #[must_use]
    pub fn contains_all(&self, elements: &[C::Element]) -> bool {
        elements.iter().all(|element| self.contains(element))
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, C> {
        Iter::new(self)
    }

    #[must_use]
    pub fn list_iter(&self) -> ListIter<'_, C> {
        ListIter::new(self, 0)
    }

    /// List iterator whose first `next` returns the element at `index`.
    ///
    /// `index` may be `0..=size()`.
    pub fn list_iter_at(&self, index: usize) -> BridgeResult<ListIter<'_, C>> {
        let len = self.size();
        if index > len {
            return Err(BridgeError::IndexOutOfBounds { index, len });
        }
        Ok(ListIter::new(self, index))
    }

    /// Not supported: the native array is the only copy the host reads.
    pub fn to_array(&self) -> BridgeResult<Vec<C::Element>> {
        Err(BridgeError::Unsupported {
            operation: "to_array",
        })
    }

    /// Not supported, see [`ArrayList::to_array`].
    pub fn to_array_into(&self, _target: &mut [C::Element]) -> BridgeResult<usize> {
        Err(BridgeError::Unsupported {
            operation: "to_array_into",
        })
    }

    /// Not supported, see [`ArrayList::to_array`].
    pub fn sub_list(&self, _from: usize, _to: usize) -> BridgeResult<ArrayList<C>> {
        Err(BridgeError::Unsupported {
            operation: "sub_list",
        })
    }

    /// Compact JSON of the native array.
    pub fn to_json(&self) -> BridgeResult<String> {
        json::stringify_array(&self.array, self.config.compact_json_options())
    }

    /// Checks that the companion sequence still mirrors the native array.
    ///
    /// Always `true` for lists without a companion sequence.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        let Some(companion) = &self.companion else {
            return true;
        };
        self.array.with_slice(|raw| {
            raw.len() == companion.len()
                && raw
                    .iter()
                    .zip(companion)
                    .all(|(raw, element)| self.codec.unwrap(element) == *raw)
        })
    }

    fn check_range(&self, index: usize) -> bool {
        index < self.size()
    }
}

fn hydrate<C: ElementCodec>(array: &NativeArray<C::Raw>, codec: &C) -> BridgeResult<Vec<C::Element>> {
    if array.is_empty() {
        return Ok(Vec::new());
    }
    if !codec.can_create() {
        warn!(len = array.length(), "cannot hydrate list without a factory");
        return Err(BridgeError::MissingFactory);
    }

    let mut companion = Vec::with_capacity(array.length());
    array.with_slice(|raw| -> BridgeResult<()> {
        for (index, item) in raw.iter().enumerate() {
            let element = codec
                .create(item)
                .ok_or(BridgeError::UnmappedElement { index })?;
            companion.push(element);
        }
        Ok(())
    })?;
    debug!(count = companion.len(), "hydrated list companion sequence");
    Ok(companion)
}

impl<'a, C: ElementCodec> IntoIterator for &'a ArrayList<C> {
    type Item = C::Element;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C: ElementCodec> Extend<C::Element> for ArrayList<C> {
    fn extend<I: IntoIterator<Item = C::Element>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<C: ElementCodec + Default> FromIterator<C::Element> for ArrayList<C> {
    fn from_iter<I: IntoIterator<Item = C::Element>>(iter: I) -> Self {
        let mut list = Self::new();
        list.add_all(iter);
        list
    }
}

/// Renders the native array, not the wrappers.
impl<C: ElementCodec> fmt::Display for ArrayList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(rendered) => write!(f, "ArrayList [array={rendered}]"),
            Err(err) => write!(f, "ArrayList [array=<{err}>]"),
        }
    }
}

impl<C: ElementCodec> fmt::Debug for ArrayList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayList")
            .field("array", &self.array)
            .field("materialized", &C::MATERIALIZED)
            .field("config", &self.config)
            .finish()
    }
}
