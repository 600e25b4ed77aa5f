//! Construction helpers used by configuration objects when they expose a
//! host array field as a list, plus builders going the other way.

use std::fmt;

use crate::core::{HostArrayView, NativeArray, NativeObject};
use crate::error::BridgeResult;

use super::array_list::{ArrayContainerList, ArrayList, ContainerList, KeyList};
use super::codec::{ArrayFactory, ElementCodec, Factory};
use super::container::{EnumKey, NativeArrayContainer, NativeObjectContainer};
use super::iter::{Iter, ListIter};

/// Wraps an optional host array; an absent array yields no list.
pub fn list_from<C>(array: Option<NativeArray<C::Raw>>) -> BridgeResult<Option<ArrayList<C>>>
where
    C: ElementCodec + Default,
{
    array.map(ArrayList::from_array).transpose()
}

pub fn container_list_from<E>(
    array: Option<NativeArray<NativeObject>>,
    factory: impl Factory<E> + 'static,
) -> BridgeResult<Option<ContainerList<E>>>
where
    E: NativeObjectContainer + Clone + PartialEq,
{
    array
        .map(|array| ContainerList::<E>::load_with_factory(array, factory))
        .transpose()
}

pub fn array_container_list_from<E>(
    array: Option<NativeArray<NativeArray<f64>>>,
    factory: impl ArrayFactory<E> + 'static,
) -> BridgeResult<Option<ArrayContainerList<E>>>
where
    E: NativeArrayContainer + Clone + PartialEq,
{
    array
        .map(|array| ArrayContainerList::<E>::load_with_array_factory(array, factory))
        .transpose()
}

#[must_use]
pub fn key_list_of<K: EnumKey>(values: &[K]) -> KeyList<K> {
    let mut list = KeyList::new();
    list.add_values(values);
    list
}

pub fn read_only_from<C>(array: Option<NativeArray<C::Raw>>) -> BridgeResult<Option<ReadOnlyList<C>>>
where
    C: ElementCodec + Default,
{
    Ok(list_from(array)?.map(ReadOnlyList::new))
}

/// Native array holding the objects behind `items`, in order.
#[must_use]
pub fn array_from_or_empty<E: NativeObjectContainer>(items: &[E]) -> NativeArray<NativeObject> {
    NativeArray::from_vec(
        items
            .iter()
            .map(|item| item.native_object().clone())
            .collect(),
    )
}

/// As [`array_from_or_empty`], but `None` for an empty slice.
#[must_use]
pub fn array_from_or_none<E: NativeObjectContainer>(
    items: &[E],
) -> Option<NativeArray<NativeObject>> {
    if items.is_empty() {
        return None;
    }
    Some(array_from_or_empty(items))
}

/// The array already backing `list`; no copy is made, so the host sees
/// later list mutations.
#[must_use]
pub fn array_from_list<C: ElementCodec>(list: &ArrayList<C>) -> NativeArray<C::Raw> {
    list.array().clone()
}

/// List view without mutators.
pub struct ReadOnlyList<C: ElementCodec> {
    list: ArrayList<C>,
}

impl<C: ElementCodec> ReadOnlyList<C> {
    #[must_use]
    pub fn new(list: ArrayList<C>) -> Self {
        Self { list }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.list.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<C::Element> {
        self.list.get(index)
    }

    #[must_use]
    pub fn index_of(&self, element: &C::Element) -> Option<usize> {
        self.list.index_of(element)
    }

    #[must_use]
    pub fn last_index_of(&self, element: &C::Element) -> Option<usize> {
        self.list.last_index_of(element)
    }

    #[must_use]
    pub fn contains(&self, element: &C::Element) -> bool {
        self.list.contains(element)
    }

    #[must_use]
    pub fn contains_all(&self, elements: &[C::Element]) -> bool {
        self.list.contains_all(elements)
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, C> {
        self.list.iter()
    }

    #[must_use]
    pub fn list_iter(&self) -> ListIter<'_, C> {
        self.list.list_iter()
    }

    pub fn list_iter_at(&self, index: usize) -> BridgeResult<ListIter<'_, C>> {
        self.list.list_iter_at(index)
    }

    #[must_use]
    pub fn host_view(&self) -> HostArrayView<C::Raw> {
        self.list.host_view()
    }
}

impl<'a, C: ElementCodec> IntoIterator for &'a ReadOnlyList<C> {
    type Item = C::Element;
    type IntoIter = Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<C: ElementCodec> fmt::Display for ReadOnlyList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, f)
    }
}

impl<C: ElementCodec> fmt::Debug for ReadOnlyList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnlyList").field(&self.list).finish()
    }
}
