/// A recyclable visual unit showing one backing item at a time
///
/// Slots never act on their own; the scroller tells them what to show.
pub trait ItemSlot<V> {
    /// Show `value` under the 1-based `index` label and remember the index
    fn bind(&mut self, index: usize, value: &V);

    /// Forget any bound item (padding slot beyond either end of the list)
    fn unbind(&mut self);

    /// Toggle the selected indicator
    fn set_selected(&mut self, selected: bool);

    fn is_selected(&self) -> bool;

    /// 1-based index of the bound item
    fn backing_index(&self) -> Option<usize>;
}

/// Plain in-memory slot: stores what it was told to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<V> {
    index: Option<usize>,
    value: Option<V>,
    selected: bool,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self {
            index: None,
            value: None,
            selected: false,
        }
    }
}

impl<V> Slot<V> {
    /// Index label as displayed ("7"), empty for padding slots
    pub fn label(&self) -> String {
        self.index.map(|i| i.to_string()).unwrap_or_default()
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.index.is_some()
    }
}

impl<V: Clone> ItemSlot<V> for Slot<V> {
    fn bind(&mut self, index: usize, value: &V) {
        self.index = Some(index);
        self.value = Some(value.clone());
    }

    fn unbind(&mut self) {
        self.index = None;
        self.value = None;
        self.selected = false;
    }

    #[inline]
    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    #[inline]
    fn is_selected(&self) -> bool {
        self.selected
    }

    #[inline]
    fn backing_index(&self) -> Option<usize> {
        self.index
    }
}
