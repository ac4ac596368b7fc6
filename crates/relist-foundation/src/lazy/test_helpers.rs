//! Fixtures shared by the lazy list tests.

use relist_ui_layout::{Constraints, MeasuredChild, Orientation};
use smallvec::smallvec;

use super::item_provider::{LazyLayoutItemProvider, SmallChildVec};

/// An in-memory data set with fixed main axis sizes.
///
/// Records every `measure` call so tests can assert on measurement work.
pub(crate) struct TestItems {
    pub sizes: Vec<f32>,
    pub keys: Vec<u64>,
    pub cross_axis_size: f32,
    pub orientation: Orientation,
    pub measured: Vec<usize>,
}

impl TestItems {
    pub fn uniform(count: usize, size: f32) -> Self {
        Self::with_sizes(vec![size; count])
    }

    pub fn with_sizes(sizes: Vec<f32>) -> Self {
        let keys = (0..sizes.len() as u64).collect();
        Self {
            sizes,
            keys,
            cross_axis_size: 100.0,
            orientation: Orientation::Vertical,
            measured: Vec::new(),
        }
    }

    pub fn with_keys(mut self, keys: Vec<u64>) -> Self {
        assert_eq!(keys.len(), self.sizes.len());
        self.keys = keys;
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    pub fn take_measured(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.measured)
    }
}

impl LazyLayoutItemProvider for TestItems {
    fn item_count(&self) -> usize {
        self.sizes.len()
    }

    fn get_key(&self, index: usize) -> u64 {
        self.keys[index]
    }

    fn measure(&mut self, index: usize, constraints: Constraints) -> SmallChildVec {
        self.measured.push(index);
        let main = self.sizes[index];
        let size = self.orientation.size(main, self.cross_axis_size);
        let (width, height) = constraints.constrain(size.width, size.height);
        smallvec![MeasuredChild::new(index as u64, width, height)]
    }
}
