//! Read-only view of a scientific data container.
//!
//! The sampler never touches the HDF5 library directly; it asks a
//! [`GridContainer`] whether paths exist and reads arrays and attributes
//! through it. Attribute storage variants (fixed-length byte strings,
//! variable-length strings, numbers) are collapsed into [`AttrValue`] here
//! so that callers only ever see text via [`GridContainer::attribute_text`].

use crate::error::SmapResult;

/// An attribute value as stored in the container.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Text attribute.
    Text(String),
    /// Byte-encoded attribute (fixed-length HDF5 strings, char arrays).
    Bytes(Vec<u8>),
    /// Numeric attribute.
    Number(f64),
}

impl AttrValue {
    /// Decode to text. Byte strings are decoded lossily and any
    /// trailing NUL padding is dropped.
    pub fn into_text(self) -> String {
        match self {
            AttrValue::Text(s) => s,
            AttrValue::Bytes(b) => String::from_utf8_lossy(&b)
                .trim_end_matches('\0')
                .to_string(),
            AttrValue::Number(n) => n.to_string(),
        }
    }
}

/// A dense array read from the container, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArray {
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
}

impl RawArray {
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> Self {
        Self { shape, values }
    }

    /// A one-dimensional array.
    pub fn vector(values: Vec<f64>) -> Self {
        Self {
            shape: vec![values.len()],
            values,
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Value at `(row, col)` of a 2D array.
    pub fn get_2d(&self, row: usize, col: usize) -> Option<f64> {
        match self.shape.as_slice() {
            [rows, cols] if row < *rows && col < *cols => self.values.get(row * cols + col).copied(),
            _ => None,
        }
    }
}

/// Read access to a granule's groups, datasets, and attributes.
///
/// Paths are `/`-separated; a leading `/` is optional.
pub trait GridContainer {
    /// Whether a top-level group with this name exists.
    fn has_group(&self, name: &str) -> bool;

    /// Whether a dataset exists at `path`.
    fn has_dataset(&self, path: &str) -> bool;

    /// Read a full dataset.
    fn read_array(&self, path: &str) -> SmapResult<RawArray>;

    /// Read one element of a 2D dataset.
    fn read_value(&self, path: &str, row: usize, col: usize) -> SmapResult<f64>;

    /// Attribute attached to a top-level group.
    fn group_attribute(&self, group: &str, name: &str) -> Option<AttrValue>;

    /// Attribute attached to the container root.
    fn root_attribute(&self, name: &str) -> Option<AttrValue>;

    /// First non-empty attribute among `group_names` on `group`, then
    /// `root_names` on the root, decoded to text.
    fn attribute_text(&self, group: &str, group_names: &[&str], root_names: &[&str]) -> Option<String> {
        let non_empty = |value: AttrValue| Some(value.into_text()).filter(|text| !text.is_empty());

        group_names
            .iter()
            .find_map(|name| self.group_attribute(group, name).and_then(non_empty))
            .or_else(|| {
                root_names
                    .iter()
                    .find_map(|name| self.root_attribute(name).and_then(non_empty))
            })
    }
}

/// Opens a container from downloaded bytes.
pub trait ContainerOpener: Send + Sync {
    fn open(&self, data: &[u8]) -> SmapResult<Box<dyn GridContainer>>;
}

/// Strip a leading `/` so absolute and relative paths compare equal.
pub(crate) fn normalize_path(path: &str) -> &str {
    path.trim_start_matches('/')
}
