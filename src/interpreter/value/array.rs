use std::fmt;

use crate::interpreter::value::core::Value;

/// A fixed-length array.
///
/// Slots hold `None` until first assigned. The element type is unset until the
/// first slot is filled, and every later assignment must match it. A
/// multi-dimensional array is an array whose elements are arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayValue {
    items:        Vec<Option<Value>>,
    element_type: Option<&'static str>,
}

impl ArrayValue {
    /// Builds an array with the given dimensions and every leaf slot
    /// unassigned. Each row is built in place.
    ///
    /// ```
    /// use ocr_erl::interpreter::value::array::ArrayValue;
    ///
    /// let grid = ArrayValue::with_dimensions(&[2, 3]);
    /// assert_eq!(grid.len(), 2);
    /// assert_eq!(grid.element_type(), Some("Array"));
    /// assert_eq!(grid.to_string(), "[ [ <Empty>, <Empty>, <Empty> ],\n  [ <Empty>, <Empty>, <Empty> ] ]");
    /// ```
    #[must_use]
    pub fn with_dimensions(dimensions: &[usize]) -> Self {
        match dimensions {
            [] => Self::default(),
            [length] => Self { items:        vec![None; *length],
                               element_type: None, },
            [length, rest @ ..] => {
                let rows = (0..*length).map(|_| Some(Value::Array(Self::with_dimensions(rest))));
                Self { items:        rows.collect(),
                       element_type: Some("Array"), }
            },
        }
    }

    /// Builds an array from values that all share one type.
    #[must_use]
    pub fn from_values(values: Vec<Value>) -> Self {
        let element_type = values.first().map(Value::type_name);
        Self { items: values.into_iter().map(Some).collect(),
               element_type }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Type name shared by the elements, once one has been assigned.
    #[must_use]
    pub const fn element_type(&self) -> Option<&'static str> {
        self.element_type
    }

    pub const fn set_element_type(&mut self, type_name: &'static str) {
        self.element_type = Some(type_name);
    }

    /// The slot at `index`; the inner `None` marks a slot never assigned.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Option<Value>> {
        self.items.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Option<Value>> {
        self.items.get_mut(index)
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let displayed: Vec<String> = self.items
                                         .iter()
                                         .map(|slot| match slot {
                                             None => "<Empty>".to_string(),
                                             Some(Value::String(text)) => format!("\"{text}\""),
                                             Some(value) => value.to_string(),
                                         })
                                         .collect();
        let separator = if self.element_type == Some("Array") { ",\n  " } else { ", " };
        write!(f, "[ {} ]", displayed.join(separator))
    }
}
