//! Mapping from stored rows to the JSON objects served over HTTP.
//!
//! Each `*View` declares its fields in wire order; serde emits struct
//! fields in declaration order, so the rendered key order is stable.

pub mod format;
pub mod house;
pub mod news;

pub use format::*;
pub use house::*;
pub use news::*;

/// Renders a row set, preserving the order the store returned.
pub fn render_all<T, V>(rows: &[T]) -> Vec<V>
where
    V: for<'a> From<&'a T>,
{
    rows.iter().map(V::from).collect()
}
