use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{FieldToolsError, Result};

/// Apply `f` to every value of `map`, keeping the keys.
pub fn map_values<K, V, U, F>(map: HashMap<K, V>, mut f: F) -> HashMap<K, U>
where
    K: Eq + Hash,
    F: FnMut(V) -> U,
{
    map.into_iter().map(|(k, v)| (k, f(v))).collect()
}

/// Split `items` into consecutive slices of at most `size` elements.
pub fn chunks<T>(items: &[T], size: usize) -> Result<std::slice::Chunks<'_, T>> {
    if size == 0 {
        return Err(FieldToolsError::InvalidArgument(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    Ok(items.chunks(size))
}

/// Lay `items` out in `n_columns` columns, filled top to bottom, and return
/// the rows. Short columns are padded with `None`.
///
/// ```
/// use fieldtools::utils::collections::make_rows;
///
/// let rows = make_rows(&[1, 2, 3, 4, 5], 3).unwrap();
/// assert_eq!(rows, vec![
///     vec![Some(1), Some(3), Some(5)],
///     vec![Some(2), Some(4), None],
/// ]);
/// ```
pub fn make_rows<T: Clone>(items: &[T], n_columns: usize) -> Result<Vec<Vec<Option<T>>>> {
    if n_columns == 0 {
        return Err(FieldToolsError::InvalidArgument(
            "number of columns must be greater than zero".to_string(),
        ));
    }
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let n_rows = items.len().div_ceil(n_columns);
    let columns: Vec<&[T]> = chunks(items, n_rows)?.collect();

    Ok((0..n_rows)
        .map(|row| columns.iter().map(|col| col.get(row).cloned()).collect())
        .collect())
}

/// Reverse the column order of a table. Rows are cut to the shortest row.
pub fn reverse_columns<T: Clone>(rows: &[Vec<T>]) -> Vec<Vec<T>> {
    let width = rows.iter().map(Vec::len).min().unwrap_or(0);
    rows.iter()
        .map(|row| row[..width].iter().rev().cloned().collect())
        .collect()
}

/// Apply each `(old, new)` substitution in turn.
pub fn replace_all(text: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(text.to_string(), |acc, (old, new)| acc.replace(old, new))
}
