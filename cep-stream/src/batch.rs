// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Snapshot helpers applied to a collected batch by the grouping and ordering sinks.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Partitions `batch` into buckets sharing the same key.
///
/// Bucket order is unspecified; inside a bucket the input order is kept.
///
/// # Errors
///
/// Returns the first error produced by `key_of`. No partial result is returned.
///
/// # Examples
///
/// ```
/// use cep_stream::batch::group_by_key;
/// use std::convert::Infallible;
///
/// let mut groups = group_by_key(vec![1, 2, 3, 4], |x| Ok::<_, Infallible>(x % 2)).unwrap();
/// groups.sort();
///
/// assert_eq!(groups, vec![vec![1, 3], vec![2, 4]]);
/// ```
pub fn group_by_key<T, K, F, Er>(batch: Vec<T>, mut key_of: F) -> Result<Vec<Vec<T>>, Er>
where
    K: Eq + Hash,
    F: FnMut(&T) -> Result<K, Er>,
{
    let mut buckets: HashMap<K, Vec<T>> = HashMap::new();
    for value in batch {
        let key = key_of(&value)?;
        buckets.entry(key).or_default().push(value);
    }
    Ok(buckets.into_values().collect())
}

/// Stable sort driven by a strict weak ordering predicate.
///
/// `before(x, y)` returns `true` when `x` must come before `y`. Elements for which
/// neither comes before the other keep their input order.
///
/// # Examples
///
/// ```
/// use cep_stream::batch::sort_stable_by;
///
/// let sorted = sort_stable_by(vec![(2, 'a'), (1, 'b'), (2, 'c')], |x, y| x.0 < y.0);
///
/// assert_eq!(sorted, vec![(1, 'b'), (2, 'a'), (2, 'c')]);
/// ```
pub fn sort_stable_by<T, F>(mut batch: Vec<T>, mut before: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> bool,
{
    batch.sort_by(|x, y| {
        if before(x, y) {
            Ordering::Less
        } else if before(y, x) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });
    batch
}
