//! Folding many promises into one.

use crate::promise::Promise;

/// Collects an ordered collection of promises into one promise of a `Vec`.
///
/// The output vector follows the input order, whatever order the inputs
/// complete in. The result completes once every input has, and fails when
/// any input fails, reporting the error of the earliest failing position
/// when there are several.
///
/// An empty input resolves immediately with an empty vector.
///
/// The fold completes link by link on whichever thread decides the last
/// pending input, so finishing a very large collection uses stack depth
/// proportional to its length.
///
/// # Examples
///
/// ```rust,ignore
/// let all = sequence([fetch_a, fetch_b, fetch_c]);
/// ```
pub fn sequence<T, I>(stages: I) -> Promise<Vec<T>>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = Promise<T>>,
{
    let mut result = Promise::resolved(Vec::new());

    for stage in stages {
        result = result.combine(&stage, |mut values, value| {
            values.push(value);
            values
        });
    }

    result
}
