//! Resizing of spawn lists to a target count.
//!
//! Lists shorter than the target are extended by replaying the original list from its
//! first element; longer lists are truncated from the end. Both forms here operate on a
//! single list. [`crate::spawn::SpawnRequest::resize`] applies the same target to the
//! position and kind lists of one deployment.
use crate::error::{Error, Result};

/// Resizes `items` in place to exactly `target` elements.
///
/// Appended element `i` (counting from zero among the appended ones) is a clone of
/// `items[i % len]` from the list as it was before the call.
///
/// Returns [`Error::EmptySource`] and leaves `items` untouched when it is empty and
/// `target > 0`.
pub fn resize_cyclic<T: Clone>(items: &mut Vec<T>, target: usize) -> Result<()> {
    let current = items.len();

    if target <= current {
        items.truncate(target);
        return Ok(());
    }

    if current == 0 {
        return Err(Error::EmptySource { target });
    }

    let missing = target - current;
    items.reserve(missing);
    for i in 0..missing {
        // i % current < current, so this only reads the original prefix.
        let item = items[i % current].clone();
        items.push(item);
    }

    Ok(())
}

/// Returns a copy of `items` resized to `target` elements.
///
/// Same semantics as [`resize_cyclic`], without mutating the input.
pub fn resized<T: Clone>(items: &[T], target: usize) -> Result<Vec<T>> {
    if items.is_empty() && target > 0 {
        return Err(Error::EmptySource { target });
    }
    Ok(items.iter().cycle().take(target).cloned().collect())
}
