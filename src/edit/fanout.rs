//! Data-parallel fan-out over a command's references.
//!
//! Splits the references across scoped threads with a join barrier,
//! falling back to sequential execution for small batches and on WASM
//! where threads are unavailable.
//!
//! # Safety contract (upheld by callers)
//!
//! Parallel application over the shared live tree is only sound when no
//! two references in one batch touch overlapping subtrees — neither may
//! target an ancestor or descendant of another's target, and callbacks
//! must stay inside the node they receive. The crate documents this as
//! a caller contract and does not detect violations; batching
//! overlapping edits into one command is a caller bug.

use super::action::EditResult;

/// Reference count below which the fan-out is not worth thread
/// overhead: a typical command touches a handful of selected objects.
const PARALLEL_THRESHOLD: usize = 16;

/// Applies `f` to every item, in parallel for large batches.
///
/// Every item is attempted regardless of other items' outcomes; if any
/// fail, the first error (in item order) is returned after the join.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn for_each<T, F>(items: &[T], f: F) -> EditResult
where
    T: Sync,
    F: Fn(&T) -> EditResult + Sync,
{
    if items.len() < PARALLEL_THRESHOLD {
        return run_sequential(items, &f);
    }

    let num_threads = std::thread::available_parallelism().map_or(1, |n| n.get());
    let batch_size = (items.len() / num_threads).max(1);

    let f = &f;
    let mut result = Ok(());
    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for chunk in items.chunks(batch_size) {
            handles.push(scope.spawn(move || run_sequential(chunk, f)));
        }
        for handle in handles {
            let chunk_result = match handle.join() {
                Ok(r) => r,
                Err(payload) => std::panic::resume_unwind(payload),
            };
            if result.is_ok() {
                result = chunk_result;
            }
        }
    });
    result
}

/// WASM fallback: sequential execution (no threads available).
#[cfg(target_arch = "wasm32")]
pub(crate) fn for_each<T, F>(items: &[T], f: F) -> EditResult
where
    T: Sync,
    F: Fn(&T) -> EditResult + Sync,
{
    run_sequential(items, &f)
}

fn run_sequential<T, F>(items: &[T], f: &F) -> EditResult
where
    F: Fn(&T) -> EditResult,
{
    let mut first = Ok(());
    for item in items {
        if let Err(e) = f(item) {
            if first.is_ok() {
                first = Err(e);
            }
        }
    }
    first
}
