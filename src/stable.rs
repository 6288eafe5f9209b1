//! Stable sorting used by the ordering utility.
//!
//! A TimSort style merge sort without galloping, restricted to `Copy` entries so all merges are
//! plain safe copies through a scratch buffer. Unlike `slice::sort_by` it never panics when the
//! comparison is not a total order, which is required to keep NaN keys harmless.

/// Runs shorter than this are extended with insertion sort before merging.
const MIN_RUN: usize = 10;

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut is_less: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    merge_sort(v, &mut is_less);
}

#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub fn merge_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    if len < 2 {
        // These inputs are always sorted.
        return;
    }

    let mut buf: Vec<T> = Vec::with_capacity(len / 2 + 1);
    let mut runs: Vec<Run> = Vec::new();

    let mut start = 0;
    while start < len {
        let (streak_len, was_reversed) = find_streak(&v[start..], is_less);
        let mut end = start + streak_len;
        if was_reversed {
            v[start..end].reverse();
        }

        if end < len && end - start < MIN_RUN {
            let new_end = std::cmp::min(start + MIN_RUN, len);
            insertion_sort_shift_left(&mut v[start..new_end], end - start, is_less);
            end = new_end;
        }

        runs.push(Run {
            start,
            len: end - start,
        });
        start = end;

        while let Some(r) = collapse(&runs, len) {
            let left = runs[r];
            let right = runs[r + 1];
            merge(
                &mut v[left.start..right.start + right.len],
                left.len,
                &mut buf,
                is_less,
            );
            runs[r + 1] = Run {
                start: left.start,
                len: left.len + right.len,
            };
            runs.remove(r);
        }
    }

    debug_assert!(runs.len() == 1 && runs[0].start == 0 && runs[0].len == len);
}

#[derive(Clone, Copy, Debug)]
struct Run {
    start: usize,
    len: usize,
}

// Picks the next pair of adjacent runs to merge, enforcing the TimSort invariants on the top four
// runs. Once the last run reaches `stop` every remaining run is merged.
fn collapse(runs: &[Run], stop: usize) -> Option<usize> {
    let n = runs.len();
    if n >= 2
        && (runs[n - 1].start + runs[n - 1].len == stop
            || runs[n - 2].len <= runs[n - 1].len
            || (n >= 3 && runs[n - 3].len <= runs[n - 2].len + runs[n - 1].len)
            || (n >= 4 && runs[n - 4].len <= runs[n - 3].len + runs[n - 2].len))
    {
        if n >= 3 && runs[n - 3].len < runs[n - 1].len {
            Some(n - 3)
        } else {
            Some(n - 2)
        }
    } else {
        None
    }
}

/// Returns the length of the run at the start of `v` and whether it was strictly descending.
///
/// Only strictly descending runs are reported, reversing them can't swap equal elements.
fn find_streak<T, F>(v: &[T], is_less: &mut F) -> (usize, bool)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    if len < 2 {
        return (len, false);
    }

    let mut end = 2;

    if is_less(&v[1], &v[0]) {
        while end < len && is_less(&v[end], &v[end - 1]) {
            end += 1;
        }

        (end, true)
    } else {
        while end < len && !is_less(&v[end], &v[end - 1]) {
            end += 1;
        }

        (end, false)
    }
}

/// Sorts `v` assuming `v[..offset]` is already sorted.
fn insertion_sort_shift_left<T, F>(v: &mut [T], offset: usize, is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(offset != 0 && offset <= v.len());

    for i in offset..v.len() {
        let tmp = v[i];
        let mut hole = i;

        while hole > 0 && is_less(&tmp, &v[hole - 1]) {
            v[hole] = v[hole - 1];
            hole -= 1;
        }

        v[hole] = tmp;
    }
}

/// Merges the non-decreasing runs `v[..mid]` and `v[mid..]` in place, using `buf` as scratch
/// space for the left run.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn merge<T, F>(v: &mut [T], mid: usize, buf: &mut Vec<T>, is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(mid > 0 && mid < len);

    buf.clear();
    buf.extend_from_slice(&v[..mid]);

    let mut left = 0;
    let mut right = mid;
    let mut out = 0;

    // `out` never overtakes `right`, so no unread element of the right run is overwritten.
    while left < buf.len() && right < len {
        // Take from the left on ties to keep the merge stable.
        if is_less(&v[right], &buf[left]) {
            v[out] = v[right];
            right += 1;
        } else {
            v[out] = buf[left];
            left += 1;
        }
        out += 1;
    }

    let rest = &buf[left..];
    v[out..out + rest.len()].copy_from_slice(rest);
}

/// Reorders `v` so that `v[i]` becomes the element previously at `perm[i]`.
///
/// `perm` must be a permutation of `0..v.len()`, it is consumed as scratch space.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub fn apply_permutation<T>(v: &mut [T], perm: &mut [usize]) {
    assert_eq!(v.len(), perm.len());

    for start in 0..perm.len() {
        let mut current = start;
        // Follow the cycle, marking visited slots by pointing them at themselves.
        while perm[current] != start {
            let next = perm[current];
            v.swap(current, next);
            perm[current] = current;
            current = next;
        }
        perm[current] = current;
    }
}
