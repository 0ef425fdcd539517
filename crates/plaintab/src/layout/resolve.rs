//! Width negotiation and column paging.
//!
//! Every column starts at its preferred width. A page that is too narrow for
//! its line gets slack shared out, a page that is too wide gets the excess
//! taken back, both in proportion to each column's average content width.
//! Shares are rounded down and the leftover units go to the largest
//! remainders, so final widths do not depend on column order. Shrinking
//! never goes below a column's floor (its preferred minimum width). When
//! the floors alone do not fit, columns are peeled off the end into a new
//! page that starts with the id columns, and the remainder is negotiated
//! again.

use tracing::{debug, warn};

use super::column::Column;

/// The numbers negotiation needs from one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidthSpec {
    pub key: String,
    /// Never shrink below this.
    pub floor: usize,
    /// Starting width.
    pub preferred: usize,
    /// Never grow above this; `None` is unbounded.
    pub max: Option<usize>,
    /// Share weight: average content width, at least 1.
    pub weight: usize,
    pub spacing: usize,
    /// Wrapping disabled: never grows past the preferred width.
    pub rigid: bool,
    /// Repeated on every column page.
    pub id: bool,
}

impl WidthSpec {
    pub fn from_column(column: &Column, id: bool) -> Self {
        WidthSpec {
            key: column.key().to_string(),
            floor: column.preferred_min_width(),
            preferred: column.preferred_width(),
            max: column.policy().max_width,
            weight: column.avg_content_width().max(1),
            spacing: column.spacing(),
            rigid: !column.policy().wrap,
            id,
        }
    }
}

/// An ordered group of columns printed side by side, with their widths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnPage {
    pub keys: Vec<String>,
    pub widths: Vec<usize>,
    /// Total of widths and spacing.
    pub used: usize,
    /// The page is wider than the line even with every column at its floor.
    pub overflow: bool,
}

impl ColumnPage {
    /// Negotiated width of `key` on this page.
    pub fn width_of(&self, key: &str) -> Option<usize> {
        self.keys
            .iter()
            .position(|k| k == key)
            .and_then(|i| self.widths.get(i).copied())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }
}

/// Column pages for a whole column set, in print order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    pub pages: Vec<ColumnPage>,
}

impl ColumnLayout {
    pub fn pages(&self) -> &[ColumnPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether any page could not be fitted to the line.
    pub fn has_overflow(&self) -> bool {
        self.pages.iter().any(|p| p.overflow)
    }
}

fn used(specs: &[&WidthSpec], widths: &[usize]) -> usize {
    specs
        .iter()
        .zip(widths)
        .map(|(spec, width)| width + spec.spacing)
        .sum()
}

fn floor_total(specs: &[&WidthSpec]) -> usize {
    specs.iter().map(|spec| spec.floor + spec.spacing).sum()
}

/// Negotiate widths for one page of columns.
///
/// The result fits `linesize` whenever the floors do.
pub fn negotiate(specs: &[&WidthSpec], linesize: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = specs.iter().map(|spec| spec.preferred).collect();
    let total = used(specs, &widths);
    if total < linesize {
        grow(specs, &mut widths, linesize);
    } else if total > linesize {
        shrink(specs, &mut widths, linesize);
    }
    widths
}

fn grow(specs: &[&WidthSpec], widths: &mut [usize], linesize: usize) {
    loop {
        let slack = linesize.saturating_sub(used(specs, widths));
        if slack == 0 {
            break;
        }

        // Columns only grow past their preferred width once all of them
        // have reached it.
        let below_preferred = specs
            .iter()
            .zip(widths.iter())
            .any(|(spec, width)| *width < spec.preferred);
        let cap = |spec: &WidthSpec| {
            let bound = if below_preferred || spec.rigid {
                spec.preferred
            } else {
                spec.max.unwrap_or(usize::MAX)
            };
            bound.min(linesize.saturating_sub(spec.spacing))
        };

        let eligible: Vec<usize> = (0..specs.len())
            .filter(|&i| widths[i] < cap(specs[i]))
            .collect();
        if eligible.is_empty() {
            break;
        }

        for (i, share) in shares(specs, &eligible, slack) {
            widths[i] = (widths[i] + share).min(cap(specs[i]));
        }
    }
}

fn shrink(specs: &[&WidthSpec], widths: &mut [usize], linesize: usize) {
    loop {
        let excess = used(specs, widths).saturating_sub(linesize);
        if excess == 0 {
            break;
        }

        let eligible: Vec<usize> = (0..specs.len())
            .filter(|&i| widths[i] > specs[i].floor)
            .collect();
        if eligible.is_empty() {
            break;
        }

        for (i, share) in shares(specs, &eligible, excess) {
            widths[i] = widths[i].saturating_sub(share).max(specs[i].floor);
        }
    }
}

/// Split `budget` across the `eligible` columns in proportion to weight.
///
/// Each column gets the floor of its exact share. The units left over go
/// one apiece to the largest remainders, ties going to the heavier column
/// and then to the smaller key, so the split is the same in any column
/// order. The shares always add up to `budget`.
fn shares(specs: &[&WidthSpec], eligible: &[usize], budget: usize) -> Vec<(usize, usize)> {
    let total_weight = eligible
        .iter()
        .map(|&i| specs[i].weight)
        .sum::<usize>()
        .max(1);

    let mut shares: Vec<(usize, usize, usize)> = eligible
        .iter()
        .map(|&i| {
            let exact = budget * specs[i].weight;
            (i, exact / total_weight, exact % total_weight)
        })
        .collect();

    let mut leftover = budget - shares.iter().map(|&(_, share, _)| share).sum::<usize>();
    shares.sort_by(|&(a, _, rem_a), &(b, _, rem_b)| {
        rem_b
            .cmp(&rem_a)
            .then(specs[b].weight.cmp(&specs[a].weight))
            .then_with(|| specs[a].key.cmp(&specs[b].key))
    });
    for (_, share, _) in shares.iter_mut() {
        if leftover == 0 {
            break;
        }
        *share += 1;
        leftover -= 1;
    }

    shares
        .into_iter()
        .map(|(i, share, _)| (i, share))
        .collect()
}

fn build_page(specs: &[&WidthSpec], linesize: usize) -> ColumnPage {
    let widths = negotiate(specs, linesize);
    let used = used(specs, &widths);
    let overflow = used > linesize;
    if overflow {
        warn!(
            columns = ?specs.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
            used,
            linesize,
            "columns exceed the line width at their minimum widths"
        );
    }
    ColumnPage {
        keys: specs.iter().map(|spec| spec.key.clone()).collect(),
        widths,
        used,
        overflow,
    }
}

/// Split `specs` (in display order) into column pages that fit `linesize`.
///
/// Works through an explicit worklist: each pass emits one page and leaves
/// the id columns plus the peeled tail as the next group. Every pass peels
/// at least one non-id column off and keeps at least one, so the number of
/// non-id columns per group strictly decreases.
pub fn layout_columns(specs: &[WidthSpec], linesize: usize) -> ColumnLayout {
    let mut pages = Vec::new();
    if specs.is_empty() {
        pages.push(ColumnPage {
            keys: Vec::new(),
            widths: Vec::new(),
            used: 0,
            overflow: false,
        });
        return ColumnLayout { pages };
    }

    let ids: Vec<&WidthSpec> = specs.iter().filter(|spec| spec.id).collect();
    let mut pending: Vec<&WidthSpec> = specs.iter().collect();

    loop {
        let mut head = pending;
        let mut tail: Vec<&WidthSpec> = Vec::new();

        while floor_total(&head) > linesize && head.iter().filter(|s| !s.id).count() > 1 {
            let Some(last) = head.iter().rposition(|spec| !spec.id) else {
                break;
            };
            tail.insert(0, head.remove(last));
        }

        pages.push(build_page(&head, linesize));

        if tail.is_empty() {
            break;
        }
        debug!(
            page = pages.len(),
            peeled = ?tail.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
            "splitting columns onto a new page"
        );
        pending = ids.iter().copied().chain(tail).collect();
    }

    ColumnLayout { pages }
}


#[cfg(test)]
mod proptests {
    use std::collections::BTreeMap;

    use super::*;
    use proptest::prelude::*;

    fn arb_spec() -> impl Strategy<Value = WidthSpec> {
        (1usize..12, 0usize..12, proptest::option::of(1usize..30), 0usize..3, any::<bool>())
            .prop_map(|(floor, extra, max, spacing, rigid)| {
                let max = max.map(|m| m.max(floor));
                let preferred = match max {
                    Some(m) => (floor + extra).min(m),
                    None => floor + extra,
                };
                WidthSpec {
                    key: String::new(),
                    floor,
                    preferred,
                    max,
                    weight: preferred.max(1),
                    spacing,
                    rigid,
                    id: false,
                }
            })
    }

    proptest! {
        #[test]
        fn negotiated_widths_fit_when_floors_fit(
            specs in proptest::collection::vec(arb_spec(), 1..6),
            linesize in 10usize..120,
        ) {
            let refs: Vec<&WidthSpec> = specs.iter().collect();
            let widths = negotiate(&refs, linesize);
            for (spec, width) in specs.iter().zip(&widths) {
                prop_assert!(*width >= spec.floor);
                if let Some(max) = spec.max {
                    prop_assert!(*width <= max.max(spec.preferred));
                }
                if spec.rigid {
                    prop_assert!(*width <= spec.preferred);
                }
            }
            if floor_total(&refs) <= linesize {
                prop_assert!(used(&refs, &widths) <= linesize);
            }
        }

        #[test]
        fn permuting_columns_permutes_widths(
            pair in proptest::collection::vec(arb_spec(), 1..6)
                .prop_map(|specs| {
                    specs
                        .into_iter()
                        .enumerate()
                        .map(|(i, mut s)| { s.key = format!("c{}", i); s })
                        .collect::<Vec<_>>()
                })
                .prop_flat_map(|specs| (Just(specs.clone()), Just(specs).prop_shuffle())),
            linesize in 5usize..80,
        ) {
            let (specs, shuffled) = pair;
            let widths_by_key = |specs: &[WidthSpec]| -> BTreeMap<String, usize> {
                let refs: Vec<&WidthSpec> = specs.iter().collect();
                specs
                    .iter()
                    .map(|s| s.key.clone())
                    .zip(negotiate(&refs, linesize))
                    .collect()
            };
            prop_assert_eq!(widths_by_key(&specs), widths_by_key(&shuffled));
        }

        #[test]
        fn every_column_lands_on_exactly_one_page(
            specs in proptest::collection::vec(arb_spec(), 1..10),
            linesize in 5usize..60,
        ) {
            let specs: Vec<WidthSpec> = specs
                .into_iter()
                .enumerate()
                .map(|(i, mut s)| { s.key = format!("c{}", i); s })
                .collect();
            let layout = layout_columns(&specs, linesize);
            let placed: Vec<String> = layout.pages.iter().flat_map(|p| p.keys.clone()).collect();
            let expected: Vec<String> = specs.iter().map(|s| s.key.clone()).collect();
            prop_assert_eq!(placed, expected);
            for page in &layout.pages {
                prop_assert!(page.overflow || page.used <= linesize);
                prop_assert!(!page.overflow || page.keys.len() == 1);
            }
        }
    }
}
