//! Page arithmetic and compact page-number lists.
//!
//! # Design
//! - Every function clamps its inputs; callers never see an invalid page.
//! - The compact list keeps the first page, the last page, and a window around the current one.

/// Pages shown on each side of the current page.
pub const PAGE_WINDOW_RADIUS: usize = 2;

/// Entry of a compact page list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    /// A selectable page number.
    Page(usize),
    /// A collapsed run of pages.
    Ellipsis,
}

/// Number of pages needed for `total_items`, never less than one.
#[must_use]
pub const fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    let pages = total_items.div_ceil(page_size);
    if pages == 0 { 1 } else { pages }
}

/// Clamp a 1-based page into `[1, total_pages]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Page numbers to render, with one ellipsis per gap.
#[must_use]
pub fn compact_page_list(current_page: usize, total_pages: usize) -> Vec<PageItem> {
    let total = total_pages.max(1);
    let current = clamp_page(current_page, total);
    let mut items = Vec::new();
    let mut previous: Option<usize> = None;
    for page in 1..=total {
        let visible = page == 1 || page == total || page.abs_diff(current) <= PAGE_WINDOW_RADIUS;
        if !visible {
            continue;
        }
        if previous.is_some_and(|prev| page - prev > 1) {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}

/// Everything a pagination control renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageNav {
    /// Clamped current page.
    pub current: usize,
    /// Page count, at least one.
    pub total_pages: usize,
    /// Compact page list.
    pub items: Vec<PageItem>,
}

impl PageNav {
    /// Build navigation for the given position.
    #[must_use]
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        let current = clamp_page(current_page, total_pages);
        Self {
            current,
            total_pages,
            items: compact_page_list(current, total_pages),
        }
    }

    /// First page.
    #[must_use]
    pub const fn first(&self) -> usize {
        1
    }

    /// Last page.
    #[must_use]
    pub const fn last(&self) -> usize {
        self.total_pages
    }

    /// Previous page, if any.
    #[must_use]
    pub const fn prev(&self) -> Option<usize> {
        if self.current > 1 {
            Some(self.current - 1)
        } else {
            None
        }
    }

    /// Next page, if any.
    #[must_use]
    pub const fn next(&self) -> Option<usize> {
        if self.current < self.total_pages {
            Some(self.current + 1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(items: &[PageItem]) -> Vec<usize> {
        items
            .iter()
            .filter_map(|item| match item {
                PageItem::Page(page) => Some(*page),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn single_page_has_one_entry() {
        assert_eq!(compact_page_list(1, 1), vec![PageItem::Page(1)]);
        assert_eq!(compact_page_list(1, 0), vec![PageItem::Page(1)]);
    }

    #[test]
    fn middle_page_collapses_both_sides() {
        use PageItem::{Ellipsis, Page};
        assert_eq!(
            compact_page_list(10, 20),
            vec![
                Page(1),
                Ellipsis,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(20)
            ]
        );
    }

    #[test]
    fn adjacent_window_has_no_ellipsis() {
        use PageItem::Page;
        assert_eq!(
            compact_page_list(3, 6),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn compact_lists_are_well_formed_for_all_positions() {
        for total in 1..=40 {
            for current in 1..=total {
                let items = compact_page_list(current, total);
                let numbers = pages(&items);
                assert_eq!(numbers.first(), Some(&1));
                assert_eq!(numbers.last(), Some(&total));
                assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
                assert!(numbers.contains(&current));
                assert!(matches!(items.first(), Some(PageItem::Page(1))));
                assert!(matches!(items.last(), Some(PageItem::Page(last)) if *last == total));
                for pair in items.windows(2) {
                    assert!(!(pair[0] == PageItem::Ellipsis && pair[1] == PageItem::Ellipsis));
                }
                for (index, item) in items.iter().enumerate() {
                    if *item == PageItem::Ellipsis {
                        let (PageItem::Page(before), PageItem::Page(after)) =
                            (items[index - 1], items[index + 1])
                        else {
                            panic!("ellipsis must sit between pages");
                        };
                        assert!(after - before > 1);
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        let nav = PageNav::new(50, 4);
        assert_eq!(nav.current, 4);
        assert_eq!(nav.next(), None);
        assert_eq!(nav.prev(), Some(3));
        assert_eq!(nav.last(), 4);
        let nav = PageNav::new(0, 4);
        assert_eq!(nav.current, 1);
        assert_eq!(nav.prev(), None);
        assert_eq!(nav.first(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(7, 3), 3);
        assert_eq!(total_pages(7, 0), 1);
    }
}
