//! Client-side table plumbing: filtering, sorting, and pagination over an
//! already-fetched array of readings. The admin screen fetches the full
//! dataset once and everything here operates on that cached copy.

use crate::types::Reading;

/// Date filter is an exact match on the formatted `YYYY-MM-DD`; location is
/// a case-insensitive substring; both must hold when both are set.
pub fn filter_readings(rows: &[Reading], date: &str, location: &str) -> Vec<Reading> {
    let location = location.to_lowercase();
    rows.iter()
        .filter(|row| date.is_empty() || row.date == date)
        .filter(|row| location.is_empty() || row.location.to_lowercase().contains(&location))
        .cloned()
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    Location,
    PhValue,
    Temperature,
    Turbidity,
    Date,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

pub fn sort_readings(rows: &mut [Reading], field: SortField, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ordering = match field {
            SortField::Location => a.location.cmp(&b.location),
            SortField::PhValue => a.ph_value.total_cmp(&b.ph_value),
            SortField::Temperature => a.temperature.total_cmp(&b.temperature),
            SortField::Turbidity => a.turbidity.total_cmp(&b.turbidity),
            // Zero-padded ISO dates order correctly as strings; ties break
            // on time so rows within a day stay chronological.
            SortField::Date => a.date.cmp(&b.date).then(a.time.cmp(&b.time)),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Rows of the 1-based `page`.
pub fn page_slice(rows: &[Reading], page: usize, per_page: usize) -> &[Reading] {
    if per_page == 0 || page == 0 {
        return &[];
    }
    let start = (page - 1) * per_page;
    if start >= rows.len() {
        return &[];
    }
    let end = (start + per_page).min(rows.len());
    &rows[start..end]
}

/// One element of the pagination strip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Fixed-width window of page links centered on the current page, plus
/// first/last links (with ellipses) whenever the window doesn't touch the
/// bounds.
pub fn page_window(current: usize, total: usize, visible: usize) -> Vec<PageItem> {
    if total <= 1 || visible == 0 {
        return Vec::new();
    }
    let start = current.saturating_sub(visible / 2).max(1);
    let end = (start + visible - 1).min(total);

    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page(1));
    }
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    for page in start..=end {
        items.push(PageItem::Page(page));
    }
    if end < total - 1 {
        items.push(PageItem::Ellipsis);
    }
    if end < total {
        items.push(PageItem::Page(total));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(id: i64, location: &str, ph: f64, date: &str) -> Reading {
        Reading {
            id,
            location: location.to_string(),
            ph_value: ph,
            temperature: 20.0,
            turbidity: 3.0,
            date: date.to_string(),
            time: "12:00:00".to_string(),
        }
    }

    #[test]
    fn location_filter_is_case_insensitive_substring() {
        let rows = vec![
            reading(1, "Amsterdam", 7.0, "2026-08-01"),
            reading(2, "Rams Creek", 7.1, "2026-08-01"),
            reading(3, "Boston", 7.2, "2026-08-01"),
        ];
        let hits = filter_readings(&rows, "", "ams");
        let names: Vec<&str> = hits.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(names, vec!["Amsterdam", "Rams Creek"]);
    }

    #[test]
    fn date_and_location_filters_are_anded() {
        let rows = vec![
            reading(1, "Amsterdam", 7.0, "2026-08-01"),
            reading(2, "Amsterdam", 7.1, "2026-08-02"),
            reading(3, "Boston", 7.2, "2026-08-01"),
        ];
        let hits = filter_readings(&rows, "2026-08-01", "ams");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn empty_filters_pass_everything() {
        let rows = vec![reading(1, "A", 7.0, "2026-08-01")];
        assert_eq!(filter_readings(&rows, "", "").len(), 1);
    }

    #[test]
    fn pagination_counts_and_slices() {
        let rows: Vec<Reading> = (1..=23)
            .map(|i| reading(i, "X", 7.0, "2026-08-01"))
            .collect();
        assert_eq!(page_count(rows.len(), 10), 3);

        let page2 = page_slice(&rows, 2, 10);
        assert_eq!(page2.len(), 10);
        assert_eq!(page2.first().unwrap().id, 11);
        assert_eq!(page2.last().unwrap().id, 20);

        assert_eq!(page_slice(&rows, 3, 10).len(), 3);
        assert!(page_slice(&rows, 4, 10).is_empty());
        assert_eq!(page_count(0, 10), 0);
    }

    #[test]
    fn sort_orders_locations_and_values() {
        let mut rows = vec![
            reading(1, "Boston", 7.5, "2026-08-02"),
            reading(2, "Amsterdam", 6.8, "2026-08-01"),
        ];
        sort_readings(&mut rows, SortField::Location, SortOrder::Asc);
        assert_eq!(rows[0].location, "Amsterdam");

        sort_readings(&mut rows, SortField::PhValue, SortOrder::Desc);
        assert_eq!(rows[0].ph_value, 7.5);

        sort_readings(&mut rows, SortField::Date, SortOrder::Asc);
        assert_eq!(rows[0].date, "2026-08-01");
    }

    #[test]
    fn window_inside_bounds_has_no_ellipsis() {
        assert_eq!(
            page_window(2, 3, 5),
            vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)],
        );
        assert!(page_window(1, 1, 5).is_empty());
    }

    #[test]
    fn window_far_from_both_bounds_gets_two_ellipses() {
        let items = page_window(10, 20, 5);
        assert_eq!(
            items,
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(8),
                PageItem::Page(9),
                PageItem::Page(10),
                PageItem::Page(11),
                PageItem::Page(12),
                PageItem::Ellipsis,
                PageItem::Page(20),
            ],
        );
    }

    #[test]
    fn window_touching_the_end_keeps_plain_last_link() {
        let items = page_window(19, 20, 5);
        assert_eq!(
            items,
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(17),
                PageItem::Page(18),
                PageItem::Page(19),
                PageItem::Page(20),
            ],
        );
    }
}
