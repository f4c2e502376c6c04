use std::cmp::Ordering;

use artview_core::Artwork;

/// Column the visible page is sorted by. Display only: the page window keeps
/// the API order, which is what bulk selection walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Page,
    Title,
    Place,
    Artist,
    StartDate,
    EndDate,
}

impl SortOrder {
    pub fn next(self) -> Self {
        match self {
            Self::Page => Self::Title,
            Self::Title => Self::Place,
            Self::Place => Self::Artist,
            Self::Artist => Self::StartDate,
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::Page,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Page => "page order",
            Self::Title => "title",
            Self::Place => "place",
            Self::Artist => "artist",
            Self::StartDate => "start date",
            Self::EndDate => "end date",
        }
    }
}

/// Missing values sort after present ones.
fn cmp_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let key = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_lowercase);
    match (key(a), key(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_year(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Indices into `records` in display order. Ties keep page order.
pub fn sorted_rows(records: &[Artwork], order: SortOrder, reversed: bool) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    let compare = |a: &Artwork, b: &Artwork| match order {
        SortOrder::Page => Ordering::Equal,
        SortOrder::Title => cmp_text(a.title.as_deref(), b.title.as_deref()),
        SortOrder::Place => cmp_text(a.place_of_origin.as_deref(), b.place_of_origin.as_deref()),
        SortOrder::Artist => cmp_text(a.artist_display.as_deref(), b.artist_display.as_deref()),
        SortOrder::StartDate => cmp_year(a.date_start, b.date_start),
        SortOrder::EndDate => cmp_year(a.date_end, b.date_end),
    };
    indices.sort_by(|&a, &b| compare(&records[a], &records[b]).then_with(|| a.cmp(&b)));
    if reversed {
        indices.reverse();
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(id: u64, title: Option<&str>) -> Artwork {
        let mut art = Artwork::with_id(id);
        art.title = title.map(String::from);
        art
    }

    #[test]
    fn page_order_is_identity() {
        let records: Vec<Artwork> = (1..=4).map(Artwork::with_id).collect();
        assert_eq!(sorted_rows(&records, SortOrder::Page, false), vec![0, 1, 2, 3]);
        assert_eq!(sorted_rows(&records, SortOrder::Page, true), vec![3, 2, 1, 0]);
    }

    #[test]
    fn titles_sort_case_insensitively_missing_last() {
        let records = vec![
            titled(1, Some("water lilies")),
            titled(2, None),
            titled(3, Some("American Gothic")),
            titled(4, Some("")),
            titled(5, Some("Nighthawks")),
        ];
        assert_eq!(sorted_rows(&records, SortOrder::Title, false), vec![2, 4, 0, 1, 3]);
    }

    #[test]
    fn dates_sort_numerically() {
        let mut records: Vec<Artwork> = (1..=3).map(Artwork::with_id).collect();
        records[0].date_start = Some(1942);
        records[1].date_start = Some(-500);
        records[2].date_start = Some(1884);
        assert_eq!(sorted_rows(&records, SortOrder::StartDate, false), vec![1, 2, 0]);
        assert_eq!(sorted_rows(&records, SortOrder::StartDate, true), vec![0, 2, 1]);
    }

    #[test]
    fn next_cycles_back_to_page_order() {
        let mut order = SortOrder::Page;
        for _ in 0..6 {
            order = order.next();
        }
        assert_eq!(order, SortOrder::Page);
    }
}
