//! Aggregation of the three category searches into one ranked collection

use std::cmp::Ordering;

use crate::models::{Category, Location, PlaceRecord};

/// Descending by review count, then by rating; absent values sort last.
#[must_use]
pub fn rank_order(a: &PlaceRecord, b: &PlaceRecord) -> Ordering {
    b.rating_count
        .cmp(&a.rating_count)
        .then_with(|| compare_rating(b.rating, a.rating))
}

/// Descending by review count only
#[must_use]
pub fn popularity_order(a: &PlaceRecord, b: &PlaceRecord) -> Ordering {
    b.rating_count.cmp(&a.rating_count)
}

fn compare_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Ranked places of one search. Never modified after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceCollection {
    records: Vec<PlaceRecord>,
}

impl PlaceCollection {
    /// Concatenate Lodging, Dining, Attraction and stable-sort by [`rank_order`]
    #[must_use]
    pub fn aggregate(
        lodging: &[PlaceRecord],
        dining: &[PlaceRecord],
        attractions: &[PlaceRecord],
    ) -> Self {
        let mut records = Vec::with_capacity(lodging.len() + dining.len() + attractions.len());
        records.extend_from_slice(lodging);
        records.extend_from_slice(dining);
        records.extend_from_slice(attractions);
        Self::ranked(records)
    }

    /// Rank an arbitrary sequence, keeping input order for ties
    #[must_use]
    pub fn ranked(mut records: Vec<PlaceRecord>) -> Self {
        records.sort_by(rank_order);
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaceRecord> {
        self.records.iter()
    }

    /// Records of one category, in ranked order
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &PlaceRecord> {
        self.records.iter().filter(move |r| r.category == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Everything one destination search produced
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Resolved destination centre
    pub destination: Location,
    lodging: Vec<PlaceRecord>,
    dining: Vec<PlaceRecord>,
    attractions: Vec<PlaceRecord>,
    collection: PlaceCollection,
}

impl SearchResults {
    #[must_use]
    pub fn new(
        destination: Location,
        lodging: Vec<PlaceRecord>,
        dining: Vec<PlaceRecord>,
        attractions: Vec<PlaceRecord>,
    ) -> Self {
        let collection = PlaceCollection::aggregate(&lodging, &dining, &attractions);
        Self {
            destination,
            lodging,
            dining,
            attractions,
            collection,
        }
    }

    /// One category as the API returned it, before aggregation
    #[must_use]
    pub fn category(&self, category: Category) -> &[PlaceRecord] {
        match category {
            Category::Lodging => &self.lodging,
            Category::Dining => &self.dining,
            Category::Attraction => &self.attractions,
        }
    }

    #[must_use]
    pub fn collection(&self) -> &PlaceCollection {
        &self.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(category: Category, name: &str, rating: Option<f64>, count: Option<u32>) -> PlaceRecord {
        let mut record = PlaceRecord::empty(category);
        record.name = name.to_string();
        record.rating = rating;
        record.rating_count = count;
        record
    }

    fn assert_ranked(records: &[PlaceRecord]) {
        for pair in records.windows(2) {
            assert_ne!(
                rank_order(&pair[0], &pair[1]),
                Ordering::Greater,
                "{} should not precede {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_aggregate_sorts_by_count_then_rating() {
        let lodging = vec![
            place(Category::Lodging, "h-small", Some(4.9), Some(10)),
            place(Category::Lodging, "h-big", Some(4.1), Some(900)),
        ];
        let dining = vec![place(Category::Dining, "r-big", Some(4.6), Some(900))];
        let attractions = vec![place(Category::Attraction, "t-mid", Some(4.0), Some(300))];

        let collection = PlaceCollection::aggregate(&lodging, &dining, &attractions);
        let names: Vec<_> = collection.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["r-big", "h-big", "t-mid", "h-small"]);
    }

    #[test]
    fn test_absent_values_sort_lowest() {
        let lodging = vec![
            place(Category::Lodging, "no-reviews", None, None),
            place(Category::Lodging, "zero", Some(0.0), Some(0)),
            place(Category::Lodging, "unrated", None, Some(5)),
            place(Category::Lodging, "rated", Some(3.0), Some(5)),
        ];

        let collection = PlaceCollection::aggregate(&lodging, &[], &[]);
        let names: Vec<_> = collection.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["rated", "unrated", "zero", "no-reviews"]);
    }

    #[test]
    fn test_ties_keep_category_order() {
        let lodging = vec![place(Category::Lodging, "h", Some(4.5), Some(100))];
        let dining = vec![
            place(Category::Dining, "r1", Some(4.5), Some(100)),
            place(Category::Dining, "r2", Some(4.5), Some(100)),
        ];
        let attractions = vec![place(Category::Attraction, "t", Some(4.5), Some(100))];

        let collection = PlaceCollection::aggregate(&lodging, &dining, &attractions);
        let names: Vec<_> = collection.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["h", "r1", "r2", "t"]);
    }

    #[test]
    fn test_ranking_is_sorted_and_idempotent() {
        let records: Vec<_> = (0..40u32)
            .map(|i| {
                let count = (i % 3 != 0).then_some((i * 37) % 11);
                let rating = (i % 4 != 0).then_some(f64::from((i * 13) % 50) / 10.0);
                place(Category::ALL[(i % 3) as usize], &format!("p{i}"), rating, count)
            })
            .collect();

        let once = PlaceCollection::ranked(records);
        assert_ranked(once.records());

        let twice = PlaceCollection::ranked(once.records().to_vec());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_search_results_keep_upstream_order() {
        let lodging = vec![
            place(Category::Lodging, "first", Some(3.0), Some(1)),
            place(Category::Lodging, "second", Some(5.0), Some(999)),
        ];
        let results = SearchResults::new(
            Location::new(0.0, 0.0, "X".to_string()),
            lodging,
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(results.category(Category::Lodging)[0].name, "first");
        assert_eq!(results.collection().records()[0].name, "second");
        assert!(results.category(Category::Dining).is_empty());
        assert_eq!(results.collection().of_category(Category::Lodging).count(), 2);
    }
}
