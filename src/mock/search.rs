//! Search/filter/sort pipeline over the in-memory house collection.
//!
//! A pure function from (collection, query) to an ordered subsequence. The
//! filters are independent, order-insensitive, all-must-pass predicates;
//! sorting is stable and only applied for recognized sort keys.

use crate::models::{House, HouseQuery};

/// Sentinel city value meaning "do not filter by city".
pub const ALL_CITIES: &str = "all";

pub fn apply(houses: &[House], query: &HouseQuery) -> Vec<House> {
    let mut result: Vec<House> = houses
        .iter()
        .filter(|house| matches(house, query))
        .cloned()
        .collect();
    sort(&mut result, query);
    result
}

fn matches(house: &House, query: &HouseQuery) -> bool {
    if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
        let keyword = keyword.to_lowercase();
        let hit = house.title.to_lowercase().contains(&keyword)
            || house.address.to_lowercase().contains(&keyword)
            || house.description.to_lowercase().contains(&keyword)
            || house
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&keyword));
        if !hit {
            return false;
        }
    }

    // Bounds are inclusive and apply only when positive.
    if let Some(min) = query.min_price.filter(|p| *p > 0.0) {
        if house.price < min {
            return false;
        }
    }
    if let Some(max) = query.max_price.filter(|p| *p > 0.0) {
        if house.price > max {
            return false;
        }
    }

    if let Some(city) = query
        .city
        .as_deref()
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CITIES))
    {
        if !house.address.contains(city) {
            return false;
        }
    }

    // Inclusive-OR across the query's tag set.
    let tags = query.tag_list();
    if !tags.is_empty() && !tags.iter().any(|tag| house.tags.iter().any(|t| t == tag)) {
        return false;
    }

    if let Some(min_rating) = query.min_rating.filter(|r| *r > 0.0) {
        if house.rating < min_rating {
            return false;
        }
    }

    true
}

fn sort(houses: &mut [House], query: &HouseQuery) {
    let key = match query.sort_by.as_deref() {
        Some(key) if key != "default" => key,
        _ => return,
    };
    let ascending = query.sort_order.as_deref() == Some("asc");

    match key {
        "price" => houses.sort_by(|a, b| {
            let ord = a.price.total_cmp(&b.price);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }),
        "rating" => houses.sort_by(|a, b| {
            let ord = a.rating.total_cmp(&b.rating);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }),
        // Unrecognized sort keys leave the order unchanged.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::seed;

    fn query() -> HouseQuery {
        HouseQuery::default()
    }

    fn titles(houses: &[House]) -> Vec<&str> {
        houses.iter().map(|h| h.title.as_str()).collect()
    }

    fn prices(houses: &[House]) -> Vec<f64> {
        houses.iter().map(|h| h.price).collect()
    }

    #[test]
    fn empty_query_returns_all_in_input_order() {
        let houses = seed::houses();
        let result = apply(&houses, &query());
        assert_eq!(titles(&result), titles(&houses));
    }

    #[test]
    fn keyword_matches_title_address_description_or_tag() {
        let houses = seed::houses();

        // Title, case-insensitively.
        let by_title = apply(
            &houses,
            &HouseQuery {
                keyword: Some("SEAVIEW".to_string()),
                ..query()
            },
        );
        assert_eq!(titles(&by_title), vec!["Seaview Twin Room"]);

        // Address substring.
        let by_address = apply(
            &houses,
            &HouseQuery {
                keyword: Some("beijing".to_string()),
                ..query()
            },
        );
        assert_eq!(by_address.len(), 2);

        // Tag substring.
        let by_tag = apply(
            &houses,
            &HouseQuery {
                keyword: Some("courtyard".to_string()),
                ..query()
            },
        );
        assert_eq!(titles(&by_tag), vec!["Historic Courtyard Home"]);

        // No match.
        let none = apply(
            &houses,
            &HouseQuery {
                keyword: Some("submarine".to_string()),
                ..query()
            },
        );
        assert!(none.is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let houses = seed::houses();
        let result = apply(
            &houses,
            &HouseQuery {
                min_price: Some(328.0),
                max_price: Some(458.0),
                ..query()
            },
        );
        assert_eq!(prices(&result), vec![458.0, 328.0]);
    }

    #[test]
    fn non_positive_bounds_are_no_ops() {
        let houses = seed::houses();
        let result = apply(
            &houses,
            &HouseQuery {
                min_price: Some(0.0),
                max_price: Some(-1.0),
                ..query()
            },
        );
        assert_eq!(result.len(), houses.len());
    }

    #[test]
    fn city_filter_uses_address_containment_and_all_sentinel() {
        let houses = seed::houses();
        let sanya = apply(
            &houses,
            &HouseQuery {
                city: Some("Sanya".to_string()),
                ..query()
            },
        );
        assert_eq!(titles(&sanya), vec!["Seaview Twin Room"]);

        let all = apply(
            &houses,
            &HouseQuery {
                city: Some(ALL_CITIES.to_string()),
                ..query()
            },
        );
        assert_eq!(all.len(), houses.len());
    }

    #[test]
    fn tag_filter_is_inclusive_or() {
        let houses = seed::houses();
        // "twin" only matches house 1, "metro" only house 2; the set
        // matches both.
        let result = apply(
            &houses,
            &HouseQuery {
                tags: Some("twin,metro".to_string()),
                ..query()
            },
        );
        assert_eq!(result.len(), 2);

        let none = apply(
            &houses,
            &HouseQuery {
                tags: Some("helipad".to_string()),
                ..query()
            },
        );
        assert!(none.is_empty());
    }

    #[test]
    fn min_rating_is_inclusive_and_positive_only() {
        let houses = seed::houses();
        let result = apply(
            &houses,
            &HouseQuery {
                min_rating: Some(4.8),
                ..query()
            },
        );
        assert_eq!(prices(&result), vec![458.0, 688.0]);

        let unfiltered = apply(
            &houses,
            &HouseQuery {
                min_rating: Some(0.0),
                ..query()
            },
        );
        assert_eq!(unfiltered.len(), houses.len());
    }

    #[test]
    fn sort_by_price_ascending() {
        let houses = seed::houses();
        let result = apply(
            &houses,
            &HouseQuery {
                sort_by: Some("price".to_string()),
                sort_order: Some("asc".to_string()),
                ..query()
            },
        );
        assert_eq!(prices(&result), vec![328.0, 458.0, 688.0]);
    }

    #[test]
    fn sort_by_rating_defaults_to_descending() {
        let houses = seed::houses();
        let result = apply(
            &houses,
            &HouseQuery {
                sort_by: Some("rating".to_string()),
                ..query()
            },
        );
        let ratings: Vec<f64> = result.iter().map(|h| h.rating).collect();
        assert_eq!(ratings, vec![4.9, 4.8, 4.6]);
    }

    #[test]
    fn unknown_sort_key_and_default_sentinel_keep_input_order() {
        let houses = seed::houses();
        for key in ["popularity", "default"] {
            let result = apply(
                &houses,
                &HouseQuery {
                    sort_by: Some(key.to_string()),
                    sort_order: Some("asc".to_string()),
                    ..query()
                },
            );
            assert_eq!(titles(&result), titles(&houses));
        }
    }

    #[test]
    fn filters_compose_and_source_is_untouched() {
        let houses = seed::houses();
        let result = apply(
            &houses,
            &HouseQuery {
                keyword: Some("room".to_string()),
                city: Some("Beijing".to_string()),
                min_rating: Some(4.0),
                ..query()
            },
        );
        assert_eq!(titles(&result), vec!["Modern Queen Room"]);
        // The source collection is never mutated.
        assert_eq!(houses.len(), 3);
        assert_eq!(houses[0].price, 458.0);
    }
}
