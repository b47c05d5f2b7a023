use super::*;

// -----------------------------------------------------------------------
// SortKey
// -----------------------------------------------------------------------

#[test]
fn sort_key_parses_known_values() {
    assert_eq!(SortKey::parse("price-low"), SortKey::PriceLow);
    assert_eq!(SortKey::parse("price-high"), SortKey::PriceHigh);
    assert_eq!(SortKey::parse("square-feet"), SortKey::SquareFeet);
    assert_eq!(SortKey::parse("alphabetical"), SortKey::Alphabetical);
    assert_eq!(SortKey::parse("newest"), SortKey::Newest);
}

#[test]
fn sort_key_unknown_value_falls_back_to_newest() {
    assert_eq!(SortKey::parse("cheapest-first"), SortKey::Newest);
    assert_eq!(SortKey::parse(""), SortKey::Newest);
}

#[test]
fn sort_key_deserializes_unknown_value_as_newest() {
    let key: SortKey = serde_json::from_str("\"bogus\"").unwrap();
    assert_eq!(key, SortKey::Newest);
    let key: SortKey = serde_json::from_str("\"price-high\"").unwrap();
    assert_eq!(key, SortKey::PriceHigh);
}

#[test]
fn sort_key_serializes_kebab_case() {
    assert_eq!(
        serde_json::to_string(&SortKey::SquareFeet).unwrap(),
        "\"square-feet\""
    );
}

// -----------------------------------------------------------------------
// parse_minimum
// -----------------------------------------------------------------------

#[test]
fn parse_minimum_empty_is_none() {
    assert_eq!(parse_minimum(""), None);
    assert_eq!(parse_minimum("   "), None);
}

#[test]
fn parse_minimum_reads_leading_digits() {
    assert_eq!(parse_minimum("3"), Some(3));
    assert_eq!(parse_minimum(" 2+"), Some(2));
    assert_eq!(parse_minimum("4 beds"), Some(4));
}

#[test]
fn parse_minimum_garbage_is_none() {
    assert_eq!(parse_minimum("any"), None);
    assert_eq!(parse_minimum("-1"), None);
}

// -----------------------------------------------------------------------
// Query pairs
// -----------------------------------------------------------------------

#[test]
fn browse_defaults_encode_to_no_pairs() {
    assert!(FilterCriteria::browse_defaults().to_query_pairs().is_empty());
}

#[test]
fn to_query_pairs_includes_non_default_values() {
    let criteria = FilterCriteria {
        search_query: "  austin ".to_string(),
        price_min: Some(250_000.0),
        price_max: Some(900_000.0),
        bedrooms: Some(3),
        property_type: [PropertyType::Condo, PropertyType::House].into_iter().collect(),
        status: [PropertyStatus::ForSale].into_iter().collect(),
        sort_by: SortKey::PriceLow,
        ..FilterCriteria::default()
    };

    let pairs = criteria.to_query_pairs();
    assert_eq!(
        pairs,
        vec![
            ("search", "austin".to_string()),
            ("priceMin", "250000".to_string()),
            ("priceMax", "900000".to_string()),
            ("bedrooms", "3".to_string()),
            ("propertyType", "house,condo".to_string()),
            ("status", "for-sale".to_string()),
            ("sortBy", "price-low".to_string()),
        ]
    );
}

#[test]
fn to_query_pairs_writes_every_status_for_an_empty_set() {
    let criteria = FilterCriteria {
        status: BTreeSet::new(),
        ..FilterCriteria::browse_defaults()
    };
    let pairs = criteria.to_query_pairs();
    assert_eq!(pairs, vec![("status", "for-sale,for-rent,sold,pending".to_string())]);
    let decoded = FilterCriteria::from_query_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    assert_eq!(decoded.status.len(), PropertyStatus::ALL.len());
}

#[test]
fn to_query_pairs_keeps_values_the_browse_defaults_would_override() {
    let criteria = FilterCriteria {
        price_max: Some(3_500_000.0),
        status: PropertyStatus::ALL.into_iter().collect(),
        ..FilterCriteria::browse_defaults()
    };
    let pairs = criteria.to_query_pairs();
    let decoded = FilterCriteria::from_query_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    assert_eq!(decoded, criteria);
}

#[test]
fn from_query_pairs_starts_from_browse_defaults() {
    let criteria = FilterCriteria::from_query_pairs([("search", "Denver")]);
    assert_eq!(criteria.search_query, "Denver");
    assert_eq!(criteria.price_min, Some(0.0));
    assert_eq!(criteria.price_max, Some(BROWSE_PRICE_MAX));
    assert_eq!(criteria.status.len(), 2);
}

#[test]
fn from_query_pairs_round_trips_encoded_criteria() {
    let original = FilterCriteria {
        search_query: "lake".to_string(),
        price_min: Some(100_000.0),
        price_max: Some(500_000.0),
        bedrooms: Some(2),
        bathrooms: Some(1),
        property_type: [PropertyType::Townhouse].into_iter().collect(),
        status: [PropertyStatus::Pending, PropertyStatus::Sold].into_iter().collect(),
        sort_by: SortKey::SquareFeet,
    };
    let pairs = original.to_query_pairs();
    let decoded =
        FilterCriteria::from_query_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    assert_eq!(decoded, original);
}

#[test]
fn from_query_pairs_ignores_invalid_values() {
    let criteria = FilterCriteria::from_query_pairs([
        ("priceMin", "cheap"),
        ("propertyType", "castle,condo"),
        ("unknown", "x"),
        ("sortBy", "weird"),
    ]);
    assert_eq!(criteria.price_min, Some(0.0));
    assert_eq!(
        criteria.property_type,
        [PropertyType::Condo].into_iter().collect()
    );
    assert_eq!(criteria.sort_by, SortKey::Newest);
}

// -----------------------------------------------------------------------
// Query strings
// -----------------------------------------------------------------------

#[test]
fn query_string_escapes_reserved_characters() {
    let criteria = FilterCriteria {
        search_query: "Smith & Sons = 100% café".to_string(),
        ..FilterCriteria::browse_defaults()
    };
    let encoded = criteria.to_query_string();
    assert_eq!(encoded, "search=Smith+%26+Sons+%3D+100%25+caf%C3%A9");
    assert_eq!(FilterCriteria::from_query_string(&encoded), criteria);
}

#[test]
fn query_string_accepts_leading_question_mark_and_full_url() {
    let bare = FilterCriteria::from_query_string("?search=lake+view&priceMin=100000");
    assert_eq!(bare.search_query, "lake view");
    assert_eq!(bare.price_min, Some(100_000.0));

    let full = FilterCriteria::from_query_string(
        "https://homes.example/browse?search=lake%20view&sortBy=price-low",
    );
    assert_eq!(full.search_query, "lake view");
    assert_eq!(full.sort_by, SortKey::PriceLow);
}

#[test]
fn empty_query_string_is_browse_defaults() {
    assert_eq!(FilterCriteria::from_query_string(""), FilterCriteria::browse_defaults());
    assert_eq!(FilterCriteria::browse_defaults().to_query_string(), "");
}
