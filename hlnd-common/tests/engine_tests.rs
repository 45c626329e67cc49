//! End-to-end tests of the filter and aggregation engine
//!
//! Tests cover:
//! - Unrestricted specs return the record set unchanged
//! - Every returned record satisfies every active predicate
//! - Anomaly-only filtering
//! - Undefined average over empty results
//! - Facet derivation round trip
//! - Entity table totals
//! - Worked flood/fair scenarios

use hlnd_common::facets::split_facet;
use hlnd_common::filter::as_subset;
use hlnd_common::{
    AggregationEngine, ArticleRecord, EntityCategory, FilterEngine, FilterSpec, RecordId,
    RecordStore, SampleReader, Selection,
};

/// Two-article fixture: a flood anomaly and an ordinary fair, both in Springfield
fn springfield() -> Vec<ArticleRecord> {
    vec![
        ArticleRecord {
            raw_text: Some("Flood hits Springfield".to_string()),
            topic_label: Some("weather".to_string()),
            sentiment_compound: Some(-0.6),
            anomaly_score: Some(0.9),
            is_anomaly: true,
            geo_cities: vec!["Springfield".to_string()],
            ..ArticleRecord::new(RecordId(0))
        },
        ArticleRecord {
            raw_text: Some("Local fair opens".to_string()),
            topic_label: Some("events".to_string()),
            sentiment_compound: Some(0.5),
            anomaly_score: Some(0.1),
            is_anomaly: false,
            geo_cities: vec!["Springfield".to_string()],
            ..ArticleRecord::new(RecordId(1))
        },
    ]
}

/// Larger mixed fixture with missing values sprinkled in
fn mixed() -> Vec<ArticleRecord> {
    let topics = [Some("weather"), Some("crime"), None, Some("sports"), Some("crime")];
    let cities: [&[&str]; 5] = [&["Pune"], &["Agra", "Delhi"], &[], &["Delhi"], &["Pune", "Pune"]];
    let texts = [
        Some("Monsoon RAIN floods Pune"),
        Some("Theft reported near the fort"),
        None,
        Some("Cricket final in Delhi"),
        Some("Rain delays trial"),
    ];
    let sentiments = [Some(-0.7), Some(-0.2), Some(0.0), None, Some(0.3)];
    let scores = [Some(0.95), None, Some(0.4), Some(0.2), Some(0.6)];

    (0..5)
        .map(|i| ArticleRecord {
            raw_text: texts[i].map(String::from),
            topic_label: topics[i].map(String::from),
            news_type: Some(if i % 2 == 0 { "local" } else { "national" }.to_string()),
            sentiment_compound: sentiments[i],
            anomaly_score: scores[i],
            is_anomaly: i % 2 == 0,
            geo_cities: cities[i].iter().map(|c| c.to_string()).collect(),
            geo_countries: vec!["India".to_string()],
            ..ArticleRecord::new(RecordId(i))
        })
        .collect()
}

#[test]
fn test_flood_scenario_city_and_anomaly() {
    let records = springfield();
    let spec = FilterSpec::builder()
        .cities(["Springfield"])
        .anomaly_only(true)
        .build()
        .unwrap();

    let subset = FilterEngine::apply(&spec, &records);
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].text(), Some("Flood hits Springfield"));

    let metrics = AggregationEngine::summarize(&subset);
    assert_eq!(metrics.total_count, 1);
    assert_eq!(metrics.average_sentiment, Some(-0.6));
}

#[test]
fn test_flood_scenario_lowercase_keyword() {
    let records = springfield();
    let spec = FilterSpec::builder().keyword("flood").build().unwrap();

    let subset = FilterEngine::apply(&spec, &records);
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].id, RecordId(0));
}

#[test]
fn test_unrestricted_returns_all_in_order() {
    let records = mixed();
    let subset = FilterEngine::apply(&FilterSpec::unrestricted(), &records);

    let ids: Vec<RecordId> = subset.iter().map(|r| r.id).collect();
    let expected: Vec<RecordId> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_full_ranges_keep_every_complete_record() {
    let store = RecordStore::from_records(mixed());
    let spec = FilterSpec::with_full_ranges(&store);
    let subset = FilterEngine::apply(&spec, store.all_records());

    let complete = store
        .all_records()
        .iter()
        .filter(|r| r.anomaly_score.is_some() && r.sentiment_compound.is_some())
        .count();
    assert_eq!(subset.len(), complete);
}

#[test]
fn test_every_result_satisfies_active_predicates() {
    let records = mixed();
    let specs = vec![
        FilterSpec::builder().cities(["Pune", "Delhi"]).build().unwrap(),
        FilterSpec::builder().topics(["crime"]).keyword("rain").build().unwrap(),
        FilterSpec::builder().news_types(["local"]).score_range(0.3, 1.0).build().unwrap(),
        FilterSpec::builder()
            .countries(["India"])
            .sentiment_range(-0.5, 0.5)
            .anomaly_only(true)
            .build()
            .unwrap(),
        FilterSpec::builder().topic_keyword("RIM").build().unwrap(),
    ];

    for spec in &specs {
        for record in FilterEngine::apply(spec, &records) {
            if let Selection::Specific(set) = &spec.city_selection {
                assert!(record.geo_cities.iter().any(|c| set.contains(c)));
            }
            if let Selection::Specific(set) = &spec.country_selection {
                assert!(record.geo_countries.iter().any(|c| set.contains(c)));
            }
            if let Selection::Specific(set) = &spec.topic_selection {
                assert!(record.topic().is_some_and(|t| set.contains(t)));
            }
            if let Selection::Specific(set) = &spec.news_type_selection {
                assert!(record.news_type.as_deref().is_some_and(|t| set.contains(t)));
            }
            if let Some(keyword) = &spec.keyword {
                let text = record.text().unwrap().to_lowercase();
                assert!(text.contains(keyword.as_str()));
            }
            if let Some(keyword) = &spec.topic_keyword {
                let topic = record.topic().unwrap().to_lowercase();
                assert!(topic.contains(keyword.as_str()));
            }
            if let Some(range) = &spec.score_range {
                assert!(range.contains(record.anomaly_score));
            }
            if let Some(range) = &spec.sentiment_range {
                assert!(range.contains(record.sentiment_compound));
            }
            if spec.anomaly_only {
                assert!(record.is_anomaly);
            }
        }
    }
}

#[test]
fn test_anomaly_only_flag() {
    let records = mixed();

    let only = FilterSpec::builder().anomaly_only(true).build().unwrap();
    let subset = FilterEngine::apply(&only, &records);
    assert!(!subset.is_empty());
    assert!(subset.iter().all(|r| r.is_anomaly));

    let any = FilterSpec::builder().anomaly_only(false).build().unwrap();
    let subset = FilterEngine::apply(&any, &records);
    assert!(subset.iter().any(|r| !r.is_anomaly));
}

#[test]
fn test_missing_values_fail_ranges_and_keywords() {
    let records = mixed();

    // Record 1 has no anomaly score even though the range is wide open
    let spec = FilterSpec::builder().score_range(-10.0, 10.0).build().unwrap();
    let subset = FilterEngine::apply(&spec, &records);
    assert!(subset.iter().all(|r| r.id != RecordId(1)));
    assert_eq!(subset.len(), 4);

    // Record 3 has no sentiment; no other predicate is active
    let spec = FilterSpec::builder().sentiment_range(-1.0, 1.0).build().unwrap();
    let subset = FilterEngine::apply(&spec, &records);
    let ids: Vec<RecordId> = subset.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RecordId(0), RecordId(1), RecordId(2), RecordId(4)]);

    // Record 2 has no text
    let spec = FilterSpec::builder().keyword("a").build().unwrap();
    assert!(FilterEngine::apply(&spec, &records)
        .iter()
        .all(|r| r.id != RecordId(2)));
}

#[test]
fn test_empty_result_degrades_gracefully() {
    let records = mixed();
    let spec = FilterSpec::builder().keyword("no such phrase").build().unwrap();
    let subset = FilterEngine::apply(&spec, &records);
    assert!(subset.is_empty());

    let metrics = AggregationEngine::summarize(&subset);
    assert_eq!(metrics.total_count, 0);
    assert!(metrics.average_sentiment.is_none());
    assert!(AggregationEngine::top_topics(&subset, 15).is_empty());
    assert_eq!(AggregationEngine::anomaly_breakdown(&subset).normal_count, 0);
    assert!(AggregationEngine::sentiment_histogram(&subset, 30).is_none());
    assert!(SampleReader::sample_titles(&subset, 10).is_empty());
    assert!(SampleReader::resolve(&subset, "Rain delays trial").is_none());
}

#[test]
fn test_geo_cities_round_trip() {
    for record in mixed() {
        let joined = record.geo_cities.join(",");
        assert_eq!(split_facet(&joined), record.geo_cities);
    }
    let derived = split_facet(" Pune ,, Delhi,");
    assert_eq!(split_facet(&derived.join(",")), derived);
}

#[test]
fn test_entity_counts_bounded_by_entries() {
    let mut records = mixed();
    records[0].ner_entities.gpe = vec!["Pune".into(), "India".into()];
    records[3].ner_entities.gpe = vec!["Delhi".into(), "India".into(), "Pune".into()];
    records[4].ner_entities.gpe = vec!["Pune".into()];

    let subset = as_subset(&records);
    let table = AggregationEngine::entity_frequencies(&subset, EntityCategory::Gpe, 10);
    let counted: usize = table.iter().map(|(_, n)| n).sum();
    let entries: usize = subset.iter().map(|r| r.entities(EntityCategory::Gpe).len()).sum();

    assert!(counted <= entries);
    assert_eq!(table[0], ("Pune".to_string(), 3));
    assert_eq!(table[1], ("India".to_string(), 2));
    assert_eq!(table[2], ("Delhi".to_string(), 1));

    let top_two = AggregationEngine::entity_frequencies(&subset, EntityCategory::Gpe, 2);
    assert_eq!(top_two.len(), 2);
}

#[test]
fn test_reader_follows_filtered_order() {
    let records = mixed();
    let spec = FilterSpec::builder().keyword("rain").build().unwrap();
    let subset = FilterEngine::apply(&spec, &records);

    let titles = SampleReader::sample_titles(&subset, 10);
    assert_eq!(titles, vec!["Monsoon RAIN floods Pune", "Rain delays trial"]);

    let chosen = SampleReader::resolve(&subset, titles[1]).unwrap();
    assert_eq!(chosen.id, RecordId(4));
}
