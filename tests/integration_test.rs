// Integration tests for Similo
use similo::prelude::*;
use similo::{load_reader, DatasetError, FeatureGroups, StateFilter};
use std::fmt::Write as _;
use std::io::Write;

const CATEGORIES: usize = 4;

/// Builds a city table where every scaled column in a category shares one value
fn city_csv(rows: &[(&str, &str, f64, f64, [f64; CATEGORIES])]) -> String {
    let groups = FeatureGroups::default();
    let scaled: Vec<&str> = groups.all_columns().collect();

    let mut csv = String::from("CITYSTATE,LAT,LON,STATE_LONG,STATE_SHORT,MED_AGE,MED_HH_INC");
    for column in &scaled {
        write!(csv, ",{}", column).unwrap();
    }
    csv.push('\n');

    for (id, state, lat, lon, values) in rows {
        let short = &id[id.len() - 2..];
        write!(csv, "\"{}\",{},{},{},{},35,60000", id, lat, lon, state, short).unwrap();
        for category in Category::ALL {
            let value = values[category_index(category)];
            for _ in groups.columns(category) {
                write!(csv, ",{}", value).unwrap();
            }
        }
        csv.push('\n');
    }
    csv
}

fn category_index(category: Category) -> usize {
    Category::ALL.iter().position(|&c| c == category).unwrap()
}

fn sample_rows() -> Vec<(&'static str, &'static str, f64, f64, [f64; CATEGORIES])> {
    vec![
        ("Columbus, OH", "Ohio", 39.96, -83.00, [0.0, 0.0, 0.0, 0.0]),
        ("Dayton, OH", "Ohio", 39.76, -84.19, [0.2, 0.1, 0.0, 0.3]),
        ("Austin, TX", "Texas", 30.27, -97.74, [0.1, 0.1, 0.1, 0.1]),
        ("Toledo, OH", "Ohio", 41.66, -83.56, [1.0, 0.5, 0.8, 0.2]),
        ("Dallas, TX", "Texas", 32.78, -96.80, [2.0, 1.5, 1.0, 3.0]),
        ("Akron, OH", "Ohio", 41.08, -81.52, [0.5, 0.5, 0.5, 0.5]),
    ]
}

fn sample_pool() -> CandidatePool {
    load_reader(city_csv(&sample_rows()).as_bytes(), &EntitySchema::city()).unwrap()
}

fn ids(ranking: &RankingResult) -> Vec<&str> {
    ranking.results.iter().map(|r| r.record.id.as_str()).collect()
}

#[test]
fn test_city_search_end_to_end() {
    let pool = sample_pool();
    let engine = SimilarityEngine::new(EntitySchema::city()).unwrap();

    let ranking = engine
        .search(&pool, &RankingRequest::new("Columbus, OH"))
        .unwrap();

    assert_eq!(ranking.len(), 5);
    assert_eq!(ranking.results[0].record.id.as_str(), "Austin, TX");
    assert!(!ids(&ranking).contains(&"Columbus, OH"));
    assert_eq!(ranking.results.last().unwrap().record.id.as_str(), "Dallas, TX");
    assert_eq!(ranking.results.last().unwrap().overall_score, 0.0);
    assert_eq!(ranking.reference_coordinates, Coordinates::new(39.96, -83.00));

    for (i, location) in ranking.results.iter().enumerate() {
        assert_eq!(location.rank, i + 1);
        assert!((0.0..=100.0).contains(&location.overall_score));
        // Raw display values pass through untouched
        assert_eq!(location.record.raw_value("MED_HH_INC"), Some(60000.0));
    }
}

#[test]
fn test_state_filter_and_weights() {
    let pool = sample_pool();
    let engine = SimilarityEngine::new(EntitySchema::city()).unwrap();

    let request = RankingRequest::new("Columbus, OH")
        .with_states(["Ohio"])
        .with_weights(CategoryWeights::default().with(Category::Environment, 2.0))
        .with_result_count(5);
    let ranking = engine.search(&pool, &request).unwrap();

    assert_eq!(ids(&ranking), vec!["Dayton, OH", "Akron, OH", "Toledo, OH"]);
    assert_eq!(ranking.candidates_considered, 4);
}

#[test]
fn test_zip_dataset_pads_identifiers() {
    let groups = FeatureGroups::default();
    let mut csv = String::from("ZCTA5,LAT,LON,STATE_LONG,STATE_SHORT,COUNTY_NAME");
    for column in groups.all_columns() {
        write!(csv, ",{}", column).unwrap();
    }
    csv.push('\n');
    for (zip, value) in [("501", 0.0), ("544", 0.5), ("1001", 1.0), ("10001", 2.0), ("2139", 0.25)] {
        write!(csv, "{},40.0,-73.0,New York,NY,Suffolk", zip).unwrap();
        for _ in groups.all_columns() {
            write!(csv, ",{}", value).unwrap();
        }
        csv.push('\n');
    }

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(csv.as_bytes()).unwrap();

    let schema = EntitySchema::zip();
    let pool = load_csv(file.path(), &schema).unwrap();
    let engine = SimilarityEngine::new(schema).unwrap();
    let ranking = engine.search(&pool, &RankingRequest::new("00501")).unwrap();

    assert_eq!(ids(&ranking), vec!["02139", "00544", "01001", "10001"]);
    let response = SimilarResponse::from_ranking(&ranking, engine.schema());
    assert_eq!(
        response.result[0].ranking_label,
        "1 - Zip Code 02139 from Suffolk County, NY"
    );
}

#[test]
fn test_unknown_reference_and_empty_filter() {
    let pool = sample_pool();
    let engine = SimilarityEngine::new(EntitySchema::city()).unwrap();

    assert_eq!(
        engine.search(&pool, &RankingRequest::new("Nowhere, ZZ")),
        Err(RankError::NotFound("Nowhere, ZZ".to_string()))
    );
    assert_eq!(
        engine.search(&pool, &RankingRequest::new("Columbus, OH").with_states(["Alaska"])),
        Err(RankError::EmptyCandidatePool)
    );
}

#[test]
fn test_missing_scaled_value_is_schema_mismatch() {
    let mut csv = city_csv(&sample_rows()[..3]);
    // Blank out the last scaled cell of the last row
    csv.pop();
    while !csv.ends_with(',') {
        csv.pop();
    }
    csv.push('\n');

    let pool = load_reader(csv.as_bytes(), &EntitySchema::city()).unwrap();
    let engine = SimilarityEngine::new(EntitySchema::city()).unwrap();

    assert_eq!(
        engine.search(&pool, &RankingRequest::new("Columbus, OH")),
        Err(RankError::SchemaMismatch {
            record: "Austin, TX".to_string(),
            column: "METRO_INDEX_SC".to_string(),
        })
    );
}

#[test]
fn test_non_finite_scaled_value_never_ranked() {
    let mut rows = sample_rows();
    rows[1].4[0] = f64::NAN;
    match load_reader(city_csv(&rows).as_bytes(), &EntitySchema::city()) {
        Err(DatasetError::InvalidValue { row, column, value }) => {
            assert_eq!(row, 3);
            assert_eq!(column, "MED_AGE_SC");
            assert_eq!(value, "NaN");
        }
        other => panic!("expected invalid value, got {:?}", other),
    }

    // Records built in code reach the engine without the loader's check
    let pool = sample_pool();
    let engine = SimilarityEngine::new(EntitySchema::city()).unwrap();
    let reference = pool
        .get(&RecordId::new("Columbus, OH"))
        .unwrap()
        .clone()
        .with_scaled("MED_AGE_SC", f64::NAN);
    assert_eq!(
        engine.rank(&reference, pool.iter(), &CategoryWeights::default(), 5),
        Err(RankError::NonFiniteFeature {
            record: "Columbus, OH".to_string(),
            column: "MED_AGE_SC".to_string(),
        })
    );
}

#[test]
fn test_compare_and_export() {
    let pool = sample_pool();
    let engine = SimilarityEngine::new(EntitySchema::city()).unwrap();
    let ranking = engine
        .search(&pool, &RankingRequest::new("Columbus, OH"))
        .unwrap();

    let reference = pool.get(&ranking.reference_id).unwrap();
    let comparison = Comparison::new(reference, ranking.by_rank(2).unwrap(), engine.schema());
    assert_eq!(comparison.candidate.as_str(), "Dayton, OH");
    assert_eq!(comparison.features["MED_AGE"].delta, 0.0);

    let response = SimilarResponse::from_ranking(&ranking, engine.schema());
    let mut out = Vec::new();
    let written = export_saved(
        &mut out,
        &response,
        engine.schema(),
        &[SavedRow::new(2).with_notes("visit in spring")],
    )
    .unwrap();
    assert_eq!(written, 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.lines().nth(1).unwrap().starts_with("\"Dayton, OH\",\"Dayton, OH\",2,"));
    assert!(text.trim_end().ends_with("true,visit in spring"));
}

#[test]
fn test_pool_shared_across_threads() {
    let pool = sample_pool();
    let engine = SimilarityEngine::new(EntitySchema::city()).unwrap();
    let expected = engine
        .search(&pool, &RankingRequest::new("Columbus, OH"))
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.search(&pool, &RankingRequest::new("Columbus, OH"))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}

#[test]
fn test_rank_against_filtered_borrowed_records() {
    let pool = sample_pool();
    let engine = SimilarityEngine::new(EntitySchema::city()).unwrap();
    let reference = pool.get(&RecordId::new("Akron, OH")).unwrap();
    let filter = StateFilter::new(["Texas"]);

    let ranking = engine
        .rank(reference, pool.filtered(&filter), &CategoryWeights::default(), 5)
        .unwrap();

    assert_eq!(ids(&ranking), vec!["Austin, TX", "Dallas, TX"]);
}
