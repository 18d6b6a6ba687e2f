// Unit tests for PawMatch Algo

use pawmatch_algo::core::{
    distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box},
    scoring::score_candidate,
};
use pawmatch_algo::models::{AnimalTrait, UserTrait};
use uuid::Uuid;

fn catalog_trait(id: Uuid, priority: i64) -> AnimalTrait {
    AnimalTrait {
        id,
        name: format!("trait-{}", priority),
        priority,
    }
}

fn preference(wanted: Vec<Uuid>) -> UserTrait {
    UserTrait {
        id: Uuid::new_v4(),
        name: "preference".to_string(),
        animal_traits: wanted,
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(54.3520, 18.6466, 54.3520, 18.6466);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_gdansk_to_sopot() {
    // Gdansk to Sopot is approximately 10 km
    let gdansk_lat = 54.3520;
    let gdansk_lon = 18.6466;
    let sopot_lat = 54.4418;
    let sopot_lon = 18.5601;

    let distance = haversine_distance(gdansk_lat, gdansk_lon, sopot_lat, sopot_lon);
    assert!(distance > 8_000.0 && distance < 15_000.0, "Expected ~11km, got {}m", distance);
}

#[test]
fn test_bounding_box_creation() {
    let bbox = calculate_bounding_box(54.3520, 18.6466, 10_000.0);

    assert!(bbox.min_lat < 54.3520);
    assert!(bbox.max_lat > 54.3520);
    assert!(bbox.min_lon < 18.6466);
    assert!(bbox.max_lon > 18.6466);

    // Bounding box should be roughly 0.18 degrees in latitude (10km / 111km per degree)
    let lat_span = bbox.max_lat - bbox.min_lat;
    assert!((lat_span - 0.18).abs() < 0.02);
}

#[test]
fn test_point_within_bbox() {
    let bbox = calculate_bounding_box(54.3520, 18.6466, 10_000.0);

    assert!(is_within_bounding_box(54.3520, 18.6466, &bbox));
    assert!(is_within_bounding_box(54.35, 18.65, &bbox));
    assert!(!is_within_bounding_box(50.0, 20.0, &bbox));
    assert!(!is_within_bounding_box(bbox.max_lat + 0.01, 18.65, &bbox));
}

#[test]
fn test_scoring_scenario_a() {
    // User wants T1 (priority 1); Animal1 has T1, Animal2 has nothing.
    let t1 = Uuid::new_v4();
    let user_traits = vec![preference(vec![t1])];

    let (animal1, base1) = score_candidate(&user_traits, &[catalog_trait(t1, 1)]);
    assert_eq!(animal1.score, 1, "-1 base + 2*1 reward");
    assert_eq!(animal1.added_points, 1);
    assert!(animal1.is_valid(base1), "1 >= 0.4");

    let (animal2, base2) = score_candidate(&user_traits, &[]);
    assert_eq!(animal2.score, 0);
    assert!(animal2.is_valid(base2), "border 0, 0 >= 0");

    assert!(animal1.score > animal2.score);
}

#[test]
fn test_scoring_scenario_b() {
    // Two priority-5 traits with no preference overlap: base -10,
    // borderValue 4, addedPoints 0 -> excluded.
    let traits = vec![
        catalog_trait(Uuid::new_v4(), 5),
        catalog_trait(Uuid::new_v4(), 5),
    ];
    let user_traits = vec![preference(vec![Uuid::new_v4()])];

    let (score, base) = score_candidate(&user_traits, &traits);

    assert_eq!(base, -10);
    assert_eq!(score.score, -10);
    assert_eq!(score.added_points, 0);
    assert!(!score.is_valid(base));
}

#[test]
fn test_threshold_inclusion_and_exclusion() {
    // P3: one priority-10 trait gives borderValue 4. Without a matching
    // preference the animal is out; with one it is in.
    let t1 = Uuid::new_v4();
    let traits = vec![catalog_trait(t1, 10)];

    let (unmatched, base) = score_candidate(&[], &traits);
    assert_eq!(unmatched.added_points, 0);
    assert!(!unmatched.is_valid(base));

    let (matched, base) = score_candidate(&[preference(vec![t1])], &traits);
    assert_eq!(matched.added_points, 10);
    assert!(matched.is_valid(base));
}

#[test]
fn test_zero_trait_animal_always_valid() {
    // P4: border is zero for an animal without traits.
    let user_traits = vec![preference(vec![Uuid::new_v4(), Uuid::new_v4()])];
    let (score, base) = score_candidate(&user_traits, &[]);
    assert!(score.is_valid(base));

    let (score, base) = score_candidate(&[], &[]);
    assert!(score.is_valid(base));
}
