use std::collections::HashSet;

use uuid::Uuid;

use crate::core::distance::haversine_distance;
use crate::models::{AnimalCandidate, GeoPoint, Shelter};

/// Geo-scoped candidate selection
///
/// Keeps the animals housed in shelters within `radius_m` meters of
/// `center`. The store hands us a bounding-box-prefiltered shelter
/// snapshot; the exact spherical check happens here.
///
/// Inputs are assumed pre-validated by the HTTP layer (`radius_m > 0`,
/// coordinates in range). No shelters in range means an empty result, not
/// an error.
pub fn select_candidates(
    center: GeoPoint,
    radius_m: f64,
    shelters: &[Shelter],
    animals: Vec<AnimalCandidate>,
) -> Vec<AnimalCandidate> {
    let in_range: HashSet<Uuid> = shelters
        .iter()
        .filter(|shelter| {
            haversine_distance(
                center.latitude,
                center.longitude,
                shelter.latitude,
                shelter.longitude,
            ) <= radius_m
        })
        .map(|shelter| shelter.id)
        .collect();

    animals
        .into_iter()
        .filter(|animal| in_range.contains(&animal.shelter_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelter(id: Uuid, lat: f64, lon: f64) -> Shelter {
        Shelter {
            id,
            name: "Schronisko".to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn animal(shelter_id: Uuid) -> AnimalCandidate {
        AnimalCandidate {
            id: Uuid::new_v4(),
            name: "Pomelo".to_string(),
            age: "3 years".to_string(),
            description: None,
            gender: "Suka".to_string(),
            shelter_id,
            traits: vec![],
            images: vec![],
        }
    }

    #[test]
    fn test_keeps_animals_in_nearby_shelters() {
        let near = Uuid::new_v4();
        let far = Uuid::new_v4();
        let center = GeoPoint::new(54.3520, 18.6466);

        let shelters = vec![
            shelter(near, 54.3525, 18.6470), // tens of meters away
            shelter(far, 53.0138, 18.5984),  // another city
        ];
        let animals = vec![animal(near), animal(far), animal(near)];

        let selected = select_candidates(center, 5_000.0, &shelters, animals);

        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|a| a.shelter_id == near));
    }

    #[test]
    fn test_no_shelters_in_range_returns_empty() {
        let far = Uuid::new_v4();
        let center = GeoPoint::new(54.3520, 18.6466);

        let shelters = vec![shelter(far, 52.2297, 21.0122)];
        let animals = vec![animal(far), animal(far)];

        let selected = select_candidates(center, 100.0, &shelters, animals);

        assert!(selected.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let center = GeoPoint::new(54.3520, 18.6466);
        let selected = select_candidates(center, 100.0, &[], vec![]);
        assert!(selected.is_empty());
    }
}
