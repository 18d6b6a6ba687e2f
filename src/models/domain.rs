use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Atomic animal characteristic from the trait catalog
///
/// `priority` is a positive integer weight expressing how strongly the
/// trait counts toward a match. Catalog data is read-only to the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalTrait {
    pub id: Uuid,
    pub name: String,
    pub priority: i64,
}

/// One entry of a user's preference set
///
/// A user trait points at the catalog animal traits it desires; priorities
/// are inherited from the catalog through those references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTrait {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "animalTraits")]
    pub animal_traits: Vec<Uuid>,
}

/// Animal record as exposed to the matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalCandidate {
    pub id: Uuid,
    pub name: String,
    pub age: String,
    #[serde(default)]
    pub description: Option<String>,
    pub gender: String,
    #[serde(rename = "shelterId")]
    pub shelter_id: Uuid,
    #[serde(default)]
    pub traits: Vec<AnimalTrait>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A user together with their resolved preference traits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithTraits {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub traits: Vec<UserTrait>,
}

/// Shelter with its stored location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shelter {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Geographic point in degrees
#[derive(Debug, Clone, Copy)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
