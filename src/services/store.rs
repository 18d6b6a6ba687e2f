use std::collections::HashMap;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AnimalCandidate, AnimalTrait, BoundingBox, Shelter, UserTrait, UserWithTraits};

/// Errors that can occur when interacting with the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL-backed record store
///
/// Holds the animal, shelter, trait catalog, and user preference records
/// the matching pipeline reads. The store only performs filtered reads;
/// the geo radius check and all scoring happen in `core`.
pub struct RecordStore {
    pool: PgPool,
}

impl RecordStore {
    /// Create a new record store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new record store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL record store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch a single animal by id, with its resolved traits
    pub async fn get_animal(&self, id: Uuid) -> Result<Option<AnimalCandidate>, StoreError> {
        let query = r#"
            SELECT id, name, age, description, gender, shelter_id, images
            FROM animals
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        match row {
            Some(row) => {
                let mut animals = self.attach_traits(vec![animal_from_row(&row)]).await?;
                Ok(animals.pop())
            }
            None => Ok(None),
        }
    }

    /// Fetch animals by exact name, case-insensitive
    pub async fn get_animals_by_name(&self, name: &str) -> Result<Vec<AnimalCandidate>, StoreError> {
        let query = r#"
            SELECT id, name, age, description, gender, shelter_id, images
            FROM animals
            WHERE lower(name) = lower($1)
        "#;

        let rows = sqlx::query(query).bind(name).fetch_all(&self.pool).await?;

        let animals = rows.iter().map(animal_from_row).collect();
        self.attach_traits(animals).await
    }

    /// Fetch every animal with its resolved traits
    pub async fn get_all_animals(&self) -> Result<Vec<AnimalCandidate>, StoreError> {
        let query = r#"
            SELECT id, name, age, description, gender, shelter_id, images
            FROM animals
            ORDER BY name
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let animals = rows.iter().map(animal_from_row).collect();
        self.attach_traits(animals).await
    }

    /// Fetch all animals housed in the given shelters
    pub async fn get_animals_by_shelters(
        &self,
        shelter_ids: &[Uuid],
    ) -> Result<Vec<AnimalCandidate>, StoreError> {
        if shelter_ids.is_empty() {
            return Ok(vec![]);
        }

        let query = r#"
            SELECT id, name, age, description, gender, shelter_id, images
            FROM animals
            WHERE shelter_id = ANY($1)
        "#;

        let rows = sqlx::query(query)
            .bind(shelter_ids)
            .fetch_all(&self.pool)
            .await?;

        let animals = rows.iter().map(animal_from_row).collect();
        self.attach_traits(animals).await
    }

    /// Fetch shelters whose stored location falls inside a bounding box
    ///
    /// This is only a cheap prefilter; the exact radius check against the
    /// search center runs in `core::selector`.
    pub async fn get_shelters_in_bbox(&self, bbox: &BoundingBox) -> Result<Vec<Shelter>, StoreError> {
        let query = r#"
            SELECT id, name, latitude, longitude
            FROM shelters
            WHERE latitude BETWEEN $1 AND $2
              AND longitude BETWEEN $3 AND $4
        "#;

        let rows = sqlx::query(query)
            .bind(bbox.min_lat)
            .bind(bbox.max_lat)
            .bind(bbox.min_lon)
            .bind(bbox.max_lon)
            .fetch_all(&self.pool)
            .await?;

        let shelters = rows
            .iter()
            .map(|row| Shelter {
                id: row.get("id"),
                name: row.get("name"),
                latitude: row.get("latitude"),
                longitude: row.get("longitude"),
            })
            .collect();

        Ok(shelters)
    }

    /// Fetch a user and their preference traits
    ///
    /// Returns `None` when no user matches; the handler maps that to a
    /// 404 instead of an error.
    pub async fn get_user_with_traits(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserWithTraits>, StoreError> {
        let user_query = r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(user_query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let traits_query = r#"
            SELECT ut.id, ut.name, utl.animal_trait_id
            FROM user_traits ut
            LEFT JOIN user_trait_links utl ON utl.user_trait_id = ut.id
            WHERE ut.user_id = $1
            ORDER BY ut.id
        "#;

        let trait_rows = sqlx::query(traits_query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let mut traits: Vec<UserTrait> = Vec::new();
        for trait_row in &trait_rows {
            let trait_id: Uuid = trait_row.get("id");
            let wanted: Option<Uuid> = trait_row.get("animal_trait_id");

            match traits.last_mut() {
                Some(last) if last.id == trait_id => {
                    if let Some(wanted) = wanted {
                        last.animal_traits.push(wanted);
                    }
                }
                _ => {
                    traits.push(UserTrait {
                        id: trait_id,
                        name: trait_row.get("name"),
                        animal_traits: wanted.into_iter().collect(),
                    });
                }
            }
        }

        Ok(Some(UserWithTraits {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            traits,
        }))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    /// Resolve the trait lists for a batch of animals in one query
    async fn attach_traits(
        &self,
        mut animals: Vec<AnimalCandidate>,
    ) -> Result<Vec<AnimalCandidate>, StoreError> {
        if animals.is_empty() {
            return Ok(animals);
        }

        let animal_ids: Vec<Uuid> = animals.iter().map(|a| a.id).collect();

        let query = r#"
            SELECT atl.animal_id, at.id, at.name, at.priority
            FROM animal_trait_links atl
            JOIN animal_traits at ON at.id = atl.trait_id
            WHERE atl.animal_id = ANY($1)
        "#;

        let rows = sqlx::query(query)
            .bind(&animal_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_animal: HashMap<Uuid, Vec<AnimalTrait>> = HashMap::new();
        for row in &rows {
            let animal_id: Uuid = row.get("animal_id");
            by_animal.entry(animal_id).or_default().push(AnimalTrait {
                id: row.get("id"),
                name: row.get("name"),
                priority: row.get("priority"),
            });
        }

        for animal in &mut animals {
            if let Some(traits) = by_animal.remove(&animal.id) {
                animal.traits = traits;
            }
        }

        Ok(animals)
    }
}

fn animal_from_row(row: &sqlx::postgres::PgRow) -> AnimalCandidate {
    AnimalCandidate {
        id: row.get("id"),
        name: row.get("name"),
        age: row.get("age"),
        description: row.get("description"),
        gender: row.get("gender"),
        shelter_id: row.get("shelter_id"),
        traits: vec![],
        images: row.get("images"),
    }
}
