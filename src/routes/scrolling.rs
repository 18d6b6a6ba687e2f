use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::{calculate_bounding_box, select_candidates, Matcher};
use crate::models::{
    AnimalCandidate, ErrorResponse, GeoPoint, HealthResponse, MatchRequest, MatchResponse,
    PetsResponse, UserWithTraits,
};
use crate::services::{CacheKey, CacheManager, RecordStore, TokenVerifier};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub cache: Arc<CacheManager>,
    pub tokens: TokenVerifier,
    pub matcher: Matcher,
    /// Upper bound on the accepted search radius, in meters
    pub max_radius_m: f64,
}

/// Configure all scrolling routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/scrolling", web::get().to(get_all_pets))
        .route("/scrolling/match", web::post().to(match_pets))
        .route("/scrolling/{arg}", web::get().to(get_pet));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List all pets
///
/// GET /api/v1/scrolling
///
/// An empty store maps to a 404 "No pets found." so the client can tell
/// "nothing to scroll" apart from a system error.
async fn get_all_pets(state: web::Data<AppState>) -> impl Responder {
    let cache_key = CacheKey::all_pets();
    if let Ok(pets) = state.cache.get::<Vec<AnimalCandidate>>(&cache_key).await {
        return pets_response(pets);
    }

    match state.store.get_all_animals().await {
        Ok(pets) => {
            if let Err(e) = state.cache.set(&cache_key, &pets).await {
                tracing::warn!("Failed to cache pet listing: {}", e);
            }
            pets_response(pets)
        }
        Err(e) => {
            tracing::error!("Failed to fetch pets: {}", e);
            internal_error("Failed to fetch pets", e.to_string())
        }
    }
}

fn pets_response(pets: Vec<AnimalCandidate>) -> HttpResponse {
    if pets.is_empty() {
        return not_found("No pets found.");
    }
    HttpResponse::Ok().json(PetsResponse { pets })
}

/// Look up a pet by id or name
///
/// GET /api/v1/scrolling/{arg}
///
/// A UUID argument is treated as a pet id, anything else as a pet name.
async fn get_pet(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let arg = path.into_inner();

    match Uuid::parse_str(&arg) {
        Ok(id) => get_pet_by_id(&state, id).await,
        Err(_) => get_pet_by_name(&state, &arg).await,
    }
}

async fn get_pet_by_id(state: &AppState, id: Uuid) -> HttpResponse {
    let cache_key = CacheKey::pet(id);
    if let Ok(pet) = state.cache.get::<AnimalCandidate>(&cache_key).await {
        return HttpResponse::Ok().json(pet);
    }

    match state.store.get_animal(id).await {
        Ok(Some(pet)) => {
            if let Err(e) = state.cache.set(&cache_key, &pet).await {
                tracing::warn!("Failed to cache pet {}: {}", id, e);
            }
            HttpResponse::Ok().json(pet)
        }
        Ok(None) => not_found("Pet not found."),
        Err(e) => {
            tracing::error!("Failed to fetch pet {}: {}", id, e);
            internal_error("Failed to fetch pet", e.to_string())
        }
    }
}

async fn get_pet_by_name(state: &AppState, name: &str) -> HttpResponse {
    if let Err(message) = validate_pet_name(name) {
        return bad_request(message);
    }

    let cache_key = CacheKey::pet_name(name);
    if let Ok(pets) = state.cache.get::<Vec<AnimalCandidate>>(&cache_key).await {
        return HttpResponse::Ok().json(PetsResponse { pets });
    }

    match state.store.get_animals_by_name(name).await {
        Ok(pets) if pets.is_empty() => not_found("Pet not found."),
        Ok(pets) => {
            if let Err(e) = state.cache.set(&cache_key, &pets).await {
                tracing::warn!("Failed to cache pet name lookup: {}", e);
            }
            HttpResponse::Ok().json(PetsResponse { pets })
        }
        Err(e) => {
            tracing::error!("Failed to fetch pets by name: {}", e);
            internal_error("Failed to fetch pet", e.to_string())
        }
    }
}

/// Name rules for the by-name lookup
fn validate_pet_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Invalid input.");
    }
    if name.len() > 50 {
        return Err("Name is too long.");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        return Err("Name can only contain letters, numbers, and spaces.");
    }
    Ok(())
}

/// Match the caller against nearby shelter animals
///
/// POST /api/v1/scrolling/match
///
/// Request body:
/// ```json
/// {
///   "lat": 54.123456,
///   "lng": 18.123456,
///   "range": 100
/// }
/// ```
///
/// `range` is in meters. The caller is resolved from the bearer token.
async fn match_pets(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    // Resolve the caller before touching the store
    let auth_header = http_req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let user_id = match state.tokens.user_id_from_header(auth_header) {
        Ok(id) => id,
        Err(e) => {
            tracing::info!("Rejected match request: {}", e);
            return HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Unauthorized".to_string(),
                message: e.to_string(),
                status_code: 401,
            });
        }
    };

    // Coordinate and radius validation stays at this layer; the core
    // assumes well-formed input.
    if let Err(errors) = req.validate() {
        tracing::info!(
            "Invalid match input for user {}: lat={}, lng={}, range={}, errors={}",
            user_id,
            req.lat,
            req.lng,
            req.range,
            errors
        );
        return bad_request("Invalid input");
    }

    // Cap the radius to keep the shelter prefilter bounded
    let radius_m = req.range.min(state.max_radius_m);

    tracing::info!(
        "Matching user {} at ({}, {}) within {}m",
        user_id,
        req.lat,
        req.lng,
        radius_m
    );

    // Fetch the user with resolved preference traits
    let user = match fetch_user(&state, user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return not_found("User not found."),
        Err(response) => return response,
    };

    // Geo-scoped candidate selection: bounding-box prefilter in the
    // store, exact spherical radius check in the core.
    let center = GeoPoint::new(req.lat, req.lng);
    let bbox = calculate_bounding_box(req.lat, req.lng, radius_m);

    let shelters = match state.store.get_shelters_in_bbox(&bbox).await {
        Ok(shelters) => shelters,
        Err(e) => {
            tracing::error!("Failed to fetch shelters: {}", e);
            return internal_error("Failed to fetch shelters", e.to_string());
        }
    };

    let shelter_ids: Vec<Uuid> = shelters.iter().map(|s| s.id).collect();
    let animals = match state.store.get_animals_by_shelters(&shelter_ids).await {
        Ok(animals) => animals,
        Err(e) => {
            tracing::error!("Failed to fetch candidates: {}", e);
            return internal_error("Failed to fetch candidates", e.to_string());
        }
    };

    let candidates = select_candidates(center, radius_m, &shelters, animals);

    tracing::debug!(
        "Selected {} candidates from {} shelters for user {}",
        candidates.len(),
        shelter_ids.len(),
        user_id
    );

    let matched = state.matcher.match_candidates(&user, candidates);

    if matched.is_empty() {
        return not_found("No pets found.");
    }

    tracing::info!("Returning {} matched animals for user {}", matched.len(), user_id);

    HttpResponse::Ok().json(MatchResponse {
        message: "Matched animals".to_string(),
        matched_animals: matched,
        user_with_traits: user,
    })
}

async fn fetch_user(
    state: &AppState,
    user_id: Uuid,
) -> Result<Option<UserWithTraits>, HttpResponse> {
    let cache_key = CacheKey::user(user_id);
    if let Ok(user) = state.cache.get::<UserWithTraits>(&cache_key).await {
        return Ok(Some(user));
    }

    match state.store.get_user_with_traits(user_id).await {
        Ok(Some(user)) => {
            if let Err(e) = state.cache.set(&cache_key, &user).await {
                tracing::warn!("Failed to cache user {}: {}", user_id, e);
            }
            Ok(Some(user))
        }
        Ok(None) => Ok(None),
        Err(e) => {
            tracing::error!("Failed to fetch user {}: {}", user_id, e);
            Err(internal_error("Failed to fetch user", e.to_string()))
        }
    }
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Not Found".to_string(),
        message: message.to_string(),
        status_code: 404,
    })
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Bad Request".to_string(),
        message: message.to_string(),
        status_code: 400,
    })
}

fn internal_error(error: &str, message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 500,
    })
}
