//! Single binary web server: championships, rosters, and generated trees via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tournament_tree::{
    read_roster, Affiliation, ChampionshipId, ChampionshipSettings, Fighter, FighterId, FighterSource,
    GroupingKey, InMemoryStore, Tree, TreeGenerationError, TreeGenerator, TreeOptions,
};
use uuid::Uuid;

/// A championship as known by the server. Fighters and groups live in the store.
#[derive(Clone, Serialize)]
struct Championship {
    id: ChampionshipId,
    name: String,
    settings: ChampionshipSettings,
}

struct ServerState {
    championships: RwLock<HashMap<ChampionshipId, Championship>>,
    store: Arc<InMemoryStore>,
    generator: TreeGenerator<Arc<InMemoryStore>, Arc<InMemoryStore>>,
}

type AppState = Data<ServerState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct ChampionshipView {
    #[serde(flatten)]
    championship: Championship,
    fighters: Vec<Fighter>,
}

#[derive(Deserialize)]
struct CreateChampionshipBody {
    name: String,
    #[serde(default)]
    settings: ChampionshipSettings,
}

#[derive(Deserialize)]
struct AddFighterBody {
    name: String,
    #[serde(default)]
    affiliation: Affiliation,
}

#[derive(Deserialize)]
struct GenerateTreeBody {
    #[serde(default)]
    group_by: Option<GroupingKey>,
    #[serde(default = "default_shuffle")]
    shuffle: bool,
    /// Fixed seed for a reproducible draw.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_shuffle() -> bool {
    true
}

/// Path segment: championship id (e.g. /api/championships/{id})
#[derive(Deserialize)]
struct ChampionshipPath {
    id: ChampionshipId,
}

/// Path segments: championship id and fighter id
#[derive(Deserialize)]
struct ChampionshipFighterPath {
    id: ChampionshipId,
    fighter_id: FighterId,
}

fn error_json(msg: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": msg.to_string() })
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(error_json("No championship"))
}

fn find_championship(state: &ServerState, id: ChampionshipId) -> Result<Championship, HttpResponse> {
    let g = state
        .championships
        .read()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))?;
    g.get(&id).cloned().ok_or_else(not_found)
}

fn championship_view(state: &ServerState, championship: Championship) -> HttpResponse {
    match state.store.list_fighters(championship.id) {
        Ok(fighters) => HttpResponse::Ok().json(ChampionshipView {
            championship,
            fighters,
        }),
        Err(e) => HttpResponse::InternalServerError().json(error_json(e)),
    }
}

fn tree_response(state: &ServerState, id: ChampionshipId) -> HttpResponse {
    match state.store.groups(id) {
        Ok(groups) => HttpResponse::Ok().json(Tree::from_groups(groups)),
        Err(e) => HttpResponse::InternalServerError().json(error_json(e)),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-tree",
    })
}

/// Create a championship with its settings.
#[post("/api/championships")]
async fn api_create_championship(state: AppState, body: Json<CreateChampionshipBody>) -> HttpResponse {
    let body = body.into_inner();
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(error_json("Name is required"));
    }
    if let Err(e) = body.settings.validate() {
        return HttpResponse::BadRequest().json(error_json(e));
    }
    let championship = Championship {
        id: Uuid::new_v4(),
        name: name.to_string(),
        settings: body.settings,
    };
    match state.championships.write() {
        Ok(mut g) => {
            g.insert(championship.id, championship.clone());
        }
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    }
    log::info!("Created championship {} ({})", championship.name, championship.id);
    championship_view(&state, championship)
}

/// Get a championship and its roster (404 if not found).
#[get("/api/championships/{id}")]
async fn api_get_championship(state: AppState, path: Path<ChampionshipPath>) -> HttpResponse {
    match find_championship(&state, path.id) {
        Ok(c) => championship_view(&state, c),
        Err(resp) => resp,
    }
}

/// Replace the championship settings. Takes effect on the next tree generation.
#[put("/api/championships/{id}/settings")]
async fn api_set_settings(
    state: AppState,
    path: Path<ChampionshipPath>,
    body: Json<ChampionshipSettings>,
) -> HttpResponse {
    if let Err(e) = body.validate() {
        return HttpResponse::BadRequest().json(error_json(e));
    }
    let championship = {
        let mut g = match state.championships.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        match g.get_mut(&path.id) {
            Some(c) => {
                c.settings = *body;
                c.clone()
            }
            None => return not_found(),
        }
    };
    championship_view(&state, championship)
}

/// Register one fighter.
#[post("/api/championships/{id}/fighters")]
async fn api_add_fighter(
    state: AppState,
    path: Path<ChampionshipPath>,
    body: Json<AddFighterBody>,
) -> HttpResponse {
    let championship = match find_championship(&state, path.id) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(error_json("Name is required"));
    }
    let fighter = Fighter::new(name).with_affiliation(body.affiliation);
    if let Err(e) = state.store.add_fighter(championship.id, fighter) {
        return HttpResponse::InternalServerError().json(error_json(e));
    }
    championship_view(&state, championship)
}

/// Register fighters from a CSV body (`name,federation_id,association_id,club_id`).
#[post("/api/championships/{id}/fighters/import")]
async fn api_import_fighters(state: AppState, path: Path<ChampionshipPath>, body: String) -> HttpResponse {
    let championship = match find_championship(&state, path.id) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let fighters = match read_roster(body.as_bytes()) {
        Ok(f) => f,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    let count = fighters.len();
    for fighter in fighters {
        if let Err(e) = state.store.add_fighter(championship.id, fighter) {
            return HttpResponse::InternalServerError().json(error_json(e));
        }
    }
    log::info!("Imported {} fighter(s) into championship {}", count, championship.id);
    championship_view(&state, championship)
}

/// Remove a fighter from the roster.
#[delete("/api/championships/{id}/fighters/{fighter_id}")]
async fn api_remove_fighter(state: AppState, path: Path<ChampionshipFighterPath>) -> HttpResponse {
    let championship = match find_championship(&state, path.id) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    match state.store.remove_fighter(championship.id, path.fighter_id) {
        Ok(true) => championship_view(&state, championship),
        Ok(false) => HttpResponse::NotFound().json(error_json("Fighter not found")),
        Err(e) => HttpResponse::InternalServerError().json(error_json(e)),
    }
}

/// Regenerate the championship tree, replacing the previous one.
#[post("/api/championships/{id}/tree")]
async fn api_generate_tree(
    state: AppState,
    path: Path<ChampionshipPath>,
    body: Option<Json<GenerateTreeBody>>,
) -> HttpResponse {
    let championship = match find_championship(&state, path.id) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let (options, seed) = match body {
        Some(b) => (
            TreeOptions {
                grouping_key: b.group_by,
                shuffle: b.shuffle,
            },
            b.seed,
        ),
        None => (
            TreeOptions {
                grouping_key: None,
                shuffle: default_shuffle(),
            },
            None,
        ),
    };
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let result = state
        .generator
        .generate_tree(championship.id, &championship.settings, &options, &mut rng);
    match result {
        Ok(_) => tree_response(&state, championship.id),
        Err(e @ TreeGenerationError::StoreFailure(_)) => {
            HttpResponse::InternalServerError().json(error_json(e))
        }
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Current tree of the championship, grouped by round (empty if never generated).
#[get("/api/championships/{id}/tree")]
async fn api_get_tree(state: AppState, path: Path<ChampionshipPath>) -> HttpResponse {
    match find_championship(&state, path.id) {
        Ok(c) => tree_response(&state, c.id),
        Err(resp) => resp,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let store = Arc::new(InMemoryStore::new());
    let state = Data::new(ServerState {
        championships: RwLock::new(HashMap::new()),
        store: store.clone(),
        generator: TreeGenerator::new(store.clone(), store),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_championship)
            .service(api_get_championship)
            .service(api_set_settings)
            .service(api_add_fighter)
            .service(api_import_fighters)
            .service(api_remove_fighter)
            .service(api_generate_tree)
            .service(api_get_tree)
    })
    .bind(bind)?
    .run()
    .await
}
