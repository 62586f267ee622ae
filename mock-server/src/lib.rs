use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Shortest `name` the search endpoint accepts.
pub const MIN_SEARCH_CHARS: usize = 3;

const DEFAULT_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub risk_factors: Option<String>,
    pub specialties: Vec<Specialty>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
    #[serde(default)]
    pub skip: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Read-only procedure catalog, kept in id order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    procedures: Vec<Procedure>,
}

impl Catalog {
    pub fn new(mut procedures: Vec<Procedure>) -> Self {
        procedures.sort_by_key(|p| p.id);
        Self { procedures }
    }

    pub fn seeded() -> Self {
        let digestive = Specialty {
            id: 1,
            name: "Digestive surgery".to_string(),
        };
        let orthopedics = Specialty {
            id: 2,
            name: "Orthopedics".to_string(),
        };
        Self::new(vec![
            entry(1, "Appendectomy", "Removal of the appendix", None, vec![digestive.clone()]),
            entry(
                2,
                "Cholecystectomy",
                "Removal of the gallbladder",
                Some("obesity, diabetes"),
                vec![digestive.clone()],
            ),
            entry(
                3,
                "Inguinal hernia repair",
                "Repair of an inguinal hernia, with or without mesh",
                Some("mesh placement"),
                vec![digestive],
            ),
            entry(
                4,
                "Total hip replacement",
                "Hip arthroplasty",
                Some("diabetes, prior joint infection"),
                vec![orthopedics.clone()],
            ),
            entry(
                5,
                "Total knee replacement",
                "Knee arthroplasty",
                Some("obesity"),
                vec![orthopedics],
            ),
        ])
    }

    pub fn get(&self, id: i64) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.id == id)
    }

    pub fn list(&self, skip: usize, limit: usize) -> Vec<Procedure> {
        self.procedures.iter().skip(skip).take(limit).cloned().collect()
    }

    /// Case-insensitive substring match on `name`, paged after filtering.
    pub fn search(&self, name: &str, skip: usize, limit: usize) -> Vec<Procedure> {
        let needle = name.to_lowercase();
        self.procedures
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }
}

fn entry(
    id: i64,
    name: &str,
    description: &str,
    risk_factors: Option<&str>,
    specialties: Vec<Specialty>,
) -> Procedure {
    Procedure {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        risk_factors: risk_factors.map(str::to_string),
        specialties,
    }
}

pub type Db = Arc<Catalog>;

pub fn app() -> Router {
    app_with(Catalog::seeded())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    Router::new()
        .route("/procedures", get(list_procedures))
        .route("/procedures/search/by-name", get(search_procedures))
        .route("/procedures/{id}", get(get_procedure))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_procedures(
    State(db): State<Db>,
    Query(page): Query<Page>,
) -> Json<Vec<Procedure>> {
    let procedures = db.list(page.skip, page.limit.unwrap_or(DEFAULT_LIMIT));
    tracing::debug!(count = procedures.len(), "listed procedures");
    Json(procedures)
}

async fn get_procedure(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Procedure>, (StatusCode, Json<ErrorBody>)> {
    match db.get(id) {
        Some(procedure) => Ok(Json(procedure.clone())),
        None => {
            tracing::debug!(id, "procedure not found");
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    detail: format!("Procedure {id} not found"),
                }),
            ))
        }
    }
}

async fn search_procedures(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Procedure>>, (StatusCode, Json<ErrorBody>)> {
    if params.name.chars().count() < MIN_SEARCH_CHARS {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                detail: format!("name must be at least {MIN_SEARCH_CHARS} characters"),
            }),
        ));
    }
    let hits = db.search(&params.name, params.skip, params.limit.unwrap_or(DEFAULT_LIMIT));
    tracing::debug!(name = %params.name, hits = hits.len(), "searched procedures");
    Ok(Json(hits))
}
