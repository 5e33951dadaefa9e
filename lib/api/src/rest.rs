use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use prodsim_assist::Recommender;
use prodsim_core::ProductView;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Shared, read-only state of every request handler
#[derive(Clone)]
pub struct ApiState {
    pub recommender: Arc<Recommender>,
    pub top_n: usize,
}

impl ApiState {
    pub fn new(recommender: Arc<Recommender>, top_n: usize) -> Self {
        Self { recommender, top_n }
    }
}

#[derive(Deserialize)]
struct RecommendRequest {
    product_name: String,
    #[serde(default)]
    use_ai_search: bool,
    top_n: Option<usize>,
}

#[derive(Serialize)]
struct RecommendResponse {
    product_name: String,
    recommendations: Option<Vec<ProductView>>,
    explanation: String,
    comparison: String,
}

#[derive(Deserialize)]
struct SmartSearchRequest {
    #[serde(default)]
    query: String,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: ApiState, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register every route; expects `web::Data<ApiState>` in the app data
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/products", web::get().to(list_products))
        .route("/recommend", web::post().to(recommend))
        .route("/api/smart-search", web::post().to(smart_search));
}

async fn health(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "products": state.recommender.catalog().len()
    })))
}

async fn list_products(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let names = state.recommender.catalog().names();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": names
    })))
}

async fn recommend(
    state: web::Data<ApiState>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let top_n = req.top_n.unwrap_or(state.top_n);
    let recommender = &state.recommender;

    let results = if req.use_ai_search {
        recommender.smart_search(&req.product_name, top_n).await
    } else {
        recommender.recommend(&req.product_name, top_n)
    };
    debug!("{} recommendations for {:?}", results.len(), req.product_name);

    if results.is_empty() {
        return Ok(HttpResponse::Ok().json(RecommendResponse {
            product_name: req.product_name,
            recommendations: None,
            explanation: String::new(),
            comparison: String::new(),
        }));
    }

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    let explanation = recommender.explain(&req.product_name, &results).await;
    let comparison = recommender.compare(names.as_slice()).await;

    Ok(HttpResponse::Ok().json(RecommendResponse {
        product_name: req.product_name,
        recommendations: Some(results),
        explanation,
        comparison,
    }))
}

async fn smart_search(
    state: web::Data<ApiState>,
    req: web::Json<SmartSearchRequest>,
) -> ActixResult<HttpResponse> {
    if req.query.is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "No query provided"
        })));
    }

    let results = state.recommender.smart_search(&req.query, state.top_n).await;
    if results.is_empty() {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "results": [],
            "message": "No products found"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "results": results
    })))
}
