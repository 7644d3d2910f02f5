// ==========================================
// 物料库存系统 - HTTP 路由（按域拆分）
// ==========================================
// 职责: 路由定义,连接前端与后端 API
// ==========================================

mod common;
mod export;
mod import;
mod material;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app::state::AppState;
use crate::config::ServerConfig;

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": crate::VERSION }))
}

/// 构建应用路由
///
/// # 说明
/// - /api/* 为业务接口
/// - 其余路径回退到前端静态目录
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/materiales",
            get(material::list_materials).post(material::create_material),
        )
        .route(
            "/api/materiales/:id",
            get(material::get_material)
                .put(material::update_material)
                .delete(material::delete_material),
        )
        .route("/api/exportar", get(export::export_materials))
        .route(
            "/api/importar",
            post(import::import_materials)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
