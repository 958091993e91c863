//! Click API 计数端点

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::CounterService;

use super::helpers::api_result;
use super::types::{ClickRequest, ClickResponse, GroupClickResponse, RegisterUserRequest};

pub struct ClickApi;

impl ClickApi {
    /// `POST /api/click/{user_id}`：用户计数 +1，命名分组总计 +1
    pub async fn increment(
        path: web::Path<String>,
        body: web::Json<ClickRequest>,
        service: web::Data<Arc<CounterService>>,
    ) -> ActixResult<impl Responder> {
        let user_id = path.into_inner();
        trace!("Click API: increment '{}' in group '{}'", user_id, body.group_name);

        let result = service.increment(&user_id, &body.group_name).await;
        Ok(api_result(result.map(ClickResponse::from)))
    }

    /// `GET /api/clicks/{user_id}`：查询用户计数；未知用户 404
    pub async fn user_clicks(
        path: web::Path<String>,
        service: web::Data<Arc<CounterService>>,
    ) -> ActixResult<impl Responder> {
        let user_id = path.into_inner();
        trace!("Click API: lookup user '{}'", user_id);

        let result = service.lookup(&user_id).await;
        Ok(api_result(result.map(ClickResponse::from)))
    }

    /// `GET /api/clicks/group/{group_name}`：查询分组总计；未知分组 404
    pub async fn group_clicks(
        path: web::Path<String>,
        service: web::Data<Arc<CounterService>>,
    ) -> ActixResult<impl Responder> {
        let group_name = path.into_inner();
        trace!("Click API: lookup group '{}'", group_name);

        let result = service.group_lookup(&group_name).await.map(|g| GroupClickResponse {
            group_name: g.group_name,
            total_click_count: g.total_click_count,
        });
        Ok(api_result(result))
    }

    /// `POST /api/user`：按需建档，不推进计数；幂等
    pub async fn register_user(
        body: web::Json<RegisterUserRequest>,
        service: web::Data<Arc<CounterService>>,
    ) -> ActixResult<HttpResponse> {
        trace!(
            "Click API: register user '{}' with group '{}'",
            body.user_id, body.group_name
        );

        let result = service.get_or_create(&body.user_id, &body.group_name).await;
        Ok(api_result(result.map(ClickResponse::from)))
    }
}

/// Click API 路由配置
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/click/{user_id}", web::post().to(ClickApi::increment))
        .route("/clicks/group/{group_name}", web::get().to(ClickApi::group_clicks))
        .route("/clicks/{user_id}", web::get().to(ClickApi::user_clicks))
        .route("/user", web::post().to(ClickApi::register_user))
}
