//! Click API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::ClicktallyError;

use super::types::ErrorDetail;

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(data)
}

/// 构建错误响应，固定 `{"detail": "..."}` 形状
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorDetail {
            detail: message.to_string(),
        })
}

/// 从 ClicktallyError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from_service(err: &ClicktallyError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 ClicktallyError。
pub fn api_result<T>(result: Result<T, ClicktallyError>) -> HttpResponse
where
    T: Serialize,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_service(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_status() {
        let response = success_response("data");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_response_not_found() {
        let response = error_response(StatusCode::NOT_FOUND, "User not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_from_service_maps_status() {
        let err = ClicktallyError::not_found("Group not found");
        let response = error_from_service(&err);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err = ClicktallyError::database_conflict("retries exhausted");
        let response = error_from_service(&err);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_api_result_ok_and_err() {
        let ok: Result<&str, ClicktallyError> = Ok("fine");
        assert_eq!(api_result(ok).status(), StatusCode::OK);

        let err: Result<&str, ClicktallyError> = Err(ClicktallyError::validation("bad body"));
        assert_eq!(api_result(err).status(), StatusCode::BAD_REQUEST);
    }
}
