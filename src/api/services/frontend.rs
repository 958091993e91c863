use actix_web::{HttpRequest, HttpResponse, Result, web};
use rust_embed::Embed;
use tracing::{debug, trace};

// 使用 RustEmbed 自动嵌入静态文件
#[derive(Embed)]
#[folder = "static/"]
struct FrontendAssets;

pub struct FrontendService;

impl FrontendService {
    /// 处理首页 - 服务嵌入的 index.html
    pub async fn handle_index(_req: HttpRequest) -> Result<HttpResponse> {
        trace!("Serving landing page");

        match FrontendAssets::get("index.html") {
            Some(content) => {
                let html_content = String::from_utf8_lossy(&content.data);
                let processed_html =
                    html_content.replace("%CLICKTALLY_VERSION%", env!("CARGO_PKG_VERSION"));

                Ok(HttpResponse::Ok()
                    .content_type("text/html; charset=utf-8")
                    .body(processed_html))
            }
            None => Ok(HttpResponse::NotFound().body("index.html not embedded")),
        }
    }

    /// 处理静态资源文件
    pub async fn handle_static(req: HttpRequest) -> Result<HttpResponse> {
        let path = req.match_info().query("path");
        trace!("Serving static file: {}", path);

        // 根据文件扩展名确定 Content-Type
        let content_type = Self::get_content_type(path);

        match FrontendAssets::get(path) {
            Some(content) => Ok(HttpResponse::Ok()
                .content_type(content_type)
                .body(content.data.into_owned())),
            None => {
                debug!("Static file not found: {}", path);
                Ok(HttpResponse::NotFound().body("File not found"))
            }
        }
    }

    fn get_content_type(path: &str) -> &'static str {
        match path.rsplit('.').next() {
            Some("html") => "text/html; charset=utf-8",
            Some("css") => "text/css; charset=utf-8",
            Some("js") => "application/javascript; charset=utf-8",
            Some("json") => "application/json; charset=utf-8",
            Some("png") => "image/png",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            _ => "application/octet-stream",
        }
    }
}

/// 前端路由配置（`GET /` 和 `GET /static/{path}`）
pub fn frontend_routes() -> actix_web::Scope {
    web::scope("")
        .route("/", web::get().to(FrontendService::handle_index))
        .route(
            "/static/{path:.*}",
            web::get().to(FrontendService::handle_static),
        )
}
