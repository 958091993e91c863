use clicktally::{config, runtime, system};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // `-c/--config` 指定配置文件路径，默认 config.toml
    match config::args::parse_config_path(&args) {
        Some(path) => config::init_config_from(&path),
        None => config::init_config(),
    }

    let app_config = config::get_config();

    // guard 必须存活到进程退出，保证非阻塞日志被刷出
    let _guard = system::logging::init_logging(&app_config);

    runtime::modes::run_server().await
}
