//! 内存桩服务
//! 在本地提供与远程 PHP 接口同名的端点

use clap::Parser;
use product_client::backend::{self, ProductStore};
use product_client::Logger;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "stub_server", about = "产品接口内存桩服务")]
struct Args {
    /// 绑定地址
    #[arg(long, default_value = "127.0.0.1:3001")]
    bind: String,

    /// 预置示例数据
    #[arg(long)]
    seed: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    Logger::init(&args.log_level);

    let store = if args.seed {
        ProductStore::seeded([("Ballpen", 15.5), ("Notebook", 45.0), ("Stapler", 120.0)])
    } else {
        ProductStore::new()
    };
    info!("✅ 已初始化 {} 个示例产品", store.len());

    let listener = TcpListener::bind(&args.bind).await?;
    let addr = listener.local_addr()?;

    info!("🚀 桩服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET         /api/getProduct.php    - 获取全部产品");
    info!("   POST        /api/addProduct.php    - 新建产品");
    info!("   POST|PUT    /api/updateProduct.php - 更新产品");
    info!("   POST|DELETE /api/deleteProduct.php - 删除产品");
    info!("   GET         /health                - 健康检查");

    backend::serve(listener, store).await?;
    Ok(())
}
