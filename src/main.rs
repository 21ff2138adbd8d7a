use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use product_client::app::product::view;
use product_client::core::config::{MutationCheck, SyncPolicy};
use product_client::{connect, load_config, HttpProductApi, Logger, ProductListController, SubmitOutcome};
use std::path::PathBuf;
use tracing::{info, warn};

/// 产品列表客户端
#[derive(Parser)]
#[command(name = "product-client", version, about)]
struct Cli {
    /// 配置文件路径
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 变更请求返回非 2xx 时视为失败
    #[arg(long, global = true)]
    strict: bool,

    /// 变更成功后合并服务端返回的实体而不是全量拉取
    #[arg(long, global = true)]
    merge: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 列出全部产品
    List,
    /// 新建产品
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
    },
    /// 编辑产品，未给出的字段保持原值
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    /// 删除产品
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("加载配置失败")?;
    if cli.strict {
        config.sync.mutation_check = MutationCheck::Strict;
    }
    if cli.merge {
        config.sync.policy = SyncPolicy::Merge;
    }

    Logger::init(&config.logging.level);
    info!("API 地址: {}", config.api.base_url);

    let mut controller = connect(&config)?;
    let result = run(&mut controller, cli.command).await;

    print!(
        "{}",
        view::render(controller.list(), &config.display.currency)
    );
    result
}

async fn run(
    controller: &mut ProductListController<HttpProductApi>,
    command: Command,
) -> anyhow::Result<()> {
    controller.load().await?;

    match command {
        Command::List => {}
        Command::Add { name, price } => {
            controller.set_name(name);
            controller.set_price(price);
            submit(controller).await?;
        }
        Command::Edit { id, name, price } => {
            let Some(product) = controller.products().iter().find(|p| p.id == id).cloned() else {
                bail!("产品 {} 不存在", id);
            };
            controller.start_edit(&product);
            if let Some(name) = name {
                controller.set_name(name);
            }
            if let Some(price) = price {
                controller.set_price(price);
            }
            print!("{}", view::render_form(controller.draft()));
            submit(controller).await?;
        }
        Command::Delete { id } => {
            controller.remove(id).await?;
        }
    }

    Ok(())
}

async fn submit(controller: &mut ProductListController<HttpProductApi>) -> anyhow::Result<()> {
    match controller.submit().await? {
        SubmitOutcome::Skipped => warn!("名称和价格均不能为空，未提交"),
        SubmitOutcome::Created => info!("✅ 产品已创建"),
        SubmitOutcome::Updated => info!("✅ 产品已更新"),
    }
    Ok(())
}
