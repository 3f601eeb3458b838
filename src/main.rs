use anyhow::Result;
use passage_render::utils::logging;
use passage_render::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let stats = App::initialize(config)?.run().await?;

    if stats.failed > 0 {
        anyhow::bail!("{} 个快照渲染失败", stats.failed);
    }

    Ok(())
}
