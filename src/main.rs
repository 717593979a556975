use clap::Parser;
use odata_mirror::domain::ports::ConfigProvider;
use odata_mirror::utils::run_log::RunLog;
use odata_mirror::utils::{logger, validation::Validate};
use odata_mirror::{CliConfig, EtlEngine, LocalStorage, OdataPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting odata-mirror");
    if config.verbose {
        tracing::debug!(
            "Target: {} (expand: {}, filter: {:?}, language: {})",
            config.service_url(),
            config.expand.join(","),
            config.filter,
            config.language
        );
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 創建存儲和管道；run log 由引擎與管道共用，結束時自動寫入檔案
    let run_log = RunLog::shared(config.log_file.clone());
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = OdataPipeline::new(storage, config, run_log.clone());
    let engine = EtlEngine::new(pipeline, run_log);

    // 最外層唯一的錯誤出口
    match engine.run().await {
        Ok(Some(output_path)) => {
            println!("✅ ETL process completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Ok(None) => {
            println!("⚠️ Run finished without output, see the run log for details");
        }
        Err(e) => {
            tracing::error!("❌ ETL process failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
