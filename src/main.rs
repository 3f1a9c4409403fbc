use std::env;

use imagefx::{args, logger, run, ResultRecord};

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();

    if let Err(e) = logger::init_with_config(logger::LoggerConfig::from_env()) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    log::info!("🎨 imagefx starting");

    let options = args::collect(env::args().skip(1));

    let record = match run(&options).await {
        Ok(record) => record,
        Err(e) => {
            log::error!("{}", e);
            ResultRecord::failure(&e)
        }
    };

    log::logger().flush();

    // The final two stdout lines are the only contract a caller parses.
    println!("===RESULT===");
    println!("{}", record.to_json());

    std::process::exit(if record.success { 0 } else { 1 });
}
