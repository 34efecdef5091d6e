use aws_webapp_stack::output::{plan_json, print_summary, write_plan};
use aws_webapp_stack::{network_provider, plan_stack, StackConfig};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let config = StackConfig::from_env()?;
    let provider = network_provider(&config)?;

    let plan = tokio::select! {
        plan = plan_stack(&config, provider.as_ref()) => plan?,
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, abandoning subnet lookups. No plan written.");
            return Err("interrupted".into());
        }
    };

    print_summary(&plan)?;
    match &config.plan_output_file {
        Some(path) => write_plan(&plan, path)?,
        None => println!("{}", plan_json(&plan)?),
    }

    log::info!("#End main()");
    Ok(())
}
