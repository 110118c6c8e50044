use course_planner::catalog::Catalog;
use course_planner::config::PlannerConfig;
use course_planner::display::{print_schedule, write_schedule_to_file};
use course_planner::schedule::derive_schedule;
use course_planner::web;
use course_planner::working_set::WorkingSet;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = PlannerConfig::load()?;
    let args: Vec<String> = std::env::args().collect();

    // Check if we should run in web mode
    if args.len() > 1 && args[1] == "web" {
        if let Some(port) = args.get(2).and_then(|p| p.parse::<u16>().ok()) {
            config.port = port;
        }
        let catalog = Catalog::load(&config.catalog_path)?;
        println!("Access the planner API at http://{}:{}/api/catalog", config.host, config.port);
        web::start_server(config, catalog).await?;
        return Ok(());
    }

    // CLI mode: course-planner [--out FILE] [ID ...]
    let mut output = String::from("schedule.txt");
    let mut ids = Vec::new();
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--out" {
            if let Some(path) = rest.next() {
                output = path.clone();
            }
        } else {
            ids.push(arg.clone());
        }
    }

    println!("Loading catalog from {}...", config.catalog_path.display());
    let catalog = Catalog::load(&config.catalog_path)?;

    // No ids selects the whole catalog
    let selection = if ids.is_empty() {
        let mut all = WorkingSet::new();
        all.replace(catalog.components().to_vec());
        all
    } else {
        WorkingSet::hydrate(&ids, &catalog)?
    };
    info!("Planning {} selected components", selection.len());

    let view = derive_schedule(selection.items(), config.palette_size);
    print_schedule(&view)?;

    write_schedule_to_file(&view, &output, true)?;
    println!("\nSchedule saved to {}", output);

    Ok(())
}
