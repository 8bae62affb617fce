use aemet_stats::{
    format_overview, AppConfig, InMemoryRepository, JsonExporter, MeteoError, MeteoService,
};

fn main() -> Result<(), MeteoError> {
    // RUST_LOG=info (or debug) shows ingestion and storage progress.
    env_logger::init();

    let config = AppConfig::from_args(std::env::args().skip(1));
    let service = MeteoService::builder()
        .repository(InMemoryRepository::new())
        .build();

    let imported = service.import_folder(&config.data_dir)?;
    println!(
        "Imported {} observations from {}",
        imported,
        config.data_dir.display()
    );

    let dataset = service.load_dataset()?;

    println!("\nDaily extremes:");
    for day in dataset.daily_aggregates() {
        print!("{}", day);
    }

    print!("\n{}", format_overview(&dataset));

    let groups = dataset.group_by_date_then_province();
    println!("\n{} date/province groups:", groups.len());
    for group in &groups {
        println!("  {}", group);
    }

    if let Some(province) = &config.province {
        println!("\nDaily report for {}:", province);
        for day in dataset.province_daily_aggregates(province) {
            print!("{}", day);
        }
        let exporter = JsonExporter::new(&config.out_dir);
        let path = service.export_province(province, &exporter)?;
        println!("\nExported {} to {}", province, path.display());
    }

    Ok(())
}
