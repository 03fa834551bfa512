use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use modbus_core::ports::MapExporter;
use modbus_core::{
    DescriptionResolver, DescriptionTable, ExtractOutcome, JsonExporter, MapService,
    StSourceConfig, StSourceParser, XlsxExporter,
};

const DEFAULT_SOURCE: &str = "POUs/FC_ModbusToSCADA.st";
const DEFAULT_OUT_DIR: &str = "out";
const SOURCE_CONFIG_PATH: &str = "config/source_config.json";
const DESCRIPTIONS_PATH: &str = "config/descriptions.json";
const MAX_UNRESOLVED_SHOWN: usize = 20;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let source = Path::new(args.get(1).map(String::as_str).unwrap_or(DEFAULT_SOURCE));
    let out_dir = Path::new(args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUT_DIR));

    if !source.exists() {
        anyhow::bail!("source file not found: {}", source.display());
    }

    let config = StSourceConfig::load_from_file(Path::new(SOURCE_CONFIG_PATH))?;
    let table = load_table(Path::new(DESCRIPTIONS_PATH))?;
    println!("descriptions: {} entries", table.len());

    let service = MapService::new(StSourceParser::new(config), DescriptionResolver::default());
    let outcome = service.extract_file(source, &table)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let exporters: [&dyn MapExporter; 2] = [&JsonExporter, &XlsxExporter];
    for exporter in exporters {
        let out_path = out_dir.join(format!("modbus_map.{}", exporter.format_name()));
        let summary = exporter.export(&outcome.map, &out_path)?;
        println!(
            "[ok] {} -> {} rows={} {}",
            exporter.format_name(),
            summary.out_path.display(),
            summary.rows,
            summary.digest
        );
    }

    let stats_path = out_dir.join("statistics.json");
    fs::write(&stats_path, serde_json::to_string_pretty(&outcome.statistics)?)
        .with_context(|| format!("failed to write {}", stats_path.display()))?;

    print_summary(&outcome);
    Ok(())
}

fn load_table(path: &Path) -> Result<DescriptionTable> {
    let builtin = DescriptionTable::builtin();
    if !path.exists() {
        return Ok(builtin.clone());
    }
    let overrides = DescriptionTable::load_from_file(path)?;
    println!("[info] {} overrides from {}", overrides.len(), path.display());
    Ok(builtin.layered(&overrides))
}

fn print_summary(outcome: &ExtractOutcome) {
    let stats = &outcome.statistics;
    println!(
        "registers={} sections={}",
        stats.total_registers, stats.total_sections
    );
    for (class, count) in &stats.by_class {
        println!("  {}: {}", class.label(), count);
    }
    for (data_type, count) in &stats.by_data_type {
        println!("  {}: {}", data_type, count);
    }

    println!("top sections:");
    for section in &stats.top_sections {
        println!("  - '{}' {}", section.name, section.count);
    }

    let coverage = &outcome.coverage;
    println!(
        "descriptions: {}/{} ({:.1}%)",
        coverage.resolved,
        coverage.total(),
        coverage.percent()
    );
    for name in coverage.unresolved_variables.iter().take(MAX_UNRESOLVED_SHOWN) {
        println!("  [missing] {}", name);
    }
    if coverage.unresolved_variables.len() > MAX_UNRESOLVED_SHOWN {
        println!(
            "  ... and {} more",
            coverage.unresolved_variables.len() - MAX_UNRESOLVED_SHOWN
        );
    }
}
