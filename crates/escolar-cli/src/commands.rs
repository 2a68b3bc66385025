use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use escolar_config::AppConfig;
use escolar_db::{MigrationRunner, school_catalog};
use escolar_schema::ApplyReport;
use escolar_security::InputValidator;
use tracing::info;

fn open_runner(config: &AppConfig, db: Option<PathBuf>) -> Result<MigrationRunner> {
    let path = db.unwrap_or_else(|| config.database.path.clone());
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .context(format!("failed to create {}", parent.display()))?;
    }
    let registry = school_catalog()?;
    Ok(MigrationRunner::open(&path, registry)?)
}

fn print_reports(reports: &[ApplyReport]) {
    for report in reports {
        println!(
            "  {:<4} {}_{} ({} applied, {} skipped)",
            report.direction.label(),
            report.version,
            report.name,
            report.applied(),
            report.skipped()
        );
    }
}

pub fn migrate_up(config: &AppConfig, db: Option<PathBuf>, to: Option<u64>) -> Result<()> {
    let runner = open_runner(config, db)?;
    let reports = runner.up(to)?;
    if reports.is_empty() {
        println!("Database is up to date.");
    } else {
        println!("Applied {} migration(s):", reports.len());
        print_reports(&reports);
    }
    Ok(())
}

pub fn migrate_down(config: &AppConfig, db: Option<PathBuf>, to: u64) -> Result<()> {
    let runner = open_runner(config, db)?;
    if to != 0 && runner.registry().find(to).is_none() {
        bail!("unknown target version {to}; run `escolar migrate status` for the catalog");
    }
    let reports = runner.down(to)?;
    if reports.is_empty() {
        println!("Nothing to revert.");
    } else {
        println!("Reverted {} migration(s):", reports.len());
        print_reports(&reports);
    }
    Ok(())
}

pub fn migrate_status(config: &AppConfig, db: Option<PathBuf>, json: bool) -> Result<()> {
    let runner = open_runner(config, db)?;
    let statuses = runner.status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    println!("{:<16} {:<36} applied at", "version", "name");
    for status in &statuses {
        let applied = match (status.applied, status.applied_at) {
            (_, Some(at)) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            (true, None) => "applied".to_string(),
            (false, None) => "pending".to_string(),
        };
        println!("{:<16} {:<36} {applied}", status.version, status.name);
    }
    Ok(())
}

/// Build the catalog without a database: registration alone rejects
/// version collisions, asymmetric down diffs and dangling foreign keys.
pub fn migrate_check() -> Result<()> {
    let registry = school_catalog().context("catalog validation failed")?;
    let snapshot = registry.snapshot();
    let tables = snapshot.tables().count();
    let indexes = snapshot.indexes().count();
    info!("catalog validated");
    println!(
        "Catalog OK: {} migrations producing {tables} tables and {indexes} indexes.",
        registry.len()
    );
    Ok(())
}

pub fn validar(
    cpf: Option<String>,
    email: Option<String>,
    senha: Option<String>,
    matricula: Option<String>,
) -> Result<()> {
    if cpf.is_none() && email.is_none() && senha.is_none() && matricula.is_none() {
        bail!("nothing to validate; pass --cpf, --email, --senha or --matricula");
    }

    let mut failures = 0;
    let mut report = |field: &str, result: escolar_common::Result<()>| match result {
        Ok(()) => println!("  {field}: ok"),
        Err(e) => {
            failures += 1;
            println!("  {field}: {e}");
        }
    };

    if let Some(cpf) = &cpf {
        report("cpf", InputValidator::validate_cpf(cpf));
    }
    if let Some(email) = &email {
        report("email", InputValidator::validate_email(email));
    }
    if let Some(senha) = &senha {
        report("senha", InputValidator::validate_senha(senha));
    }
    if let Some(matricula) = &matricula {
        report("matricula", InputValidator::validate_matricula(matricula));
    }

    if failures > 0 {
        bail!("{failures} field(s) failed validation");
    }
    Ok(())
}
