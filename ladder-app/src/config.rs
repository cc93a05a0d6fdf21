use anyhow::{Context, Result};
use ladder_core::LadderError;
use ladder_schemas::file_formats::GameFile;
use std::{collections::HashSet, fs, path::Path};

/// Loads the game configuration from a YAML file and validates it.
pub fn load_game_file<P: AsRef<Path>>(path: P) -> Result<GameFile> {
    let path = path.as_ref();
    println!("Loading game configuration from '{}'...", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;
    let file: GameFile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
    let file = validate(file).with_context(|| format!("Invalid configuration in {:?}", path))?;

    println!(
        "Configuration loaded: {} industries, {} passive producers.",
        file.industries.len(),
        file.starting_production.len()
    );
    Ok(file)
}

/// Checks the definition set and folds each worker's `level` into its cost table.
pub fn validate(mut file: GameFile) -> Result<GameFile, LadderError> {
    if file.industries.is_empty() {
        return Err(invalid("no industries defined".to_string()));
    }

    let mut industry_ids = HashSet::new();
    for (i, industry) in file.industries.iter_mut().enumerate() {
        if industry.industry_id.is_empty() {
            return Err(invalid(format!("industry {} missing industry_id", i)));
        }
        if !industry_ids.insert(industry.industry_id.clone()) {
            return Err(invalid(format!("duplicate industry {}", industry.industry_id)));
        }
        if industry.resource.is_empty() {
            return Err(invalid(format!("industry {} missing resource", industry.industry_id)));
        }
        if industry.workers.is_empty() {
            return Err(invalid(format!("industry {} missing workers", industry.industry_id)));
        }

        let mut worker_ids = HashSet::new();
        for (j, worker) in industry.workers.iter_mut().enumerate() {
            let industry_id = &industry.industry_id;
            if worker.worker_id.is_empty() {
                return Err(invalid(format!("industry {} worker {} missing worker_id", industry_id, j)));
            }
            let worker_id = worker.worker_id.clone();
            if !worker_ids.insert(worker_id.clone()) {
                return Err(invalid(format!("industry {} has duplicate worker {}", industry_id, worker_id)));
            }
            let missing = |field: &str| invalid(format!("industry {} worker {} missing {}", industry_id, worker_id, field));
            if worker.worker_name.is_empty() {
                return Err(missing("worker_name"));
            }
            if worker.produces.is_empty() {
                return Err(missing("produces"));
            }
            if worker.prod_rate <= chrono::TimeDelta::zero() {
                return Err(missing("prod_rate"));
            }
            if worker.prod_quant == 0 {
                return Err(missing("prod_quant"));
            }
            if !(worker.upgrade_mult > 0.0) {
                return Err(missing("upgrade_mult"));
            }
            match worker.level {
                Some(0) => return Err(missing("level")),
                Some(level) => worker.cost.set("coins", level),
                None => {}
            }
            if worker.cost.is_empty() {
                return Err(missing("cost"));
            }
        }
    }

    for (i, production) in file.starting_production.iter().enumerate() {
        if production.resource.is_empty() {
            return Err(invalid(format!("starting production {} missing resource", i)));
        }
        if production.prod_rate <= chrono::TimeDelta::zero() {
            return Err(invalid(format!("starting production {} missing prod_rate", production.resource)));
        }
        if production.prod_quant == 0 {
            return Err(invalid(format!("starting production {} missing prod_quant", production.resource)));
        }
    }

    Ok(file)
}

fn invalid(message: String) -> LadderError {
    LadderError::ConfigInvalid(message)
}
