use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::Input;
use watchtrack_config::{Config, PathManager};

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    paths.ensure_directories().map_err(|e| eyre!("{}", e))?;

    match cmd {
        ConfigCommands::Show { full } => show_config(&paths, full, output),
        ConfigCommands::Catalog { api_key } => set_catalog(&paths, api_key, output),
        ConfigCommands::Backend {
            project_url,
            publishable_key,
        } => set_backend(&paths, project_url, publishable_key, output),
    }
}

fn load_or_template(paths: &PathManager) -> Config {
    Config::load_from_file(&paths.config_file()).unwrap_or_else(|_| Config::template())
}

fn show_config(paths: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if !config_file.exists() {
        output.warn(format!(
            "No config file at {}. Run 'watchtrack config catalog' to start",
            config_file.display()
        ));
        return Ok(());
    }

    let config = Config::load_from_file(&config_file).map_err(|e| eyre!("{}", e))?;

    if !output.is_human() {
        output.json(&serde_json::json!({
            "config_file": config_file.display().to_string(),
            "catalog": {
                "api_key": mask(&config.catalog.api_key, full),
                "base_url": config.catalog.base_url,
                "image_base_url": config.catalog.image_base_url,
            },
            "backend": {
                "project_url": config.backend.project_url,
                "publishable_key": mask(&config.backend.publishable_key, full),
            },
            "ui": {
                "page_size": config.ui.page_size,
                "recommendations": config.ui.recommendations,
            },
        }));
        return Ok(());
    }

    output.println(format!("Config file: {}", config_file.display()));
    output.println("");
    output.println("[catalog]");
    output.println(format!("  api_key        = {}", mask(&config.catalog.api_key, full)));
    output.println(format!("  base_url       = {}", config.catalog.base_url));
    output.println(format!("  image_base_url = {}", config.catalog.image_base_url));
    output.println("");
    output.println("[backend]");
    output.println(format!("  project_url     = {}", config.backend.project_url));
    output.println(format!(
        "  publishable_key = {}",
        mask(&config.backend.publishable_key, full)
    ));
    output.println("");
    output.println("[ui]");
    output.println(format!("  page_size       = {}", config.ui.page_size));
    output.println(format!("  recommendations = {}", config.ui.recommendations));

    match config.validate() {
        Ok(()) => output.success("Configuration is complete"),
        Err(e) => output.warn(format!("{}", e)),
    }
    Ok(())
}

fn set_catalog(paths: &PathManager, api_key: Option<String>, output: &Output) -> Result<()> {
    let mut config = load_or_template(paths);

    let api_key = match api_key {
        Some(key) => key,
        None => Input::new()
            .with_prompt("Catalog API key")
            .interact_text()?,
    };
    if api_key.trim().is_empty() {
        output.error("API key cannot be empty");
        return Ok(());
    }

    config.catalog.api_key = api_key.trim().to_string();
    config
        .save_to_file(&paths.config_file())
        .map_err(|e| eyre!("{}", e))?;
    output.success("Catalog configured");
    Ok(())
}

fn set_backend(
    paths: &PathManager,
    project_url: Option<String>,
    publishable_key: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut config = load_or_template(paths);

    let project_url = match project_url {
        Some(url) => url,
        None => Input::new()
            .with_prompt("Backend project URL")
            .interact_text()?,
    };
    if !project_url.trim().starts_with("http") {
        output.error("Project URL must be an http(s) URL");
        return Ok(());
    }

    let publishable_key = match publishable_key {
        Some(key) => key,
        None => Input::new()
            .with_prompt("Backend publishable key")
            .interact_text()?,
    };
    if publishable_key.trim().is_empty() {
        output.error("Publishable key cannot be empty");
        return Ok(());
    }

    config.backend.project_url = project_url.trim().trim_end_matches('/').to_string();
    config.backend.publishable_key = publishable_key.trim().to_string();
    config
        .save_to_file(&paths.config_file())
        .map_err(|e| eyre!("{}", e))?;
    output.success("Backend configured");
    Ok(())
}

fn mask(value: &str, full: bool) -> String {
    if full || value.is_empty() {
        return value.to_string();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
