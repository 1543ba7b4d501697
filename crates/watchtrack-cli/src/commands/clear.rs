use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::Confirm;
use std::fs;
use watchtrack_config::PathManager;

pub async fn run_clear(yes: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let credentials_file = paths.credentials_file();

    if !credentials_file.exists() {
        output.info("No stored credentials found to clear");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Forget the stored session? You will need to sign in again")
            .default(false)
            .interact()?;
        if !confirmed {
            output.info("Cancelled");
            return Ok(());
        }
    }

    fs::remove_file(&credentials_file).map_err(|e| {
        eyre!(
            "Failed to remove credentials file at {}: {}",
            credentials_file.display(),
            e
        )
    })?;
    output.success(format!("Cleared credentials: {}", credentials_file.display()));
    Ok(())
}
