use crate::context::AppContext;
use crate::output::Output;
use chrono::Utc;
use color_eyre::Result;
use watchtrack_core::relative_label;
use watchtrack_models::Profile;

pub async fn run_profile(
    username: Option<String>,
    phone: Option<String>,
    reset_password: bool,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;
    let session = ctx.require_session().await?;

    if reset_password {
        let spinner = output.spinner("Requesting password reset...");
        let result = ctx.auth.reset_password(&session.user.email).await;
        spinner.finish_and_clear();
        match result {
            Ok(()) => output.success("Password reset email sent! Check your inbox."),
            Err(e) => output.error(e.to_string()),
        }
        return Ok(());
    }

    if username.is_some() || phone.is_some() {
        let spinner = output.spinner("Updating profile...");
        let result = ctx
            .auth
            .update_profile(&session, username.as_deref(), phone.as_deref())
            .await;
        spinner.finish_and_clear();
        match result {
            Ok(profile) => {
                output.success("Profile updated");
                render(&profile, output)?;
            }
            Err(e) => output.error(format!("Error updating profile: {}", e)),
        }
        return Ok(());
    }

    let spinner = output.spinner("Fetching profile...");
    let result = ctx.auth.profile(&session).await;
    spinner.finish_and_clear();
    match result {
        Ok(profile) => render(&profile, output)?,
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

fn render(profile: &Profile, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&serde_json::to_value(profile)?);
        return Ok(());
    }

    output.println(format!("Email:     {}", profile.email));
    output.println(format!(
        "Username:  {}",
        profile.username.as_deref().unwrap_or("-")
    ));
    output.println(format!(
        "Phone:     {}",
        profile.phone.as_deref().unwrap_or("-")
    ));
    output.println(format!(
        "Joined:    {}",
        relative_label(profile.created_at, Utc::now())
    ));
    Ok(())
}
