use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use dialoguer::Input;
use watchtrack_remote::SignUpOutcome;

fn prompt_email(given: Option<String>) -> Result<String> {
    match given {
        Some(email) => Ok(email),
        None => Ok(Input::new().with_prompt("Email").interact_text()?),
    }
}

pub async fn run_login(email: Option<String>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;

    let email = prompt_email(email)?;
    let password = rpassword::prompt_password("Password: ")?;

    let spinner = output.spinner("Signing in...");
    let result = ctx.auth.sign_in(&email, &password).await;
    spinner.finish_and_clear();

    match result {
        Ok(session) => {
            ctx.state.set_user(session.user.clone());
            output.success(format!("Signed in as {}", session.user.email));
        }
        // Auth failures render the provider's own message inline
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

pub async fn run_signup(email: Option<String>, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;

    let email = prompt_email(email)?;
    let password = rpassword::prompt_password("Password: ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        output.error("Passwords do not match");
        return Ok(());
    }

    let spinner = output.spinner("Creating account...");
    let result = ctx.auth.sign_up(&email, &password).await;
    spinner.finish_and_clear();

    match result {
        Ok(SignUpOutcome::SignedIn(session)) => {
            ctx.state.set_user(session.user.clone());
            output.success(format!("Account created, signed in as {}", session.user.email));
        }
        Ok(SignUpOutcome::ConfirmationSent) => {
            output.info("Check your email for the confirmation link!");
        }
        Err(e) => output.error(e.to_string()),
    }
    Ok(())
}

pub async fn run_logout(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;

    let Some(session) = ctx.auth.restore_session().await else {
        output.info("Not signed in");
        return Ok(());
    };

    let spinner = output.spinner("Signing out...");
    let result = ctx.auth.sign_out(&session).await;
    spinner.finish_and_clear();

    ctx.state.clear_user();
    match result {
        Ok(()) => output.success("Signed out"),
        // The local session is forgotten either way
        Err(e) => output.warn(format!("Signed out locally; remote revocation failed: {}", e)),
    }
    Ok(())
}
