//! Sign-in, profile, routing and preferences

use anyhow::{Result, bail};
use clap::Subcommand;

use hotel_client::guard::{GuardDecision, StaffTab};
use hotel_client::preferences::{Language, load_language, save_language};
use hotel_client::validation::{password_strength, validate_password};
use hotel_client::{AppRoute, LoginRequest, UserUpdate};
use shared::client::{ChangePasswordRequest, RegisterRequest};

use super::{Portal, present};

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Sign in with a username or email
    Login {
        credential: String,
        #[arg(long, env = "HOTEL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a guest account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, env = "HOTEL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Update the signed-in user's profile
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Change the password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },

    /// Check whether a view (e.g. /manager) may be opened
    Open { path: String },

    /// Show or set the interface language
    Language { code: Option<Language> },
}

pub async fn run(portal: &mut Portal, command: AccountCommand) -> Result<()> {
    match command {
        AccountCommand::Login {
            credential,
            password,
        } => {
            let user = portal
                .store
                .login(LoginRequest::new(credential, password))
                .await
                .map_err(|f| anyhow::anyhow!("[{}] {}", f.code.code(), f.message))?;
            let landing = AppRoute::home_for(user.role);
            println!("Signed in as {} ({})", user.display_name(), user.role);
            println!("Landing view: {}", landing);
        }
        AccountCommand::Register {
            username,
            email,
            first_name,
            last_name,
            phone,
            password,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password,
                first_name,
                last_name,
                phone,
            };
            let user = portal
                .store
                .register(request)
                .await
                .map_err(|f| anyhow::anyhow!("[{}] {}", f.code.code(), f.message))?;
            println!("Account created. Signed in as {} ({})", user.display_name(), user.role);
        }
        AccountCommand::Logout => {
            portal.store.logout().await;
            println!("Signed out");
        }
        AccountCommand::Whoami => {
            if !portal.store.session().is_authenticated() {
                println!("Not signed in");
                return Ok(());
            }
            let result = portal.store.api().profile().await;
            let user = portal.settle(result)?;
            println!("{} <{}>", user.display_name(), user.email);
            println!("Role: {}", user.role);
            println!("Home: {}", AppRoute::home_for(user.role));
        }
        AccountCommand::Profile {
            first_name,
            last_name,
            email,
            phone,
        } => {
            portal.require(hotel_client::RoleSet::ANY)?;
            let update = UserUpdate {
                first_name,
                last_name,
                email,
                username: None,
                phone,
            };
            let result = portal.store.update_profile(update).await;
            let user = result.map_err(present)?;
            println!("Profile updated: {} <{}>", user.display_name(), user.email);
        }
        AccountCommand::Password { current, new } => {
            portal.require(hotel_client::RoleSet::ANY)?;
            if let Err(e) = validate_password(&new) {
                let strength = password_strength(&new);
                bail!("{} (strength: {:?}, score {}/5)", e.message, strength.level, strength.score);
            }
            let result = portal
                .store
                .change_password(ChangePasswordRequest {
                    current_password: current,
                    new_password: new,
                })
                .await;
            result.map_err(present)?;
            println!("Password changed");
        }
        AccountCommand::Open { path } => open(portal, &path)?,
        AccountCommand::Language { code } => {
            let current = load_language(portal.store.storage(), portal.config.default_language);
            match code {
                None => println!("{} ({})", current.native_name(), current),
                Some(language) => {
                    save_language(portal.store.storage_mut(), language)
                        .map_err(|e| present(e.into()))?;
                    println!("Language set to {}", language.native_name());
                }
            }
        }
    }
    Ok(())
}

fn open(portal: &Portal, path: &str) -> Result<()> {
    let Some(route) = AppRoute::from_path(path) else {
        bail!("Unknown view: {}", path);
    };
    let session = portal.store.session();
    match route.resolve(session) {
        GuardDecision::Granted => {
            println!("{}: granted", route);
            if let (AppRoute::StaffDashboard, Some(role)) = (route, session.role()) {
                let tabs: Vec<String> = StaffTab::visible_to(role)
                    .into_iter()
                    .map(|t| format!("{:?}", t).to_lowercase())
                    .collect();
                println!("Tabs: {}", tabs.join(", "));
            }
        }
        GuardDecision::RedirectToLogin => println!("{}: sign in required ({})", route, AppRoute::Login),
        GuardDecision::AccessDenied {
            current_role,
            required,
        } => println!(
            "{}: access denied for {} (requires {})",
            route, current_role, required
        ),
        GuardDecision::Loading => println!("{}: loading", route),
    }
    Ok(())
}
