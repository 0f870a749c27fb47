//! Command handlers wiring configuration, the API client, diagnostics and
//! terminal output together

use std::time::Duration;

use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cli::Commands;
use crate::client::{ResourceApi, ResourceClient};
use crate::config::Config;
use crate::diagnostics;
use crate::error::{AppError, Result};
use crate::output;

pub struct App {
    client: ResourceClient,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: ResourceClient::new(config)?,
        })
    }

    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::List => self.list().await,
            Commands::Create { name, dns } => self.create(&name, &dns).await,
            Commands::Update { id, name, dns } => {
                self.update(id, name.as_deref(), dns.as_deref()).await
            }
            Commands::Delete { id, yes } => self.delete(id, yes).await,
            Commands::Debug { domain } => self.debug(&domain).await,
        }
    }

    async fn list(&self) -> Result<()> {
        let resources = self.client.list().await?;
        output::print_resource_table(&resources);
        Ok(())
    }

    async fn create(&self, name: &str, dns: &str) -> Result<()> {
        validate_create_inputs(name, dns)?;
        let resource = self.client.create(name, dns).await?;
        output::print_created(&resource);
        Ok(())
    }

    async fn update(&self, id: u32, name: Option<&str>, dns: Option<&str>) -> Result<()> {
        let resource = self.client.update(id, name, dns).await?;
        output::print_updated(&resource);
        Ok(())
    }

    async fn delete(&self, id: u32, yes: bool) -> Result<()> {
        let resource = self.client.get(id).await?;
        output::print_resource_details(&resource);

        if !yes && !confirm_deletion()? {
            println!("Delete operation canceled.");
            return Ok(());
        }

        let deleted = self.client.delete(id).await?;
        output::print_deleted(&deleted);
        Ok(())
    }

    async fn debug(&self, domain: &str) -> Result<()> {
        // All required tools must resolve before anything runs; report the
        // complete missing set at once.
        let missing = diagnostics::missing_tools();
        if !missing.is_empty() {
            output::print_missing_tools(&missing);
            return Ok(());
        }

        info!(domain, "starting network diagnostics");
        let spinner = diagnostics_spinner();

        let (report, failures) = diagnostics::run(domain).await;

        spinner.finish_and_clear();
        output::print_report(&report, domain);

        // Partial failure is still a usable report and a zero exit
        if failures.is_empty() {
            output::print_all_clear();
        } else {
            output::print_failures(&failures);
        }
        Ok(())
    }
}

fn validate_create_inputs(name: &str, dns: &str) -> Result<()> {
    if name.len() < 3 {
        return Err(AppError::validation(
            "name must be at least 3 characters long",
        ));
    }
    if dns.len() < 3 {
        return Err(AppError::validation(
            "dns must be at least 3 characters long",
        ));
    }
    Ok(())
}

fn confirm_deletion() -> Result<bool> {
    Confirm::new()
        .with_prompt("Are you sure you want to delete this resource?")
        .default(false)
        .interact()
        .map_err(|e| AppError::Prompt(e.to_string()))
}

fn diagnostics_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Running network diagnostics, it may take a few minutes...");
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_inputs_must_be_at_least_three_chars() {
        assert!(validate_create_inputs("web", "web.example.com").is_ok());
        assert!(matches!(
            validate_create_inputs("ab", "web.example.com"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_create_inputs("web", "ab"),
            Err(AppError::Validation(_))
        ));
    }
}
