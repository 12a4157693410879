use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    contact_controller, load_settings, mailto_href, skills_controller, ContactError,
    ContactEvent, CopyResult, Notification, PageContext, Settings, SkillsEvent,
};
use shared::domain::{CategoryFilter, FieldKey, Skill};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const MAILTO_SUBJECT: &str = "Inquiry from portfolio";

#[derive(Parser, Debug)]
#[command(name = "portfolio", about = "Portfolio contact form and skills showcase")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List skills, optionally filtered by category.
    Skills {
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Print cards as their staggered reveal timers fire.
        #[arg(long)]
        animate: bool,
    },
    /// Send a message through the contact form backend.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Defaults to the text pre-filled from the page's `subject` parameter.
        #[arg(long)]
        message: Option<String>,
        /// Contact page URL; a `subject` query parameter sets the subject line.
        #[arg(long)]
        page_url: Option<String>,
        #[arg(long, hide = true, default_value = "")]
        honeypot: String,
    },
    /// Copy the contact address to the clipboard.
    CopyEmail,
    /// Print the direct-mail link for the contact address.
    Mailto {
        #[arg(long, default_value = MAILTO_SUBJECT)]
        subject: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings()?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Skills { category, animate } => run_skills(&settings, category, animate).await,
        Command::Contact {
            name,
            email,
            message,
            page_url,
            honeypot,
        } => {
            let page_url = page_url.unwrap_or_else(|| settings.site_url.clone());
            let page = PageContext::from_url(&page_url)?;
            let mut controller = contact_controller(&settings, page);
            controller.update_field(FieldKey::Name, name);
            controller.update_field(FieldKey::Email, email);
            if let Some(message) = message {
                controller.update_field(FieldKey::Message, message);
            }
            controller.update_field(FieldKey::Honeypot, honeypot);

            match controller.submit().await {
                Ok(receipt) => {
                    print_notification(&receipt.notification);
                    Ok(())
                }
                Err(ContactError::SpamSuppressed) => {
                    debug!("submission dropped");
                    Ok(())
                }
                Err(err) => bail!("{err}"),
            }
        }
        Command::CopyEmail => {
            let page = PageContext::from_url(&settings.site_url)?;
            let mut controller = contact_controller(&settings, page);
            let mut events = controller.subscribe_events();
            let result = controller.copy_contact_email().await;
            while let Ok(event) = events.try_recv() {
                if let ContactEvent::Notify(notification) = event {
                    print_notification(&notification);
                }
            }
            match result {
                CopyResult::Copied { .. } => Ok(()),
                CopyResult::Failed { reason, .. } => bail!("clipboard unavailable: {reason}"),
            }
        }
        Command::Mailto { subject } => {
            println!("{}", mailto_href(&settings.contact_email, &subject));
            Ok(())
        }
    }
}

async fn run_skills(settings: &Settings, category: CategoryFilter, animate: bool) -> Result<()> {
    let tabs: Vec<String> = CategoryFilter::tabs()
        .into_iter()
        .map(|tab| {
            if tab == category {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    println!("{}", tabs.join("  "));

    let mut controller = skills_controller(settings);
    controller.set_category(category);

    if !animate {
        for (index, skill) in controller.visible_skills().into_iter().enumerate() {
            println!("{}", format_row(index, skill));
        }
        return Ok(());
    }

    let mut events = controller.subscribe_events();
    controller.mount();
    let total = controller.cards().len();
    let budget = settings.reveal_stagger() * (total as u32 + 1) + Duration::from_secs(1);

    let mut shown = 0;
    while shown < total {
        let event = tokio::time::timeout(budget, events.recv())
            .await
            .context("timed out waiting for cards to reveal")?
            .context("skills event stream closed")?;
        if let SkillsEvent::CardRevealed { name, .. } = event {
            if let Some(card) = controller.card(&name) {
                println!("{}", format_row(card.index(), card.skill()));
            }
            shown += 1;
        }
    }
    Ok(())
}

fn format_row(index: usize, skill: &Skill) -> String {
    format!(
        "{:>2}. {:<28} {:<14} {:>4}  {}",
        index + 1,
        skill.name,
        skill.category.key(),
        skill.percent_label(),
        skill.tier().description()
    )
}

fn print_notification(notification: &Notification) {
    if notification.is_destructive() {
        eprintln!("{}: {}", notification.title, notification.description);
    } else {
        println!("{}: {}", notification.title, notification.description);
    }
}
