use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use colored::Colorize;

use vaultcmd_core::command::CommandEntry;

use super::Context;

pub async fn list(ctx: &Context, json: bool) -> Result<()> {
    let settings = ctx.settings.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings.registered())?);
        return Ok(());
    }

    println!("{}", ctx.settings_path().display().to_string().dimmed());
    if let Some(root) = &settings.vault_root {
        println!("vault: {}", root.display());
    }

    for (index, entry) in settings.commands.iter().enumerate() {
        let header = if entry.is_registrable() {
            format!("[{}] {} ({})", index, entry.name, entry.command_id()).bold()
        } else {
            format!("[{}] {} (not registered)", index, entry.name).dimmed()
        };
        println!("{}", header);
        for line in entry.command.lines() {
            println!("    {}", line);
        }
    }
    Ok(())
}

pub async fn add(ctx: &Context, name: String, command: String) -> Result<()> {
    let index = ctx
        .settings
        .add_entry(CommandEntry::new(name, command))
        .await?;
    println!("Added entry {}", index);
    Ok(())
}

pub async fn rename(ctx: &Context, index: usize, name: String) -> Result<()> {
    ctx.settings.rename(index, name).await?;
    Ok(())
}

pub async fn set_command(ctx: &Context, index: usize, command: String) -> Result<()> {
    ctx.settings.set_command(index, command).await?;
    Ok(())
}

pub async fn remove(ctx: &Context, index: usize) -> Result<()> {
    let removed = ctx.settings.remove(index).await?;
    println!("Removed '{}'", removed.name);
    Ok(())
}

pub async fn vault(ctx: &Context, path: Option<PathBuf>, clear: bool) -> Result<()> {
    if clear {
        ctx.settings.set_vault_root(None).await?;
        return Ok(());
    }

    match path {
        Some(path) => {
            let root = absolute_vault_path(&path)?;
            ctx.settings.set_vault_root(Some(root)).await?;
        }
        None => {
            let settings = ctx.settings.list().await?;
            match settings.vault_root {
                Some(root) => println!("{}", root.display()),
                None => println!("{}", "no vault root configured".dimmed()),
            }
        }
    }
    Ok(())
}

/// Stored roots are absolute so `run` resolves them the same from any directory.
fn absolute_vault_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Cannot resolve vault path '{}'", path.display()))
}
