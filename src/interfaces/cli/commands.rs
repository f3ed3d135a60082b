//! CLI 子命令实现

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use super::CliError;
use crate::config::StaticConfig;
use crate::render::resolve_spotify_embed;
use crate::services::{LinkService, MetricsService, PresaveService};
use crate::storage::SeaOrmStorage;

/// 列出某个账户的 smart link 和预存活动
pub async fn list_owner(storage: Arc<SeaOrmStorage>, owner: &str) -> Result<(), CliError> {
    let links = LinkService::from_config(storage.clone())
        .list_links(owner)
        .await?;
    let presaves = PresaveService::new(storage).list_presaves(owner).await?;

    if links.is_empty() && presaves.is_empty() {
        println!("{} Nothing found for owner {}", "ℹ".bold().blue(), owner.cyan());
        return Ok(());
    }

    if !links.is_empty() {
        println!("{}", "Smart links:".bold().green());
        for link in &links {
            let mut parts = vec![format!(
                "{} /{} {} - {}",
                link.id.dimmed(),
                link.slug.cyan(),
                link.artist_name.bold(),
                link.title
            )];
            parts.push(
                format!("[{}]", link.template)
                    .dimmed()
                    .yellow()
                    .to_string(),
            );
            if !link.is_public {
                parts.push("(private)".dimmed().red().to_string());
            }
            parts.push(
                format!("({} platforms)", link.platforms.len())
                    .dimmed()
                    .to_string(),
            );
            println!("  {}", parts.join(" "));
        }
        println!();
    }

    if !presaves.is_empty() {
        println!("{}", "Presaves:".bold().green());
        for presave in &presaves {
            let release = presave
                .release_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "no date".to_string());
            println!(
                "  {} /presave/{} {} - {} {}",
                presave.id.dimmed(),
                presave.slug.cyan(),
                presave.artist_name.bold(),
                presave.title,
                format!("({})", release).dimmed()
            );
        }
        println!();
    }

    println!(
        "{} Total {} smart links, {} presaves",
        "ℹ".bold().blue(),
        links.len().to_string().green(),
        presaves.len().to_string().green()
    );
    Ok(())
}

pub async fn remove_link(storage: Arc<SeaOrmStorage>, id: &str) -> Result<(), CliError> {
    LinkService::from_config(storage).delete_link(id).await?;
    println!("{} Removed smart link {}", "✓".bold().green(), id.cyan());
    Ok(())
}

/// 打印 Spotify 嵌入地址；无法识别时返回错误
pub fn embed_url(url: &str) -> Result<(), CliError> {
    match resolve_spotify_embed(url) {
        Some(embed) => {
            println!("{}", embed);
            Ok(())
        }
        None => Err(CliError::ParseError(format!(
            "Not a Spotify track, album or playlist URL: {}",
            url
        ))),
    }
}

pub async fn owner_metrics(
    storage: Arc<SeaOrmStorage>,
    owner: &str,
    since: Option<&str>,
) -> Result<(), CliError> {
    let summary = MetricsService::new(storage)
        .owner_metrics(owner, since)
        .await?;

    println!("{} {}", "Metrics for".bold().green(), owner.cyan());
    if let Some(ref since) = summary.since {
        println!("  {}", format!("since {}", since).dimmed());
    }
    println!(
        "  views: {}  clicks: {}  click rate: {}",
        summary.total_views.to_string().green(),
        summary.total_clicks.to_string().green(),
        format!("{:.1}%", summary.click_rate).yellow()
    );

    if !summary.items.is_empty() {
        println!();
        println!("{}", "Per item:".bold());
        for item in &summary.items {
            println!(
                "  {} views {} clicks {} ({:.1}%)",
                item.link_id.cyan(),
                item.views,
                item.clicks,
                item.click_rate
            );
        }
    }

    if !summary.platforms.is_empty() {
        println!();
        println!("{}", "Per platform:".bold());
        for platform in &summary.platforms {
            println!("  {} {}", platform.platform_id.cyan(), platform.clicks);
        }
    }
    Ok(())
}

/// Generate example configuration file
pub fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| "config.toml".to_string());

    if Path::new(&path).exists() && !force {
        return Err(CliError::CommandError(format!(
            "{} already exists, use --force to overwrite",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    StaticConfig::default().save_to_file(&path).map_err(|e| {
        CliError::CommandError(format!("Unable to write configuration file: {}", e))
    })?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url_rejects_non_spotify() {
        assert!(embed_url("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC").is_ok());
        assert!(matches!(
            embed_url("https://example.com/track/1"),
            Err(CliError::ParseError(_))
        ));
    }

    #[test]
    fn test_config_generate_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_string_lossy().into_owned();

        config_generate(Some(path_str.clone()), false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[server]"));
        assert!(content.contains("[spotify]"));

        assert!(config_generate(Some(path_str.clone()), false).is_err());
        assert!(config_generate(Some(path_str), true).is_ok());
    }
}
