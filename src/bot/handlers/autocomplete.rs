//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters like
//! brand names and platform names, suggesting valid options as the user types.

use crate::{
    bot::BotData,
    core::{brand, platform},
    errors::Error,
};

/// Discord never shows more than this many suggestions.
const AUTOCOMPLETE_LIMIT: usize = 25;

fn matching_names(names: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(AUTOCOMPLETE_LIMIT)
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort();
    matching
}

/// Provides autocomplete suggestions for platform names.
pub async fn autocomplete_platform_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(platforms) = platform::list_platforms(&ctx.data().database).await else {
        return Vec::new();
    };
    matching_names(platforms.into_iter().map(|p| p.name), partial)
}

/// Provides autocomplete suggestions for brand names.
pub async fn autocomplete_brand_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(brands) = brand::list_brands_with_phone_counts(&ctx.data().database).await else {
        return Vec::new();
    };
    matching_names(brands.into_iter().map(|summary| summary.brand.name), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_names_is_case_insensitive_and_sorted() {
        let names = ["Samsung", "Apple", "Sony", "Xiaomi"].map(String::from);
        assert_eq!(matching_names(names.clone(), "s"), ["Samsung", "Sony"]);
        assert_eq!(matching_names(names.clone(), "APP"), ["Apple"]);
        assert_eq!(matching_names(names, "").len(), 4);
    }

    #[test]
    fn test_matching_names_respects_discord_limit() {
        let names = (0..40).map(|i| format!("Brand {i:02}"));
        assert_eq!(matching_names(names, "brand").len(), AUTOCOMPLETE_LIMIT);
    }
}
