//! Catalog Discord commands - `phone` and `brand`.
//!
//! Anyone can browse phones and brands; adding, editing and deleting is
//! restricted to staff.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::utils::{
                ConditionChoice, format_money, format_stars, parse_money, parse_optional_money,
            },
            handlers::{autocomplete, checks::is_staff},
        },
        core::{
            brand, listing,
            phone::{self, NewPhone, PhoneFilter, PhoneUpdate},
            review,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Discord embeds hold at most 25 fields.
    const EMBED_FIELD_LIMIT: usize = 25;

    /// Browse and manage the phone catalog.
    #[poise::command(
        slash_command,
        subcommands("phone_search", "phone_show", "phone_add", "phone_update", "phone_delete")
    )]
    pub async fn phone(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Phone catalog commands:\n\
            `/phone search` - Search phones by memory, price, condition and colour\n\
            `/phone show` - Show a phone with its listings and reviews\n\
            `/phone add` - Add a phone (staff)\n\
            `/phone update` - Edit a phone (staff)\n\
            `/phone delete` - Delete a phone (staff)",
        )
        .await?;
        Ok(())
    }

    /// Searches the catalog. All filters are optional.
    #[poise::command(slash_command, rename = "search")]
    pub async fn phone_search(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Storage in GB"] memory_gb: Option<i32>,
        #[description = "Minimum price"] min_price: Option<String>,
        #[description = "Maximum price"] max_price: Option<String>,
        #[description = "Condition grade"] condition: Option<ConditionChoice>,
        #[description = "Colour contains"] color: Option<String>,
    ) -> Result<()> {
        let filter = PhoneFilter {
            memory_gb,
            min_price: parse_optional_money(min_price.as_deref())?,
            max_price: parse_optional_money(max_price.as_deref())?,
            condition: condition.map(Into::into),
            color,
        };

        let phones = phone::find_phones(&ctx.data().database, &filter).await?;
        if phones.is_empty() {
            ctx.say("No phones match those filters.").await?;
            return Ok(());
        }

        let total = phones.len();
        let fields = phones.into_iter().take(EMBED_FIELD_LIMIT).map(|p| {
            (
                format!("#{} {} ({})", p.id, p.name, p.condition),
                format!(
                    "{} · {} GB · {} in stock",
                    format_money(p.base_price),
                    p.memory_gb,
                    p.stock
                ),
                false,
            )
        });

        let mut embed = serenity::CreateEmbed::default()
            .title("**Phones**")
            .color(0x0058_65F2)
            .fields(fields);
        if total > EMBED_FIELD_LIMIT {
            embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                "Showing {EMBED_FIELD_LIMIT} of {total} phones. Narrow the filters to see more."
            )));
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows one phone with its platform listings, reviews and related phones.
    #[poise::command(slash_command, rename = "show")]
    pub async fn phone_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let phone = phone::require_phone(db, phone_id).await?;
        let listings = listing::get_listings_for_phone(db, phone_id).await?;
        let reviews = review::get_reviews_for_phone(db, phone_id).await?;
        let average = review::average_rating(db, phone_id).await?;
        let related = phone::related_phones(db, &phone).await?;

        let mut details = format!(
            "Price: **{}**\nCondition: {}\nMemory: {} GB\nStock: {}",
            format_money(phone.base_price),
            phone.condition,
            phone.memory_gb,
            phone.stock
        );
        if !phone.color.is_empty() {
            let _ = write!(details, "\nColour: {}", phone.color);
        }
        if !phone.camera_quality.is_empty() {
            let _ = write!(details, "\nCamera: {}", phone.camera_quality);
        }

        let mut listing_text = String::new();
        for detail in &listings {
            let _ = writeln!(
                listing_text,
                "`#{}` {}: {} as \"{}\" {}{}",
                detail.listing.id,
                detail.platform.name,
                format_money(detail.listing.platform_price),
                detail.listing.platform_condition_category,
                if detail.listing.is_listed { "✅" } else { "⏸️ delisted" },
                if detail.profitable { "" } else { " ⚠️ unprofitable" },
            );
        }
        if listing_text.is_empty() {
            listing_text.push_str("Not listed anywhere yet.");
        }

        let mut review_text = average.map_or_else(
            || "No reviews yet.".to_string(),
            |avg| format!("Average {avg:.1}/5 from {} reviews\n", reviews.len()),
        );
        for r in reviews.iter().take(5) {
            let _ = writeln!(review_text, "{} <@{}>: {}", format_stars(r.rating), r.user_id, r.comment);
        }

        let mut embed = serenity::CreateEmbed::default()
            .title(format!("#{} {}", phone.id, phone.name))
            .color(0x0058_65F2)
            .description(details)
            .field("Listings", listing_text, false)
            .field("Reviews", review_text, false);
        if !related.is_empty() {
            let names: Vec<String> = related.iter().map(|p| format!("#{} {}", p.id, p.name)).collect();
            embed = embed.field("Related phones", names.join("\n"), false);
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a phone to the catalog.
    #[poise::command(slash_command, rename = "add", check = "is_staff")]
    pub async fn phone_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Model name (e.g. 'Galaxy S21')"] name: String,
        #[description = "Base cost before platform fees (e.g. 249.99)"] base_price: String,
        #[description = "Condition grade"] condition: ConditionChoice,
        #[description = "Brand"]
        #[autocomplete = "autocomplete::autocomplete_brand_name"]
        brand_name: Option<String>,
        #[description = "Units in stock. Defaults to 0."] stock: Option<i32>,
        #[description = "Storage in GB. Defaults to 128."] memory_gb: Option<i32>,
        #[description = "Camera (e.g. '48MP')"] camera_quality: Option<String>,
        #[description = "Colour"] color: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let brand_id = match brand_name {
            Some(name) => Some(
                brand::get_brand_by_name(db, &name)
                    .await?
                    .ok_or(Error::BrandNotFound { name })?
                    .id,
            ),
            None => None,
        };

        let mut new_phone = NewPhone::new(name, parse_money(&base_price)?, condition.into());
        new_phone.brand_id = brand_id;
        new_phone.stock = stock.unwrap_or(0);
        new_phone.memory_gb = memory_gb.unwrap_or(phone::DEFAULT_MEMORY_GB);
        new_phone.camera_quality = camera_quality.unwrap_or_default();
        new_phone.color = color.unwrap_or_default();

        let phone = phone::create_phone(db, new_phone).await?;
        ctx.say(format!(
            "✅ Added phone #{} **{}** at {}.",
            phone.id,
            phone.name,
            format_money(phone.base_price)
        ))
        .await?;
        Ok(())
    }

    /// Edits a phone. Only the options you fill in are changed.
    #[poise::command(slash_command, rename = "update", check = "is_staff")]
    pub async fn phone_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
        #[description = "New model name"] name: Option<String>,
        #[description = "New base price"] base_price: Option<String>,
        #[description = "New condition"] condition: Option<ConditionChoice>,
        #[description = "New stock level"] stock: Option<i32>,
        #[description = "New storage in GB"] memory_gb: Option<i32>,
    ) -> Result<()> {
        let changes = PhoneUpdate {
            name,
            base_price: parse_optional_money(base_price.as_deref())?,
            condition: condition.map(Into::into),
            stock,
            memory_gb,
        };

        let phone = phone::update_phone(&ctx.data().database, phone_id, changes).await?;
        ctx.say(format!(
            "✅ Updated phone #{} **{}**. Relist it to refresh platform prices.",
            phone.id, phone.name
        ))
        .await?;
        Ok(())
    }

    /// Deletes a phone with its listings, orders, reviews and cart entries.
    #[poise::command(slash_command, rename = "delete", check = "is_staff")]
    pub async fn phone_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
    ) -> Result<()> {
        let phone = phone::delete_phone(&ctx.data().database, phone_id).await?;
        ctx.say(format!("🗑️ Deleted phone #{} **{}**.", phone.id, phone.name))
            .await?;
        Ok(())
    }

    /// Browse and manage brands.
    #[poise::command(slash_command, subcommands("brand_list", "brand_show", "brand_add"))]
    pub async fn brand(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Brand commands:\n\
            `/brand list` - All brands with phone counts\n\
            `/brand show` - A brand and its phones\n\
            `/brand add` - Add a brand (staff)",
        )
        .await?;
        Ok(())
    }

    /// Lists all brands with the number of phones each has.
    #[poise::command(slash_command, rename = "list")]
    pub async fn brand_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let summaries = brand::list_brands_with_phone_counts(&ctx.data().database).await?;
        if summaries.is_empty() {
            ctx.say("No brands yet. Staff can add one with `/brand add`.")
                .await?;
            return Ok(());
        }

        let mut text = String::new();
        for summary in &summaries {
            let _ = writeln!(text, "**{}** - {} phones", summary.brand.name, summary.phone_count);
        }
        ctx.say(text).await?;
        Ok(())
    }

    /// Shows a brand and its phones.
    #[poise::command(slash_command, rename = "show")]
    pub async fn brand_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Brand"]
        #[autocomplete = "autocomplete::autocomplete_brand_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let found = brand::get_brand_by_name(db, &name)
            .await?
            .ok_or(Error::BrandNotFound { name })?;
        let detail = brand::get_brand_detail(db, found.id).await?;

        let mut text = format!("**{}**\n", detail.brand.name);
        if detail.phones.is_empty() {
            text.push_str("No phones yet.");
        }
        for p in &detail.phones {
            let _ = writeln!(
                text,
                "`#{}` {} ({}) - {}",
                p.id,
                p.name,
                p.condition,
                format_money(p.base_price)
            );
        }
        ctx.say(text).await?;
        Ok(())
    }

    /// Adds a brand.
    #[poise::command(slash_command, rename = "add", check = "is_staff")]
    pub async fn brand_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Brand name"] name: String,
    ) -> Result<()> {
        let brand = brand::create_brand(&ctx.data().database, &name).await?;
        ctx.say(format!("✅ Added brand **{}**.", brand.name)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
