//! Listing Discord commands - `listing` and `platform`.
//!
//! Staff put phones on sales platforms here; prices are always computed from the
//! platform fees, never typed in.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::utils::{format_money, parse_money},
            handlers::{autocomplete, checks::is_staff},
        },
        core::{listing, phone, platform},
        entities::PlatformModel,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use rust_decimal::Decimal;
    use std::fmt::Write;

    async fn require_platform(
        ctx: poise::Context<'_, BotData, Error>,
        name: String,
    ) -> Result<PlatformModel> {
        platform::get_platform_by_name(&ctx.data().database, &name)
            .await?
            .ok_or(Error::PlatformNotFound { id: name })
    }

    /// Manage phone listings on sales platforms.
    #[poise::command(slash_command, subcommands("listing_add", "listing_remove", "listing_show"))]
    pub async fn listing(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Listing commands:\n\
            `/listing add` - List a phone on a platform, or refresh its price (staff)\n\
            `/listing remove` - Take a listing down (staff)\n\
            `/listing show` - Show where a phone is listed",
        )
        .await?;
        Ok(())
    }

    /// Lists a phone on a platform at the computed price, or refreshes an existing listing.
    #[poise::command(slash_command, rename = "add", check = "is_staff")]
    pub async fn listing_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
        #[description = "Platform"]
        #[autocomplete = "autocomplete::autocomplete_platform_name"]
        platform_name: String,
    ) -> Result<()> {
        let target = require_platform(ctx, platform_name).await?;
        let db = &ctx.data().database;

        let listed = listing::activate_listing(db, phone_id, target.id).await?;
        let profitable = listing::listing_is_profitable(db, listed.id).await?;

        let mut reply = format!(
            "✅ Listing #{} is live on **{}** at {} as \"{}\".",
            listed.id,
            target.name,
            format_money(listed.platform_price),
            listed.platform_condition_category
        );
        if !profitable {
            reply.push_str(
                "\n⚠️ This price has no margin over the base price, so the listing makes no profit.",
            );
        }
        ctx.say(reply).await?;
        Ok(())
    }

    /// Takes a listing off its platform.
    #[poise::command(slash_command, rename = "remove", check = "is_staff")]
    pub async fn listing_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Listing ID"] listing_id: i64,
    ) -> Result<()> {
        let delisted = listing::delist(&ctx.data().database, listing_id).await?;
        ctx.say(format!("⏸️ Listing #{} delisted.", delisted.id))
            .await?;
        Ok(())
    }

    /// Shows every listing of a phone.
    #[poise::command(slash_command, rename = "show")]
    pub async fn listing_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let phone = phone::require_phone(db, phone_id).await?;
        let details = listing::get_listings_for_phone(db, phone_id).await?;

        if details.is_empty() {
            ctx.say(format!("**{}** is not listed anywhere yet.", phone.name))
                .await?;
            return Ok(());
        }

        let fields = details.iter().map(|detail| {
            let mut value = format!(
                "{} as \"{}\"\n{}",
                format_money(detail.listing.platform_price),
                detail.listing.platform_condition_category,
                if detail.listing.is_listed { "Active" } else { "Delisted" }
            );
            if !detail.profitable {
                value.push_str(" · ⚠️ unprofitable");
            }
            (
                format!("#{} {}", detail.listing.id, detail.platform.name),
                value,
                true,
            )
        });

        let embed = serenity::CreateEmbed::default()
            .title(format!("Listings for {}", phone.name))
            .description(format!("Base price {}", format_money(phone.base_price)))
            .color(0x0057_F287)
            .fields(fields);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Manage sales platforms and their fees.
    #[poise::command(slash_command, subcommands("platform_list", "platform_add", "platform_fees"))]
    pub async fn platform(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Platform commands:\n\
            `/platform list` - All platforms and their fees\n\
            `/platform add` - Register a platform (staff)\n\
            `/platform fees` - Change a platform's fees (staff)",
        )
        .await?;
        Ok(())
    }

    /// Lists all platforms and their fees.
    #[poise::command(slash_command, rename = "list")]
    pub async fn platform_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let platforms = platform::list_platforms(&ctx.data().database).await?;
        if platforms.is_empty() {
            ctx.say("No platforms registered.").await?;
            return Ok(());
        }

        let mut text = String::from("**Platforms**\n");
        for p in &platforms {
            let _ = writeln!(
                text,
                "• **{}**: {}% + {}",
                p.name,
                p.fee_percentage,
                format_money(p.fixed_fee)
            );
        }
        ctx.say(text).await?;
        Ok(())
    }

    /// Registers a new sales platform.
    #[poise::command(slash_command, rename = "add", check = "is_staff")]
    pub async fn platform_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Platform name"] name: String,
        #[description = "Percentage fee (e.g. 10 for 10%)"] fee_percentage: String,
        #[description = "Fixed fee per sale. Defaults to 0."] fixed_fee: Option<String>,
    ) -> Result<()> {
        let fee_percentage = parse_money(&fee_percentage)?;
        let fixed_fee = match fixed_fee {
            Some(fee) => parse_money(&fee)?,
            None => Decimal::ZERO,
        };

        let created =
            platform::create_platform(&ctx.data().database, &name, fee_percentage, fixed_fee)
                .await?;
        ctx.say(format!(
            "✅ Registered **{}** ({}% + {}).",
            created.name,
            created.fee_percentage,
            format_money(created.fixed_fee)
        ))
        .await?;
        Ok(())
    }

    /// Changes a platform's fees. Existing listings keep their price until re-added.
    #[poise::command(slash_command, rename = "fees", check = "is_staff")]
    pub async fn platform_fees(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Platform"]
        #[autocomplete = "autocomplete::autocomplete_platform_name"]
        name: String,
        #[description = "New percentage fee"] fee_percentage: String,
        #[description = "New fixed fee"] fixed_fee: String,
    ) -> Result<()> {
        let target = require_platform(ctx, name).await?;
        let updated = platform::update_platform_fees(
            &ctx.data().database,
            target.id,
            parse_money(&fee_percentage)?,
            parse_money(&fixed_fee)?,
        )
        .await?;

        ctx.say(format!(
            "✅ **{}** now charges {}% + {}. Re-add listings to apply the new fees.",
            updated.name,
            updated.fee_percentage,
            format_money(updated.fixed_fee)
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
