//! Shop Discord commands - orders, carts and reviews.
//!
//! These are the customer-facing commands. Carts and reviews are keyed by the
//! caller's Discord user ID.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::utils::{format_money, format_stars},
        },
        core::{
            cart,
            order::{self, OrderType},
            phone, review,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    async fn send_order_receipt(
        ctx: poise::Context<'_, BotData, Error>,
        phone_id: i64,
        order_type: OrderType,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let placed = order::place_order(db, phone_id, order_type).await?;
        let phone = phone::require_phone(db, phone_id).await?;

        let verb = match order_type {
            OrderType::Buy => "Bought",
            OrderType::Sell => "Sold",
        };
        ctx.say(format!(
            "🧾 Order #{}: {} 1 × **{}** for {}. {} left in stock.",
            placed.id,
            verb,
            phone.name,
            format_money(placed.total_price),
            phone.stock
        ))
        .await?;
        Ok(())
    }

    /// Buys one unit of a phone from stock.
    #[poise::command(slash_command)]
    pub async fn buy(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
    ) -> Result<()> {
        send_order_receipt(ctx, phone_id, OrderType::Buy).await
    }

    /// Sells one unit of a phone to the shop.
    #[poise::command(slash_command)]
    pub async fn sell(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
    ) -> Result<()> {
        send_order_receipt(ctx, phone_id, OrderType::Sell).await
    }

    /// Your shopping cart.
    #[poise::command(slash_command, subcommands("cart_view", "cart_add", "cart_remove"))]
    pub async fn cart(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Cart commands:\n\
            `/cart view` - Show your cart\n\
            `/cart add` - Put a phone in your cart\n\
            `/cart remove` - Take an item out of your cart",
        )
        .await?;
        Ok(())
    }

    /// Shows your cart and its total.
    #[poise::command(slash_command, rename = "view")]
    pub async fn cart_view(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        let summary = cart::view_cart(&ctx.data().database, &user_id).await?;

        if summary.lines.is_empty() {
            ctx.say("🛒 Your cart is empty.").await?;
            return Ok(());
        }

        let fields = summary.lines.iter().map(|line| {
            (
                format!("Item #{} · {}", line.item.id, line.phone.name),
                format!(
                    "{} × {} = {}",
                    line.item.quantity,
                    format_money(line.phone.base_price),
                    format_money(line.subtotal())
                ),
                false,
            )
        });

        let embed = serenity::CreateEmbed::default()
            .title("🛒 Your cart")
            .color(0x00FE_E75C)
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Total: {}",
                format_money(summary.total)
            )));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Puts a phone in your cart.
    #[poise::command(slash_command, rename = "add")]
    pub async fn cart_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
    ) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        let item = cart::add_to_cart(&ctx.data().database, &user_id, phone_id).await?;
        ctx.say(format!(
            "🛒 Added to your cart (item #{}, quantity {}).",
            item.id, item.quantity
        ))
        .await?;
        Ok(())
    }

    /// Takes an item out of your cart.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn cart_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Cart item ID from /cart view"] item_id: i64,
    ) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        let removed = cart::remove_from_cart(&ctx.data().database, &user_id, item_id).await?;
        ctx.say(format!("🗑️ Removed item #{} from your cart.", removed.id))
            .await?;
        Ok(())
    }

    /// Reviews a phone with 1 to 5 stars.
    #[poise::command(slash_command)]
    pub async fn review(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Phone ID"] phone_id: i64,
        #[description = "Stars from 1 to 5"]
        #[min = 1]
        #[max = 5]
        rating: i32,
        #[description = "What did you think?"] comment: String,
    ) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        let added =
            review::add_review(&ctx.data().database, phone_id, &user_id, rating, &comment).await?;
        ctx.say(format!(
            "Thanks for the review! {}",
            format_stars(added.rating)
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
