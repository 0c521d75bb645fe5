//! Customer contact commands - the contact form, sell-a-phone offers and the
//! staff inbox.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::checks::is_staff},
        core::inquiry::{self, SellRequest},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Discord embeds hold at most 25 fields.
    const EMBED_FIELD_LIMIT: usize = 25;
    /// Discord caps an embed field value at 1024 characters.
    const FIELD_VALUE_LIMIT: usize = 1024;

    fn truncate(text: &str, limit: usize) -> String {
        if text.chars().count() <= limit {
            return text.to_string();
        }
        let mut truncated: String = text.chars().take(limit - 1).collect();
        truncated.push('…');
        truncated
    }

    /// Sends a message to the shop staff.
    #[poise::command(slash_command)]
    pub async fn contact(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your name"] name: String,
        #[description = "Email we can reply to"] email: String,
        #[description = "Your message"] message: String,
    ) -> Result<()> {
        inquiry::submit_query(&ctx.data().database, &name, &email, &message).await?;
        ctx.send(
            poise::CreateReply::default()
                .content("📨 Thanks! Our staff will get back to you by email.")
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Offers the shop a phone we do not stock yet.
    #[poise::command(slash_command)]
    pub async fn sell_phone(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your name"] name: String,
        #[description = "Email we can reply to"] email: String,
        #[description = "Model name"] phone_name: String,
        #[description = "Brand"] brand: String,
        #[description = "Condition in your own words"] condition: String,
        #[description = "Anything else we should know"] comments: Option<String>,
    ) -> Result<()> {
        let request = SellRequest {
            phone_name,
            brand,
            condition,
            comments: comments.unwrap_or_default(),
        };
        inquiry::submit_sell_request(&ctx.data().database, &name, &email, &request).await?;
        ctx.send(
            poise::CreateReply::default()
                .content("📨 Thanks! We will email you an offer.")
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Customer query inbox.
    #[poise::command(slash_command, subcommands("queries_list", "queries_delete"))]
    pub async fn queries(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Query commands:\n\
            `/queries list` - Read customer queries (staff)\n\
            `/queries delete` - Delete a handled query (staff)",
        )
        .await?;
        Ok(())
    }

    /// Shows customer queries, newest first.
    #[poise::command(slash_command, rename = "list", check = "is_staff")]
    pub async fn queries_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let queries = inquiry::list_queries(&ctx.data().database).await?;
        if queries.is_empty() {
            ctx.say("📭 No customer queries.").await?;
            return Ok(());
        }

        let total = queries.len();
        let fields = queries.iter().take(EMBED_FIELD_LIMIT).map(|q| {
            (
                format!("#{} {} <{}>", q.id, q.name, q.email),
                truncate(&q.message, FIELD_VALUE_LIMIT),
                false,
            )
        });

        let embed = serenity::CreateEmbed::default()
            .title("📬 Customer queries")
            .color(0x00ED_4245)
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(format!("{total} open")));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Deletes a customer query.
    #[poise::command(slash_command, rename = "delete", check = "is_staff")]
    pub async fn queries_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Query ID"] query_id: i64,
    ) -> Result<()> {
        let deleted = inquiry::delete_query(&ctx.data().database, query_id).await?;
        ctx.say(format!("🗑️ Deleted query #{} from {}.", deleted.id, deleted.name))
            .await?;
        Ok(())
    }

}

// Re-export all commands
pub use inner::*;
