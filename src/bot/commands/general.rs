//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**RefurbBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Shopping**\n\
        • `/phone search` - Search the catalog by memory, price, condition and colour.\n\
        • `/phone show <id>` - Details, listings, reviews and related phones.\n\
        • `/brand list` / `/brand show <name>` - Browse by brand.\n\
        • `/buy <id>` / `/sell <id>` - Buy a phone from stock or sell one to us.\n\
        • `/cart <view|add|remove>` - Manage your cart.\n\
        • `/review <id> <stars> <comment>` - Review a phone.\n\
        • `/contact` / `/sell_phone` - Message the staff or offer a phone.\n\n\
        **Staff**\n\
        • `/phone <add|update|delete>` - Manage the catalog.\n\
        • `/brand add` - Add a brand.\n\
        • `/listing <add|remove|show>` - List phones on sales platforms.\n\
        • `/platform <list|add|fees>` - Manage platforms and their fees.\n\
        • `/queries <list|delete>` - Read the customer inbox.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
