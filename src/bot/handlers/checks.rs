//! Command checks - gatekeeping for staff-only commands.

use crate::{bot::BotData, errors::Error};
use tracing::warn;

/// Allows the command only for users listed in `STAFF_USER_IDS`.
///
/// Non-staff users get a short refusal instead of poise's generic check failure.
pub async fn is_staff(ctx: poise::Context<'_, BotData, Error>) -> Result<bool, Error> {
    let user_id = ctx.author().id.to_string();
    if ctx.data().is_staff(&user_id) {
        return Ok(true);
    }

    warn!(user_id = %user_id, command = %ctx.command().name, "Staff command refused");
    ctx.say("⛔ This command is only available to staff.").await?;
    Ok(false)
}
