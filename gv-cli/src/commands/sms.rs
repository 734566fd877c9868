//! SMS command.

use gv_core::error::GvResult;

use super::Context;

pub async fn run(ctx: &Context, number: String, text: String) -> GvResult<()> {
    let client = super::connect(ctx).await?;
    let response = client.send_sms(&number, &text).await?;
    super::print_action(
        ctx.format,
        &format!("Sent {} characters to {number}.", text.chars().count()),
        &response,
    )
}
