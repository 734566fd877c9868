//! Call and cancel commands.

use gv_api::CallParams;
use gv_core::error::GvResult;
use gv_models::PhoneType;

use super::Context;

pub async fn call(
    ctx: &Context,
    number: String,
    from: Option<String>,
    phone_type: Option<u8>,
) -> GvResult<()> {
    let client = super::connect(ctx).await?;

    let params = CallParams {
        forwarding_number: from,
        phone_type: phone_type.map(PhoneType::from),
        ..CallParams::to(number.clone())
    };
    let response = client.call(params).await?;

    super::print_action(
        ctx.format,
        &format!("Calling {number}. Answer your forwarding phone to connect."),
        &response,
    )
}

pub async fn cancel(ctx: &Context, number: Option<String>, from: Option<String>) -> GvResult<()> {
    let client = super::connect(ctx).await?;
    let response = client.cancel(number.as_deref(), from.as_deref()).await?;
    super::print_action(ctx.format, "Call cancelled.", &response)
}
