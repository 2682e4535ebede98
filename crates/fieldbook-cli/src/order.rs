//! Direct order maintenance against the provider.

use super::booking::connect;

/// # Errors
///
/// Returns an error if the lookup fails.
pub(crate) async fn run_order_show(order_no: &str) -> anyhow::Result<()> {
    let service = connect()?;
    match service.provider().get_order(order_no).await? {
        Some(order) => println!("{}", serde_json::to_string_pretty(&order)?),
        None => println!("order {order_no} not found"),
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the provider refuses the deletion.
pub(crate) async fn run_order_delete(order_no: &str) -> anyhow::Result<()> {
    let service = connect()?;
    service.provider().delete_order(order_no).await?;
    if fieldbook_core::ids::is_temporary_order_no(order_no) {
        println!("temporary order {order_no} deleted");
    } else {
        println!("order {order_no} deleted");
    }
    Ok(())
}
