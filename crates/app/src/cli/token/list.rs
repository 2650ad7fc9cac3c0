use hr_trainer::tokens::TokenStore;

pub(crate) async fn run(store: &dyn TokenStore) -> Result<(), String> {
    let tokens = store
        .list_active()
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no active tokens");
        return Ok(());
    }

    println!("{} active token(s), newest first", tokens.len());

    for record in tokens {
        println!();
        println!("  {}  {}", record.uuid, record.token.preview());
        println!("  issued {}, expires {}", record.created_at, record.expires_at);
    }

    Ok(())
}
