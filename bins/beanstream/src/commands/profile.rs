//! Profile commands - inspect and prune payment profiles

use super::{Context, print_json};
use anyhow::Result;
use beanstream_client::models::{Card, ProfileResponse};
use owo_colors::OwoColorize;

/// Show a profile
pub async fn get(ctx: &Context, id: &str) -> Result<()> {
    let profile = ctx.client()?.profiles()?.get_profile(id).await?;

    if ctx.is_json() {
        return print_json(&profile);
    }

    println!("{} {}", "Profile".bold(), profile.id);
    if let Some(billing) = &profile.billing {
        println!("  Billing:  {}, {} {}", billing.name, billing.city, billing.country);
    }
    if let Some(language) = &profile.language {
        println!("  Language: {language}");
    }
    if let Some(card) = &profile.card {
        println!("  Card:     {}", describe_card(card));
    }
    Ok(())
}

/// Delete a profile
pub async fn delete(ctx: &Context, id: &str) -> Result<()> {
    let response = ctx.client()?.profiles()?.delete_profile(id).await?;
    report(ctx, &response)
}

/// List cards on a profile
pub async fn cards(ctx: &Context, id: &str) -> Result<()> {
    let cards = ctx.client()?.profiles()?.get_cards(id).await?;

    if ctx.is_json() {
        return print_json(&cards);
    }

    if cards.is_empty() {
        println!("{}", "No cards on this profile".dimmed());
    }
    for (index, card) in cards.iter().enumerate() {
        let id = card.id.clone().unwrap_or_else(|| (index + 1).to_string());
        println!("  [{id}] {}", describe_card(card));
    }
    Ok(())
}

/// Show one card on a profile
pub async fn card(ctx: &Context, id: &str, card_id: &str) -> Result<()> {
    let card = ctx.client()?.profiles()?.get_card(id, card_id).await?;

    if ctx.is_json() {
        return print_json(&card);
    }

    match card {
        Some(card) => println!("  [{card_id}] {}", describe_card(&card)),
        None => println!("{}", "No such card".dimmed()),
    }
    Ok(())
}

/// Remove a card from a profile
pub async fn remove_card(ctx: &Context, id: &str, card_id: &str) -> Result<()> {
    let response = ctx.client()?.profiles()?.remove_card(id, card_id).await?;
    report(ctx, &response)
}

fn report(ctx: &Context, response: &ProfileResponse) -> Result<()> {
    if ctx.is_json() {
        return print_json(response);
    }
    println!("{} {}", "✓".green(), response.message);
    Ok(())
}

fn describe_card(card: &Card) -> String {
    format!(
        "{} {} exp {}/{}",
        card.card_type.as_deref().unwrap_or("card"),
        card.number,
        card.expiry_month,
        card.expiry_year
    )
}
