// src/factory.rs
//
// Builds provider-shaped customer and subscription resources from a seed.

use serde_json::{json, Value};

use crate::cfg::config::DefaultPlan;
use crate::seed::{CreditCard, DomainSeed};
use crate::utils::to_epoch_seconds;

/// Render a card the way the provider lists it under a customer's sources.
pub fn make_source_object(card: &CreditCard, customer_id: &str) -> Value {
    let (exp_month, exp_year) = match card.exp_month_year() {
        Ok((m, y)) => (json!(m), json!(y)),
        Err(_) => (Value::Null, Value::Null),
    };
    json!({
        "id": card.id,
        "object": "card",
        "address_city": null,
        "address_country": null,
        "address_line1": null,
        "address_line1_check": null,
        "address_line2": null,
        "address_state": null,
        "address_zip": null,
        "address_zip_check": null,
        "brand": card.brand,
        "country": "US",
        "customer": customer_id,
        "cvc_check": "pass",
        "dynamic_last4": null,
        "exp_month": exp_month,
        "exp_year": exp_year,
        "funding": "credit",
        "last4": card.last4,
        "metadata": {},
        "name": null,
        "tokenization_method": null
    })
}

/// A single-page list object, the provider's wrapper for nested collections.
/// `total_count` is always 1, even while `data` is null, as the provider
/// fixtures render it.
pub fn list_page(data: Option<Vec<Value>>, url: String) -> Value {
    json!({
        "object": "list",
        "data": data,
        "has_more": false,
        "total_count": 1,
        "url": url
    })
}

pub fn sources_url(customer_id: &str) -> String {
    format!("/v1/customers/{}/sources", customer_id)
}

pub fn build_customer(seed: &DomainSeed) -> Value {
    let sources = seed
        .credit_card
        .as_ref()
        .map(|card| vec![make_source_object(card, &seed.customer_id)]);
    let default_source = seed.credit_card.as_ref().map(|card| card.id.clone());

    json!({
        "id": seed.customer_id,
        "object": "customer",
        "account_balance": 0,
        "created": to_epoch_seconds(seed.created_at),
        "currency": "usd",
        "default_source": default_source,
        "delinquent": false,
        "description": null,
        "discount": null,
        "email": null,
        "livemode": false,
        "metadata": {
            "orgId": seed.id
        },
        "shipping": null,
        "sources": list_page(sources, sources_url(&seed.customer_id))
    })
}

fn build_plan(seed: &DomainSeed, plan: &DefaultPlan) -> Value {
    json!({
        "id": plan.id,
        "name": plan.name,
        "amount": plan.amount,
        "object": "plan",
        "created": to_epoch_seconds(seed.period_start),
        "currency": "usd",
        "interval": "month",
        "interval_count": 1,
        "livemode": false,
        "metadata": {},
        "statement_descriptor": null,
        "trial_period_days": null
    })
}

fn build_subscription_item(seed: &DomainSeed, plan: &DefaultPlan) -> Value {
    json!({
        "id": "si_123",
        "object": "subscription_item",
        "created": to_epoch_seconds(seed.period_start),
        "plan": build_plan(seed, plan),
        "quantity": seed.active_member_count()
    })
}

pub fn build_subscription(seed: &DomainSeed, plan: &DefaultPlan) -> Value {
    let period_start = to_epoch_seconds(seed.period_start);
    let period_end = to_epoch_seconds(seed.period_end);

    // A card on file means the org is paying, so there is no trial window.
    let (trial_start, trial_end) = match seed.credit_card {
        Some(_) => (None, None),
        None => (Some(period_start), Some(period_end)),
    };

    json!({
        "id": seed.subscription_id,
        "object": "subscription",
        "application_fee_percent": null,
        "cancel_at_period_end": false,
        "canceled_at": null,
        "created": to_epoch_seconds(seed.created_at),
        "current_period_end": period_end,
        "current_period_start": period_start,
        "customer": seed.customer_id,
        "discount": null,
        "ended_at": null,
        "items": list_page(
            Some(vec![build_subscription_item(seed, plan)]),
            format!("/v1/subscription_items?subscription={}", seed.subscription_id),
        ),
        "livemode": false,
        "metadata": {
            "orgId": seed.id
        },
        "plan": build_plan(seed, plan),
        "quantity": seed.active_member_count(),
        "start": period_start,
        "status": "active",
        "tax_percent": 0.0,
        "trial_end": trial_end,
        "trial_start": trial_start
    })
}
