use chrono::NaiveDateTime;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::deliveries::deliveries_errors::DeliveryError;

/// Gig apps a delivery or shift can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryApp {
    UberEats,
    Doordash,
    Grubhub,
    Instacart,
}

impl DeliveryApp {
    /// All apps in ordinal order
    pub const ALL: [DeliveryApp; 4] = [
        DeliveryApp::UberEats,
        DeliveryApp::Doordash,
        DeliveryApp::Grubhub,
        DeliveryApp::Instacart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryApp::UberEats => "UberEats",
            DeliveryApp::Doordash => "Doordash",
            DeliveryApp::Grubhub => "Grubhub",
            DeliveryApp::Instacart => "Instacart",
        }
    }

}

impl fmt::Display for DeliveryApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryApp {
    type Err = DeliveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UberEats" => Ok(DeliveryApp::UberEats),
            "Doordash" => Ok(DeliveryApp::Doordash),
            "Grubhub" => Ok(DeliveryApp::Grubhub),
            "Instacart" => Ok(DeliveryApp::Instacart),
            other => Err(DeliveryError::InvalidData(format!(
                "Unknown delivery app: {}",
                other
            ))),
        }
    }
}

/// Domain model representing one completed delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: String,
    pub app: DeliveryApp,
    pub delivery_time: NaiveDateTime,
    pub base_pay: Decimal,
    pub tip_pay: Decimal,
    pub total_pay: Decimal,
    pub mileage: Decimal,
    pub restaurant: String,
    pub customer_neighborhood: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for deliveries
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::deliveries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct DeliveryDB {
    pub id: String,
    pub app: String,
    pub delivery_time: NaiveDateTime,
    pub base_pay: f64,
    pub tip_pay: f64,
    pub total_pay: f64,
    pub mileage: f64,
    pub restaurant: String,
    pub customer_neighborhood: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for the user->delivery ownership edge
#[derive(Queryable, Selectable, Identifiable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_deliveries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDeliveryDB {
    pub id: String,
    pub user_id: String,
    pub delivery_id: String,
    pub date_added: NaiveDateTime,
}

pub(crate) fn decimal_from_db(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default()
}

pub(crate) fn decimal_to_db(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

impl TryFrom<DeliveryDB> for Delivery {
    type Error = DeliveryError;

    fn try_from(db: DeliveryDB) -> Result<Self, Self::Error> {
        Ok(Delivery {
            app: db.app.parse()?,
            id: db.id,
            delivery_time: db.delivery_time,
            base_pay: decimal_from_db(db.base_pay),
            tip_pay: decimal_from_db(db.tip_pay),
            total_pay: decimal_from_db(db.total_pay),
            mileage: decimal_from_db(db.mileage),
            restaurant: db.restaurant,
            customer_neighborhood: db.customer_neighborhood,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Input model for recording a new delivery
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    pub id: Option<String>,
    pub app: DeliveryApp,
    pub delivery_time: NaiveDateTime,
    pub base_pay: Decimal,
    pub tip_pay: Decimal,
    pub mileage: Decimal,
    pub restaurant: String,
    pub customer_neighborhood: String,
    pub notes: Option<String>,
}

impl NewDelivery {
    /// Validates the new delivery data
    pub fn validate(&self) -> crate::deliveries::Result<()> {
        if self.restaurant.trim().is_empty() {
            return Err(DeliveryError::InvalidData(
                "Restaurant cannot be empty".to_string(),
            ));
        }
        if self.customer_neighborhood.trim().is_empty() {
            return Err(DeliveryError::InvalidData(
                "Customer neighborhood cannot be empty".to_string(),
            ));
        }
        if self.base_pay.is_sign_negative() || self.tip_pay.is_sign_negative() {
            return Err(DeliveryError::InvalidData(
                "Pay amounts cannot be negative".to_string(),
            ));
        }
        if self.mileage.is_sign_negative() {
            return Err(DeliveryError::InvalidData(
                "Mileage cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing delivery
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryUpdate {
    pub id: String,
    pub app: DeliveryApp,
    pub delivery_time: NaiveDateTime,
    pub base_pay: Decimal,
    pub tip_pay: Decimal,
    pub mileage: Decimal,
    pub restaurant: String,
    pub customer_neighborhood: String,
    pub notes: Option<String>,
}

impl DeliveryUpdate {
    /// Validates the delivery update data
    pub fn validate(&self) -> crate::deliveries::Result<()> {
        if self.id.trim().is_empty() {
            return Err(DeliveryError::InvalidData(
                "Delivery ID is required for updates".to_string(),
            ));
        }
        NewDelivery {
            id: Some(self.id.clone()),
            app: self.app,
            delivery_time: self.delivery_time,
            base_pay: self.base_pay,
            tip_pay: self.tip_pay,
            mileage: self.mileage,
            restaurant: self.restaurant.clone(),
            customer_neighborhood: self.customer_neighborhood.clone(),
            notes: self.notes.clone(),
        }
        .validate()
    }
}
