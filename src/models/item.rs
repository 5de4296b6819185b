use serde::{Deserialize, Serialize};

use super::ids::{AssetId, Sku};
use super::quantity::Quantity;

/// The wire shape is a dynamically-keyed dict in the source system: a
/// replenishment line is sku-keyed, a physical lot moving between facilities
/// is assetID-keyed (and may still carry its sku for reference). We replace
/// that dynamic shape with this tagged variant plus a `key()` accessor that
/// picks sku when present, else assetID — matching the source's own
/// preference order.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    SkuRequest {
        sku: Sku,
        quantity: Quantity,
    },
    AssetLot {
        asset_id: AssetId,
        sku: Option<Sku>,
        quantity: Quantity,
    },
}

impl Item {
    pub fn sku(&self) -> Option<&Sku> {
        match self {
            Item::SkuRequest { sku, .. } => Some(sku),
            Item::AssetLot { sku, .. } => sku.as_ref(),
        }
    }

    pub fn asset_id(&self) -> Option<&AssetId> {
        match self {
            Item::SkuRequest { .. } => None,
            Item::AssetLot { asset_id, .. } => Some(asset_id),
        }
    }

    pub fn quantity(&self) -> &Quantity {
        match self {
            Item::SkuRequest { quantity, .. } => quantity,
            Item::AssetLot { quantity, .. } => quantity,
        }
    }

    /// sku if present, else assetID — the key used to build the virtual
    /// processor inventory (§4.2).
    pub fn inventory_key(&self) -> Option<String> {
        match self {
            Item::SkuRequest { sku, .. } => Some(sku.as_str().to_string()),
            Item::AssetLot { asset_id, sku, .. } => {
                Some(sku.as_ref().map(|s| s.as_str()).unwrap_or(asset_id.as_str()).to_string())
            }
        }
    }

    pub fn with_quantity_value(&self, value: f64) -> Item {
        match self {
            Item::SkuRequest { sku, quantity } => Item::SkuRequest {
                sku: sku.clone(),
                quantity: quantity.with_value(value),
            },
            Item::AssetLot {
                asset_id,
                sku,
                quantity,
            } => Item::AssetLot {
                asset_id: asset_id.clone(),
                sku: sku.clone(),
                quantity: quantity.with_value(value),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    sku: Option<Sku>,
    #[serde(rename = "assetID", skip_serializing_if = "Option::is_none")]
    asset_id: Option<AssetId>,
    quantity: Quantity,
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wire = match self {
            Item::SkuRequest { sku, quantity } => ItemWire {
                sku: Some(sku.clone()),
                asset_id: None,
                quantity: quantity.clone(),
            },
            Item::AssetLot {
                asset_id,
                sku,
                quantity,
            } => ItemWire {
                sku: sku.clone(),
                asset_id: Some(asset_id.clone()),
                quantity: quantity.clone(),
            },
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Item, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = ItemWire::deserialize(deserializer)?;
        match (wire.asset_id, wire.sku) {
            (Some(asset_id), sku) => Ok(Item::AssetLot {
                asset_id,
                sku,
                quantity: wire.quantity,
            }),
            (None, Some(sku)) => Ok(Item::SkuRequest {
                sku,
                quantity: wire.quantity,
            }),
            (None, None) => Err(serde::de::Error::custom(
                "item has neither sku nor assetID",
            )),
        }
    }
}
