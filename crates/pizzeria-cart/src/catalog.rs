//! # Topping Catalog
//!
//! Read-only topping reference data, supplied by the menu store and handed
//! to the cart. Nothing here fetches data; callers load the JSON however they
//! like and pass it in.
//!
//! ## Catalog JSON
//! ```json
//! [
//!   { "id": "pepperoni", "name": "Pepperoni", "category": "meat",
//!     "smallPrice": "1.50", "mediumPrice": "2.00", "largePrice": "2.50" }
//! ]
//! ```

use std::collections::HashMap;

use pizzeria_core::validation::validate_topping;
use pizzeria_core::{
    ModificationKind, PizzaHalf, Topping, ToppingCategory, ToppingModification, ValidationError,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult};

/// A topping change as the storefront submits it: by topping id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRequest {
    #[serde(rename = "type")]
    pub kind: ModificationKind,

    pub topping_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub replaced_topping_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub half: Option<PizzaHalf>,
}

/// Validated, id-indexed toppings.
#[derive(Debug, Clone, Default)]
pub struct ToppingCatalog {
    toppings: Vec<Topping>,
    index: HashMap<String, usize>,
}

impl ToppingCatalog {
    /// Builds a catalog, validating every entry.
    ///
    /// ## Errors
    /// - any topping failing [`validate_topping`]
    /// - two toppings sharing an id
    pub fn from_toppings(toppings: Vec<Topping>) -> CartResult<Self> {
        let mut index = HashMap::with_capacity(toppings.len());

        for (position, topping) in toppings.iter().enumerate() {
            validate_topping(topping)?;

            if index.insert(topping.id.clone(), position).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "topping id".to_string(),
                    value: topping.id.clone(),
                }
                .into());
            }
        }

        Ok(ToppingCatalog { toppings, index })
    }

    /// Parses and validates a JSON array of toppings.
    pub fn from_json(json: &str) -> CartResult<Self> {
        let toppings: Vec<Topping> = serde_json::from_str(json)?;
        Self::from_toppings(toppings)
    }

    pub fn get(&self, id: &str) -> Option<&Topping> {
        self.index.get(id).map(|&i| &self.toppings[i])
    }

    /// Like [`ToppingCatalog::get`] but a missing id is an error.
    pub fn require(&self, id: &str) -> CartResult<&Topping> {
        self.get(id)
            .ok_or_else(|| CartError::ToppingNotFound(id.to_string()))
    }

    /// Toppings of one category, in catalog order.
    pub fn by_category<'a>(
        &'a self,
        category: &'a ToppingCategory,
    ) -> impl Iterator<Item = &'a Topping> + 'a {
        self.toppings.iter().filter(move |t| &t.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topping> {
        self.toppings.iter()
    }

    pub fn len(&self) -> usize {
        self.toppings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toppings.is_empty()
    }

    /// Turns a request into a priced-ready modification with topping
    /// snapshots from this catalog.
    ///
    /// A `replace` without `replaced_topping_id` resolves with no replaced
    /// topping; the pricing engine then rejects it with a reason.
    pub fn resolve(&self, request: &ModificationRequest) -> CartResult<ToppingModification> {
        let topping = self.require(&request.topping_id)?.clone();

        let replaced_topping = match (request.kind, &request.replaced_topping_id) {
            (ModificationKind::Replace, Some(id)) => Some(self.require(id)?.clone()),
            _ => None,
        };

        Ok(ToppingModification {
            kind: request.kind,
            topping,
            replaced_topping,
            half: request.half,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": "mushrooms", "name": "Mushrooms", "category": "vegetable",
         "smallPrice": "1.00", "mediumPrice": "1.50", "largePrice": "2.00"},
        {"id": "pepperoni", "name": "Pepperoni", "category": "meat",
         "smallPrice": "1.50", "mediumPrice": "2.00", "largePrice": "2.50"},
        {"id": "feta", "name": "Feta", "category": "cheese",
         "smallPrice": "1.25", "mediumPrice": "1.75", "largePrice": "2.25"}
    ]"#;

    #[test]
    fn test_from_json_and_lookup() {
        let catalog = ToppingCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get("feta").unwrap().name, "Feta");
        assert!(catalog.get("anchovies").is_none());
        assert!(matches!(
            catalog.require("anchovies"),
            Err(CartError::ToppingNotFound(id)) if id == "anchovies"
        ));

        let meats: Vec<_> = catalog.by_category(&ToppingCategory::Meat).collect();
        assert_eq!(meats.len(), 1);
        assert_eq!(meats[0].id, "pepperoni");
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let catalog = ToppingCatalog::from_json(CATALOG).unwrap();
        let mut toppings: Vec<Topping> = catalog.iter().cloned().collect();
        toppings.push(toppings[0].clone());

        let err = ToppingCatalog::from_toppings(toppings).unwrap_err();
        assert!(matches!(
            err,
            CartError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_invalid_entries_are_rejected() {
        let bad_price = r#"[{"id": "x", "name": "X", "category": "meat",
            "smallPrice": "free", "mediumPrice": "1", "largePrice": "1"}]"#;
        assert!(matches!(
            ToppingCatalog::from_json(bad_price),
            Err(CartError::Json(_))
        ));

        let bad_category = r#"[{"id": "x", "name": "X", "category": "sauce",
            "smallPrice": "1", "mediumPrice": "1", "largePrice": "1"}]"#;
        assert!(matches!(
            ToppingCatalog::from_json(bad_category),
            Err(CartError::Validation(ValidationError::NotAllowed { .. }))
        ));
    }

    #[test]
    fn test_resolve_requests() {
        let catalog = ToppingCatalog::from_json(CATALOG).unwrap();

        let swap = ModificationRequest {
            kind: ModificationKind::Replace,
            topping_id: "pepperoni".into(),
            replaced_topping_id: Some("mushrooms".into()),
            half: Some(PizzaHalf::Right),
        };
        let modification = catalog.resolve(&swap).unwrap();
        assert_eq!(modification.topping.id, "pepperoni");
        assert_eq!(modification.replaced_topping.unwrap().id, "mushrooms");
        assert_eq!(modification.half, Some(PizzaHalf::Right));

        // replaced id is ignored for adds
        let add = ModificationRequest {
            kind: ModificationKind::Add,
            topping_id: "feta".into(),
            replaced_topping_id: Some("mushrooms".into()),
            half: None,
        };
        assert!(catalog.resolve(&add).unwrap().replaced_topping.is_none());

        let unknown = ModificationRequest {
            kind: ModificationKind::Replace,
            topping_id: "feta".into(),
            replaced_topping_id: Some("anchovies".into()),
            half: None,
        };
        assert!(matches!(
            catalog.resolve(&unknown),
            Err(CartError::ToppingNotFound(_))
        ));
    }

    #[test]
    fn test_request_json_shape() {
        let request: ModificationRequest = serde_json::from_str(
            r#"{"type": "replace", "toppingId": "feta", "replacedToppingId": "pepperoni"}"#,
        )
        .unwrap();
        assert_eq!(request.kind, ModificationKind::Replace);
        assert_eq!(request.replaced_topping_id.as_deref(), Some("pepperoni"));
        assert!(request.half.is_none());
    }
}
