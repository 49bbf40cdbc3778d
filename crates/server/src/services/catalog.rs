//! Product catalog CRUD.

use rust_decimal::Decimal;
use serde::Deserialize;

use outfitter_core::{Money, ProductId};

use crate::error::{ApiError, Result};
use crate::models::Product;
use crate::store::Store;

/// New-product request body. `name` and `price` are required; everything
/// else defaults to empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    pub name: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub desc_short: Option<String>,
    pub desc_long: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub img: Option<String>,
}

/// Partial product update. Supplied fields replace the stored ones;
/// array fields are replaced wholesale, not appended.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub desc_short: Option<String>,
    pub desc_long: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub img: Option<String>,
}

/// CRUD over the product collection.
pub struct CatalogService<'a> {
    store: &'a Store,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All products in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.store.read().await?.products)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the name is missing/empty or the
    /// price is missing or negative.
    pub async fn create(&self, input: NewProduct) -> Result<Product> {
        let name = input
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ApiError::Validation("name and price required".to_owned()))?;
        let price = input
            .price
            .ok_or_else(|| ApiError::Validation("name and price required".to_owned()))?;
        let price = Money::new(price).map_err(|e| ApiError::Validation(e.to_string()))?;

        let product = Product {
            id: ProductId::generate(),
            name,
            price,
            desc_short: input.desc_short.unwrap_or_default(),
            desc_long: input.desc_long.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
            categories: input.categories.unwrap_or_default(),
            img: input.img.unwrap_or_default(),
        };

        let created = product.clone();
        self.store
            .update(move |doc| doc.products.push(product))
            .await?;

        Ok(created)
    }

    /// Merge `patch` into the product identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the id is unknown and
    /// `ApiError::Validation` if a supplied price is negative.
    pub async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product> {
        let price = patch
            .price
            .map(Money::new)
            .transpose()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.store
            .update(move |doc| {
                let Some(product) = doc.products.iter_mut().find(|p| &p.id == id) else {
                    return Err(ApiError::NotFound("product not found".to_owned()));
                };

                if let Some(name) = patch.name {
                    product.name = name;
                }
                if let Some(price) = price {
                    product.price = price;
                }
                if let Some(desc_short) = patch.desc_short {
                    product.desc_short = desc_short;
                }
                if let Some(desc_long) = patch.desc_long {
                    product.desc_long = desc_long;
                }
                if let Some(tags) = patch.tags {
                    product.tags = tags;
                }
                if let Some(categories) = patch.categories {
                    product.categories = categories;
                }
                if let Some(img) = patch.img {
                    product.img = img;
                }

                Ok(product.clone())
            })
            .await?
    }

    /// Delete a product by id.
    ///
    /// Deleting an absent id is not an error; the returned flag says
    /// whether a record was actually removed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Store` if the document cannot be written.
    pub async fn delete(&self, id: &ProductId) -> Result<bool> {
        let removed = self
            .store
            .update(move |doc| {
                let before = doc.products.len();
                doc.products.retain(|p| &p.id != id);
                before != doc.products.len()
            })
            .await?;

        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    async fn open_store() -> (TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        (dir, store)
    }

    fn new_product(name: &str, price: &str) -> NewProduct {
        NewProduct {
            name: Some(name.to_owned()),
            price: Some(price.parse().unwrap()),
            ..NewProduct::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_insertion_order() {
        let (_dir, store) = open_store().await;
        let catalog = CatalogService::new(&store);

        catalog.create(new_product("First", "10")).await.unwrap();
        catalog.create(new_product("Second", "20")).await.unwrap();

        let products = catalog.list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "First");
        assert_eq!(products[1].name, "Second");
        assert_ne!(products[0].id, products[1].id);
    }

    #[tokio::test]
    async fn test_create_requires_name_and_price() {
        let (_dir, store) = open_store().await;
        let catalog = CatalogService::new(&store);

        let missing_price = NewProduct {
            name: Some("Radio".to_owned()),
            ..NewProduct::default()
        };
        assert!(matches!(
            catalog.create(missing_price).await,
            Err(ApiError::Validation(_))
        ));

        let missing_name = NewProduct {
            price: Some(Decimal::new(5, 0)),
            ..NewProduct::default()
        };
        assert!(matches!(
            catalog.create(missing_name).await,
            Err(ApiError::Validation(_))
        ));

        // The catalog is unchanged after rejected creates
        assert!(catalog.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let (_dir, store) = open_store().await;
        let catalog = CatalogService::new(&store);

        let input = NewProduct {
            name: Some("Radio".to_owned()),
            price: Some(Decimal::new(-5, 0)),
            ..NewProduct::default()
        };
        assert!(matches!(
            catalog.create(input).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_merges_supplied_fields_only() {
        let (_dir, store) = open_store().await;
        let catalog = CatalogService::new(&store);

        let created = catalog
            .create(NewProduct {
                name: Some("X".to_owned()),
                price: Some(Decimal::new(5, 0)),
                tags: Some(vec!["a".to_owned()]),
                ..NewProduct::default()
            })
            .await
            .unwrap();

        let updated = catalog
            .update(
                &created.id,
                ProductPatch {
                    price: Some(Decimal::new(8, 0)),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "X");
        assert_eq!(updated.price, Money::parse("8").unwrap());
        assert_eq!(updated.tags, vec!["a".to_owned()]);
    }

    #[tokio::test]
    async fn test_update_replaces_arrays_wholesale() {
        let (_dir, store) = open_store().await;
        let catalog = CatalogService::new(&store);

        let created = catalog
            .create(NewProduct {
                name: Some("X".to_owned()),
                price: Some(Decimal::new(5, 0)),
                tags: Some(vec!["a".to_owned(), "b".to_owned()]),
                ..NewProduct::default()
            })
            .await
            .unwrap();

        let updated = catalog
            .update(
                &created.id,
                ProductPatch {
                    tags: Some(vec!["c".to_owned()]),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.tags, vec!["c".to_owned()]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (_dir, store) = open_store().await;
        let catalog = CatalogService::new(&store);

        let result = catalog
            .update(&ProductId::new("missing"), ProductPatch::default())
            .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, store) = open_store().await;
        let catalog = CatalogService::new(&store);

        let created = catalog.create(new_product("Radio", "5")).await.unwrap();

        assert!(catalog.delete(&created.id).await.unwrap());
        assert!(!catalog.delete(&created.id).await.unwrap());
        assert!(!catalog.delete(&ProductId::new("missing")).await.unwrap());
    }
}
