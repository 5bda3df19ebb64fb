//! Catalog resolution: which B2B catalogs a product is published to.

use serde::Deserialize;

use crate::clients::GraphqlClient;
use crate::pricing::{CatalogRef, ProductRef, ResolutionError};

/// Publications fetched per product. Later pages are not requested.
pub const PUBLICATIONS_PAGE_SIZE: u32 = 10;

const PRODUCT_CATALOGS_QUERY: &str = r"
query ProductCatalogs($id: ID!, $first: Int!) {
  product(id: $id) {
    id
    title
    resourcePublicationsV2(first: $first, catalogType: COMPANY_LOCATION) {
      edges {
        node {
          publication {
            catalog {
              id
              title
            }
          }
        }
      }
    }
  }
}
";

/// The catalogs a product is published to, de-duplicated, in response order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicationSet(Vec<CatalogRef>);

impl PublicationSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a catalog; returns `false` if it was already present.
    pub fn insert(&mut self, catalog: CatalogRef) -> bool {
        if self.0.contains(&catalog) {
            return false;
        }
        self.0.push(catalog);
        true
    }

    /// Returns `true` if the product is published to `catalog`.
    #[must_use]
    pub fn contains(&self, catalog: &CatalogRef) -> bool {
        self.0.contains(catalog)
    }

    /// Number of catalogs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the product is published nowhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in response order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogRef> {
        self.0.iter()
    }
}

impl FromIterator<CatalogRef> for PublicationSet {
    fn from_iter<I: IntoIterator<Item = CatalogRef>>(iter: I) -> Self {
        let mut set = Self::new();
        for catalog in iter {
            set.insert(catalog);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PublicationSet {
    type Item = &'a CatalogRef;
    type IntoIter = std::slice::Iter<'a, CatalogRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Deserialize)]
struct ProductCatalogsData {
    product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    #[serde(rename = "resourcePublicationsV2")]
    resource_publications: Option<Connection>,
}

#[derive(Debug, Deserialize)]
struct Connection {
    #[serde(default)]
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    node: Option<PublicationNode>,
}

#[derive(Debug, Deserialize)]
struct PublicationNode {
    publication: Option<Publication>,
}

#[derive(Debug, Deserialize)]
struct Publication {
    catalog: Option<CatalogNode>,
}

#[derive(Debug, Deserialize)]
struct CatalogNode {
    id: String,
    #[serde(default)]
    title: Option<String>,
}

/// Resolves the company-location catalogs a product is published to.
#[derive(Debug, Clone, Copy)]
pub struct CatalogResolver<'a> {
    client: &'a GraphqlClient,
}

impl<'a> CatalogResolver<'a> {
    /// Creates a resolver issuing queries through `client`.
    #[must_use]
    pub const fn new(client: &'a GraphqlClient) -> Self {
        Self { client }
    }

    /// Returns the catalogs `product` is published to.
    ///
    /// Only the first [`PUBLICATIONS_PAGE_SIZE`] publications are considered.
    /// Edges whose publication or catalog is null are skipped.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::Graphql`] if the query fails
    /// - [`ResolutionError::ProductNotFound`] if `product` is null
    /// - [`ResolutionError::MissingField`] if `resourcePublicationsV2` is absent
    /// - [`ResolutionError::InvalidCatalogId`] for a non-catalog ID
    pub async fn resolve_catalogs(
        &self,
        product: &ProductRef,
    ) -> Result<PublicationSet, ResolutionError> {
        let variables = serde_json::json!({
            "id": product.product_gid(),
            "first": PUBLICATIONS_PAGE_SIZE,
        });
        let data = self
            .client
            .execute(PRODUCT_CATALOGS_QUERY, Some(variables))
            .await?;

        let publications = Self::parse(product, data)?;
        tracing::debug!(
            product_id = product.product_id(),
            catalogs = publications.len(),
            "Resolved product catalogs"
        );
        Ok(publications)
    }

    fn parse(
        product: &ProductRef,
        data: serde_json::Value,
    ) -> Result<PublicationSet, ResolutionError> {
        let data: ProductCatalogsData =
            serde_json::from_value(data).map_err(|e| ResolutionError::MalformedResponse {
                message: e.to_string(),
            })?;

        let node = data.product.ok_or_else(|| ResolutionError::ProductNotFound {
            product_id: product.product_id().to_string(),
        })?;

        let connection = node
            .resource_publications
            .ok_or(ResolutionError::MissingField {
                path: "product.resourcePublicationsV2",
            })?;

        connection
            .edges
            .into_iter()
            .filter_map(|edge| edge.node?.publication?.catalog)
            .map(|catalog| {
                tracing::trace!(id = %catalog.id, title = ?catalog.title, "Product publication");
                CatalogRef::parse(&catalog.id)
                    .map_err(|_| ResolutionError::InvalidCatalogId { id: catalog.id })
            })
            .collect()
    }
}
