//! Product catalog endpoints

use hyper::StatusCode;
use serde::Serialize;

use crate::data::{Catalog, Product};
use crate::http::{Request, Response};

/// Listing view of a product: description and price are left out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary<'a> {
    pub id: u32,
    pub name: &'a str,
    pub image: &'a str,
}

impl<'a> From<&'a Product> for ProductSummary<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: product.id,
            name: &product.name,
            image: &product.image,
        }
    }
}

pub fn summaries(catalog: &Catalog) -> Vec<ProductSummary<'_>> {
    catalog.products.iter().map(ProductSummary::from).collect()
}

/// `GET /api/products`
pub fn list(catalog: &Catalog) -> Response {
    Response::json(StatusCode::OK, &summaries(catalog))
}

/// `GET /api/products/:productID`
///
/// Looks the product up by the parsed parameter. Missing, non-numeric and
/// unknown ids all answer 404.
pub fn single(catalog: &Catalog, req: &Request) -> Response {
    let product = req
        .param("productID")
        .and_then(|id| id.parse::<u32>().ok())
        .and_then(|id| catalog.product(id));

    match product {
        Some(product) => Response::json(StatusCode::OK, product),
        None => Response::text(StatusCode::NOT_FOUND, "Product Does Not Exist"),
    }
}
