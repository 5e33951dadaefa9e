//! Product catalog loading
//!
//! Reads a CSV dataset into an ordered, immutable list of products. Row order
//! in the file becomes the product's index for the lifetime of the process.

use crate::{Error, Product, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Columns every catalog file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Name",
    "Category",
    "Brand",
    "Description",
    "Tags",
    "Rating",
    "ImageURL",
];

/// Raw CSV row; empty cells come through as `None`
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Brand")]
    brand: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Tags")]
    tags: Option<String>,
    #[serde(rename = "Rating")]
    rating: Option<String>,
    #[serde(rename = "ImageURL")]
    image_url: Option<String>,
}

impl CatalogRow {
    fn into_product(self, row: usize) -> Result<Product> {
        let rating = match self.rating.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<f64>().map_err(|_| Error::InvalidRating {
                row,
                value: raw.to_string(),
            })?),
        };

        Ok(Product {
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            rating,
            image_url: self.image_url.unwrap_or_default(),
        })
    }
}

/// Ordered, read-only product list
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a CSV file. Any failure is fatal; there is no
    /// partially loaded catalog.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let start = Instant::now();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(
            "Loaded {} products from {:?} in {:?}",
            catalog.len(),
            path,
            start.elapsed()
        );
        Ok(catalog)
    }

    /// Load a catalog from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::MissingColumn(column.to_string()));
            }
        }

        let mut products = Vec::new();
        for (row, record) in reader.deserialize::<CatalogRow>().enumerate() {
            products.push(record?.into_product(row)?);
        }
        debug!("Parsed {} catalog rows", products.len());

        Ok(Self { products })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.name.as_str()).collect()
    }

    /// Position of the product whose name equals `name` exactly
    /// (case-sensitive). Names are not guaranteed unique: the first
    /// occurrence wins.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.products.iter().position(|p| p.name == name)
    }

    /// Position of the first product whose name contains `query`,
    /// ignoring case. `query` is a plain substring, not a pattern.
    pub fn find_containing(&self, query: &str) -> Option<usize> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .position(|p| p.name.to_lowercase().contains(&needle))
    }

    /// Combined indexing text for every product, in catalog order
    pub fn combined_texts(&self) -> Vec<String> {
        self.products.iter().map(Product::combined_text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Category,Brand,Description,Tags,Rating,ImageURL";

    #[test]
    fn test_load_fills_missing_text_with_empty_string() {
        let data = format!("{HEADER}\nLamp,,Lumo,,,4.5,\n");
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 1);
        let lamp = catalog.get(0).unwrap();
        assert_eq!(lamp.name, "Lamp");
        assert_eq!(lamp.category, "");
        assert_eq!(lamp.brand, "Lumo");
        assert_eq!(lamp.description, "");
        assert_eq!(lamp.rating, Some(4.5));
        assert_eq!(lamp.image_url, "");
    }

    #[test]
    fn test_load_preserves_row_order() {
        let data = format!("{HEADER}\nA,c,b,d,t,1,u\nB,c,b,d,t,2,u\nC,c,b,d,t,3,u\n");
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_extra_columns_and_column_order_are_ignored() {
        let data = "ProdID,ImageURL,Rating,Tags,Description,Brand,Category,Name,ReviewCount\n\
                    7,http://x,3.0,soft,cozy,Knit,Apparel,Sweater,12\n";
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        let sweater = catalog.get(0).unwrap();
        assert_eq!(sweater.name, "Sweater");
        assert_eq!(sweater.brand, "Knit");
        assert_eq!(sweater.image_url, "http://x");
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "Name,Category,Brand,Description,Tags,Rating\nA,c,b,d,t,1\n";
        let err = Catalog::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "ImageURL"));
    }

    #[test]
    fn test_empty_rating_is_none_and_bad_rating_is_fatal() {
        let data = format!("{HEADER}\nA,c,b,d,t,,u\n");
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.get(0).unwrap().rating, None);

        let data = format!("{HEADER}\nA,c,b,d,t,1,u\nB,c,b,d,t,great,u\n");
        let err = Catalog::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidRating { row: 1, .. }));
    }

    #[test]
    fn test_short_rows_fill_missing_cells() {
        let data = format!("{HEADER}\nLamp,Home,Lumo,desc,tags,4.0,u\nMug,Kitchen\n");
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let mug = catalog.get(1).unwrap();
        assert_eq!(mug.name, "Mug");
        assert_eq!(mug.category, "Kitchen");
        assert_eq!(mug.brand, "");
        assert_eq!(mug.tags, "");
        assert_eq!(mug.rating, None);
        assert_eq!(mug.image_url, "");
        assert_eq!(mug.combined_text(), "Mug Kitchen   ");
    }

    #[test]
    fn test_csv_error_message_is_not_prefixed_twice() {
        let mut reader = csv::ReaderBuilder::new().from_reader("a,b\n1,2,3\n".as_bytes());
        let csv_err = reader.records().find_map(|r| r.err()).unwrap();
        let expected = csv_err.to_string();

        let err = Error::from(csv_err);
        assert_eq!(err.to_string(), expected);
        assert!(!expected.contains("CSV error: CSV error"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Catalog::from_csv_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_position_first_occurrence_wins() {
        let catalog = Catalog::from_products(vec![
            Product::new("Mug").with_brand("First"),
            Product::new("Plate"),
            Product::new("Mug").with_brand("Second"),
        ]);
        assert_eq!(catalog.position("Mug"), Some(0));
        assert_eq!(catalog.position("mug"), None);
        assert_eq!(catalog.position("Bowl"), None);
    }

    #[test]
    fn test_find_containing_is_case_insensitive_substring() {
        let catalog = Catalog::from_products(vec![
            Product::new("Blue Shoe"),
            Product::new("Red Shoe"),
            Product::new("Red Hat"),
        ]);
        assert_eq!(catalog.find_containing("RED"), Some(1));
        assert_eq!(catalog.find_containing("shoe"), Some(0));
        assert_eq!(catalog.find_containing("r.d"), None);
        assert_eq!(catalog.find_containing("scarf"), None);
    }
}
