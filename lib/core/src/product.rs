use serde::{Deserialize, Serialize};

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Brand", default)]
    pub brand: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Tags", default)]
    pub tags: String,
    /// `None` when the source cell was empty
    #[serde(rename = "Rating", default)]
    pub rating: Option<f64>,
    #[serde(rename = "ImageURL", default)]
    pub image_url: String,
}

impl Product {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Text used for indexing: name, category, brand, description and tags,
    /// joined by single spaces in that order. Empty fields still contribute
    /// their separator.
    pub fn combined_text(&self) -> String {
        [
            self.name.as_str(),
            self.category.as_str(),
            self.brand.as_str(),
            self.description.as_str(),
            self.tags.as_str(),
        ]
        .join(" ")
    }

    /// Caller-facing projection
    #[inline]
    pub fn view(&self) -> ProductView {
        ProductView {
            name: self.name.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
            rating: self.rating,
            image_url: self.image_url.clone(),
        }
    }
}

/// The subset of a product returned to callers of `recommend` / `smart_search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "ImageURL")]
    pub image_url: String,
}

/// A neighbour of a query product: catalog position plus cosine score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredProduct {
    pub index: usize,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_text_order() {
        let p = Product::new("Red Shoe")
            .with_category("Footwear")
            .with_brand("Acme")
            .with_description("A red running shoe")
            .with_tags("red, running");
        assert_eq!(p.combined_text(), "Red Shoe Footwear Acme A red running shoe red, running");
    }

    #[test]
    fn test_combined_text_keeps_separators_for_empty_fields() {
        let p = Product::new("Lamp");
        assert_eq!(p.combined_text(), "Lamp    ");
    }

    #[test]
    fn test_view_serializes_with_catalog_headers() {
        let p = Product::new("Lamp")
            .with_category("Home")
            .with_brand("Lumo")
            .with_rating(4.5)
            .with_image_url("http://img/lamp.png");
        let json = serde_json::to_value(p.view()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Name": "Lamp",
                "Category": "Home",
                "Brand": "Lumo",
                "Rating": 4.5,
                "ImageURL": "http://img/lamp.png"
            })
        );
    }
}
