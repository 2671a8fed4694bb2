//! Default Product Fixtures

use rustc_hash::FxHashMap;

use crate::domain::catalog::models::{Product, ProductUuid};

fn spec_map(entries: &[(&str, &str)]) -> FxHashMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

/// The six products seeded into an empty catalog. Prices are minor units.
#[must_use]
pub fn default_products() -> Vec<Product> {
    vec![
        Product {
            uuid: ProductUuid::new(),
            name: "Diamond Solitaire Ring".to_string(),
            price: 2999_00,
            original_price: Some(3499_00),
            description: "Stunning 1-carat diamond solitaire ring in 18k white gold setting."
                .to_string(),
            category: "Rings".to_string(),
            image: "https://images.pexels.com/photos/1927449/pexels-photo-1927449.jpeg"
                .to_string(),
            images: None,
            in_stock: true,
            featured: true,
            new_arrival: true,
            discount: Some(15),
            rating: 4.8,
            reviews: 124,
            specifications: spec_map(&[
                ("Metal", "18k White Gold"),
                ("Diamond", "1 Carat"),
                ("Clarity", "VS1"),
                ("Color", "F"),
            ]),
        },
        Product {
            uuid: ProductUuid::new(),
            name: "Pearl Drop Earrings".to_string(),
            price: 599_00,
            original_price: None,
            description: "Elegant freshwater pearl drop earrings with gold accents.".to_string(),
            category: "Earrings".to_string(),
            image: "https://images.pexels.com/photos/1927428/pexels-photo-1927428.jpeg"
                .to_string(),
            images: None,
            in_stock: true,
            featured: true,
            new_arrival: false,
            discount: None,
            rating: 4.6,
            reviews: 89,
            specifications: spec_map(&[
                ("Metal", "14k Yellow Gold"),
                ("Pearl", "Freshwater"),
                ("Size", "8-9mm"),
            ]),
        },
        Product {
            uuid: ProductUuid::new(),
            name: "Tennis Bracelet".to_string(),
            price: 1299_00,
            original_price: Some(1499_00),
            description: "Classic diamond tennis bracelet with brilliant-cut diamonds."
                .to_string(),
            category: "Bracelets".to_string(),
            image: "https://images.pexels.com/photos/1927435/pexels-photo-1927435.jpeg"
                .to_string(),
            images: None,
            in_stock: true,
            featured: false,
            new_arrival: true,
            discount: Some(13),
            rating: 4.9,
            reviews: 156,
            specifications: spec_map(&[
                ("Metal", "18k White Gold"),
                ("Diamonds", "2.5 Total Carats"),
                ("Length", "7 inches"),
            ]),
        },
        Product {
            uuid: ProductUuid::new(),
            name: "Sapphire Pendant Necklace".to_string(),
            price: 899_00,
            original_price: None,
            description: "Beautiful blue sapphire pendant on delicate gold chain.".to_string(),
            category: "Necklaces".to_string(),
            image: "https://images.pexels.com/photos/1927440/pexels-photo-1927440.jpeg"
                .to_string(),
            images: None,
            in_stock: true,
            featured: true,
            new_arrival: false,
            discount: None,
            rating: 4.7,
            reviews: 73,
            specifications: spec_map(&[
                ("Metal", "14k Yellow Gold"),
                ("Gemstone", "Blue Sapphire"),
                ("Chain Length", "18 inches"),
            ]),
        },
        Product {
            uuid: ProductUuid::new(),
            name: "Rose Gold Wedding Band".to_string(),
            price: 799_00,
            original_price: None,
            description: "Elegant rose gold wedding band with subtle texture.".to_string(),
            category: "Rings".to_string(),
            image: "https://images.pexels.com/photos/1927451/pexels-photo-1927451.jpeg"
                .to_string(),
            images: None,
            in_stock: true,
            featured: false,
            new_arrival: true,
            discount: None,
            rating: 4.5,
            reviews: 92,
            specifications: spec_map(&[
                ("Metal", "14k Rose Gold"),
                ("Width", "4mm"),
                ("Finish", "Brushed"),
            ]),
        },
        Product {
            uuid: ProductUuid::new(),
            name: "Emerald Stud Earrings".to_string(),
            price: 1199_00,
            original_price: None,
            description: "Vibrant emerald stud earrings in platinum setting.".to_string(),
            category: "Earrings".to_string(),
            image: "https://images.pexels.com/photos/1927430/pexels-photo-1927430.jpeg"
                .to_string(),
            images: None,
            in_stock: true,
            featured: true,
            new_arrival: false,
            discount: None,
            rating: 4.8,
            reviews: 67,
            specifications: spec_map(&[
                ("Metal", "Platinum"),
                ("Gemstone", "Natural Emerald"),
                ("Size", "6mm"),
            ]),
        },
    ]
}
