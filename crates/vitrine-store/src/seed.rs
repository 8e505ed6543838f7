//! Sample catalog loaded into a fresh store.

use chrono::{DateTime, Utc};
use vitrine_commerce::{Category, Currency, Money, Product, ProductId};

struct Sample {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    discount_price: Option<f64>,
    image: &'static str,
    category: Category,
    featured: bool,
}

const SAMPLES: [Sample; 6] = [
    Sample {
        id: "1",
        name: "Vestido Floral Verão",
        description: "Vestido leve e florido perfeito para o verão.",
        price: 259.90,
        discount_price: None,
        image: "https://images.unsplash.com/photo-1612336307429-8a898d10e223?q=80&w=1974&auto=format&fit=crop",
        category: Category::Vestidos,
        featured: true,
    },
    Sample {
        id: "2",
        name: "Blusa de Seda",
        description: "Blusa elegante de seda para ocasiões especiais.",
        price: 189.90,
        discount_price: None,
        image: "https://images.unsplash.com/photo-1559563458-527698bf5295?q=80&w=1770&auto=format&fit=crop",
        category: Category::Blusas,
        featured: false,
    },
    Sample {
        id: "3",
        name: "Saia Midi Plissada",
        description: "Saia midi plissada em tecido leve e confortável.",
        price: 179.90,
        discount_price: None,
        image: "https://images.unsplash.com/photo-1583496661160-fb5886a0aaaa?q=80&w=1964&auto=format&fit=crop",
        category: Category::Saias,
        featured: true,
    },
    Sample {
        id: "4",
        name: "Calça de Alfaiataria",
        description: "Calça de alfaiataria de alta qualidade para um visual elegante.",
        price: 229.90,
        discount_price: None,
        image: "https://images.unsplash.com/photo-1506629082955-511b1aa562c8?q=80&w=1974&auto=format&fit=crop",
        category: Category::Calcas,
        featured: false,
    },
    Sample {
        id: "5",
        name: "Colar Dourado",
        description: "Colar dourado com pedras delicadas para complementar seu look.",
        price: 89.90,
        discount_price: None,
        image: "https://images.unsplash.com/photo-1599643478518-a784e5dc4c8f?q=80&w=1887&auto=format&fit=crop",
        category: Category::Acessorios,
        featured: true,
    },
    Sample {
        id: "6",
        name: "Vestido de Festa",
        description: "Vestido elegante para festas e eventos especiais.",
        price: 359.90,
        discount_price: Some(299.90),
        image: "https://images.unsplash.com/photo-1566174053879-31528523f8ae?q=80&w=1908&auto=format&fit=crop",
        category: Category::Vestidos,
        featured: true,
    },
];

/// The six sample products, all stamped with the same creation instant.
pub fn sample_products(currency: Currency, created_at: DateTime<Utc>) -> Vec<Product> {
    SAMPLES
        .iter()
        .map(|s| Product {
            id: ProductId::new(s.id),
            name: s.name.to_string(),
            description: s.description.to_string(),
            price: Money::from_decimal(s.price, currency),
            discount_price: s.discount_price.map(|d| Money::from_decimal(d, currency)),
            image: s.image.to_string(),
            category: s.category,
            featured: s.featured,
            in_stock: true,
            created_at,
        })
        .collect()
}
