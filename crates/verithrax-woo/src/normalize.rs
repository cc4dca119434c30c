//! Conversion from WooCommerce REST shapes to [`verithrax_core::Product`].

use verithrax_core::{Product, ProductAttribute};

use crate::types::{WooAttribute, WooProduct};

/// Normalizes a raw [`WooProduct`] into the core [`Product`].
#[must_use]
pub fn normalize_product(product: WooProduct) -> Product {
    let image_url = product
        .images
        .into_iter()
        .next()
        .map(|img| img.src)
        .filter(|src| !src.is_empty());

    Product {
        id: product.id,
        title: product.name,
        content: product.description,
        regular_price: product.regular_price,
        sale_price: product.sale_price,
        price_html: product.price_html,
        permalink: product.permalink,
        image_url,
        attributes: product
            .attributes
            .into_iter()
            .map(normalize_attribute)
            .collect(),
    }
}

fn normalize_attribute(attr: WooAttribute) -> ProductAttribute {
    if attr.id == 0 {
        return ProductAttribute::Plain {
            name: attr.name,
            options: attr.options,
        };
    }

    let taxonomy = attr
        .slug
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("pa_{}", attr.name.to_lowercase().replace(' ', "-")));

    ProductAttribute::Taxonomy {
        taxonomy,
        label: attr.name,
        terms: attr.options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WooImage;

    fn make_product(attributes: Vec<WooAttribute>, images: Vec<WooImage>) -> WooProduct {
        WooProduct {
            id: 42,
            name: "Blue Mug".to_owned(),
            permalink: "https://shop.example.com/product/blue-mug/".to_owned(),
            description: "<p>Hand thrown.</p>".to_owned(),
            regular_price: "10.00".to_owned(),
            sale_price: String::new(),
            price_html: "<span>$10.00</span>".to_owned(),
            images,
            attributes,
        }
    }

    fn attribute(id: i64, name: &str, slug: Option<&str>, options: &[&str]) -> WooAttribute {
        WooAttribute {
            id,
            name: name.to_owned(),
            slug: slug.map(str::to_owned),
            position: None,
            options: options.iter().map(|o| (*o).to_owned()).collect(),
        }
    }

    #[test]
    fn normalize_product_copies_scalar_fields() {
        let product = normalize_product(make_product(vec![], vec![]));
        assert_eq!(product.id, 42);
        assert_eq!(product.title, "Blue Mug");
        assert_eq!(product.content, "<p>Hand thrown.</p>");
        assert_eq!(product.regular_price, "10.00");
        assert_eq!(product.sale_price, "");
        assert_eq!(product.permalink, "https://shop.example.com/product/blue-mug/");
    }

    #[test]
    fn normalize_product_uses_first_image() {
        let images = vec![
            WooImage {
                id: Some(1),
                src: "https://cdn.example.com/a.jpg".to_owned(),
                alt: None,
            },
            WooImage {
                id: Some(2),
                src: "https://cdn.example.com/b.jpg".to_owned(),
                alt: None,
            },
        ];
        let product = normalize_product(make_product(vec![], images));
        assert_eq!(product.image_url.as_deref(), Some("https://cdn.example.com/a.jpg"));
    }

    #[test]
    fn normalize_product_without_images_has_no_image() {
        let product = normalize_product(make_product(vec![], vec![]));
        assert!(product.image_url.is_none());
    }

    #[test]
    fn zero_id_attribute_is_plain() {
        let product = normalize_product(make_product(
            vec![attribute(0, "Color", None, &["Blue", "Green"])],
            vec![],
        ));
        assert_eq!(
            product.attributes,
            vec![ProductAttribute::Plain {
                name: "Color".to_owned(),
                options: vec!["Blue".to_owned(), "Green".to_owned()],
            }]
        );
    }

    #[test]
    fn non_zero_id_attribute_is_taxonomy() {
        let product = normalize_product(make_product(
            vec![attribute(3, "Material", Some("pa_material"), &["Cotton", "Wool"])],
            vec![],
        ));
        assert_eq!(
            product.attributes,
            vec![ProductAttribute::Taxonomy {
                taxonomy: "pa_material".to_owned(),
                label: "Material".to_owned(),
                terms: vec!["Cotton".to_owned(), "Wool".to_owned()],
            }]
        );
    }

    #[test]
    fn taxonomy_slug_is_derived_when_missing() {
        let product = normalize_product(make_product(
            vec![attribute(5, "Glaze Finish", None, &[])],
            vec![],
        ));
        match &product.attributes[0] {
            ProductAttribute::Taxonomy { taxonomy, .. } => {
                assert_eq!(taxonomy, "pa_glaze-finish");
            }
            other => panic!("expected taxonomy attribute, got: {other:?}"),
        }
    }
}
