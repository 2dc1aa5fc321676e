use super::*;
use crate::fakes::{item, sample_catalog};

#[test]
fn renders_one_card_per_item_with_labels() {
    let catalog = sample_catalog();
    let items = catalog.items("Starters").expect("starters");
    let grid = render_grid(Some(items));

    assert_eq!(grid.cards().len(), items.len());
    let card = grid.card(0).expect("card");
    assert_eq!(card.title, "Bruschetta");
    assert_eq!(card.description, "Tomato and basil");
    assert_eq!(card.price_label, "USD 6.50");
    assert_eq!(card.action_label, AR_ACTION_LABEL);
    assert_eq!(
        card.image,
        CardImage::Thumbnail {
            src: "/img/bruschetta.jpg".to_string(),
            alt: "Bruschetta".to_string(),
        }
    );
}

#[test]
fn empty_or_missing_list_shows_notice() {
    for grid in [render_grid(Some(&[])), render_grid(None)] {
        assert_eq!(
            grid,
            GridView::NoItems {
                message: NO_ITEMS_MESSAGE
            }
        );
        assert!(grid.is_empty());
        assert!(grid.card(0).is_none());
    }
}

#[test]
fn missing_thumbnail_hides_image_only() {
    let catalog = sample_catalog();
    let grid = render_grid(catalog.items("Starters"));
    let olives = grid.card(1).expect("olives");

    assert_eq!(olives.image, CardImage::Hidden);
    assert_eq!(olives.title, "Olives");
    assert_eq!(olives.price_label, "USD 4.00");
}

#[test]
fn card_data_decodes_back_to_source_item() {
    let source = item("burger", Some("/models/burger.glb"), Some("/models/burger.usdz"));
    let grid = render_grid(Some(std::slice::from_ref(&source)));

    let decoded = grid.card(0).expect("card").decode_item().expect("item");
    assert_eq!(decoded, source);
}

#[test]
fn garbage_item_data_is_malformed() {
    assert!(decode_item_data("{\"name\": ").is_err());
    assert!(decode_item_data("").is_err());
    assert!(decode_item_data("{\"desc\": \"nameless\"}").is_err());
}
