//! Built-in essentials catalog data.

use super::CatalogGroup;

pub(super) const ESSENTIALS: &[CatalogGroup] = &[
    CatalogGroup {
        name: "Cleaning",
        items: &[
            "Dish soap",
            "Sponge",
            "Trash bags",
            "Paper towels",
            "All-purpose cleaner",
            "Glass cleaner",
            "Laundry detergent",
            "Fabric softener",
            "Bleach",
            "Toilet cleaner",
            "Floor cleaner",
        ],
    },
    CatalogGroup {
        name: "Food basics",
        items: &[
            "Pasta",
            "Rice",
            "Canned tomatoes",
            "Beans",
            "Tuna",
            "Eggs",
            "Milk",
            "Butter",
            "Cheese",
            "Bread",
            "Olive oil",
            "Coffee",
            "Tea",
            "Sugar",
            "Salt",
            "Pepper",
        ],
    },
    CatalogGroup {
        name: "Fresh",
        items: &["Fruit", "Vegetables", "Yogurt", "Chicken", "Fish"],
    },
    CatalogGroup {
        name: "Bathroom",
        items: &[
            "Toilet paper",
            "Hand soap",
            "Shampoo",
            "Toothpaste",
            "Deodorant",
        ],
    },
    CatalogGroup {
        name: "Home",
        items: &["Batteries", "Light bulbs", "Aluminum foil", "Baking paper"],
    },
];
